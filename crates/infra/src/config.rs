//! Configuration loading and representation.
//!
//! Everything comes from environment variables. `from_lookup` takes any
//! key → value source so parsing can be tested without touching the process
//! environment.

use std::net::SocketAddr;

use chrono::{Duration, NaiveDate};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TOKEN_LIFETIME_MS: i64 = 86_400_000;
/// HS256 keys shorter than this are rejected.
pub const MIN_JWT_SECRET_LEN: usize = 32;

const DEV_JWT_SECRET: &str = "mesa-insecure-development-secret-change-me";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("JWT_SECRET must be at least 32 bytes")]
    WeakJwtSecret,
}

/// Default administrator created on first start.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub identity_document: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
}

impl core::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("identity_document", &self.identity_document)
            .field("phone", &self.phone)
            .field("birth_date", &self.birth_date)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_lifetime: Duration,
    /// `None` when `ADMIN_EMAIL` or `ADMIN_PASSWORD` is unset.
    pub admin: Option<AdminConfig>,
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("token_lifetime", &self.token_lifetime)
            .field("admin", &self.admin)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("MESA_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| invalid("MESA_BIND_ADDR", e))?;

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::WeakJwtSecret);
        }

        let lifetime_ms = match lookup("JWT_EXPIRATION_MS") {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|e| invalid("JWT_EXPIRATION_MS", e))?,
            None => DEFAULT_TOKEN_LIFETIME_MS,
        };
        if lifetime_ms <= 0 {
            return Err(invalid("JWT_EXPIRATION_MS", "must be positive"));
        }

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_lifetime: Duration::milliseconds(lifetime_ms),
            admin: admin_from_lookup(&lookup)?,
        })
    }
}

fn admin_from_lookup(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<AdminConfig>, ConfigError> {
    let (Some(email), Some(password)) = (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) else {
        return Ok(None);
    };

    let birth_date = lookup("ADMIN_BIRTH_DATE")
        .map(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d"))
        .transpose()
        .map_err(|e| invalid("ADMIN_BIRTH_DATE", e))?;

    Ok(Some(AdminConfig {
        email,
        password,
        first_name: lookup("ADMIN_FIRST_NAME").unwrap_or_else(|| "Admin".to_string()),
        last_name: lookup("ADMIN_LAST_NAME").unwrap_or_else(|| "System".to_string()),
        identity_document: lookup("ADMIN_IDENTITY_DOCUMENT").unwrap_or_else(|| "0".to_string()),
        phone: lookup("ADMIN_PHONE").unwrap_or_default(),
        birth_date,
    }))
}

fn invalid(key: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.token_lifetime, Duration::hours(24));
        assert!(config.admin.is_none());
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("MESA_BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", "0123456789abcdef0123456789abcdef"),
            ("JWT_EXPIRATION_MS", "60000"),
            ("ADMIN_EMAIL", "admin@mesa.io"),
            ("ADMIN_PASSWORD", "admin123"),
            ("ADMIN_BIRTH_DATE", "1985-03-01"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.token_lifetime, Duration::minutes(1));
        let admin = config.admin.unwrap();
        assert_eq!(admin.email, "admin@mesa.io");
        assert_eq!(admin.birth_date, NaiveDate::from_ymd_opt(1985, 3, 1));
        assert!(!format!("{admin:?}").contains("admin123"));
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "short")])).unwrap_err();
        assert_eq!(err, ConfigError::WeakJwtSecret);
    }

    #[test]
    fn malformed_values_name_their_key() {
        let err = AppConfig::from_lookup(lookup(&[("JWT_EXPIRATION_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_EXPIRATION_MS", .. }));

        let err = AppConfig::from_lookup(lookup(&[("JWT_EXPIRATION_MS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "JWT_EXPIRATION_MS", .. }));

        let err = AppConfig::from_lookup(lookup(&[
            ("ADMIN_EMAIL", "admin@mesa.io"),
            ("ADMIN_PASSWORD", "x"),
            ("ADMIN_BIRTH_DATE", "01/03/1985"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ADMIN_BIRTH_DATE", .. }));
    }
}
