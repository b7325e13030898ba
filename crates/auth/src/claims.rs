use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mesa_core::UserId;

use crate::{Identity, RoleName};

/// Session token claims model (transport-agnostic).
///
/// Timestamps serialize as epoch seconds so JWT codecs can read `exp`/`iat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the identity's email.
    pub sub: String,

    pub user_id: UserId,

    pub role: RoleName,

    pub first_name: String,

    pub last_name: String,

    /// Issued-at timestamp.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub iat: DateTime<Utc>,

    /// Expiration timestamp.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl SessionClaims {
    /// Claims for `identity`, valid from `issued_at` for `lifetime`.
    pub fn for_identity(identity: &Identity, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            sub: identity.email().to_string(),
            user_id: identity.id(),
            role: identity.role().name,
            first_name: identity.first_name().to_string(),
            last_name: identity.last_name().to_string(),
            iat: issued_at,
            exp: issued_at + lifetime,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time window of session claims.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// belongs to the token codec.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.iat {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}
