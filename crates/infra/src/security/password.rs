//! Password hashing and verification using Argon2id.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use mesa_auth::{PasswordHasher, PortError};

/// Argon2id (default parameters) with a random 16-byte salt per password.
///
/// Digests are PHC-formatted strings, safe for storage as-is.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, raw: &str) -> Result<String, PortError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PortError::backend(format!("password hashing failed: {e}")))
    }

    /// Verification is constant-time; unreadable digests never match.
    fn matches(&self, raw: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            tracing::warn!("stored password digest is not a PHC string");
            return false;
        };
        self.argon2.verify_password(raw.as_bytes(), &parsed).is_ok()
    }
}
