//! Authentication use case: credential exchange and token introspection.
//!
//! Both operations fail closed. Every failure cause (unknown email, wrong
//! password, expired, tampered or malformed token, identity gone since
//! issuance) surfaces as [`IdentityError::InvalidCredentials`]. Only a
//! signing failure after a correct password is reported as infrastructure.

use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::{
    Identity, IdentityError, IdentityResult, IdentityStore, PasswordHasher, SessionClaims,
    TokenCodec,
};

/// Plaintext behind the digest verified for unknown emails.
const TIMING_EQUALIZER: &str = "mesa-unknown-account";

#[derive(Clone)]
pub struct AuthenticationService {
    store: Arc<dyn IdentityStore>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<dyn TokenCodec>,
    token_lifetime: Duration,
    /// Hashed once, on the first login for an unknown email.
    dummy_digest: Arc<OnceLock<String>>,
}

impl AuthenticationService {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<dyn TokenCodec>,
        token_lifetime: Duration,
    ) -> Self {
        Self {
            store,
            hasher,
            codec,
            token_lifetime,
            dummy_digest: Arc::new(OnceLock::new()),
        }
    }

    /// Exchange email + password for a signed bearer token.
    pub fn authenticate(&self, email: &str, password: &str) -> IdentityResult<String> {
        self.authenticate_at(email, password, Utc::now())
    }

    /// Resolve a bearer token back to the identity it was issued for.
    ///
    /// The identity is re-read from the store rather than rebuilt from the
    /// embedded claims, so changes since issuance are honored.
    pub fn validate_token(&self, token: &str) -> IdentityResult<Identity> {
        self.validate_token_at(token, Utc::now())
    }

    fn authenticate_at(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> IdentityResult<String> {
        let identity = match self.store.find_by_email(email) {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                // Same hash work as a wrong password, so timing does not reveal the email.
                self.verify_dummy(password);
                return Err(rejected("login"));
            }
            Err(e) => {
                warn!(error = %e, "identity lookup failed during login");
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !self.hasher.matches(password, identity.password_hash()) {
            return Err(rejected("login"));
        }

        let claims = SessionClaims::for_identity(&identity, now, self.token_lifetime);
        let token = self.codec.issue(&claims).map_err(|e| {
            warn!(error = %e, "session token signing failed");
            IdentityError::Infrastructure(e.to_string())
        })?;

        debug!(user_id = %identity.id(), "session token issued");
        Ok(token)
    }

    fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> IdentityResult<Identity> {
        if !self.codec.is_valid(token, now) {
            return Err(rejected("token introspection"));
        }

        let claims = self.codec.claims(token).map_err(|_| rejected("token introspection"))?;

        match self.store.find_by_email(&claims.sub) {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => Err(rejected("token introspection")),
            Err(e) => {
                warn!(error = %e, "identity lookup failed during token introspection");
                Err(IdentityError::InvalidCredentials)
            }
        }
    }

    fn verify_dummy(&self, password: &str) {
        let digest = self.dummy_digest.get_or_init(|| {
            self.hasher.hash(TIMING_EQUALIZER).unwrap_or_else(|e| {
                warn!(error = %e, "could not hash timing digest");
                String::new()
            })
        });
        let _ = self.hasher.matches(password, digest);
    }
}

fn rejected(stage: &'static str) -> IdentityError {
    debug!(stage, "credentials rejected");
    IdentityError::InvalidCredentials
}
