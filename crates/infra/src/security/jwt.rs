//! HS256 JWT codec for session tokens.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use mesa_auth::{PortError, SessionClaims, TokenCodec, validate_claims};

/// Signs and verifies [`SessionClaims`] as HS256 JWTs.
///
/// A token is valid only with an intact signature and `iat <= now < exp`
/// (no leeway).
#[derive(Clone)]
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Hs256TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl core::fmt::Debug for Hs256TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn issue(&self, claims: &SessionClaims) -> Result<String, PortError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| PortError::backend(format!("token signing failed: {e}")))
    }

    fn is_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        match self.claims(token) {
            Ok(claims) => validate_claims(&claims, now).is_ok(),
            Err(_) => false,
        }
    }

    fn claims(&self, token: &str) -> Result<SessionClaims, PortError> {
        jsonwebtoken::decode::<SessionClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| PortError::backend(format!("token rejected: {e}")))
    }
}
