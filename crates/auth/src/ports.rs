//! Collaborator contracts consumed by the use cases.
//!
//! Implementations live outside this crate (see `mesa-infra`). Use cases hold
//! them as `Arc<dyn Trait>` and receive them through their constructors.

use chrono::{DateTime, Utc};

use mesa_core::UserId;

use crate::{Identity, NewIdentity, PortError, Role, RoleName, SessionClaims};

/// Identity persistence.
///
/// Implementations must enforce email and identity-document uniqueness on
/// `save` and report a collision as [`PortError::Conflict`]; the use case's
/// existence checks are not atomic with the write.
pub trait IdentityStore: Send + Sync {
    /// Persist a new identity, assigning its id.
    fn save(&self, identity: NewIdentity) -> Result<Identity, PortError>;
    fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, PortError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, PortError>;
    fn find_by_document(&self, document: &str) -> Result<Option<Identity>, PortError>;
    fn exists_by_email(&self, email: &str) -> Result<bool, PortError>;
    fn exists_by_document(&self, document: &str) -> Result<bool, PortError>;
}

/// Read-only access to the seeded role reference data.
pub trait RoleCatalog: Send + Sync {
    fn find_role_by_name(&self, name: RoleName) -> Result<Option<Role>, PortError>;
}

/// One-way password digest and verification.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw: &str) -> Result<String, PortError>;

    /// `false` for a mismatch and for any digest the hasher cannot read.
    fn matches(&self, raw: &str, digest: &str) -> bool;
}

/// Signs and reads bearer tokens.
pub trait TokenCodec: Send + Sync {
    /// Sign `claims` (subject and expiry included) into a bearer token.
    fn issue(&self, claims: &SessionClaims) -> Result<String, PortError>;

    /// Signature intact and unexpired at `now`.
    fn is_valid(&self, token: &str, now: DateTime<Utc>) -> bool;

    /// Decode the claims of a token whose signature checks out.
    fn claims(&self, token: &str) -> Result<SessionClaims, PortError>;
}
