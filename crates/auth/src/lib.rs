//! `mesa-auth`: identity provisioning and authentication use cases.
//!
//! This crate is intentionally decoupled from HTTP and storage: every
//! collaborator (persistence, role catalog, password hashing, token signing)
//! is reached through the traits in [`ports`].

pub mod authentication;
pub mod claims;
pub mod error;
pub mod identity;
pub mod ports;
pub mod provisioning;
pub mod roles;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use authentication::AuthenticationService;
pub use claims::{SessionClaims, TokenValidationError, validate_claims};
pub use error::{IdentityError, IdentityResult, PortError};
pub use identity::{Candidate, Identity, NewIdentity};
pub use ports::{IdentityStore, PasswordHasher, RoleCatalog, TokenCodec};
pub use provisioning::ProvisioningService;
pub use roles::{Role, RoleName};
pub use validation::IdentityKind;
