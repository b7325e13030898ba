//! Error taxonomy for provisioning and authentication.

use thiserror::Error;

use crate::RoleName;

pub type IdentityResult<T> = Result<T, IdentityError>;

/// Failure of a provisioning or authentication call.
///
/// Every kind is terminal for the current call; nothing is retried here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error(
        "Phone must have a maximum of 13 characters and may contain the + symbol. Example: +573005698325"
    )]
    InvalidPhone,

    #[error("Identity document must be numeric only")]
    InvalidDocument,

    #[error("{0}")]
    UnderageUser(String),

    #[error("{0}")]
    InvalidRestaurantBinding(String),

    #[error("{0}")]
    IdentityAlreadyExists(String),

    /// The role catalog is misconfigured. Operator-fixable, not caller-fixable.
    #[error("Role {0} does not exist in the system")]
    RoleNotFound(RoleName),

    /// Single authentication failure. Never says which check failed.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A collaborator (store, hasher, codec) failed.
    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl IdentityError {
    /// Stable machine-readable code for transport error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            IdentityError::InvalidEmail => "invalid_email",
            IdentityError::InvalidPhone => "invalid_phone",
            IdentityError::InvalidDocument => "invalid_document",
            IdentityError::UnderageUser(_) => "underage_user",
            IdentityError::InvalidRestaurantBinding(_) => "invalid_restaurant_binding",
            IdentityError::IdentityAlreadyExists(_) => "identity_already_exists",
            IdentityError::RoleNotFound(_) => "role_not_found",
            IdentityError::InvalidCredentials => "invalid_credentials",
            IdentityError::Infrastructure(_) => "infrastructure_error",
        }
    }
}

/// Failure reported by a collaborator behind one of the [`ports`](crate::ports).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortError {
    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

impl PortError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

impl From<PortError> for IdentityError {
    fn from(value: PortError) -> Self {
        match value {
            PortError::Conflict(msg) => IdentityError::IdentityAlreadyExists(msg),
            PortError::Backend(msg) => IdentityError::Infrastructure(msg),
        }
    }
}
