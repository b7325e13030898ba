//! Domain error model for shared primitives.

use thiserror::Error;

/// Failures raised by the primitives in this crate.
///
/// Use-case specific failures (validation, credentials, ...) live with the
/// use cases that raise them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
