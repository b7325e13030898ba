use mesa_auth::{Identity, RoleName};
use mesa_core::UserId;

/// Authenticated identity for a request, re-resolved from the store by the
/// auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    identity: Identity,
}

impl PrincipalContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn user_id(&self) -> UserId {
        self.identity.id()
    }

    pub fn role(&self) -> RoleName {
        self.identity.role().name
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}
