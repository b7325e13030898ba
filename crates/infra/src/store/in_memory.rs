use std::collections::HashMap;
use std::sync::RwLock;

use mesa_auth::{Identity, IdentityStore, NewIdentity, PortError, Role, RoleCatalog, RoleName};
use mesa_core::{RoleId, UserId};

fn poisoned() -> PortError {
    PortError::backend("identity store lock poisoned")
}

/// In-memory identity store for tests/dev.
///
/// Enforces email and identity-document uniqueness under its write lock, so
/// it is the authoritative backstop for concurrent provisioning.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    inner: RwLock<HashMap<UserId, Identity>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, PortError> {
        Ok(self.inner.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> Result<bool, PortError> {
        Ok(self.len()? == 0)
    }

    fn find_where(&self, pred: impl Fn(&Identity) -> bool) -> Result<Option<Identity>, PortError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().find(|i| pred(i)).cloned())
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn save(&self, identity: NewIdentity) -> Result<Identity, PortError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;

        if map.values().any(|i| i.email() == identity.email) {
            return Err(PortError::conflict(format!(
                "A user already exists with email: {}",
                identity.email
            )));
        }
        if map
            .values()
            .any(|i| i.identity_document() == identity.identity_document)
        {
            return Err(PortError::conflict(format!(
                "A user already exists with document: {}",
                identity.identity_document
            )));
        }

        let saved = identity.into_identity(UserId::new());
        map.insert(saved.id(), saved.clone());
        Ok(saved)
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, PortError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, PortError> {
        self.find_where(|i| i.email() == email)
    }

    fn find_by_document(&self, document: &str) -> Result<Option<Identity>, PortError> {
        self.find_where(|i| i.identity_document() == document)
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, PortError> {
        Ok(self.find_by_email(email)?.is_some())
    }

    fn exists_by_document(&self, document: &str) -> Result<bool, PortError> {
        Ok(self.find_by_document(document)?.is_some())
    }
}

/// Role catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleCatalog {
    roles: Vec<Role>,
}

impl InMemoryRoleCatalog {
    /// Catalog seeded with the platform's four roles.
    pub fn seeded() -> Self {
        Self::with_roles(RoleName::ALL.into_iter().map(|name| {
            let description = match name {
                RoleName::Owner => "Restaurant owner",
                RoleName::Employee => "Restaurant employee",
                RoleName::Client => "Restaurant client",
                RoleName::Admin => "Platform administrator",
            };
            Role::new(RoleId::new(), name, description)
        }))
    }

    /// A catalog with no roles (misconfigured deployment).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }
}

impl RoleCatalog for InMemoryRoleCatalog {
    fn find_role_by_name(&self, name: RoleName) -> Result<Option<Role>, PortError> {
        Ok(self.roles.iter().find(|r| r.name == name).cloned())
    }
}
