//! Default administrator bootstrap.

use tracing::info;

use mesa_auth::{
    Candidate, IdentityError, IdentityResult, IdentityStore, PasswordHasher, RoleCatalog, RoleName,
};
use mesa_core::UserId;

use crate::AdminConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created(UserId),
    AlreadyPresent,
}

/// Create the configured administrator unless one with that email exists.
///
/// Operator-supplied data: the candidate validation pipeline is not applied.
pub fn bootstrap_admin(
    admin: &AdminConfig,
    store: &dyn IdentityStore,
    roles: &dyn RoleCatalog,
    hasher: &dyn PasswordHasher,
) -> IdentityResult<BootstrapOutcome> {
    if store.exists_by_email(&admin.email)? {
        info!("admin user already exists, skipping creation");
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let role = roles
        .find_role_by_name(RoleName::Admin)?
        .ok_or(IdentityError::RoleNotFound(RoleName::Admin))?;

    let candidate = Candidate {
        first_name: admin.first_name.clone(),
        last_name: admin.last_name.clone(),
        identity_document: admin.identity_document.clone(),
        phone: admin.phone.clone(),
        birth_date: admin.birth_date,
        email: admin.email.clone(),
        password: String::new(),
        restaurant_id: None,
    };
    let password_hash = hasher.hash(&admin.password)?;
    let saved = store.save(candidate.bind(role, password_hash))?;

    info!(user_id = %saved.id(), "default admin user created");
    Ok(BootstrapOutcome::Created(saved.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Argon2PasswordHasher, InMemoryIdentityStore, InMemoryRoleCatalog};

    fn admin() -> AdminConfig {
        AdminConfig {
            email: "admin@mesa.io".to_string(),
            password: "admin123".to_string(),
            first_name: "Admin".to_string(),
            last_name: "System".to_string(),
            identity_document: "1000000000".to_string(),
            phone: "+573000000000".to_string(),
            birth_date: None,
        }
    }

    #[test]
    fn creates_admin_once() {
        let store = InMemoryIdentityStore::new();
        let roles = InMemoryRoleCatalog::seeded();
        let hasher = Argon2PasswordHasher::new();

        let first = bootstrap_admin(&admin(), &store, &roles, &hasher).unwrap();
        let BootstrapOutcome::Created(id) = first else {
            panic!("expected admin to be created");
        };

        let saved = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(saved.role().name, RoleName::Admin);
        assert_eq!(saved.restaurant_id(), None);
        assert!(hasher.matches("admin123", saved.password_hash()));

        let second = bootstrap_admin(&admin(), &store, &roles, &hasher).unwrap();
        assert_eq!(second, BootstrapOutcome::AlreadyPresent);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn missing_admin_role_is_reported() {
        let store = InMemoryIdentityStore::new();
        let err = bootstrap_admin(
            &admin(),
            &store,
            &InMemoryRoleCatalog::empty(),
            &Argon2PasswordHasher::new(),
        )
        .unwrap_err();

        assert_eq!(err, IdentityError::RoleNotFound(RoleName::Admin));
        assert!(store.is_empty().unwrap());
    }
}
