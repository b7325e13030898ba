//! Provisioning use case: candidate → persisted, role-bound identity.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use mesa_core::UserId;

use crate::validation::{self, IdentityKind};
use crate::{
    Candidate, Identity, IdentityError, IdentityResult, IdentityStore, PasswordHasher, Role,
    RoleCatalog,
};

/// Creates owners, employees and clients.
///
/// A call either performs exactly one identity write or none at all: every
/// check (format, age, uniqueness, restaurant binding, role lookup) runs
/// before the password is hashed and the identity saved.
#[derive(Clone)]
pub struct ProvisioningService {
    store: Arc<dyn IdentityStore>,
    roles: Arc<dyn RoleCatalog>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ProvisioningService {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        roles: Arc<dyn RoleCatalog>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self { store, roles, hasher }
    }

    pub fn create_owner(&self, candidate: Candidate) -> IdentityResult<Identity> {
        self.provision(IdentityKind::Owner, candidate)
    }

    pub fn create_employee(&self, candidate: Candidate) -> IdentityResult<Identity> {
        self.provision(IdentityKind::Employee, candidate)
    }

    pub fn create_client(&self, candidate: Candidate) -> IdentityResult<Identity> {
        self.provision(IdentityKind::Client, candidate)
    }

    /// Look up an identity. Absence is not an error here.
    pub fn get_by_id(&self, id: UserId) -> IdentityResult<Option<Identity>> {
        Ok(self.store.find_by_id(id)?)
    }

    fn provision(&self, kind: IdentityKind, candidate: Candidate) -> IdentityResult<Identity> {
        self.provision_on(kind, candidate, Utc::now().date_naive())
    }

    fn provision_on(
        &self,
        kind: IdentityKind,
        candidate: Candidate,
        today: NaiveDate,
    ) -> IdentityResult<Identity> {
        validation::validate_candidate(kind, &candidate, today)?;
        self.ensure_unique(&candidate)?;
        validation::validate_restaurant_binding(kind, candidate.restaurant_id)?;

        let role = self.resolve_role(kind)?;
        let password_hash = self.hasher.hash(&candidate.password)?;

        // A conflict here means a concurrent call won the race after our
        // existence checks; the store's constraint is authoritative.
        let identity = self.store.save(candidate.bind(role, password_hash))?;

        info!(
            user_id = %identity.id(),
            role = %identity.role().name,
            "identity provisioned"
        );
        Ok(identity)
    }

    /// Email first, then document, so a double collision always reports the email.
    fn ensure_unique(&self, candidate: &Candidate) -> IdentityResult<()> {
        if self.store.exists_by_email(&candidate.email)? {
            return Err(IdentityError::IdentityAlreadyExists(format!(
                "A user already exists with email: {}",
                candidate.email
            )));
        }
        if self.store.exists_by_document(&candidate.identity_document)? {
            return Err(IdentityError::IdentityAlreadyExists(format!(
                "A user already exists with document: {}",
                candidate.identity_document
            )));
        }
        Ok(())
    }

    fn resolve_role(&self, kind: IdentityKind) -> IdentityResult<Role> {
        let name = kind.role_name();
        match self.roles.find_role_by_name(name)? {
            Some(role) => Ok(role),
            None => {
                warn!(role = %name, "role missing from catalog");
                Err(IdentityError::RoleNotFound(name))
            }
        }
    }
}
