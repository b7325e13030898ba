//! In-test collaborators that count calls, so tests can assert which side
//! effects a use case reached.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, NaiveDate, Utc};

use mesa_core::{RoleId, UserId};

use crate::{
    Candidate, Identity, IdentityStore, NewIdentity, PasswordHasher, PortError, Role, RoleCatalog,
    RoleName, SessionClaims, TokenCodec, validate_claims,
};

#[derive(Default)]
pub struct CountingStore {
    pub(crate) identities: Mutex<Vec<Identity>>,
    pub saves: AtomicUsize,
    pub exists_checks: AtomicUsize,
    /// When set, `save` fails with a conflict even though the existence checks passed.
    pub conflict_on_save: bool,
}

impl CountingStore {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn exists_checks(&self) -> usize {
        self.exists_checks.load(Ordering::SeqCst)
    }

    pub fn remove_by_email(&self, email: &str) {
        self.identities.lock().unwrap().retain(|i| i.email() != email);
    }
}

impl IdentityStore for CountingStore {
    fn save(&self, identity: NewIdentity) -> Result<Identity, PortError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.conflict_on_save {
            return Err(PortError::conflict("duplicate key value"));
        }
        let saved = identity.into_identity(UserId::new());
        self.identities.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<Identity>, PortError> {
        Ok(self.identities.lock().unwrap().iter().find(|i| i.id() == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>, PortError> {
        Ok(self.identities.lock().unwrap().iter().find(|i| i.email() == email).cloned())
    }

    fn find_by_document(&self, document: &str) -> Result<Option<Identity>, PortError> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.identity_document() == document)
            .cloned())
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, PortError> {
        self.exists_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.find_by_email(email)?.is_some())
    }

    fn exists_by_document(&self, document: &str) -> Result<bool, PortError> {
        self.exists_checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.find_by_document(document)?.is_some())
    }
}

pub struct FixedRoles {
    roles: Vec<Role>,
}

impl FixedRoles {
    pub fn all() -> Self {
        Self {
            roles: RoleName::ALL
                .into_iter()
                .map(|name| Role::new(RoleId::new(), name, name.as_str()))
                .collect(),
        }
    }

    pub fn without(name: RoleName) -> Self {
        let mut roles = Self::all();
        roles.roles.retain(|r| r.name != name);
        roles
    }
}

impl RoleCatalog for FixedRoles {
    fn find_role_by_name(&self, name: RoleName) -> Result<Option<Role>, PortError> {
        Ok(self.roles.iter().find(|r| r.name == name).cloned())
    }
}

/// Reversible "hash" that is never equal to its input.
#[derive(Default)]
pub struct PrefixHasher {
    pub hashes: AtomicUsize,
    pub verifications: AtomicUsize,
}

impl PrefixHasher {
    pub fn hashes(&self) -> usize {
        self.hashes.load(Ordering::SeqCst)
    }

    pub fn verifications(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }
}

impl PasswordHasher for PrefixHasher {
    fn hash(&self, raw: &str) -> Result<String, PortError> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        Ok(format!("hashed::{raw}"))
    }

    fn matches(&self, raw: &str, digest: &str) -> bool {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        digest.strip_prefix("hashed::") == Some(raw)
    }
}

/// Opaque-token codec backed by a lookup table.
#[derive(Default)]
pub struct TableCodec {
    issued: Mutex<HashMap<String, SessionClaims>>,
}

impl TokenCodec for TableCodec {
    fn issue(&self, claims: &SessionClaims) -> Result<String, PortError> {
        let mut issued = self.issued.lock().unwrap();
        let token = format!("token-{}", issued.len() + 1);
        issued.insert(token.clone(), claims.clone());
        Ok(token)
    }

    fn is_valid(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.issued
            .lock()
            .unwrap()
            .get(token)
            .is_some_and(|c| validate_claims(c, now).is_ok())
    }

    fn claims(&self, token: &str) -> Result<SessionClaims, PortError> {
        self.issued
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .ok_or_else(|| PortError::backend("unknown token"))
    }
}

pub fn years_ago(years: u32) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_sub_months(chrono::Months::new(years * 12))
        .unwrap()
}

pub fn owner_candidate() -> Candidate {
    Candidate {
        first_name: "Ana".to_string(),
        last_name: "Gomez".to_string(),
        identity_document: "123456789".to_string(),
        phone: "+573001234567".to_string(),
        birth_date: Some(years_ago(30)),
        email: "a@b.com".to_string(),
        password: "secret".to_string(),
        restaurant_id: None,
    }
}
