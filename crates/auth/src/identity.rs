//! Identity records, from submitted candidate to persisted entity.
//!
//! Each stage is a distinct immutable value:
//!
//! 1. [`Candidate`]: submitted for creation (no id, no role, raw password)
//! 2. [`NewIdentity`]: role attached, password hashed, ready to persist
//! 3. [`Identity`]: persisted, id assigned by storage

use chrono::NaiveDate;
use serde::Serialize;

use mesa_core::{RestaurantId, UserId};

use crate::Role;

/// An unvalidated, unpersisted identity submitted for creation.
///
/// String fields are taken as submitted; an empty string fails the same
/// format rule a missing value would.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Candidate {
    pub first_name: String,
    pub last_name: String,
    pub identity_document: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub password: String,
    pub restaurant_id: Option<RestaurantId>,
}

impl core::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Candidate")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("identity_document", &self.identity_document)
            .field("phone", &self.phone)
            .field("birth_date", &self.birth_date)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("restaurant_id", &self.restaurant_id)
            .finish()
    }
}

impl Candidate {
    /// Bind the candidate to a role with an already-hashed password.
    ///
    /// The raw password is dropped here.
    pub fn bind(self, role: Role, password_hash: String) -> NewIdentity {
        NewIdentity {
            first_name: self.first_name,
            last_name: self.last_name,
            identity_document: self.identity_document,
            phone: self.phone,
            birth_date: self.birth_date,
            email: self.email,
            password_hash,
            role,
            restaurant_id: self.restaurant_id,
        }
    }
}

/// A role-bound identity with a hashed password, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub first_name: String,
    pub last_name: String,
    pub identity_document: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub restaurant_id: Option<RestaurantId>,
}

impl NewIdentity {
    /// Attach the storage-assigned id.
    pub fn into_identity(self, id: UserId) -> Identity {
        Identity {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            identity_document: self.identity_document,
            phone: self.phone,
            birth_date: self.birth_date,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            restaurant_id: self.restaurant_id,
        }
    }
}

/// A persisted identity bound to exactly one role.
///
/// # Invariants
/// - `email` and `identity_document` are unique across all identities.
/// - `password_hash` is the hashing collaborator's output, never a raw value.
/// - `restaurant_id` is present only for employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    id: UserId,
    first_name: String,
    last_name: String,
    identity_document: String,
    phone: String,
    birth_date: Option<NaiveDate>,
    email: String,
    #[serde(skip)]
    password_hash: String,
    role: Role,
    restaurant_id: Option<RestaurantId>,
}

impl Identity {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn identity_document(&self) -> &str {
        &self.identity_document
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn restaurant_id(&self) -> Option<RestaurantId> {
        self.restaurant_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoleName;
    use mesa_core::RoleId;

    fn candidate() -> Candidate {
        Candidate {
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            identity_document: "1020304050".to_string(),
            phone: "+573001112233".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17),
            email: "ana@example.com".to_string(),
            password: "s3cret".to_string(),
            restaurant_id: None,
        }
    }

    #[test]
    fn debug_output_never_contains_raw_password() {
        let rendered = format!("{:?}", candidate());
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn binding_then_persisting_carries_every_field() {
        let role = Role::new(RoleId::new(), RoleName::Client, "Client");
        let id = UserId::new();

        let identity = candidate()
            .bind(role.clone(), "digest".to_string())
            .into_identity(id);

        assert_eq!(identity.id(), id);
        assert_eq!(identity.email(), "ana@example.com");
        assert_eq!(identity.identity_document(), "1020304050");
        assert_eq!(identity.password_hash(), "digest");
        assert_eq!(identity.role(), &role);
        assert_eq!(identity.restaurant_id(), None);
    }

    #[test]
    fn serialized_identity_omits_password_hash() {
        let role = Role::new(RoleId::new(), RoleName::Owner, "Owner");
        let identity = candidate()
            .bind(role, "digest".to_string())
            .into_identity(UserId::new());

        let json = serde_json::to_value(&identity).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"]["name"], "OWNER");
    }
}
