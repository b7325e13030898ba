use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use mesa_auth::{Candidate, Identity, RoleName, SessionClaims};
use mesa_core::{RestaurantId, UserId};

// -------------------------
// Request DTOs
// -------------------------

/// Body of every identity-creation route.
///
/// Missing strings deserialize as empty and are rejected by the same rule as
/// a malformed value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateIdentityRequest {
    pub first_name: String,
    pub last_name: String,
    pub identity_document: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub password: String,
    pub restaurant_id: Option<RestaurantId>,
}

impl CreateIdentityRequest {
    /// Presence checks owned by the transport; format rules run in the use case.
    pub fn into_candidate(self) -> Result<Candidate, &'static str> {
        if self.first_name.trim().is_empty() {
            return Err("First name is required");
        }
        if self.last_name.trim().is_empty() {
            return Err("Last name is required");
        }
        if self.password.trim().is_empty() {
            return Err("Password is required");
        }

        Ok(Candidate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            identity_document: self.identity_document,
            phone: self.phone,
            birth_date: self.birth_date,
            email: self.email,
            password: self.password,
            restaurant_id: self.restaurant_id,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("Email is required");
        }
        if self.password.is_empty() {
            return Err("Password is required");
        }
        Ok(())
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub identity_document: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub role: RoleName,
    pub restaurant_id: Option<RestaurantId>,
}

impl From<&Identity> for UserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id(),
            first_name: identity.first_name().to_string(),
            last_name: identity.last_name().to_string(),
            identity_document: identity.identity_document().to_string(),
            phone: identity.phone().to_string(),
            birth_date: identity.birth_date(),
            email: identity.email().to_string(),
            role: identity.role().name,
            restaurant_id: identity.restaurant_id(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub user_id: UserId,
    pub email: String,
    pub role: RoleName,
}

impl AuthResponse {
    pub fn bearer(token: String, claims: SessionClaims) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            user_id: claims.user_id,
            email: claims.sub,
            role: claims.role,
        }
    }
}
