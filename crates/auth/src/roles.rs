use serde::{Deserialize, Serialize};

use mesa_core::RoleId;

/// Fixed catalog of role names.
///
/// Roles are reference data: this crate looks them up by name and never
/// creates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleName {
    Owner,
    Employee,
    Client,
    Admin,
}

impl RoleName {
    pub const ALL: [RoleName; 4] = [
        RoleName::Owner,
        RoleName::Employee,
        RoleName::Client,
        RoleName::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Owner => "OWNER",
            RoleName::Employee => "EMPLOYEE",
            RoleName::Client => "CLIENT",
            RoleName::Admin => "ADMIN",
        }
    }
}

impl core::fmt::Display for RoleName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role record as held by the role catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
    pub description: String,
}

impl Role {
    pub fn new(id: RoleId, name: RoleName, description: impl Into<String>) -> Self {
        Self {
            id,
            name,
            description: description.into(),
        }
    }
}
