use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role. Administrative power is ordered:
/// super_admin passes every admin-gated check, admin passes admin-gated
/// checks but not super_admin-only ones (e.g. account deletion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Seller,
    Admin,
    SuperAdmin,
}

impl Role {
    /// All roles, in ascending order of privilege.
    pub const ALL: [Role; 4] = [Role::User, Role::Seller, Role::Admin, Role::SuperAdmin];

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Admin-gated checks accept both admin and super_admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    pub fn is_seller(&self) -> bool {
        matches!(self, Role::Seller)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Seller => "seller",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
