use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::accounts::models::account::Account;
use crate::domains::accounts::Role;

/// Public API representation of an account. The password hash never leaves
/// the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    pub id: String,
    pub phone_number: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountData {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            phone_number: account.phone_number,
            full_name: account.full_name,
            role: account.role,
            is_active: account.is_active,
            is_verified: account.is_verified,
            created_at: account.created_at,
        }
    }
}
