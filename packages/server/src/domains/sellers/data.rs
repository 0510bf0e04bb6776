use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::sellers::models::seller_profile::SellerProfile;

/// API representation of a seller profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerProfileData {
    pub id: String,
    pub account_id: String,
    pub project_name: String,
    pub category_id: Option<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<SellerProfile> for SellerProfileData {
    fn from(profile: SellerProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            account_id: profile.account_id.to_string(),
            project_name: profile.project_name,
            category_id: profile.category_id.map(|id| id.to_string()),
            is_approved: profile.is_approved,
            created_at: profile.created_at,
        }
    }
}
