//! Seller status request: NONE -> PENDING.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::common::validators::validate_free_text;
use crate::common::{is_unique_violation, ApiError, ApiResult};
use crate::domains::accounts::models::account::Account;
use crate::domains::accounts::models::address::Address;
use crate::domains::accounts::Role;
use crate::domains::sellers::models::seller_profile::SellerProfile;
use crate::domains::store::models::category::Category;

#[derive(Debug, Clone)]
pub struct SellerRequest {
    pub project_name: String,
    pub category_id: Option<Uuid>,
    pub address_name: Option<String>,
    pub address_lat: Option<f64>,
    pub address_long: Option<f64>,
}

/// Create a pending seller profile for the account.
///
/// One transaction covers the profile insert, the role promotion and the
/// address: if any part fails nothing persists. A second request from the
/// same account hits the unique index and fails with Conflict.
pub async fn request_seller_status(
    account_id: Uuid,
    request: SellerRequest,
    pool: &PgPool,
) -> ApiResult<SellerProfile> {
    if let Err(msg) = validate_free_text(&request.project_name) {
        return Err(ApiError::field("project_name", msg));
    }

    if let Some(category_id) = request.category_id {
        if Category::find_by_id(category_id, pool).await?.is_none() {
            return Err(ApiError::field("category", "Unknown category"));
        }
    }

    let mut tx = pool.begin().await.map_err(anyhow::Error::from)?;

    let profile = SellerProfile::insert(
        account_id,
        &request.project_name,
        request.category_id,
        &mut *tx,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Account already has a seller profile".to_string())
        } else {
            e.into()
        }
    })?;

    Account::set_role(account_id, Role::Seller, &mut *tx).await?;

    if let Some(name) = &request.address_name {
        let address =
            Address::insert(name, request.address_lat, request.address_long, &mut *tx).await?;
        sqlx::query("UPDATE accounts SET address_id = $2, updated_at = now() WHERE id = $1")
            .bind(account_id)
            .bind(address.id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await.map_err(anyhow::Error::from)?;

    info!(account_id = %account_id, profile_id = %profile.id, "Seller status requested");

    Ok(profile)
}
