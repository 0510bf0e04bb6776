//! Seller approval and rejection.
//!
//! Approval sets `is_approved` on the profile and `is_verified` on the
//! owning account in one transaction: no reader may observe an approved
//! profile whose owner is unverified. Rejection flips only the profile flag,
//! so a previously earned verification survives revocation-and-resubmission.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::common::{ApiError, ApiResult};
use crate::domains::accounts::models::account::Account;
use crate::domains::sellers::models::seller_profile::SellerProfile;

pub async fn approve(profile_id: Uuid, pool: &PgPool) -> ApiResult<SellerProfile> {
    let mut tx = pool.begin().await.map_err(anyhow::Error::from)?;

    let profile = SellerProfile::set_approved(profile_id, true, &mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("Seller"))?;

    Account::set_verified(profile.account_id, true, &mut *tx).await?;

    tx.commit().await.map_err(anyhow::Error::from)?;

    info!(profile_id = %profile.id, account_id = %profile.account_id, "Seller approved");

    Ok(profile)
}

pub async fn reject(profile_id: Uuid, pool: &PgPool) -> ApiResult<SellerProfile> {
    let profile = SellerProfile::set_approved(profile_id, false, pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Seller"))?;

    info!(profile_id = %profile.id, "Seller rejected");

    Ok(profile)
}

pub async fn list_pending(pool: &PgPool) -> ApiResult<Vec<SellerProfile>> {
    Ok(SellerProfile::find_pending(pool).await?)
}
