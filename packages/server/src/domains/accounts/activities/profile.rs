//! Own-profile updates.

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::validators::validate_free_text;
use crate::common::{ApiError, ApiResult};
use crate::domains::accounts::models::account::Account;
use crate::domains::accounts::models::address::Address;

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub address_name: Option<String>,
    pub address_lat: Option<f64>,
    pub address_long: Option<f64>,
}

/// Update the caller's own profile. A new address, when provided, is created
/// and linked in the same transaction as the account update.
pub async fn update_profile(
    account_id: Uuid,
    update: ProfileUpdate,
    pool: &PgPool,
) -> ApiResult<Account> {
    if let Some(name) = &update.full_name {
        if let Err(msg) = validate_free_text(name) {
            return Err(ApiError::field("full_name", msg));
        }
    }
    if let Some(name) = &update.address_name {
        if let Err(msg) = validate_free_text(name) {
            return Err(ApiError::field("address", msg));
        }
    }

    let mut tx = pool.begin().await.map_err(anyhow::Error::from)?;

    let address_id = match &update.address_name {
        Some(name) => Some(
            Address::insert(name, update.address_lat, update.address_long, &mut *tx)
                .await?
                .id,
        ),
        None => None,
    };

    let account = sqlx::query_as::<_, Account>(
        "UPDATE accounts
         SET full_name = COALESCE($2, full_name),
             address_id = COALESCE($3, address_id),
             updated_at = now()
         WHERE id = $1
         RETURNING *",
    )
    .bind(account_id)
    .bind(update.full_name.as_deref())
    .bind(address_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await.map_err(anyhow::Error::from)?;

    Ok(account)
}
