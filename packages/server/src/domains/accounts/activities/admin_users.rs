//! Admin user management: list/search, create with explicit role, update,
//! delete (super_admin only, enforced by the policy engine at the route),
//! and the stats summary.

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::common::validators::{validate_free_text, validate_phone_number, MIN_PASSWORD_LENGTH};
use crate::common::{is_unique_violation, ApiError, ApiResult, FieldErrors};
use crate::domains::accounts::models::account::Account;
use crate::domains::accounts::password::hash_password;
use crate::domains::accounts::Role;
use crate::domains::sellers::models::seller_profile::SellerProfile;

#[derive(Debug, Clone)]
pub struct AdminCreateInput {
    pub phone_number: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default)]
pub struct AdminUpdateInput {
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}

/// Counts by role and seller pipeline state for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct UserStats {
    pub total_users: i64,
    pub active_users: i64,
    pub users_by_role: RoleCounts,
    pub pending_sellers: i64,
    pub approved_sellers: i64,
}

#[derive(Debug, Default, Serialize)]
pub struct RoleCounts {
    pub super_admin: i64,
    pub admin: i64,
    pub seller: i64,
    pub user: i64,
}

pub async fn list_users(
    role: Option<Role>,
    search: Option<&str>,
    pool: &PgPool,
) -> ApiResult<Vec<Account>> {
    Ok(Account::find_filtered(role, search, pool).await?)
}

pub async fn get_user(id: Uuid, pool: &PgPool) -> ApiResult<Account> {
    Account::find_by_id(id, pool)
        .await?
        .ok_or_else(|| ApiError::not_found("User"))
}

/// Create an account with an explicit role (admin screen).
pub async fn create_user(input: AdminCreateInput, pool: &PgPool) -> ApiResult<Account> {
    let mut errors = FieldErrors::new();
    if let Err(msg) = validate_phone_number(&input.phone_number) {
        errors.insert("phone_number".to_string(), vec![msg.to_string()]);
    }
    if input.password.len() < MIN_PASSWORD_LENGTH {
        errors.insert(
            "password".to_string(),
            vec![format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )],
        );
    }
    if let Err(msg) = validate_free_text(&input.full_name) {
        errors.insert("full_name".to_string(), vec![msg.to_string()]);
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let password_hash = hash_password(&input.password)?;

    let account = Account::insert(
        &input.phone_number,
        &password_hash,
        &input.full_name,
        input.role,
        pool,
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Phone number already registered".to_string())
        } else {
            e.into()
        }
    })?;

    info!(account_id = %account.id, role = %account.role, "Admin created account");

    Ok(account)
}

pub async fn update_user(id: Uuid, input: AdminUpdateInput, pool: &PgPool) -> ApiResult<Account> {
    if let Some(name) = &input.full_name {
        if let Err(msg) = validate_free_text(name) {
            return Err(ApiError::field("full_name", msg));
        }
    }

    Account::admin_update(
        id,
        input.full_name.as_deref(),
        input.role,
        input.is_active,
        input.is_verified,
        pool,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("User"))
}

/// Hard delete an account. The route gates this on super_admin.
pub async fn delete_user(id: Uuid, pool: &PgPool) -> ApiResult<()> {
    if Account::delete(id, pool).await? {
        info!(account_id = %id, "Account deleted");
        Ok(())
    } else {
        Err(ApiError::not_found("User"))
    }
}

pub async fn user_stats(pool: &PgPool) -> ApiResult<UserStats> {
    let total_users = Account::count_total(pool).await?;
    let active_users = Account::count_active(pool).await?;

    let mut users_by_role = RoleCounts::default();
    for (role, count) in Account::count_by_role(pool).await? {
        match role {
            Role::SuperAdmin => users_by_role.super_admin = count,
            Role::Admin => users_by_role.admin = count,
            Role::Seller => users_by_role.seller = count,
            Role::User => users_by_role.user = count,
        }
    }

    let pending_sellers = SellerProfile::count_by_approval(false, pool).await?;
    let approved_sellers = SellerProfile::count_by_approval(true, pool).await?;

    Ok(UserStats {
        total_users,
        active_users,
        users_by_role,
        pending_sellers,
        approved_sellers,
    })
}
