//! Account registration.

use sqlx::PgPool;
use tracing::info;

use crate::common::validators::{validate_free_text, validate_phone_number, MIN_PASSWORD_LENGTH};
use crate::common::{is_unique_violation, ApiError, ApiResult, FieldErrors};
use crate::domains::accounts::models::account::Account;
use crate::domains::accounts::password::hash_password;
use crate::domains::accounts::Role;

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub phone_number: String,
    pub password: String,
    pub full_name: String,
}

/// Validate input, hash the password and create a `user`-role account.
///
/// A duplicate phone number fails with Conflict and leaves the store
/// untouched: uniqueness is enforced by the database index, not by a
/// read-then-write check.
pub async fn register_account(input: RegisterInput, pool: &PgPool) -> ApiResult<Account> {
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
        Role::User,
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

    info!(account_id = %account.id, "Account registered");

    Ok(account)
}
