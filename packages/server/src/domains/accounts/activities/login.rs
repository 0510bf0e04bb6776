//! Credential verification.

use sqlx::PgPool;
use tracing::debug;

use crate::common::{ApiError, ApiResult};
use crate::domains::accounts::models::account::Account;
use crate::domains::accounts::password::verify_password;

/// Verify phone + password and return the account.
///
/// Unknown phone and wrong password produce the same message so callers
/// cannot enumerate registered numbers. Disabled accounts are rejected even
/// with correct credentials.
pub async fn verify_credentials(
    phone_number: &str,
    password: &str,
    pool: &PgPool,
) -> ApiResult<Account> {
    let invalid = || ApiError::Authentication("Invalid phone number or password".to_string());

    let account = Account::find_by_phone(phone_number, pool)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(password, &account.password_hash)? {
        debug!(account_id = %account.id, "Password mismatch");
        return Err(invalid());
    }

    if !account.is_active {
        return Err(ApiError::Authentication("Account is disabled".to_string()));
    }

    Ok(account)
}
