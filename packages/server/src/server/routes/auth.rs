//! Registration, login and token refresh.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::common::{ApiError, ApiResult};
use crate::domains::accounts::activities::login::verify_credentials;
use crate::domains::accounts::activities::register::{register_account, RegisterInput};
use crate::domains::accounts::models::account::Account;
use crate::domains::accounts::{Action, AccountData};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::gate;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub phone_number: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub account: AccountData,
}

fn auth_response(state: &AppState, account: Account) -> ApiResult<AuthResponse> {
    let tokens = state
        .jwt_service
        .create_token_pair(account.id, &account.phone_number, account.role)?;

    Ok(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        account: AccountData::from(account),
    })
}

pub async fn register_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let account = register_account(
        RegisterInput {
            phone_number: body.phone_number,
            password: body.password,
            full_name: body.full_name,
        },
        &state.db_pool,
    )
    .await?;

    info!(account_id = %account.id, "Account registered");

    let response = auth_response(&state, account)?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let account = verify_credentials(&body.phone_number, &body.password, &state.db_pool).await?;

    info!(account_id = %account.id, "Account logged in");

    Ok(Json(auth_response(&state, account)?))
}

/// Exchange a valid refresh token for a fresh pair. The account is reloaded
/// so a deactivation or role change since issuance takes effect here.
pub async fn refresh_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let claims = state
        .jwt_service
        .verify_refresh_token(&body.refresh_token)
        .map_err(|_| ApiError::Authentication("Invalid refresh token".to_string()))?;

    let account = Account::find_by_id(claims.account_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::Authentication("Invalid refresh token".to_string()))?;

    if !account.is_active {
        return Err(ApiError::Authentication("Account is disabled".to_string()));
    }

    Ok(Json(auth_response(&state, account)?))
}

/// Tokens are stateless, so logout is a client-side discard; the endpoint
/// exists to confirm the session and give clients a uniform call.
pub async fn logout_handler(user: Option<Extension<AuthUser>>) -> Result<Json<Value>, ApiError> {
    let actor = gate(user.as_deref(), Action::Logout)?;

    info!(account_id = %actor.id, "Account logged out");

    Ok(Json(json!({ "message": "Logged out" })))
}
