//! Admin user management and the dashboard stats endpoint.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::accounts::activities::admin_users::{
    create_user, delete_user, get_user, list_users, update_user, user_stats, AdminCreateInput,
    AdminUpdateInput, UserStats,
};
use crate::domains::accounts::{Action, AccountData, Role};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::gate;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<Role>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminCreateRequest {
    pub phone_number: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct AdminUpdateRequest {
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}

pub async fn list_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<AccountData>>, ApiError> {
    gate(user.as_deref(), Action::ManageUsers)?;

    let accounts = list_users(query.role, query.search.as_deref(), &state.db_pool).await?;

    Ok(Json(accounts.into_iter().map(AccountData::from).collect()))
}

pub async fn create_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(body): Json<AdminCreateRequest>,
) -> Result<(StatusCode, Json<AccountData>), ApiError> {
    gate(user.as_deref(), Action::ManageUsers)?;

    let account = create_user(
        AdminCreateInput {
            phone_number: body.phone_number,
            password: body.password,
            full_name: body.full_name,
            role: body.role,
        },
        &state.db_pool,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(AccountData::from(account))))
}

pub async fn get_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountData>, ApiError> {
    gate(user.as_deref(), Action::ManageUsers)?;

    let account = get_user(id, &state.db_pool).await?;

    Ok(Json(AccountData::from(account)))
}

pub async fn update_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
    Json(body): Json<AdminUpdateRequest>,
) -> Result<Json<AccountData>, ApiError> {
    gate(user.as_deref(), Action::ManageUsers)?;

    let account = update_user(
        id,
        AdminUpdateInput {
            full_name: body.full_name,
            role: body.role,
            is_active: body.is_active,
            is_verified: body.is_verified,
        },
        &state.db_pool,
    )
    .await?;

    Ok(Json(AccountData::from(account)))
}

pub async fn delete_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    gate(user.as_deref(), Action::DeleteAccount)?;

    delete_user(id, &state.db_pool).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn stats_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<UserStats>, ApiError> {
    gate(user.as_deref(), Action::ViewStats)?;

    Ok(Json(user_stats(&state.db_pool).await?))
}
