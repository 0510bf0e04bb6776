//! Own-profile endpoints.

use axum::{extract::Extension, Json};
use serde::Deserialize;

use crate::common::ApiError;
use crate::domains::accounts::activities::profile::{update_profile, ProfileUpdate};
use crate::domains::accounts::models::account::Account;
use crate::domains::accounts::{Action, AccountData};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::gate;

#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub full_name: Option<String>,
    pub address_name: Option<String>,
    pub address_lat: Option<f64>,
    pub address_long: Option<f64>,
}

pub async fn me_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<AccountData>, ApiError> {
    let actor = gate(user.as_deref(), Action::ViewOwnProfile)?;

    let account = Account::find_by_id(actor.id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Account"))?;

    Ok(Json(AccountData::from(account)))
}

pub async fn update_me_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<AccountData>, ApiError> {
    let actor = gate(user.as_deref(), Action::UpdateOwnProfile)?;

    let account = update_profile(
        actor.id,
        ProfileUpdate {
            full_name: body.full_name,
            address_name: body.address_name,
            address_lat: body.address_lat,
            address_long: body.address_long,
        },
        &state.db_pool,
    )
    .await?;

    Ok(Json(AccountData::from(account)))
}
