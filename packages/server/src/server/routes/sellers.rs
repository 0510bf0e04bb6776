//! Seller lifecycle: self-service status request plus the admin approval
//! queue.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::accounts::Action;
use crate::domains::sellers::activities::approval::{approve, list_pending, reject};
use crate::domains::sellers::activities::request_status::{request_seller_status, SellerRequest};
use crate::domains::sellers::SellerProfileData;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::gate;

#[derive(Debug, Deserialize)]
pub struct SellerRequestBody {
    pub project_name: String,
    pub category_id: Option<Uuid>,
    pub address_name: Option<String>,
    pub address_lat: Option<f64>,
    pub address_long: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ApprovalBody {
    pub is_approved: bool,
}

pub async fn request_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(body): Json<SellerRequestBody>,
) -> Result<(StatusCode, Json<SellerProfileData>), ApiError> {
    let actor = gate(user.as_deref(), Action::RequestSellerStatus)?;

    let profile = request_seller_status(
        actor.id,
        SellerRequest {
            project_name: body.project_name,
            category_id: body.category_id,
            address_name: body.address_name,
            address_lat: body.address_lat,
            address_long: body.address_long,
        },
        &state.db_pool,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(SellerProfileData::from(profile))))
}

pub async fn pending_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
) -> Result<Json<Vec<SellerProfileData>>, ApiError> {
    gate(user.as_deref(), Action::ManageSellers)?;

    let profiles = list_pending(&state.db_pool).await?;

    Ok(Json(
        profiles.into_iter().map(SellerProfileData::from).collect(),
    ))
}

/// PATCH with `{"is_approved": true}` approves, `false` rejects. Approval
/// also verifies the owning account in the same transaction.
pub async fn approval_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(profile_id): Path<Uuid>,
    Json(body): Json<ApprovalBody>,
) -> Result<Json<SellerProfileData>, ApiError> {
    gate(user.as_deref(), Action::ManageSellers)?;

    let profile = if body.is_approved {
        approve(profile_id, &state.db_pool).await?
    } else {
        reject(profile_id, &state.db_pool).await?
    };

    Ok(Json(SellerProfileData::from(profile)))
}
