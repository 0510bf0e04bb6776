//! Public store surface: categories, listing browse/detail, seller
//! listing management and like toggling.

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{ApiError, Locale};
use crate::domains::accounts::{authorize, Action, Actor};
use crate::domains::store::activities::browse;
use crate::domains::store::activities::create_listing::{create_listing, CreateListingInput};
use crate::domains::store::activities::engagement::toggle_like;
use crate::domains::store::activities::update_listing::{
    delete_listing, update_listing, ListingPatch,
};
use crate::domains::store::models::category::Category;
use crate::domains::store::models::listing::{ListingFilter, ListingOrdering};
use crate::domains::store::{CategoryData, CategoryTreeData, ListingData};
use crate::server::app::AppState;
use crate::server::middleware::{AuthUser, ClientIp};
use crate::server::routes::gate;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<Uuid>,
    pub seller: Option<Uuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub is_featured: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListingQuery {
    fn into_filter(self) -> ListingFilter {
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = self.offset.unwrap_or(0).max(0);

        let mut filter = ListingFilter::with_limit(limit, offset);
        filter.category_id = self.category;
        filter.seller_id = self.seller;
        filter.min_price = self.min_price;
        filter.max_price = self.max_price;
        filter.is_featured = self.is_featured;
        filter.search = self.search;
        if let Some(ordering) = &self.ordering {
            filter.ordering = ListingOrdering::from_param(ordering);
        }
        filter
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub name_uz: String,
    #[serde(default)]
    pub name_ru: String,
    pub description_uz: String,
    #[serde(default)]
    pub description_ru: String,
    pub price: Decimal,
    pub category_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateListingRequest {
    pub name_uz: Option<String>,
    pub name_ru: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

impl UpdateListingRequest {
    fn into_patch(self) -> ListingPatch {
        ListingPatch {
            name_uz: self.name_uz,
            name_ru: self.name_ru,
            description_uz: self.description_uz,
            description_ru: self.description_ru,
            price: self.price,
            category_id: self.category_id,
            is_active: self.is_active,
        }
    }
}

pub async fn list_categories_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CategoryData>>, ApiError> {
    let locale = Locale::from_headers(&headers);

    let categories = Category::find_all_active(&state.db_pool).await?;

    Ok(Json(
        categories
            .into_iter()
            .map(|category| CategoryData::project(category, locale))
            .collect(),
    ))
}

pub async fn category_tree_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CategoryTreeData>>, ApiError> {
    let locale = Locale::from_headers(&headers);

    let categories = Category::find_all_active(&state.db_pool).await?;

    Ok(Json(CategoryTreeData::build_forest(categories, locale)))
}

/// Public list. Admin callers see inactive listings too; everyone else gets
/// the active-only view.
pub async fn list_listings_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    headers: HeaderMap,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<ListingData>>, ApiError> {
    let locale = Locale::from_headers(&headers);
    let filter = query.into_filter();

    let is_admin = user.as_deref().map(|u| u.role.is_admin()).unwrap_or(false);
    let listings = if is_admin {
        browse::list_all(&filter, &state.db_pool).await?
    } else {
        browse::list_public(&filter, &state.db_pool).await?
    };

    Ok(Json(ListingData::project_all(listings, locale)))
}

pub async fn my_listings_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    headers: HeaderMap,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<ListingData>>, ApiError> {
    let actor = gate(user.as_deref(), Action::ListOwnListings)?;
    let locale = Locale::from_headers(&headers);

    let listings = browse::my_listings(actor.id, &query.into_filter(), &state.db_pool).await?;

    Ok(Json(ListingData::project_all(listings, locale)))
}

pub async fn popular_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ListingData>>, ApiError> {
    let locale = Locale::from_headers(&headers);

    let listings = browse::popular(&state.db_pool).await?;

    Ok(Json(ListingData::project_all(listings, locale)))
}

pub async fn featured_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ListingData>>, ApiError> {
    let locale = Locale::from_headers(&headers);

    let listings = browse::featured(&state.db_pool).await?;

    Ok(Json(ListingData::project_all(listings, locale)))
}

pub async fn create_listing_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    headers: HeaderMap,
    Json(body): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<ListingData>), ApiError> {
    let actor = gate(user.as_deref(), Action::CreateListing)?;
    let locale = Locale::from_headers(&headers);

    let listing = create_listing(
        actor.id,
        CreateListingInput {
            name_uz: body.name_uz,
            name_ru: body.name_ru,
            description_uz: body.description_uz,
            description_ru: body.description_ru,
            price: body.price,
            category_id: body.category_id,
        },
        &state.db_pool,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ListingData::project(listing, locale))))
}

/// Public detail. Every hit records a view, deduplicated per viewer (account
/// when authenticated, client IP otherwise) within one hour.
pub async fn get_listing_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    client_ip: Option<Extension<ClientIp>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<Json<ListingData>, ApiError> {
    let locale = Locale::from_headers(&headers);
    let viewer = user.as_deref().map(|u| u.account_id);
    let ip = client_ip.map(|Extension(ClientIp(ip))| ip.to_string());

    let listing = browse::get_by_slug(&slug, viewer, ip.as_deref(), &state.db_pool).await?;

    Ok(Json(ListingData::project(listing, locale)))
}

pub async fn update_listing_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(body): Json<UpdateListingRequest>,
) -> Result<Json<ListingData>, ApiError> {
    let actor = gate_listing_mutation(user.as_deref(), Action::UpdateListing)?;
    let locale = Locale::from_headers(&headers);
    let owner = mutation_scope(&actor);

    let listing = update_listing(&slug, owner, body.into_patch(), &state.db_pool).await?;

    Ok(Json(ListingData::project(listing, locale)))
}

pub async fn delete_listing_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    let actor = gate_listing_mutation(user.as_deref(), Action::DeleteListing)?;
    let owner = mutation_scope(&actor);

    delete_listing(&slug, owner, &state.db_pool).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_like_handler(
    Extension(state): Extension<AppState>,
    user: Option<Extension<AuthUser>>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let actor = gate(user.as_deref(), Action::ToggleLike)?;

    let status = toggle_like(actor.id, &slug, &state.db_pool).await?;

    Ok(Json(json!({ "liked": status.liked, "likes": status.likes })))
}

/// Listing mutations fold ownership into the lookup: sellers get their own
/// scope, admins an unscoped one. The policy check here only settles role
/// (a plain user gets 403 before any lookup happens).
fn gate_listing_mutation(user: Option<&AuthUser>, action: Action) -> Result<Actor, ApiError> {
    let actor = user
        .map(AuthUser::actor)
        .ok_or_else(|| ApiError::Authentication("Authentication required".to_string()))?;

    authorize(Some(&actor), action, Some(actor.id)).require()?;

    Ok(actor)
}

fn mutation_scope(actor: &Actor) -> Option<Uuid> {
    if actor.role.is_admin() {
        None
    } else {
        Some(actor.id)
    }
}
