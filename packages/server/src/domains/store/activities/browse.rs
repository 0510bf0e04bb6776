//! Read paths through the listing visibility gate.

use sqlx::PgPool;

use crate::common::{ApiError, ApiResult};
use crate::domains::store::models::listing::{Listing, ListingFilter, ListingScope};
use crate::domains::store::models::view::ListingView;
use uuid::Uuid;

pub const POPULAR_LIMIT: i64 = 20;

/// Public browse: only active listings, whatever the filter says.
pub async fn list_public(filter: &ListingFilter, pool: &PgPool) -> ApiResult<Vec<Listing>> {
    Ok(Listing::find_filtered(ListingScope::Public, filter, pool).await?)
}

/// Admin browse: no visibility restriction, inactive listings included.
pub async fn list_all(filter: &ListingFilter, pool: &PgPool) -> ApiResult<Vec<Listing>> {
    Ok(Listing::find_filtered(ListingScope::All, filter, pool).await?)
}

/// A seller's own listings, inactive ones included.
pub async fn my_listings(
    seller_id: Uuid,
    filter: &ListingFilter,
    pool: &PgPool,
) -> ApiResult<Vec<Listing>> {
    Ok(Listing::find_filtered(ListingScope::Owner(seller_id), filter, pool).await?)
}

pub async fn popular(pool: &PgPool) -> ApiResult<Vec<Listing>> {
    Ok(Listing::find_popular(POPULAR_LIMIT, pool).await?)
}

pub async fn featured(pool: &PgPool) -> ApiResult<Vec<Listing>> {
    Ok(Listing::find_featured(pool).await?)
}

/// Public detail by slug; records the view (deduped per source per hour).
pub async fn get_by_slug(
    slug: &str,
    viewer: Option<Uuid>,
    client_ip: Option<&str>,
    pool: &PgPool,
) -> ApiResult<Listing> {
    let mut listing = Listing::find_active_by_slug(slug, pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing"))?;

    let tracked = ListingView::record(listing.id, viewer, client_ip, pool).await?;
    if tracked {
        listing.view_count += 1;
    }

    Ok(listing)
}
