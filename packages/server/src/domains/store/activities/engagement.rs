//! Like toggling.

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::common::{ApiError, ApiResult};
use crate::domains::store::models::like::ListingLike;
use crate::domains::store::models::listing::Listing;

/// Outcome of a like toggle: the caller's new state plus the listing's
/// current like count.
#[derive(Debug, Clone, Copy)]
pub struct LikeStatus {
    pub liked: bool,
    pub likes: i64,
}

/// Toggle the caller's like on an active listing.
pub async fn toggle_like(account_id: Uuid, slug: &str, pool: &PgPool) -> ApiResult<LikeStatus> {
    let listing = Listing::find_active_by_slug(slug, pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing"))?;

    let liked = ListingLike::toggle(account_id, listing.id, pool).await?;
    let likes = ListingLike::count_for_listing(listing.id, pool).await?;

    debug!(account_id = %account_id, listing_id = %listing.id, liked, "Like toggled");

    Ok(LikeStatus { liked, likes })
}
