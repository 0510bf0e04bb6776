//! Listing mutation: owner-scoped update and delete.
//!
//! Ownership is folded into the lookup itself: a seller patching someone
//! else's slug matches no row and gets NotFound, never Forbidden, so
//! existence of foreign listings is not leaked. Admins pass `None` as the
//! owner scope and can reach any listing.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::common::validators::validate_free_text;
use crate::common::{ApiError, ApiResult, FieldErrors};
use crate::domains::store::models::category::Category;
use crate::domains::store::models::listing::Listing;

#[derive(Debug, Clone, Default)]
pub struct ListingPatch {
    pub name_uz: Option<String>,
    pub name_ru: Option<String>,
    pub description_uz: Option<String>,
    pub description_ru: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// `owner = None` means admin access (no ownership scope).
pub async fn update_listing(
    slug: &str,
    owner: Option<Uuid>,
    patch: ListingPatch,
    pool: &PgPool,
) -> ApiResult<Listing> {
    let mut errors = FieldErrors::new();
    for (field, value) in [
        ("name_uz", &patch.name_uz),
        ("name_ru", &patch.name_ru),
        ("description_uz", &patch.description_uz),
        ("description_ru", &patch.description_ru),
    ] {
        if let Some(value) = value {
            if let Err(msg) = validate_free_text(value) {
                errors.insert(field.to_string(), vec![msg.to_string()]);
            }
        }
    }
    if let Some(price) = patch.price {
        if price < Decimal::ZERO {
            errors.insert(
                "price".to_string(),
                vec!["Price must be non-negative".to_string()],
            );
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if let Some(category_id) = patch.category_id {
        if Category::find_by_id(category_id, pool).await?.is_none() {
            return Err(ApiError::field("category", "Unknown category"));
        }
    }

    let listing = Listing::update_scoped(
        slug,
        owner,
        patch.name_uz.as_deref(),
        patch.name_ru.as_deref(),
        patch.description_uz.as_deref(),
        patch.description_ru.as_deref(),
        patch.price,
        patch.category_id,
        patch.is_active,
        pool,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Listing"))?;

    info!(listing_id = %listing.id, "Listing updated");

    Ok(listing)
}

pub async fn delete_listing(slug: &str, owner: Option<Uuid>, pool: &PgPool) -> ApiResult<()> {
    if Listing::delete_scoped(slug, owner, pool).await? {
        info!(slug = %slug, "Listing deleted");
        Ok(())
    } else {
        Err(ApiError::not_found("Listing"))
    }
}
