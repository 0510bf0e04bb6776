//! Listing creation (seller only; the route gates on the policy engine).

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::common::validators::validate_free_text;
use crate::common::{ApiError, ApiResult, FieldErrors};
use crate::domains::store::models::category::Category;
use crate::domains::store::models::listing::Listing;
use crate::domains::store::slug::generate_unique_slug;

#[derive(Debug, Clone)]
pub struct CreateListingInput {
    pub name_uz: String,
    pub name_ru: String,
    pub description_uz: String,
    pub description_ru: String,
    pub price: Decimal,
    pub category_id: Uuid,
}

/// Validate and insert a listing owned by `seller_id`. The slug is derived
/// from the Uzbek name and made unique at the store level.
pub async fn create_listing(
    seller_id: Uuid,
    input: CreateListingInput,
    pool: &PgPool,
) -> ApiResult<Listing> {
    let mut errors = FieldErrors::new();
    for (field, value) in [
        ("name_uz", &input.name_uz),
        ("name_ru", &input.name_ru),
        ("description_uz", &input.description_uz),
        ("description_ru", &input.description_ru),
    ] {
        if value.trim().is_empty() {
            errors.insert(field.to_string(), vec!["This field is required".to_string()]);
        } else if let Err(msg) = validate_free_text(value) {
            errors.insert(field.to_string(), vec![msg.to_string()]);
        }
    }
    if input.price < Decimal::ZERO {
        errors.insert(
            "price".to_string(),
            vec!["Price must be non-negative".to_string()],
        );
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    if Category::find_by_id(input.category_id, pool)
        .await?
        .is_none()
    {
        return Err(ApiError::field("category", "Unknown category"));
    }

    let slug = generate_unique_slug("listings", &input.name_uz, pool).await?;

    let listing = Listing::insert(
        &input.name_uz,
        &input.name_ru,
        &slug,
        &input.description_uz,
        &input.description_ru,
        input.price,
        input.category_id,
        seller_id,
        pool,
    )
    .await?;

    info!(listing_id = %listing.id, seller_id = %seller_id, "Listing created");

    Ok(listing)
}
