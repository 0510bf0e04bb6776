//! Integration tests for listing engagement and mutation scoping.
//!
//! Covers like toggling, view dedup (including concurrent views) and the
//! ownership scope on listing updates.

mod common;

use crate::common::{create_account, create_category, create_listing, TestHarness};
use server_core::common::ApiError;
use server_core::domains::accounts::Role;
use server_core::domains::store::activities::engagement::toggle_like;
use server_core::domains::store::activities::update_listing::{update_listing, ListingPatch};
use server_core::domains::store::models::like::ListingLike;
use server_core::domains::store::models::listing::Listing;
use server_core::domains::store::models::view::ListingView;
use test_context::test_context;
use uuid::Uuid;

async fn seeded_listing(pool: &sqlx::PgPool) -> (Uuid, Listing) {
    let seller = create_account(pool, Role::Seller)
        .await
        .expect("Failed to create seller");
    let category = create_category(pool, "toys")
        .await
        .expect("Failed to create category");
    let listing = create_listing(pool, seller.id, category.id, "wooden-train")
        .await
        .expect("Failed to create listing");
    (seller.id, listing)
}

async fn view_count(listing_id: Uuid, pool: &sqlx::PgPool) -> i32 {
    let (count,): (i32,) = sqlx::query_as("SELECT view_count FROM listings WHERE id = $1")
        .bind(listing_id)
        .fetch_one(pool)
        .await
        .expect("Failed to read view_count");
    count
}

#[test_context(TestHarness)]
#[tokio::test]
async fn toggle_like_twice_is_net_zero(ctx: &TestHarness) {
    let (_, listing) = seeded_listing(&ctx.db_pool).await;
    let liker = create_account(&ctx.db_pool, Role::User)
        .await
        .expect("Failed to create account");

    let first = toggle_like(liker.id, &listing.slug, &ctx.db_pool)
        .await
        .expect("Failed to toggle like");
    assert!(first.liked);
    assert_eq!(first.likes, 1);

    let second = toggle_like(liker.id, &listing.slug, &ctx.db_pool)
        .await
        .expect("Failed to toggle like again");
    assert!(!second.liked);
    assert_eq!(second.likes, 0);

    // Two toggles leave no like rows behind
    let remaining = ListingLike::count_for_listing(listing.id, &ctx.db_pool)
        .await
        .expect("Failed to count likes");
    assert_eq!(remaining, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn repeat_view_within_window_is_not_counted(ctx: &TestHarness) {
    let (_, listing) = seeded_listing(&ctx.db_pool).await;
    let viewer = create_account(&ctx.db_pool, Role::User)
        .await
        .expect("Failed to create account");

    let counted = ListingView::record(listing.id, Some(viewer.id), None, &ctx.db_pool)
        .await
        .expect("Failed to record view");
    assert!(counted);

    let counted_again = ListingView::record(listing.id, Some(viewer.id), None, &ctx.db_pool)
        .await
        .expect("Failed to record repeat view");
    assert!(!counted_again);

    // One tracked view, not two
    assert_eq!(view_count(listing.id, &ctx.db_pool).await, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_views_from_same_source_count_once(ctx: &TestHarness) {
    let (_, listing) = seeded_listing(&ctx.db_pool).await;
    let viewer = create_account(&ctx.db_pool, Role::User)
        .await
        .expect("Failed to create account");

    // Both transactions race on the dedup check; the row lock on the
    // listing forces one to observe the other's view row.
    let (first, second) = tokio::join!(
        ListingView::record(listing.id, Some(viewer.id), None, &ctx.db_pool),
        ListingView::record(listing.id, Some(viewer.id), None, &ctx.db_pool),
    );
    let first = first.expect("Failed to record view");
    let second = second.expect("Failed to record view");

    assert!(first ^ second, "Exactly one of the racing views must count");
    assert_eq!(view_count(listing.id, &ctx.db_pool).await, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_is_scoped_to_the_owning_seller(ctx: &TestHarness) {
    let (owner_id, listing) = seeded_listing(&ctx.db_pool).await;
    let other_seller = create_account(&ctx.db_pool, Role::Seller)
        .await
        .expect("Failed to create account");

    let patch = ListingPatch {
        name_uz: Some("Yangi nom".to_string()),
        ..Default::default()
    };

    // A different seller sees someone else's listing as missing
    let err = update_listing(&listing.slug, Some(other_seller.id), patch.clone(), &ctx.db_pool)
        .await
        .expect_err("Foreign listing must not be updatable");
    assert!(matches!(err, ApiError::NotFound(_)));

    // The owner's scoped update goes through
    let updated = update_listing(&listing.slug, Some(owner_id), patch, &ctx.db_pool)
        .await
        .expect("Owner update must succeed");
    assert_eq!(updated.name_uz, "Yangi nom");
}
