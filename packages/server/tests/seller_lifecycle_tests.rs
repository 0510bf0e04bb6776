//! Integration tests for the seller lifecycle workflow.
//!
//! Tests the status request and admin approval operations:
//! - request creates a pending profile and promotes the role atomically
//! - a second request from the same account conflicts
//! - approval flips profile and account flags in one transaction
//! - rejection never revokes a previously earned verification

mod common;

use crate::common::{create_account, create_category, TestHarness};
use server_core::common::ApiError;
use server_core::domains::accounts::models::account::Account;
use server_core::domains::accounts::Role;
use server_core::domains::sellers::activities::approval::{approve, reject};
use server_core::domains::sellers::activities::request_status::{
    request_seller_status, SellerRequest,
};
use server_core::domains::sellers::models::seller_profile::SellerProfile;
use test_context::test_context;
use uuid::Uuid;

fn request(category_id: Option<Uuid>) -> SellerRequest {
    SellerRequest {
        project_name: "Test Store".to_string(),
        category_id,
        address_name: None,
        address_lat: None,
        address_long: None,
    }
}

async fn reload_account(id: Uuid, pool: &sqlx::PgPool) -> Account {
    Account::find_by_id(id, pool)
        .await
        .expect("Failed to load account")
        .expect("Account must exist")
}

#[test_context(TestHarness)]
#[tokio::test]
async fn request_creates_pending_profile_and_promotes_role(ctx: &TestHarness) {
    let account = create_account(&ctx.db_pool, Role::User)
        .await
        .expect("Failed to create account");
    let category = create_category(&ctx.db_pool, "electronics")
        .await
        .expect("Failed to create category");

    let profile = request_seller_status(account.id, request(Some(category.id)), &ctx.db_pool)
        .await
        .expect("Failed to request seller status");

    assert!(!profile.is_approved);
    assert_eq!(profile.account_id, account.id);

    let reloaded = reload_account(account.id, &ctx.db_pool).await;
    assert_eq!(reloaded.role, Role::Seller);
    // Pending, not yet verified
    assert!(!reloaded.is_verified);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn second_request_conflicts(ctx: &TestHarness) {
    let account = create_account(&ctx.db_pool, Role::User)
        .await
        .expect("Failed to create account");

    request_seller_status(account.id, request(None), &ctx.db_pool)
        .await
        .expect("First request must succeed");

    let err = request_seller_status(account.id, request(None), &ctx.db_pool)
        .await
        .expect_err("Second request must be rejected");
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approval_verifies_account_with_profile(ctx: &TestHarness) {
    let account = create_account(&ctx.db_pool, Role::User)
        .await
        .expect("Failed to create account");
    let profile = request_seller_status(account.id, request(None), &ctx.db_pool)
        .await
        .expect("Failed to request seller status");

    let approved = approve(profile.id, &ctx.db_pool)
        .await
        .expect("Failed to approve");

    // Both flags flipped together: an approved profile is never observed
    // with an unverified owner
    assert!(approved.is_approved);
    let reloaded = reload_account(account.id, &ctx.db_pool).await;
    assert!(reloaded.is_verified);

    let stored = SellerProfile::find_by_id(profile.id, &ctx.db_pool)
        .await
        .expect("Failed to load profile")
        .expect("Profile must exist");
    assert!(stored.is_approved);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rejection_does_not_revoke_verification(ctx: &TestHarness) {
    let account = create_account(&ctx.db_pool, Role::User)
        .await
        .expect("Failed to create account");
    let profile = request_seller_status(account.id, request(None), &ctx.db_pool)
        .await
        .expect("Failed to request seller status");

    approve(profile.id, &ctx.db_pool)
        .await
        .expect("Failed to approve");

    let rejected = reject(profile.id, &ctx.db_pool)
        .await
        .expect("Failed to reject");
    assert!(!rejected.is_approved);

    // Verification earned at approval survives the rejection
    let reloaded = reload_account(account.id, &ctx.db_pool).await;
    assert!(reloaded.is_verified);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approving_unknown_profile_is_not_found(ctx: &TestHarness) {
    let err = approve(Uuid::new_v4(), &ctx.db_pool)
        .await
        .expect_err("Unknown profile must not approve");
    assert!(matches!(err, ApiError::NotFound(_)));
}
