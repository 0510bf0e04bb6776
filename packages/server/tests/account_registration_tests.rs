//! Integration tests for registration and credential verification.
//!
//! Covers the identity store against a real database:
//! - register then login round-trip with the same password
//! - wrong password rejected without leaking which part was wrong
//! - duplicate phone registration conflicts and creates no row

mod common;

use crate::common::{unique_phone, TestHarness};
use server_core::common::ApiError;
use server_core::domains::accounts::activities::login::verify_credentials;
use server_core::domains::accounts::activities::register::{register_account, RegisterInput};
use test_context::test_context;

fn input(phone: &str) -> RegisterInput {
    RegisterInput {
        phone_number: phone.to_string(),
        password: "secret123".to_string(),
        full_name: "Ali Valiyev".to_string(),
    }
}

async fn account_count(pool: &sqlx::PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await
        .expect("Failed to count accounts");
    count
}

#[test_context(TestHarness)]
#[tokio::test]
async fn register_then_login_round_trip(ctx: &TestHarness) {
    let phone = unique_phone();

    let account = register_account(input(&phone), &ctx.db_pool)
        .await
        .expect("Failed to register account");
    assert_eq!(account.phone_number, phone);

    // Same password verifies and resolves the same account
    let verified = verify_credentials(&phone, "secret123", &ctx.db_pool)
        .await
        .expect("Failed to verify credentials");
    assert_eq!(verified.id, account.id);

    // Wrong password is an authentication failure
    let err = verify_credentials(&phone, "wrong-password", &ctx.db_pool)
        .await
        .expect_err("Wrong password must not verify");
    assert!(matches!(err, ApiError::Authentication(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_phone_conflicts_without_new_row(ctx: &TestHarness) {
    let phone = unique_phone();

    register_account(input(&phone), &ctx.db_pool)
        .await
        .expect("First registration must succeed");

    let before = account_count(&ctx.db_pool).await;

    let err = register_account(input(&phone), &ctx.db_pool)
        .await
        .expect_err("Duplicate phone must be rejected");
    assert!(matches!(err, ApiError::Conflict(_)));

    // The failed registration left the store untouched
    assert_eq!(account_count(&ctx.db_pool).await, before);
}
