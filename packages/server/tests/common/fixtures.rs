//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly where one exists, raw SQL
//! otherwise. Identifiers are randomized so tests sharing a database never
//! collide.

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use server_core::domains::accounts::models::account::Account;
use server_core::domains::accounts::password::hash_password;
use server_core::domains::accounts::Role;
use server_core::domains::store::models::category::Category;
use server_core::domains::store::models::listing::Listing;

/// Unique E.164-style phone number per call.
pub fn unique_phone() -> String {
    let digits = Uuid::new_v4().as_u128() % 1_000_000_000_000;
    format!("+998{}", digits)
}

/// Password used by every fixture account.
pub const FIXTURE_PASSWORD: &str = "fixture-password";

/// Create an account with the given role and a unique phone number.
pub async fn create_account(pool: &PgPool, role: Role) -> Result<Account> {
    let password_hash = hash_password(FIXTURE_PASSWORD)?;
    let account =
        Account::insert(&unique_phone(), &password_hash, "Test Account", role, pool).await?;
    Ok(account)
}

/// Create an active category with a unique slug.
pub async fn create_category(pool: &PgPool, name: &str) -> Result<Category> {
    let slug = format!("{}-{}", name, Uuid::new_v4());
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name_uz, name_ru, slug) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(name)
    .bind(name)
    .bind(slug)
    .fetch_one(pool)
    .await?;
    Ok(category)
}

/// Create an active listing owned by `seller_id`, with a unique slug.
pub async fn create_listing(
    pool: &PgPool,
    seller_id: Uuid,
    category_id: Uuid,
    name: &str,
) -> Result<Listing> {
    let slug = format!("{}-{}", name, Uuid::new_v4());
    let listing = Listing::insert(
        name,
        name,
        &slug,
        "Test description",
        "Test description",
        Decimal::new(150_000, 2),
        category_id,
        seller_id,
        pool,
    )
    .await?;
    Ok(listing)
}
