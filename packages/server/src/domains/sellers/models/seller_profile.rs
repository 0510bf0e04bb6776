use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Seller profile - SQL persistence layer
///
/// Exactly one per account (unique index on account_id); deleted with its
/// owning account. `is_approved=false` covers both the pending and the
/// rejected state; approval is always reversible.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct SellerProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub project_name: String,
    pub category_id: Option<Uuid>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SellerProfile {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM seller_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new profile inside a caller-provided transaction. The unique
    /// index on account_id rejects a second profile for the same account.
    pub async fn insert<'e, E: PgExecutor<'e>>(
        account_id: Uuid,
        project_name: &str,
        category_id: Option<Uuid>,
        executor: E,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO seller_profiles (account_id, project_name, category_id)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(account_id)
        .bind(project_name)
        .bind(category_id)
        .fetch_one(executor)
        .await
    }

    /// Flip the approval flag inside a caller-provided transaction.
    /// Returns the updated row, or None if the profile does not exist.
    pub async fn set_approved<'e, E: PgExecutor<'e>>(
        id: Uuid,
        is_approved: bool,
        executor: E,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE seller_profiles
             SET is_approved = $2, updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(is_approved)
        .fetch_optional(executor)
        .await
    }

    /// Applications awaiting approval, oldest first.
    pub async fn find_pending(pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM seller_profiles WHERE is_approved = false ORDER BY created_at ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_approval(is_approved: bool, pool: &PgPool) -> sqlx::Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM seller_profiles WHERE is_approved = $1")
                .bind(is_approved)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
