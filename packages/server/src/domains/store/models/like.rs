use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Like record. Unique per (account, listing); toggled, never accumulated.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct ListingLike {
    pub id: Uuid,
    pub account_id: Uuid,
    pub listing_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ListingLike {
    /// Toggle the like for (account, listing). Returns true when the call
    /// created a like, false when it removed one.
    ///
    /// `ON CONFLICT DO NOTHING` plus the unique constraint makes concurrent
    /// double-toggles safe: of two simultaneous inserts exactly one wins,
    /// the other observes the conflict and deletes.
    pub async fn toggle(account_id: Uuid, listing_id: Uuid, pool: &PgPool) -> sqlx::Result<bool> {
        let inserted = sqlx::query(
            "INSERT INTO listing_likes (account_id, listing_id)
             VALUES ($1, $2)
             ON CONFLICT (account_id, listing_id) DO NOTHING",
        )
        .bind(account_id)
        .bind(listing_id)
        .execute(pool)
        .await?;

        if inserted.rows_affected() > 0 {
            return Ok(true);
        }

        sqlx::query("DELETE FROM listing_likes WHERE account_id = $1 AND listing_id = $2")
            .bind(account_id)
            .bind(listing_id)
            .execute(pool)
            .await?;

        Ok(false)
    }

    pub async fn count_for_listing(listing_id: Uuid, pool: &PgPool) -> sqlx::Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM listing_likes WHERE listing_id = $1")
                .bind(listing_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
