use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// View record for dedup: one row per tracked view, keyed by the viewing
/// account when authenticated, else the client address.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct ListingView {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub account_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ListingView {
    /// Record a view unless the same source already viewed this listing
    /// within the last hour. The dedup check, the view row and the counter
    /// increment share one transaction, so view_count moves by exactly one
    /// per tracked view. Returns true when the view was counted.
    pub async fn record(
        listing_id: Uuid,
        account_id: Option<Uuid>,
        ip_address: Option<&str>,
        pool: &PgPool,
    ) -> sqlx::Result<bool> {
        let mut tx = pool.begin().await?;

        // Lock the listing row first: concurrent transactions for the same
        // listing serialize here, so two simultaneous views from the same
        // source cannot both pass the dedup check below.
        sqlx::query("SELECT 1 FROM listings WHERE id = $1 FOR UPDATE")
            .bind(listing_id)
            .execute(&mut *tx)
            .await?;

        let (seen,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                 SELECT 1 FROM listing_views
                 WHERE listing_id = $1
                   AND created_at >= now() - interval '1 hour'
                   AND (($2::uuid IS NOT NULL AND account_id = $2)
                     OR ($2::uuid IS NULL AND ip_address = $3))
             )",
        )
        .bind(listing_id)
        .bind(account_id)
        .bind(ip_address)
        .fetch_one(&mut *tx)
        .await?;

        if seen {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO listing_views (listing_id, account_id, ip_address) VALUES ($1, $2, $3)",
        )
        .bind(listing_id)
        .bind(account_id)
        .bind(ip_address)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE listings SET view_count = view_count + 1 WHERE id = $1")
            .bind(listing_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(true)
    }
}
