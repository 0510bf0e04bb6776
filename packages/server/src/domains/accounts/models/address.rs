use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

/// Address attached to an account or seller profile.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Address {
    pub id: Uuid,
    pub name: String,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Address {
    pub async fn insert<'e, E: PgExecutor<'e>>(
        name: &str,
        lat: Option<f64>,
        long: Option<f64>,
        executor: E,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO addresses (name, lat, long) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(lat)
        .bind(long)
        .fetch_one(executor)
        .await
    }
}
