use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Category model - SQL persistence layer
///
/// Self-referential tree (parent_id), acyclic by construction: a category is
/// only ever inserted under an existing parent. Both language variants are
/// stored; display picks one per request locale.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name_uz: String,
    pub name_ru: String,
    pub slug: String,
    pub parent_id: Option<Uuid>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All active categories in one fetch; tree assembly happens in memory.
    pub async fn find_all_active(pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM categories WHERE is_active = true ORDER BY sort_order, name_uz",
        )
        .fetch_all(pool)
        .await
    }
}
