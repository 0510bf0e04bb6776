use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Listing (ad) model - SQL persistence layer
///
/// Created only by seller accounts; the seller reference is fixed at
/// creation. Deactivation (`is_active=false`) hides the listing from the
/// public read path instead of deleting it; view_count only ever increases
/// and only through the view-tracking operation.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Listing {
    pub id: Uuid,
    pub name_uz: String,
    pub name_ru: String,
    pub slug: String,
    pub description_uz: String,
    pub description_ru: String,
    pub price: Decimal,
    pub category_id: Uuid,
    pub seller_id: Uuid,
    pub is_active: bool,
    pub is_featured: bool,
    pub view_count: i32,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sort order for listing queries. Parsed from the `ordering` query
/// parameter; anything unrecognized falls back to newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingOrdering {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    MostViewed,
    LeastViewed,
}

impl ListingOrdering {
    pub fn from_param(param: &str) -> Self {
        match param {
            "published_at" => ListingOrdering::Oldest,
            "-published_at" => ListingOrdering::Newest,
            "price" => ListingOrdering::PriceAsc,
            "-price" => ListingOrdering::PriceDesc,
            "-view_count" => ListingOrdering::MostViewed,
            "view_count" => ListingOrdering::LeastViewed,
            _ => ListingOrdering::Newest,
        }
    }

    fn sql(&self) -> &'static str {
        match self {
            ListingOrdering::Newest => "published_at DESC",
            ListingOrdering::Oldest => "published_at ASC",
            ListingOrdering::PriceAsc => "price ASC",
            ListingOrdering::PriceDesc => "price DESC",
            ListingOrdering::MostViewed => "view_count DESC",
            ListingOrdering::LeastViewed => "view_count ASC",
        }
    }
}

/// Which rows a query may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    /// Active listings only (anonymous and ordinary callers)
    Public,
    /// Everything a given seller owns, active or not ("my listings")
    Owner(Uuid),
    /// No visibility restriction (admins)
    All,
}

#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub category_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub is_featured: Option<bool>,
    pub search: Option<String>,
    pub ordering: ListingOrdering,
    pub limit: i64,
    pub offset: i64,
}

impl ListingFilter {
    pub fn with_limit(limit: i64, offset: i64) -> Self {
        Self {
            limit,
            offset,
            ..Default::default()
        }
    }
}

impl Listing {
    /// Public detail lookup: active listings only.
    pub async fn find_active_by_slug(slug: &str, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM listings WHERE slug = $1 AND is_active = true")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        name_uz: &str,
        name_ru: &str,
        slug: &str,
        description_uz: &str,
        description_ru: &str,
        price: Decimal,
        category_id: Uuid,
        seller_id: Uuid,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO listings
                 (name_uz, name_ru, slug, description_uz, description_ru,
                  price, category_id, seller_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(name_uz)
        .bind(name_ru)
        .bind(slug)
        .bind(description_uz)
        .bind(description_ru)
        .bind(price)
        .bind(category_id)
        .bind(seller_id)
        .fetch_one(pool)
        .await
    }

    /// Patch update scoped to an owner (None = admin, unscoped). Returns
    /// None when no row matched, which callers surface as NotFound.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_scoped(
        slug: &str,
        owner: Option<Uuid>,
        name_uz: Option<&str>,
        name_ru: Option<&str>,
        description_uz: Option<&str>,
        description_ru: Option<&str>,
        price: Option<Decimal>,
        category_id: Option<Uuid>,
        is_active: Option<bool>,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE listings
             SET name_uz = COALESCE($3, name_uz),
                 name_ru = COALESCE($4, name_ru),
                 description_uz = COALESCE($5, description_uz),
                 description_ru = COALESCE($6, description_ru),
                 price = COALESCE($7, price),
                 category_id = COALESCE($8, category_id),
                 is_active = COALESCE($9, is_active),
                 updated_at = now()
             WHERE slug = $1 AND ($2::uuid IS NULL OR seller_id = $2)
             RETURNING *",
        )
        .bind(slug)
        .bind(owner)
        .bind(name_uz)
        .bind(name_ru)
        .bind(description_uz)
        .bind(description_ru)
        .bind(price)
        .bind(category_id)
        .bind(is_active)
        .fetch_optional(pool)
        .await
    }

    /// Delete scoped to an owner (None = admin). Returns false when no row
    /// matched.
    pub async fn delete_scoped(
        slug: &str,
        owner: Option<Uuid>,
        pool: &PgPool,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            "DELETE FROM listings WHERE slug = $1 AND ($2::uuid IS NULL OR seller_id = $2)",
        )
        .bind(slug)
        .bind(owner)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Filtered listing query under a visibility scope.
    pub async fn find_filtered(
        scope: ListingScope,
        filter: &ListingFilter,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<Self>> {
        let (active_only, scope_seller) = match scope {
            ListingScope::Public => (Some(true), None),
            ListingScope::Owner(seller_id) => (None, Some(seller_id)),
            ListingScope::All => (None, None),
        };

        // The ordering clause comes from a fixed enum, never from user input.
        let query = format!(
            "SELECT * FROM listings
             WHERE ($1::bool IS NULL OR is_active = $1)
               AND ($2::uuid IS NULL OR seller_id = $2)
               AND ($3::uuid IS NULL OR category_id = $3)
               AND ($4::uuid IS NULL OR seller_id = $4)
               AND ($5::numeric IS NULL OR price >= $5)
               AND ($6::numeric IS NULL OR price <= $6)
               AND ($7::bool IS NULL OR is_featured = $7)
               AND ($8::text IS NULL
                    OR name_uz ILIKE '%' || $8 || '%'
                    OR name_ru ILIKE '%' || $8 || '%'
                    OR description_uz ILIKE '%' || $8 || '%'
                    OR description_ru ILIKE '%' || $8 || '%')
             ORDER BY {}
             LIMIT $9 OFFSET $10",
            filter.ordering.sql()
        );

        sqlx::query_as::<_, Self>(&query)
            .bind(active_only)
            .bind(scope_seller)
            .bind(filter.category_id)
            .bind(filter.seller_id)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.is_featured)
            .bind(filter.search.as_deref())
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Most viewed active listings.
    pub async fn find_popular(limit: i64, pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM listings
             WHERE is_active = true
             ORDER BY view_count DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Featured active listings, newest first.
    pub async fn find_featured(pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM listings
             WHERE is_active = true AND is_featured = true
             ORDER BY published_at DESC",
        )
        .fetch_all(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_param_parsing() {
        assert_eq!(
            ListingOrdering::from_param("-price"),
            ListingOrdering::PriceDesc
        );
        assert_eq!(
            ListingOrdering::from_param("price"),
            ListingOrdering::PriceAsc
        );
        assert_eq!(
            ListingOrdering::from_param("-view_count"),
            ListingOrdering::MostViewed
        );
        assert_eq!(
            ListingOrdering::from_param("-published_at"),
            ListingOrdering::Newest
        );
        // Unknown input falls back rather than reaching the SQL layer
        assert_eq!(
            ListingOrdering::from_param("; DROP TABLE listings"),
            ListingOrdering::Newest
        );
    }

    #[test]
    fn test_ordering_sql_is_whitelisted() {
        for ordering in [
            ListingOrdering::Newest,
            ListingOrdering::Oldest,
            ListingOrdering::PriceAsc,
            ListingOrdering::PriceDesc,
            ListingOrdering::MostViewed,
            ListingOrdering::LeastViewed,
        ] {
            let sql = ordering.sql();
            assert!(sql.ends_with("ASC") || sql.ends_with("DESC"));
        }
    }
}
