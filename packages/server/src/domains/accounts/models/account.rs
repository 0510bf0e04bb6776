use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::domains::accounts::Role;

/// Account model - SQL persistence layer
///
/// Phone number is the unique login identifier. The password is stored as an
/// Argon2 PHC hash; role and verification flags are mutated only through the
/// seller lifecycle or admin-gated operations.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub phone_number: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,
    pub address_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Find account by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find account by phone number
    pub async fn find_by_phone(phone_number: &str, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(pool)
            .await
    }

    /// Insert new account. The unique index on phone_number rejects
    /// duplicates at the store level.
    pub async fn insert(
        phone_number: &str,
        password_hash: &str,
        full_name: &str,
        role: Role,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO accounts (phone_number, password_hash, full_name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(phone_number)
        .bind(password_hash)
        .bind(full_name)
        .bind(role)
        .fetch_one(pool)
        .await
    }

    /// Update own profile fields (full name, address)
    pub async fn update_profile(
        id: Uuid,
        full_name: Option<&str>,
        address_id: Option<Uuid>,
        pool: &PgPool,
    ) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE accounts
             SET full_name = COALESCE($2, full_name),
                 address_id = COALESCE($3, address_id),
                 updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(full_name)
        .bind(address_id)
        .fetch_one(pool)
        .await
    }

    /// Admin update: role, activation and verification flags, full name
    pub async fn admin_update(
        id: Uuid,
        full_name: Option<&str>,
        role: Option<Role>,
        is_active: Option<bool>,
        is_verified: Option<bool>,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE accounts
             SET full_name = COALESCE($2, full_name),
                 role = COALESCE($3::account_role, role),
                 is_active = COALESCE($4, is_active),
                 is_verified = COALESCE($5, is_verified),
                 updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(full_name)
        .bind(role)
        .bind(is_active)
        .bind(is_verified)
        .fetch_optional(pool)
        .await
    }

    /// List accounts for the admin screen, optionally filtered by role and a
    /// phone/name search term. Newest first.
    pub async fn find_filtered(
        role: Option<Role>,
        search: Option<&str>,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM accounts
             WHERE ($1::account_role IS NULL OR role = $1)
               AND ($2::text IS NULL
                    OR phone_number ILIKE '%' || $2 || '%'
                    OR full_name ILIKE '%' || $2 || '%')
             ORDER BY created_at DESC",
        )
        .bind(role)
        .bind(search)
        .fetch_all(pool)
        .await
    }

    /// Hard delete. Seller profile and listings cascade.
    /// Returns false if no such account existed.
    pub async fn delete(id: Uuid, pool: &PgPool) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the seller verification flag inside a caller-provided transaction.
    pub async fn set_verified<'e, E: PgExecutor<'e>>(
        id: Uuid,
        is_verified: bool,
        executor: E,
    ) -> sqlx::Result<()> {
        sqlx::query("UPDATE accounts SET is_verified = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(is_verified)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Promote the account role inside a caller-provided transaction.
    pub async fn set_role<'e, E: PgExecutor<'e>>(
        id: Uuid,
        role: Role,
        executor: E,
    ) -> sqlx::Result<()> {
        sqlx::query("UPDATE accounts SET role = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(role)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn count_total(pool: &PgPool) -> sqlx::Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM accounts")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn count_active(pool: &PgPool) -> sqlx::Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM accounts WHERE is_active = true")
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Account counts grouped by role. Roles with no accounts are absent.
    pub async fn count_by_role(pool: &PgPool) -> sqlx::Result<Vec<(Role, i64)>> {
        sqlx::query_as::<_, (Role, i64)>("SELECT role, COUNT(*) FROM accounts GROUP BY role")
            .fetch_all(pool)
            .await
    }
}
