//! Seller repository.
//!
//! Users are created on first sign-in and mutated only when the contact
//! handle changes. The sign-in upsert deliberately leaves `whatsapp` alone
//! so a fresh session never clobbers a saved contact.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use nexus_hub_core::{PhoneNumber, UserId};

use super::RepositoryError;
use crate::models::User;

/// Database row for a user.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    display_name: String,
    avatar_url: Option<String>,
    whatsapp: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let id = UserId::parse(&self.id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user id in database: {e}"))
        })?;
        let whatsapp = self
            .whatsapp
            .as_deref()
            .map(PhoneNumber::parse)
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
            })?;

        Ok(User {
            id,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            whatsapp,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for seller database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, display_name, avatar_url, whatsapp, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// List all users, oldest first.
    ///
    /// Used by the admin tooling only; the product surface never enumerates
    /// sellers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, display_name, avatar_url, whatsapp, created_at, updated_at
            FROM users
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Create the user on first sign-in, or refresh provider-owned fields.
    ///
    /// The contact handle is intentionally untouched by this upsert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn ensure(
        &self,
        id: &UserId,
        display_name: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (id, display_name, avatar_url)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
                SET display_name = EXCLUDED.display_name,
                    avatar_url = EXCLUDED.avatar_url,
                    updated_at = NOW()
            RETURNING id, display_name, avatar_url, whatsapp, created_at, updated_at
            ",
        )
        .bind(id.as_str())
        .bind(display_name)
        .bind(avatar_url)
        .fetch_one(self.pool)
        .await?;

        row.into_user()
    }

    /// Merge a normalized contact handle into the user document.
    ///
    /// Other fields are left as they are.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist and
    /// `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, phone), fields(user_id = %id))]
    pub async fn save_contact(
        &self,
        id: &UserId,
        phone: &PhoneNumber,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET whatsapp = $1, updated_at = NOW()
            WHERE id = $2
            ",
        )
        .bind(phone.as_str())
        .bind(id.as_str())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
