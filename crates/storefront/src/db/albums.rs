//! Album repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use nexus_hub_core::{AlbumId, UserId};

use super::RepositoryError;
use crate::models::Album;

/// Database row for an album.
#[derive(sqlx::FromRow)]
struct AlbumRow {
    id: i32,
    owner_id: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl AlbumRow {
    fn into_album(self) -> Result<Album, RepositoryError> {
        let owner_id = UserId::parse(&self.owner_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid owner id in database: {e}"))
        })?;

        Ok(Album {
            id: AlbumId::new(self.id),
            owner_id,
            name: self.name,
            created_at: self.created_at,
        })
    }
}

/// Repository for album database operations.
pub struct AlbumRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AlbumRepository<'a> {
    /// Create a new album repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every album owned by `owner`, oldest first.
    ///
    /// An empty result means the seller has no albums yet; it is an
    /// explicit empty state, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Album>, RepositoryError> {
        let rows = sqlx::query_as::<_, AlbumRow>(
            r"
            SELECT id, owner_id, name, created_at
            FROM albums
            WHERE owner_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(owner.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(AlbumRow::into_album).collect()
    }

    /// Get a single album, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        owner: &UserId,
        id: AlbumId,
    ) -> Result<Option<Album>, RepositoryError> {
        let row = sqlx::query_as::<_, AlbumRow>(
            r"
            SELECT id, owner_id, name, created_at
            FROM albums
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(id.as_i32())
        .bind(owner.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(AlbumRow::into_album).transpose()
    }

    /// Create an album.
    ///
    /// The name is uppercased here so every path that creates an album
    /// normalizes the same way. Blank-name rejection happens upstream,
    /// before any query is issued.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn create(&self, owner: &UserId, name: &str) -> Result<Album, RepositoryError> {
        let normalized = name.trim().to_uppercase();

        let row = sqlx::query_as::<_, AlbumRow>(
            r"
            INSERT INTO albums (owner_id, name)
            VALUES ($1, $2)
            RETURNING id, owner_id, name, created_at
            ",
        )
        .bind(owner.as_str())
        .bind(&normalized)
        .fetch_one(self.pool)
        .await?;

        row.into_album()
    }

    /// Count albums owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_owner(&self, owner: &UserId) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM albums WHERE owner_id = $1")
            .bind(owner.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }
}
