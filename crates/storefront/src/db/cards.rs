//! Collection-entry repository.
//!
//! Cards are the one collection with a two-key filter: every album
//! enumeration goes through `(owner_id, album_id)`. There is no stored
//! sibling list to keep consistent when cards move or disappear.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use nexus_hub_core::{AlbumId, CardId, Price, UserId};

use super::RepositoryError;
use crate::catalog::CatalogItem;
use crate::models::{Card, CardMetadata};

const CARD_COLUMNS: &str = r"id, owner_id, album_id, catalog_id, name, image_url,
       price, condition, language, quantity, delivery, created_at, updated_at";

/// Database row for a collection entry.
#[derive(sqlx::FromRow)]
struct CardRow {
    id: i32,
    owner_id: String,
    album_id: i32,
    catalog_id: String,
    name: String,
    image_url: String,
    price: Decimal,
    condition: String,
    language: String,
    quantity: i32,
    delivery: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CardRow {
    fn into_card(self) -> Result<Card, RepositoryError> {
        let owner_id = UserId::parse(&self.owner_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid owner id in database: {e}"))
        })?;
        let price = Price::new(self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;
        let condition = self.condition.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid condition in database: {e}"))
        })?;
        let language = self.language.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid language in database: {e}"))
        })?;
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "invalid quantity in database: {}",
                self.quantity
            ))
        })?;

        Ok(Card {
            id: CardId::new(self.id),
            owner_id,
            album_id: AlbumId::new(self.album_id),
            catalog_id: self.catalog_id,
            name: self.name,
            image_url: self.image_url,
            price,
            condition,
            language,
            quantity,
            delivery: self.delivery,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn rows_into_cards(rows: Vec<CardRow>) -> Result<Vec<Card>, RepositoryError> {
    rows.into_iter().map(CardRow::into_card).collect()
}

/// Repository for collection-entry database operations.
pub struct CardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CardRepository<'a> {
    /// Create a new card repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the cards of one album, oldest first.
    ///
    /// This is the only supported way to enumerate an album's contents.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        owner: &UserId,
        album: AlbumId,
    ) -> Result<Vec<Card>, RepositoryError> {
        let rows = sqlx::query_as::<_, CardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM user_collections \
             WHERE owner_id = $1 AND album_id = $2 ORDER BY created_at ASC"
        ))
        .bind(owner.as_str())
        .bind(album.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows_into_cards(rows)
    }

    /// List every card a seller has across all albums, oldest first.
    ///
    /// Used by the public vitrine when no album filter is given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Card>, RepositoryError> {
        let rows = sqlx::query_as::<_, CardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM user_collections \
             WHERE owner_id = $1 ORDER BY created_at ASC"
        ))
        .bind(owner.as_str())
        .fetch_all(self.pool)
        .await?;

        rows_into_cards(rows)
    }

    /// Fetch a subset of a seller's cards by id, preserving the requested order.
    ///
    /// Ids that don't exist (or belong to someone else) are silently absent
    /// from the result.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_ids(
        &self,
        owner: &UserId,
        ids: &[CardId],
    ) -> Result<Vec<Card>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i32> = ids.iter().map(CardId::as_i32).collect();
        let rows = sqlx::query_as::<_, CardRow>(&format!(
            "SELECT {CARD_COLUMNS} FROM user_collections \
             WHERE owner_id = $1 AND id = ANY($2)"
        ))
        .bind(owner.as_str())
        .bind(raw_ids)
        .fetch_all(self.pool)
        .await?;

        let mut cards = rows_into_cards(rows)?;
        cards.sort_by_key(|card| {
            ids.iter()
                .position(|id| *id == card.id)
                .unwrap_or(usize::MAX)
        });
        Ok(cards)
    }

    /// Persist a new card combining a catalog item with sale metadata.
    ///
    /// The catalog item's image locator is resolved to its high-resolution
    /// variant before storage. Price positivity was already enforced when
    /// the metadata was parsed; nothing invalid reaches this query.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the write fails.
    #[instrument(skip(self, item, metadata), fields(owner = %owner, album = %album, catalog_id = %item.id))]
    pub async fn create(
        &self,
        owner: &UserId,
        album: AlbumId,
        item: &CatalogItem,
        metadata: &CardMetadata,
    ) -> Result<Card, RepositoryError> {
        let row = sqlx::query_as::<_, CardRow>(&format!(
            "INSERT INTO user_collections \
             (owner_id, album_id, catalog_id, name, image_url, price, condition, language, quantity, delivery) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {CARD_COLUMNS}"
        ))
        .bind(owner.as_str())
        .bind(album.as_i32())
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.image_high())
        .bind(metadata.price.amount())
        .bind(metadata.condition.as_str())
        .bind(metadata.language.as_str())
        .bind(i32::try_from(metadata.effective_quantity()).unwrap_or(i32::MAX))
        .bind(metadata.delivery.as_deref())
        .fetch_one(self.pool)
        .await?;

        row.into_card()
    }

    /// Replace a card's sale metadata, leaving identity and the catalog
    /// reference untouched. `updated_at` advances.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no card matches the id and
    /// owner, and `RepositoryError::Database` for other database errors.
    #[instrument(skip(self, metadata), fields(owner = %owner, card = %id))]
    pub async fn update_metadata(
        &self,
        id: CardId,
        owner: &UserId,
        metadata: &CardMetadata,
    ) -> Result<Card, RepositoryError> {
        let row = sqlx::query_as::<_, CardRow>(&format!(
            "UPDATE user_collections \
             SET price = $1, condition = $2, language = $3, quantity = $4, delivery = $5, \
                 updated_at = NOW() \
             WHERE id = $6 AND owner_id = $7 \
             RETURNING {CARD_COLUMNS}"
        ))
        .bind(metadata.price.amount())
        .bind(metadata.condition.as_str())
        .bind(metadata.language.as_str())
        .bind(i32::try_from(metadata.effective_quantity()).unwrap_or(i32::MAX))
        .bind(metadata.delivery.as_deref())
        .bind(id.as_i32())
        .bind(owner.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.into_card()
    }

    /// Delete a single card.
    ///
    /// # Returns
    ///
    /// Returns `true` if the card was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self), fields(owner = %owner, card = %id))]
    pub async fn delete(&self, id: CardId, owner: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM user_collections WHERE id = $1 AND owner_id = $2")
            .bind(id.as_i32())
            .bind(owner.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count cards owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_owner(&self, owner: &UserId) -> Result<i64, RepositoryError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_collections WHERE owner_id = $1")
                .bind(owner.as_str())
                .fetch_one(self.pool)
                .await?;

        Ok(count.0)
    }
}
