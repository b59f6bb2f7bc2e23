//! Collection-entry route handlers.
//!
//! The dashboard re-fetches the album grid after every successful mutation;
//! these handlers therefore return the written row (or just a status) and
//! never try to keep a live view consistent themselves.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nexus_hub_core::{AlbumId, CardCondition, CardId, CardLanguage, Price, UserId};

use crate::catalog::CatalogItem;
use crate::db::{AlbumRepository, CardRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{Card, CardMetadata};
use crate::routes::albums::AlbumPayload;
use crate::state::AppState;

/// Card data returned to the dashboard and the public vitrine.
#[derive(Debug, Serialize)]
pub struct CardPayload {
    pub id: CardId,
    pub album_id: AlbumId,
    pub catalog_id: String,
    pub name: String,
    /// High-resolution image (the stored locator).
    pub image: String,
    /// Low-resolution variant for grids.
    pub image_thumb: String,
    pub price: Price,
    /// Price with es-CL digit grouping, e.g. `"50.000"`.
    pub price_display: String,
    pub condition: CardCondition,
    pub language: CardLanguage,
    pub quantity: u32,
    pub delivery: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Card> for CardPayload {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            album_id: card.album_id,
            catalog_id: card.catalog_id.clone(),
            name: card.name.clone(),
            image: card.image_url.clone(),
            image_thumb: card.image_thumb(),
            price: card.price,
            price_display: card.price.format_clp(),
            condition: card.condition,
            language: card.language,
            quantity: card.quantity,
            delivery: card.delivery.clone(),
            created_at: card.created_at,
            updated_at: card.updated_at,
        }
    }
}

/// One album's grid.
#[derive(Debug, Serialize)]
pub struct AlbumGridPayload {
    pub album: AlbumPayload,
    pub cards: Vec<CardPayload>,
}

/// Attach-card form data: the catalog hit plus the seller's sale metadata.
#[derive(Debug, Deserialize)]
pub struct AddCardRequest {
    pub catalog: CatalogItem,
    #[serde(flatten)]
    pub metadata: CardMetadata,
}

/// Resolve an album owned by the signed-in seller, or 404.
async fn owned_album(state: &AppState, owner: &UserId, album_id: AlbumId) -> Result<AlbumPayload> {
    let album = AlbumRepository::new(state.pool())
        .get(owner, album_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("album {album_id}")))?;

    Ok(AlbumPayload::from_album(&album, &state.config().base_url))
}

/// List one album's cards.
///
/// Membership is resolved by the (owner, album) filter pair; there is no
/// stored child list to consult.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(album_id): Path<AlbumId>,
) -> Result<Json<AlbumGridPayload>> {
    let album = owned_album(&state, &user.id, album_id).await?;

    let cards = CardRepository::new(state.pool())
        .list(&user.id, album_id)
        .await?;

    Ok(Json(AlbumGridPayload {
        album,
        cards: cards.iter().map(CardPayload::from).collect(),
    }))
}

/// Attach a catalog item to an album with sale metadata.
///
/// The price was validated while parsing the body (a non-positive price
/// never deserializes into [`CardMetadata`]); what's checked here is the
/// catalog reference itself, since a card without one can never render.
#[instrument(skip(state, request), fields(album = %album_id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(album_id): Path<AlbumId>,
    Json(request): Json<AddCardRequest>,
) -> Result<(StatusCode, Json<CardPayload>)> {
    if request.catalog.id.trim().is_empty() || request.catalog.name.trim().is_empty() {
        return Err(AppError::Validation(
            "catalog reference is incomplete".to_string(),
        ));
    }
    if request.catalog.image.trim().is_empty() {
        return Err(AppError::Validation(
            "catalog item has no image".to_string(),
        ));
    }

    // 404 before writing anything if the album isn't the seller's
    owned_album(&state, &user.id, album_id).await?;

    let card = CardRepository::new(state.pool())
        .create(&user.id, album_id, &request.catalog, &request.metadata)
        .await?;

    tracing::info!(card_id = %card.id, catalog_id = %card.catalog_id, "card added");

    Ok((StatusCode::CREATED, Json(CardPayload::from(&card))))
}

/// Edit a card's sale metadata.
///
/// Identity and the catalog reference are immutable; only the metadata
/// fields are replaced and `updated_at` advances.
#[instrument(skip(state, metadata), fields(card = %card_id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(card_id): Path<CardId>,
    Json(metadata): Json<CardMetadata>,
) -> Result<Json<CardPayload>> {
    let card = CardRepository::new(state.pool())
        .update_metadata(card_id, &user.id, &metadata)
        .await?;

    Ok(Json(CardPayload::from(&card)))
}

/// Delete a card.
#[instrument(skip(state), fields(card = %card_id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(card_id): Path<CardId>,
) -> Result<StatusCode> {
    let deleted = CardRepository::new(state.pool())
        .delete(card_id, &user.id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound(format!("card {card_id}")));
    }

    tracing::info!("card deleted");
    Ok(StatusCode::NO_CONTENT)
}
