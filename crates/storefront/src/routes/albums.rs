//! Album route handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nexus_hub_core::AlbumId;

use crate::db::AlbumRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Album;
use crate::routes::share_url;
use crate::state::AppState;

/// Album data returned to the dashboard.
#[derive(Debug, Serialize)]
pub struct AlbumPayload {
    pub id: AlbumId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Shareable vitrine URL scoped to this album.
    pub share_url: String,
}

impl AlbumPayload {
    pub(crate) fn from_album(album: &Album, base_url: &str) -> Self {
        Self {
            id: album.id,
            name: album.name.clone(),
            created_at: album.created_at,
            share_url: share_url(base_url, &album.owner_id, Some(album.id)),
        }
    }
}

/// Create album form data.
#[derive(Debug, Deserialize)]
pub struct CreateAlbumRequest {
    pub name: String,
}

/// List the signed-in seller's albums.
///
/// Zero albums is a normal empty state for a fresh account.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<AlbumPayload>>> {
    let albums = AlbumRepository::new(state.pool())
        .list_by_owner(&user.id)
        .await?;

    let base_url = &state.config().base_url;
    Ok(Json(
        albums
            .iter()
            .map(|album| AlbumPayload::from_album(album, base_url))
            .collect(),
    ))
}

/// Create an album.
///
/// A blank name is rejected before any query is issued. The created row is
/// returned so the dashboard can merge it into its list without a reload;
/// the row in the response is authoritative if that optimistic merge ever
/// disagrees with the store.
#[instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateAlbumRequest>,
) -> Result<(StatusCode, Json<AlbumPayload>)> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation(
            "album name cannot be blank".to_string(),
        ));
    }

    let album = AlbumRepository::new(state.pool())
        .create(&user.id, &request.name)
        .await?;

    tracing::info!(album_id = %album.id, name = %album.name, "album created");

    Ok((
        StatusCode::CREATED,
        Json(AlbumPayload::from_album(&album, &state.config().base_url)),
    ))
}
