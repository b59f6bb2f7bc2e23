//! Public vitrine route handlers.
//!
//! These routes are what a share link opens: a read-only snapshot of a
//! seller's cards, plus inquiry composition for whatever the visitor
//! selected. No authentication; the visitor's selection arrives with the
//! request and is never persisted.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nexus_hub_core::{AlbumId, CardId, UserId};

use crate::db::{AlbumRepository, CardRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::{Card, User};
use crate::routes::cards::CardPayload;
use crate::routes::share_url;
use crate::selection::{Selection, SelectionEntry, SellerContact};
use crate::state::AppState;

/// Number of cards in the featured "top pieces" strip.
const FEATURED_COUNT: usize = 3;

/// Vitrine query parameters.
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    /// Scope the vitrine to one album.
    #[serde(default)]
    pub album: Option<AlbumId>,
}

/// Seller header for the vitrine.
#[derive(Debug, Serialize)]
pub struct SellerPayload {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// Whether inquiries can reach this seller at all.
    pub has_contact: bool,
}

impl From<&User> for SellerPayload {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            display_name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
            has_contact: user.whatsapp.is_some(),
        }
    }
}

/// Album tab for the vitrine.
#[derive(Debug, Serialize)]
pub struct AlbumTabPayload {
    pub id: AlbumId,
    pub name: String,
}

/// The vitrine snapshot.
#[derive(Debug, Serialize)]
pub struct ProfilePayload {
    pub seller: SellerPayload,
    pub albums: Vec<AlbumTabPayload>,
    /// The album the snapshot is scoped to, when a filter applies.
    pub album: Option<AlbumId>,
    /// Top pieces by asking price.
    pub featured: Vec<CardPayload>,
    pub cards: Vec<CardPayload>,
    pub share_url: String,
    /// Whether the requester is the seller viewing their own vitrine.
    /// Visitors (and other signed-in sellers) get the read-only view.
    pub viewer_is_owner: bool,
}

/// Inquiry form data: the visitor's selected cards, in selection order.
#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    pub card_ids: Vec<CardId>,
}

fn parse_user_id(raw: &str) -> Result<UserId> {
    UserId::parse(raw).map_err(|e| AppError::BadRequest(format!("invalid user id: {e}")))
}

/// Pick the highest-priced cards for the featured strip.
fn featured(cards: &[Card]) -> Vec<CardPayload> {
    let mut by_price: Vec<&Card> = cards.iter().collect();
    by_price.sort_by(|a, b| b.price.cmp(&a.price));
    by_price
        .into_iter()
        .take(FEATURED_COUNT)
        .map(CardPayload::from)
        .collect()
}

/// Public storefront snapshot.
///
/// Loads the seller, their album tabs, and the card grid - scoped to the
/// `album` query parameter when present, otherwise the full inventory.
#[instrument(skip(state, viewer), fields(user = %user_id))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(user_id): Path<String>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ProfilePayload>> {
    let owner = parse_user_id(&user_id)?;

    let user = UserRepository::new(state.pool())
        .get(&owner)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("seller {owner}")))?;

    let albums = AlbumRepository::new(state.pool())
        .list_by_owner(&owner)
        .await?;

    // A filter naming someone else's (or no) album is a dead link, not an
    // unfiltered view.
    if let Some(album_id) = query.album
        && !albums.iter().any(|a| a.id == album_id)
    {
        return Err(AppError::NotFound(format!("album {album_id}")));
    }

    let card_repo = CardRepository::new(state.pool());
    let cards = match query.album {
        Some(album_id) => card_repo.list(&owner, album_id).await?,
        None => card_repo.list_by_owner(&owner).await?,
    };

    Ok(Json(ProfilePayload {
        seller: SellerPayload::from(&user),
        albums: albums
            .into_iter()
            .map(|a| AlbumTabPayload {
                id: a.id,
                name: a.name,
            })
            .collect(),
        album: query.album,
        featured: featured(&cards),
        cards: cards.iter().map(CardPayload::from).collect(),
        share_url: share_url(&state.config().base_url, &owner, query.album),
        viewer_is_owner: viewer.is_some_and(|v| v.id == owner),
    }))
}

/// Compose a WhatsApp inquiry for the visitor's selection.
///
/// Selected ids are resolved against the seller's cards - unknown or
/// foreign ids simply drop out - and the resulting selection is composed
/// into a single prefilled message. An empty selection or a seller with no
/// stored contact yields a 422 warning and no outbound action.
#[instrument(skip(state, request), fields(user = %user_id))]
pub async fn inquiry(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<InquiryRequest>,
) -> Result<Json<crate::selection::Inquiry>> {
    let owner = parse_user_id(&user_id)?;

    let user = UserRepository::new(state.pool())
        .get(&owner)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("seller {owner}")))?;

    let cards = CardRepository::new(state.pool())
        .list_by_ids(&owner, &request.card_ids)
        .await?;

    let mut selection = Selection::new();
    for card in &cards {
        selection.insert(SelectionEntry::from(card));
    }

    let seller = SellerContact {
        display_name: user.display_name,
        whatsapp: user.whatsapp,
    };
    let inquiry = selection.compose_inquiry(&seller, &state.config().whatsapp_country_code)?;

    tracing::info!(selected = selection.len(), "inquiry composed");

    Ok(Json(inquiry))
}
