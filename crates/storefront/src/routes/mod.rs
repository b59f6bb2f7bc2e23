//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (database)
//!
//! # Session (identity established by the external provider)
//! POST /auth/session            - Record signed-in seller, ensure user row
//! POST /auth/logout             - Drop the session identity
//!
//! # Dashboard (owner only)
//! GET  /albums                  - List the seller's albums
//! POST /albums                  - Create an album
//! GET  /albums/{id}/cards       - Grid of one album
//! POST /albums/{id}/cards       - Attach a catalog item with sale metadata
//! PUT  /cards/{id}              - Edit a card's sale metadata
//! DELETE /cards/{id}            - Remove a card
//! POST /account/contact         - Save the WhatsApp contact handle
//! GET  /catalog/search?q=       - Debounced catalog search
//!
//! # Public vitrine
//! GET  /profile/{user}?album=   - Storefront snapshot for visitors
//! POST /profile/{user}/inquiry  - Compose a WhatsApp inquiry for selected cards
//! ```

pub mod account;
pub mod albums;
pub mod auth;
pub mod cards;
pub mod profile;
pub mod search;

use axum::{
    Router,
    routing::{get, post, put},
};

use nexus_hub_core::{AlbumId, UserId};

use crate::state::AppState;

/// Build the shareable vitrine URL for a seller, optionally scoped to one album.
#[must_use]
pub fn share_url(base_url: &str, owner: &UserId, album: Option<AlbumId>) -> String {
    let base = base_url.trim_end_matches('/');
    match album {
        Some(album) => format!("{base}/perfil/{owner}?album={album}"),
        None => format!("{base}/perfil/{owner}"),
    }
}

/// Create the session routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(auth::establish_session))
        .route("/logout", post(auth::logout))
}

/// Create the album routes router.
pub fn album_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(albums::index).post(albums::create))
        .route(
            "/{album_id}/cards",
            get(cards::index).post(cards::create),
        )
}

/// Create the card routes router.
pub fn card_routes() -> Router<AppState> {
    Router::new().route("/{card_id}", put(cards::update).delete(cards::remove))
}

/// Create the public vitrine routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", get(profile::show))
        .route("/{user_id}/inquiry", post(profile::inquiry))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/albums", album_routes())
        .nest("/cards", card_routes())
        .route("/account/contact", post(account::save_contact))
        .route("/catalog/search", get(search::search))
        .nest("/profile", profile_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_share_url_without_album() {
        let owner = UserId::parse("abc123").unwrap();
        assert_eq!(
            share_url("https://nexushub.cl", &owner, None),
            "https://nexushub.cl/perfil/abc123"
        );
    }

    #[test]
    fn test_share_url_with_album() {
        let owner = UserId::parse("abc123").unwrap();
        assert_eq!(
            share_url("https://nexushub.cl/", &owner, Some(AlbumId::new(7))),
            "https://nexushub.cl/perfil/abc123?album=7"
        );
    }
}
