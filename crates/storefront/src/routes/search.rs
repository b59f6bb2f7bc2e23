//! Catalog search route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{CatalogItem, SearchOutcome};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// A catalog hit ready for grid rendering.
#[derive(Debug, Serialize)]
pub struct CatalogItemPayload {
    pub id: String,
    pub name: String,
    /// Locator without a resolution suffix (stored on save).
    pub image: String,
    /// Low-resolution variant for the result grid.
    pub image_thumb: String,
}

impl From<CatalogItem> for CatalogItemPayload {
    fn from(item: CatalogItem) -> Self {
        let image_thumb = item.image_thumb();
        Self {
            id: item.id,
            name: item.name,
            image: item.image,
            image_thumb,
        }
    }
}

/// Debounced search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// `"ok"`, `"cleared"` (input too short), or `"superseded"` (a newer
    /// query replaced this one before it could display).
    pub status: &'static str,
    pub items: Vec<CatalogItemPayload>,
}

/// Search the card catalog.
///
/// Submissions pass through the shared debouncer: inputs under 3
/// characters clear the result grid, and a burst of keystrokes produces
/// one catalog dispatch for the latest input. A transport failure maps to
/// 502 — distinguishable from "genuinely no matches", which is an `ok`
/// with zero items.
#[instrument(skip(state), fields(q = %query.q))]
pub async fn search(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let catalog = state.catalog().clone();
    let outcome = state
        .debouncer()
        .submit(&query.q, move |q| async move { catalog.search(&q).await })
        .await?;

    let response = match outcome {
        SearchOutcome::Cleared => SearchResponse {
            status: "cleared",
            items: Vec::new(),
        },
        SearchOutcome::Superseded => SearchResponse {
            status: "superseded",
            items: Vec::new(),
        },
        SearchOutcome::Results(items) => SearchResponse {
            status: "ok",
            items: items.into_iter().map(CatalogItemPayload::from).collect(),
        },
    };

    Ok(Json(response))
}
