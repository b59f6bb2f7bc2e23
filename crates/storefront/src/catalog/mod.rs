//! TCGdex catalog adapter.
//!
//! Converts a free-text name query into a deduplicated list of displayable
//! catalog items. The catalog is read-only and unauthenticated; we query
//! the configured language variants, merge them in order, and keep the
//! catalog's own ordering (no ranking of our own).
//!
//! Successful searches are cached with `moka` (5-minute TTL) keyed by the
//! normalized query. A transport failure is an error, never an empty
//! result: callers can always tell "catalog down" from "no matches".

pub mod debounce;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

pub use debounce::{MIN_QUERY_LEN, SearchDebouncer, SearchOutcome};

/// Cache TTL for search responses.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when querying the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned a non-success status.
    #[error("catalog returned HTTP {0}")]
    Status(u16),

    /// JSON payload could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A catalog URL could not be constructed.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// An external, read-only catalog record.
///
/// The image field is a locator to be suffixed with a resolution variant;
/// items without one are unusable for display and are discarded during
/// normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    /// Catalog identity key, e.g. `base1-4`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Image locator without a resolution suffix.
    pub image: String,
}

impl CatalogItem {
    /// High-resolution image URL, used for storage on a collection entry.
    ///
    /// Locators that already carry the variant (edits round-tripping a
    /// stored URL) are passed through unchanged.
    #[must_use]
    pub fn image_high(&self) -> String {
        if self.image.ends_with("/high.webp") {
            self.image.clone()
        } else {
            format!("{}/high.webp", self.image)
        }
    }

    /// Low-resolution image URL, used for result grids.
    #[must_use]
    pub fn image_thumb(&self) -> String {
        if self.image.ends_with("/low.webp") {
            self.image.clone()
        } else {
            format!("{}/low.webp", self.image)
        }
    }
}

/// Wire shape of a catalog card. Only the fields we display are kept;
/// `image` is optional on the wire and filtered during normalization.
#[derive(Debug, Deserialize)]
struct RawCatalogCard {
    id: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
}

/// Drop image-less items, dedupe by catalog id (first occurrence wins,
/// order preserved), and cap the result set.
fn dedupe_and_cap(raw: Vec<RawCatalogCard>, cap: usize) -> Vec<CatalogItem> {
    let mut seen = std::collections::HashSet::new();
    let mut items = Vec::new();

    for card in raw {
        if items.len() >= cap {
            break;
        }
        let Some(image) = card.image else {
            continue;
        };
        if image.is_empty() {
            continue;
        }
        if seen.insert(card.id.clone()) {
            items.push(CatalogItem {
                id: card.id,
                name: card.name,
                image,
            });
        }
    }

    items
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the card catalog REST API.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    languages: Vec<String>,
    max_results: usize,
    cache: Cache<String, Vec<CatalogItem>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                languages: config.languages.clone(),
                max_results: config.max_results,
                cache,
            }),
        }
    }

    /// Search the catalog by card name.
    ///
    /// Queries every configured language variant, merges the responses in
    /// configuration order, and normalizes the combined list (image filter,
    /// id dedupe, cap).
    ///
    /// # Errors
    ///
    /// Returns an error if any variant request fails or returns an
    /// undecodable payload. Zero results with `Ok` always means the
    /// catalog genuinely had no matches.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let cache_key = query.trim().to_lowercase();

        if let Some(items) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for catalog search");
            return Ok(items);
        }

        let mut combined = Vec::new();
        for language in &self.inner.languages {
            combined.extend(self.search_variant(language, query).await?);
        }

        let items = dedupe_and_cap(combined, self.inner.max_results);
        debug!(count = items.len(), "catalog search normalized");

        self.inner.cache.insert(cache_key, items.clone()).await;

        Ok(items)
    }

    /// Query a single language variant of the catalog.
    async fn search_variant(
        &self,
        language: &str,
        query: &str,
    ) -> Result<Vec<RawCatalogCard>, CatalogError> {
        // Url::join would swallow the base path ("/v2") without a trailing
        // slash, so the endpoint is assembled textually.
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{base}/{language}/cards"))
            .map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        let response = self
            .inner
            .client
            .get(url)
            .query(&[("name", query)])
            .send()
            .await?;

        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                language,
                body = %body.chars().take(200).collect::<String>(),
                "catalog returned non-success status"
            );
            return Err(CatalogError::Status(status.as_u16()));
        }

        match serde_json::from_str::<Vec<RawCatalogCard>>(&body) {
            Ok(cards) => Ok(cards),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    language,
                    body = %body.chars().take(200).collect::<String>(),
                    "failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    /// Invalidate all cached search results.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw(id: &str, image: Option<&str>) -> RawCatalogCard {
        RawCatalogCard {
            id: id.to_string(),
            name: format!("card {id}"),
            image: image.map(str::to_owned),
        }
    }

    #[test]
    fn test_dedupe_first_occurrence_wins() {
        let cards = vec![
            raw("base1-4", Some("https://img/es/base1-4")),
            raw("base1-58", Some("https://img/es/base1-58")),
            raw("base1-4", Some("https://img/en/base1-4")),
        ];
        let items = dedupe_and_cap(cards, 12);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "base1-4");
        // First occurrence (the es variant) wins
        assert_eq!(items[0].image, "https://img/es/base1-4");
        assert_eq!(items[1].id, "base1-58");
    }

    #[test]
    fn test_items_without_image_discarded() {
        let cards = vec![
            raw("a", None),
            raw("b", Some("https://img/b")),
            raw("c", Some("")),
        ];
        let items = dedupe_and_cap(cards, 12);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "b");
    }

    #[test]
    fn test_result_set_capped() {
        let cards: Vec<RawCatalogCard> = (0..40)
            .map(|i| raw(&format!("card-{i}"), Some("https://img/x")))
            .collect();
        let items = dedupe_and_cap(cards, 12);
        assert_eq!(items.len(), 12);
        assert_eq!(items[0].id, "card-0");
        assert_eq!(items[11].id, "card-11");
    }

    #[test]
    fn test_order_preserved() {
        let cards = vec![
            raw("z", Some("https://img/z")),
            raw("a", Some("https://img/a")),
            raw("m", Some("https://img/m")),
        ];
        let ids: Vec<String> = dedupe_and_cap(cards, 12)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }

    #[test]
    fn test_image_variants() {
        let item = CatalogItem {
            id: "base1-4".to_string(),
            name: "Charizard".to_string(),
            image: "https://assets.tcgdex.net/en/base/base1/4".to_string(),
        };
        assert_eq!(
            item.image_high(),
            "https://assets.tcgdex.net/en/base/base1/4/high.webp"
        );
        assert_eq!(
            item.image_thumb(),
            "https://assets.tcgdex.net/en/base/base1/4/low.webp"
        );
    }

    #[test]
    fn test_image_high_idempotent() {
        let item = CatalogItem {
            id: "base1-4".to_string(),
            name: "Charizard".to_string(),
            image: "https://assets.tcgdex.net/en/base/base1/4/high.webp".to_string(),
        };
        assert_eq!(item.image_high(), item.image);
    }

    #[test]
    fn test_raw_card_optional_image() {
        let cards: Vec<RawCatalogCard> =
            serde_json::from_str(r#"[{"id": "a", "name": "A"}, {"id": "b", "name": "B", "image": "https://img/b"}]"#)
                .unwrap();
        assert!(cards[0].image.is_none());
        assert_eq!(cards[1].image.as_deref(), Some("https://img/b"));
    }
}
