//! Album and collection-entry domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use nexus_hub_core::{AlbumId, CardCondition, CardId, CardLanguage, Price, UserId};

/// A named, owner-scoped grouping of cards.
///
/// Immutable once created except for its membership, which is implicit:
/// cards reference the album, the album stores no child list.
#[derive(Debug, Clone)]
pub struct Album {
    /// Unique album ID.
    pub id: AlbumId,
    /// Owning seller.
    pub owner_id: UserId,
    /// Display name, uppercased at creation.
    pub name: String,
    /// When the album was created.
    pub created_at: DateTime<Utc>,
}

/// A collection entry: a catalog card enriched with sale metadata.
#[derive(Debug, Clone)]
pub struct Card {
    /// Unique card ID.
    pub id: CardId,
    /// Owning seller.
    pub owner_id: UserId,
    /// Album this entry lives in.
    pub album_id: AlbumId,
    /// External catalog identity key (immutable).
    pub catalog_id: String,
    /// Catalog display name (immutable).
    pub name: String,
    /// Catalog image locator, resolved to its high-resolution variant (immutable).
    pub image_url: String,
    /// Asking price in CLP.
    pub price: Price,
    /// Physical condition grade.
    pub condition: CardCondition,
    /// Print language.
    pub language: CardLanguage,
    /// How many copies are for sale.
    pub quantity: u32,
    /// Optional pickup/delivery note.
    pub delivery: Option<String>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// Advances on every metadata edit.
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Thumbnail variant of the stored image locator.
    ///
    /// The catalog serves `<locator>/high.webp` and `<locator>/low.webp`;
    /// we store the former and derive the latter for grid rendering.
    #[must_use]
    pub fn image_thumb(&self) -> String {
        self.image_url
            .strip_suffix("/high.webp")
            .map_or_else(|| self.image_url.clone(), |base| format!("{base}/low.webp"))
    }
}

/// The seller-editable slice of a card.
///
/// Everything else on a [`Card`] (identity, catalog reference) is frozen at
/// creation; edits replace exactly these fields.
#[derive(Debug, Clone, Deserialize)]
pub struct CardMetadata {
    /// Asking price in CLP (must be positive; enforced by [`Price`]).
    pub price: Price,
    /// Physical condition grade.
    #[serde(default)]
    pub condition: CardCondition,
    /// Print language.
    #[serde(default)]
    pub language: CardLanguage,
    /// How many copies are for sale (clamped to at least 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Optional pickup/delivery note.
    #[serde(default)]
    pub delivery: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

impl CardMetadata {
    /// Quantity with the minimum-of-one rule applied.
    #[must_use]
    pub const fn effective_quantity(&self) -> u32 {
        if self.quantity == 0 { 1 } else { self.quantity }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_card(image_url: &str) -> Card {
        Card {
            id: CardId::new(1),
            owner_id: UserId::parse("seller-1").unwrap(),
            album_id: AlbumId::new(1),
            catalog_id: "base1-4".to_string(),
            name: "Charizard".to_string(),
            image_url: image_url.to_string(),
            price: Price::new(Decimal::from(50_000)).unwrap(),
            condition: CardCondition::NearMint,
            language: CardLanguage::English,
            quantity: 1,
            delivery: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_image_thumb_from_high_variant() {
        let card = sample_card("https://assets.tcgdex.net/en/base/base1/4/high.webp");
        assert_eq!(
            card.image_thumb(),
            "https://assets.tcgdex.net/en/base/base1/4/low.webp"
        );
    }

    #[test]
    fn test_image_thumb_passthrough_without_variant() {
        let card = sample_card("https://assets.tcgdex.net/en/base/base1/4.png");
        assert_eq!(card.image_thumb(), card.image_url);
    }

    #[test]
    fn test_metadata_quantity_clamped() {
        let metadata: CardMetadata =
            serde_json::from_str(r#"{"price": "50000", "quantity": 0}"#).unwrap();
        assert_eq!(metadata.effective_quantity(), 1);
    }

    #[test]
    fn test_metadata_defaults() {
        let metadata: CardMetadata = serde_json::from_str(r#"{"price": "50000"}"#).unwrap();
        assert_eq!(metadata.condition, CardCondition::NearMint);
        assert_eq!(metadata.language, CardLanguage::English);
        assert_eq!(metadata.quantity, 1);
        assert!(metadata.delivery.is_none());
    }

    #[test]
    fn test_metadata_rejects_non_positive_price() {
        let result = serde_json::from_str::<CardMetadata>(r#"{"price": "0"}"#);
        assert!(result.is_err());
    }
}
