//! Visitor selection and inquiry composition.
//!
//! A vitrine visitor marks cards as "of interest" and gets a single
//! prefilled WhatsApp message summarizing the pick. The selection is
//! ephemeral and entirely in-memory: it lives for one visit, is never
//! persisted, and the only asynchronous step happens before it exists
//! (loading the seller's cards).
//!
//! States: empty, or accumulating one or more entries. `toggle` moves
//! between them; removing the last entry lands back on empty.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use nexus_hub_core::{CardCondition, CardId, CardLanguage, PhoneNumber, Price, format_clp};

use crate::models::Card;

/// Errors that block inquiry composition.
///
/// Both are user-correctable conditions surfaced as a warning, not
/// failures of the system.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// Nothing is selected.
    #[error("no cards selected")]
    EmptySelection,

    /// The seller never saved a contact handle.
    #[error("seller has no contact number")]
    SellerUnreachable,
}

/// One selected card with its display fields denormalized at selection time.
///
/// Quantity is the per-card attribute frozen when the entry is picked; the
/// cart itself offers no quantity adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEntry {
    /// The underlying collection entry.
    pub card_id: CardId,
    /// Catalog display name.
    pub name: String,
    /// Condition grade at selection time.
    pub condition: CardCondition,
    /// Print language at selection time.
    pub language: CardLanguage,
    /// Unit price at selection time.
    pub price: Price,
    /// Copies offered at selection time.
    pub quantity: u32,
}

impl From<&Card> for SelectionEntry {
    fn from(card: &Card) -> Self {
        Self {
            card_id: card.id,
            name: card.name.clone(),
            condition: card.condition,
            language: card.language,
            price: card.price,
            quantity: card.quantity,
        }
    }
}

/// Result of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The card was not selected and is now.
    Added,
    /// The card was selected and no longer is.
    Removed,
}

/// A composed inquiry, ready to hand to the messaging collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inquiry {
    /// Human-readable message text.
    pub message: String,
    /// wa.me deep link with the message prefilled.
    pub whatsapp_url: String,
    /// Selection total in CLP.
    pub total: Decimal,
}

/// The seller side of an inquiry.
#[derive(Debug, Clone)]
pub struct SellerContact {
    /// Name used in the greeting.
    pub display_name: String,
    /// Stored contact handle, if any.
    pub whatsapp: Option<PhoneNumber>,
}

/// An ordered, session-scoped set of selected cards.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether the selection is in its empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of selected cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The selected entries, in selection order.
    #[must_use]
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// Add the entry if absent; returns `false` when it was already selected.
    pub fn insert(&mut self, entry: SelectionEntry) -> bool {
        if self.contains(entry.card_id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Toggle an entry in or out of the selection, keyed by card id.
    pub fn toggle(&mut self, entry: SelectionEntry) -> Toggle {
        if let Some(pos) = self.position(entry.card_id) {
            self.entries.remove(pos);
            Toggle::Removed
        } else {
            self.entries.push(entry);
            Toggle::Added
        }
    }

    /// Empty the selection unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether a card is currently selected.
    #[must_use]
    pub fn contains(&self, card_id: CardId) -> bool {
        self.position(card_id).is_some()
    }

    fn position(&self, card_id: CardId) -> Option<usize> {
        self.entries.iter().position(|e| e.card_id == card_id)
    }

    /// Running total: sum of unit price times quantity-at-selection-time.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries
            .iter()
            .map(|e| e.price.amount() * Decimal::from(e.quantity))
            .sum()
    }

    /// Compose the outbound inquiry for this selection.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::EmptySelection`] when nothing is selected
    /// and [`SelectionError::SellerUnreachable`] when the seller has no
    /// stored contact handle. In both cases no outbound action happens.
    pub fn compose_inquiry(
        &self,
        seller: &SellerContact,
        default_country_code: &str,
    ) -> Result<Inquiry, SelectionError> {
        if self.is_empty() {
            return Err(SelectionError::EmptySelection);
        }
        let Some(phone) = &seller.whatsapp else {
            return Err(SelectionError::SellerUnreachable);
        };

        let mut message = format!(
            "¡Hola {}! Vi tu vitrina en NexusHub y me interesan estas cartas:\n",
            seller.display_name
        );
        for entry in &self.entries {
            message.push_str(&format!(
                "- {} ({}, {}) x{} — ${} CLP\n",
                entry.name,
                entry.condition,
                entry.language,
                entry.quantity,
                entry.price.format_clp()
            ));
        }
        let total = self.total();
        message.push_str(&format!(
            "Total: ${} CLP\n¿Siguen disponibles?",
            format_clp(total)
        ));

        let whatsapp_url = format!(
            "https://wa.me/{}?text={}",
            phone.dialable(default_country_code),
            urlencoding::encode(&message)
        );

        Ok(Inquiry {
            message,
            whatsapp_url,
            total,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(id: i32, name: &str, price: i64, quantity: u32) -> SelectionEntry {
        SelectionEntry {
            card_id: CardId::new(id),
            name: name.to_string(),
            condition: CardCondition::NearMint,
            language: CardLanguage::English,
            price: Price::new(Decimal::from(price)).unwrap(),
            quantity,
        }
    }

    fn reachable_seller() -> SellerContact {
        SellerContact {
            display_name: "Matías".to_string(),
            whatsapp: Some(PhoneNumber::parse("56912345678").unwrap()),
        }
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut selection = Selection::new();
        selection.insert(entry(1, "Charizard", 50_000, 1));

        selection.toggle(entry(2, "Blastoise", 30_000, 1));
        selection.toggle(entry(2, "Blastoise", 30_000, 1));

        assert_eq!(selection.len(), 1);
        assert!(selection.contains(CardId::new(1)));
        assert!(!selection.contains(CardId::new(2)));
    }

    #[test]
    fn test_toggle_transitions_between_states() {
        let mut selection = Selection::new();
        assert!(selection.is_empty());

        assert_eq!(
            selection.toggle(entry(1, "Charizard", 50_000, 1)),
            Toggle::Added
        );
        assert!(!selection.is_empty());

        assert_eq!(
            selection.toggle(entry(1, "Charizard", 50_000, 1)),
            Toggle::Removed
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut selection = Selection::new();
        assert!(selection.insert(entry(1, "Charizard", 50_000, 1)));
        assert!(!selection.insert(entry(1, "Charizard", 50_000, 1)));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_clear_empties_unconditionally() {
        let mut selection = Selection::new();
        selection.insert(entry(1, "Charizard", 50_000, 1));
        selection.insert(entry(2, "Blastoise", 30_000, 2));

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_total_uses_quantity_at_selection_time() {
        let mut selection = Selection::new();
        selection.insert(entry(1, "Charizard", 50_000, 1));
        selection.insert(entry(2, "Pikachu", 5_000, 3));

        assert_eq!(selection.total(), Decimal::from(65_000));
    }

    #[test]
    fn test_compose_empty_selection_fails() {
        let selection = Selection::new();
        assert_eq!(
            selection.compose_inquiry(&reachable_seller(), "56"),
            Err(SelectionError::EmptySelection)
        );
    }

    #[test]
    fn test_compose_without_contact_fails() {
        let mut selection = Selection::new();
        selection.insert(entry(1, "Charizard", 50_000, 1));

        let seller = SellerContact {
            display_name: "Matías".to_string(),
            whatsapp: None,
        };
        assert_eq!(
            selection.compose_inquiry(&seller, "56"),
            Err(SelectionError::SellerUnreachable)
        );
    }

    #[test]
    fn test_compose_message_contents() {
        let mut selection = Selection::new();
        selection.insert(entry(1, "Charizard", 50_000, 1));
        selection.insert(entry(2, "Pikachu", 5_000, 3));

        let inquiry = selection
            .compose_inquiry(&reachable_seller(), "56")
            .unwrap();

        assert!(inquiry.message.contains("¡Hola Matías!"));
        assert!(
            inquiry
                .message
                .contains("- Charizard (Near Mint, English) x1 — $50.000 CLP")
        );
        assert!(
            inquiry
                .message
                .contains("- Pikachu (Near Mint, English) x3 — $5.000 CLP")
        );
        assert!(inquiry.message.contains("Total: $65.000 CLP"));
        assert_eq!(inquiry.total, Decimal::from(65_000));
    }

    #[test]
    fn test_compose_link_targets_dialable_number() {
        let mut selection = Selection::new();
        selection.insert(entry(1, "Charizard", 50_000, 1));

        // Stored without country code: the prefix appears in the link only
        let seller = SellerContact {
            display_name: "Matías".to_string(),
            whatsapp: Some(PhoneNumber::parse("91234567").unwrap()),
        };
        let inquiry = selection.compose_inquiry(&seller, "56").unwrap();

        assert!(inquiry.whatsapp_url.starts_with("https://wa.me/5691234567?text="));
        assert!(!inquiry.whatsapp_url.contains(' '));
    }

    #[test]
    fn test_entry_from_card_freezes_display_fields() {
        use chrono::Utc;
        use nexus_hub_core::{AlbumId, UserId};

        let card = Card {
            id: CardId::new(9),
            owner_id: UserId::parse("seller-1").unwrap(),
            album_id: AlbumId::new(1),
            catalog_id: "base1-4".to_string(),
            name: "Charizard".to_string(),
            image_url: "https://img/base1-4/high.webp".to_string(),
            price: Price::new(Decimal::from(50_000)).unwrap(),
            condition: CardCondition::LightlyPlayed,
            language: CardLanguage::Spanish,
            quantity: 2,
            delivery: Some("Metro Baquedano".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let entry = SelectionEntry::from(&card);
        assert_eq!(entry.card_id, CardId::new(9));
        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.condition, CardCondition::LightlyPlayed);
        assert_eq!(entry.language, CardLanguage::Spanish);
    }
}
