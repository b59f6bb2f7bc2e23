//! Seller domain type.

use chrono::{DateTime, Utc};

use nexus_hub_core::{PhoneNumber, UserId};

/// A seller (domain type).
///
/// Identity comes from the external provider; the row is created on first
/// sign-in and the contact handle is merged in later from the dashboard.
#[derive(Debug, Clone)]
pub struct User {
    /// Opaque id issued by the identity provider.
    pub id: UserId,
    /// Display name shown on the public vitrine.
    pub display_name: String,
    /// Avatar image URL, if the provider supplied one.
    pub avatar_url: Option<String>,
    /// Digit-only WhatsApp contact, if the seller saved one.
    pub whatsapp: Option<PhoneNumber>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
