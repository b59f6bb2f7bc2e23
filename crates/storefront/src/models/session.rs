//! Session-related types.
//!
//! Types stored in the session for the signed-in seller.

use serde::{Deserialize, Serialize};

use nexus_hub_core::UserId;

/// Session-stored seller identity.
///
/// Minimal data stored in the session to identify the signed-in seller.
/// Sign-in itself happens against the external identity provider; by the
/// time this is written the provider has already vouched for the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Seller's opaque id.
    pub id: UserId,
    /// Display name, for greetings and log context.
    pub display_name: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current signed-in seller.
    pub const CURRENT_USER: &str = "current_user";
}
