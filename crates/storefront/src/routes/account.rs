//! Account route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use nexus_hub_core::PhoneNumber;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    /// Raw phone input; formatting characters are stripped on save.
    pub phone: String,
}

/// Saved contact, echoed back digit-only.
#[derive(Debug, Serialize)]
pub struct ContactPayload {
    pub whatsapp: String,
}

/// Save the seller's WhatsApp contact handle.
///
/// Normalization happens before any query: the raw input is stripped to
/// digits and rejected if fewer than 8 remain. The stored value carries no
/// forced country code; the default prefix is applied only when an inquiry
/// link is composed.
#[instrument(skip(state, request))]
pub async fn save_contact(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactPayload>> {
    let phone =
        PhoneNumber::parse(&request.phone).map_err(|e| AppError::Validation(e.to_string()))?;

    UserRepository::new(state.pool())
        .save_contact(&user.id, &phone)
        .await?;

    tracing::info!(user_id = %user.id, "contact handle saved");

    Ok(Json(ContactPayload {
        whatsapp: phone.as_str().to_owned(),
    }))
}
