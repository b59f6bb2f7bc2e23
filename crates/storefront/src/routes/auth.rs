//! Session route handlers.
//!
//! Authentication itself (the provider popup, token verification) is the
//! front-end's business with the external identity provider; this service
//! receives the resulting identity claims, ensures the user document
//! exists, and pins the identity to the session.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use nexus_hub_core::UserId;

use crate::db::UserRepository;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::state::AppState;

/// Identity claims forwarded after provider sign-in.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// Opaque id issued by the provider.
    pub user_id: String,
    /// Provider display name.
    pub display_name: String,
    /// Provider avatar, if any.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Seller data returned to the dashboard.
#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub whatsapp: Option<String>,
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            whatsapp: user.whatsapp.map(|p| p.as_str().to_owned()),
        }
    }
}

/// Record a signed-in seller, creating the user document on first sign-in.
#[instrument(skip(state, session, request))]
pub async fn establish_session(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SessionRequest>,
) -> Result<Json<UserPayload>> {
    let user_id = UserId::parse(&request.user_id)
        .map_err(|e| AppError::BadRequest(format!("invalid user id: {e}")))?;

    let display_name = request.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::Validation(
            "display name cannot be blank".to_string(),
        ));
    }

    let user = UserRepository::new(state.pool())
        .ensure(&user_id, display_name, request.avatar_url.as_deref())
        .await?;

    set_current_user(
        &session,
        &CurrentUser {
            id: user.id.clone(),
            display_name: user.display_name.clone(),
        },
    )
    .await
    .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;

    set_sentry_user(&user.id);
    tracing::info!(user_id = %user.id, "session established");

    Ok(Json(user.into()))
}

/// Drop the session identity.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}
