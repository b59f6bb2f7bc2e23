//! Database operations for the storefront `PostgreSQL` store.
//!
//! # Collections
//!
//! - `users` - Sellers (identity from the external provider)
//! - `albums` - Named inventory groupings per seller
//! - `user_collections` - Cards: catalog entries enriched with sale metadata
//! - `tower_sessions.session` - Session storage
//!
//! Albums and cards reference their owner by convention only; there are no
//! foreign keys and no stored child lists. Every enumeration filters on
//! `owner_id` (and `album_id` for cards).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p nexus-hub-cli -- migrate
//! ```

pub mod albums;
pub mod cards;
pub mod purge;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use albums::AlbumRepository;
pub use cards::CardRepository;
pub use purge::{PurgeSummary, purge_user};
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation.
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
