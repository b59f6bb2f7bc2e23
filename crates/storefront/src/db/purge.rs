//! Administrative cascade delete.
//!
//! Irreversibly removes a seller and everything that references them. The
//! store supports multi-statement transactions, so the three deletions
//! commit atomically: a failure anywhere rolls the whole cascade back and
//! leaves no orphaned albums or cards.

use sqlx::PgPool;
use tracing::instrument;

use nexus_hub_core::UserId;

use super::RepositoryError;

/// Outcome of a cascade purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeSummary {
    /// Cards removed.
    pub cards_deleted: u64,
    /// Albums removed.
    pub albums_deleted: u64,
    /// Whether a user row existed and was removed.
    pub user_deleted: bool,
}

/// Delete a user together with all their albums and cards, atomically.
///
/// Dependents go first so a mid-transaction snapshot never shows a card
/// whose owner row is already gone. When no user row exists the dependents
/// are still swept (covering rows orphaned by pre-transactional tooling)
/// and `user_deleted` is `false`.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement or the commit
/// fails; nothing is deleted in that case.
#[instrument(skip(pool), fields(user_id = %user_id))]
pub async fn purge_user(pool: &PgPool, user_id: &UserId) -> Result<PurgeSummary, RepositoryError> {
    let mut tx = pool.begin().await?;

    let cards_deleted = sqlx::query("DELETE FROM user_collections WHERE owner_id = $1")
        .bind(user_id.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let albums_deleted = sqlx::query("DELETE FROM albums WHERE owner_id = $1")
        .bind(user_id.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let user_deleted = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    tx.commit().await?;

    let summary = PurgeSummary {
        cards_deleted,
        albums_deleted,
        user_deleted,
    };

    tracing::info!(
        cards = summary.cards_deleted,
        albums = summary.albums_deleted,
        user_existed = summary.user_deleted,
        "cascade purge committed"
    );

    Ok(summary)
}
