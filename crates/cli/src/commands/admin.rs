//! Administrative commands.
//!
//! The cascade purge is the destructive one: it removes a seller together
//! with every album and card that references them, in a single
//! transaction. There is no undo, hence the interactive confirmation
//! unless `--yes` is passed.

use std::io::Write as _;

use nexus_hub_core::UserId;
use nexus_hub_storefront::db::{AlbumRepository, CardRepository, UserRepository, purge_user};

use super::{CommandError, connect};

/// List sellers with their album and card counts.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a query fails.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CommandError> {
    let pool = connect().await?;

    let users = UserRepository::new(&pool).list().await?;
    if users.is_empty() {
        println!("No sellers.");
        return Ok(());
    }

    let albums = AlbumRepository::new(&pool);
    let cards = CardRepository::new(&pool);

    println!("{:<40} {:>7} {:>7}  {}", "ID", "ALBUMS", "CARDS", "NAME");
    for user in users {
        let album_count = albums.count_by_owner(&user.id).await?;
        let card_count = cards.count_by_owner(&user.id).await?;
        println!(
            "{:<40} {:>7} {:>7}  {}",
            user.id, album_count, card_count, user.display_name
        );
    }

    Ok(())
}

/// Cascade-delete a seller.
///
/// # Errors
///
/// Returns an error if the id is invalid, the confirmation is declined,
/// or the transaction fails (in which case nothing was deleted).
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub async fn purge(raw_user_id: &str, yes: bool) -> Result<(), CommandError> {
    let user_id =
        UserId::parse(raw_user_id).map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    if !yes && !confirm(&user_id)? {
        println!("Aborted.");
        return Ok(());
    }

    let pool = connect().await?;
    let summary = purge_user(&pool, &user_id).await?;

    if summary.user_deleted {
        println!(
            "Purged seller {user_id}: {} cards, {} albums.",
            summary.cards_deleted, summary.albums_deleted
        );
    } else {
        println!(
            "No seller row for {user_id}; swept {} orphaned cards and {} orphaned albums.",
            summary.cards_deleted, summary.albums_deleted
        );
    }

    Ok(())
}

/// Ask for interactive confirmation on stdin.
#[allow(clippy::print_stdout)]
fn confirm(user_id: &UserId) -> Result<bool, CommandError> {
    print!("Delete seller {user_id} and ALL their albums and cards? [y/N] ");
    std::io::stdout()
        .flush()
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(|e| CommandError::InvalidInput(e.to_string()))?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
