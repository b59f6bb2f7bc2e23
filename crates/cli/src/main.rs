//! NexusHub CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! nexus-cli migrate
//!
//! # Seed a demo seller with albums and cards
//! nexus-cli seed
//!
//! # List sellers with album/card counts
//! nexus-cli admin list
//!
//! # Cascade-delete a seller and everything they own
//! nexus-cli admin purge --user-id <id> --yes
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed database with demo data
//! - `admin list` - Enumerate sellers
//! - `admin purge` - Cascade delete a seller

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nexus-cli")]
#[command(author, version, about = "NexusHub CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with demo data
    Seed,
    /// Administrative operations
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List sellers with album and card counts
    List,
    /// Irreversibly delete a seller and all their albums and cards
    Purge {
        /// Seller id to purge
        #[arg(short, long)]
        user_id: String,

        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::List => commands::admin::list().await?,
            AdminAction::Purge { user_id, yes } => {
                commands::admin::purge(&user_id, yes).await?;
            }
        },
    }
    Ok(())
}
