//! Demo data seeding.
//!
//! Inserts one demo seller with a contact handle, two albums, and a small
//! inventory, going through the same repositories the service uses so the
//! seeded rows look exactly like organic ones.

use rust_decimal::Decimal;

use nexus_hub_core::{CardCondition, CardLanguage, PhoneNumber, Price, UserId};
use nexus_hub_storefront::catalog::CatalogItem;
use nexus_hub_storefront::db::{AlbumRepository, CardRepository, UserRepository};
use nexus_hub_storefront::models::CardMetadata;

use super::{CommandError, connect};

/// The demo seller's id; stable so reseeding is idempotent for the user row.
const DEMO_SELLER_ID: &str = "demo-seller";

struct SeedCard {
    item: CatalogItem,
    price: i64,
    condition: CardCondition,
    language: CardLanguage,
    quantity: u32,
    delivery: Option<&'static str>,
}

fn demo_cards() -> Vec<SeedCard> {
    let catalog = |id: &str, name: &str, path: &str| CatalogItem {
        id: id.to_owned(),
        name: name.to_owned(),
        image: format!("https://assets.tcgdex.net/{path}"),
    };

    vec![
        SeedCard {
            item: catalog("base1-4", "Charizard", "en/base/base1/4"),
            price: 50_000,
            condition: CardCondition::NearMint,
            language: CardLanguage::English,
            quantity: 1,
            delivery: Some("Metro Baquedano"),
        },
        SeedCard {
            item: catalog("base1-2", "Blastoise", "en/base/base1/2"),
            price: 32_000,
            condition: CardCondition::LightlyPlayed,
            language: CardLanguage::English,
            quantity: 1,
            delivery: Some("Metro Baquedano"),
        },
        SeedCard {
            item: catalog("swsh3-5", "Pikachu", "es/swsh/swsh3/5"),
            price: 4_500,
            condition: CardCondition::Played,
            language: CardLanguage::Spanish,
            quantity: 3,
            delivery: None,
        },
    ]
}

/// Seed the database with a demo seller.
///
/// # Errors
///
/// Returns an error if the database is unreachable or any write fails.
#[allow(clippy::print_stdout)]
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let seller_id = UserId::parse(DEMO_SELLER_ID)
        .map_err(|e| CommandError::InvalidInput(format!("demo seller id: {e}")))?;

    let users = UserRepository::new(&pool);
    let user = users
        .ensure(&seller_id, "Demo Seller", None)
        .await?;
    let phone = PhoneNumber::parse("56912345678")
        .map_err(|e| CommandError::InvalidInput(format!("demo phone: {e}")))?;
    users.save_contact(&user.id, &phone).await?;

    let albums = AlbumRepository::new(&pool);
    let holos = albums.create(&seller_id, "holos").await?;
    let trades = albums.create(&seller_id, "intercambios").await?;

    let cards = CardRepository::new(&pool);
    for (index, seed) in demo_cards().into_iter().enumerate() {
        let album = if index < 2 { &holos } else { &trades };
        let metadata = CardMetadata {
            price: Price::new(Decimal::from(seed.price))
                .map_err(|e| CommandError::InvalidInput(format!("seed price: {e}")))?,
            condition: seed.condition,
            language: seed.language,
            quantity: seed.quantity,
            delivery: seed.delivery.map(str::to_owned),
        };
        cards
            .create(&seller_id, album.id, &seed.item, &metadata)
            .await?;
    }

    println!("Seeded seller '{DEMO_SELLER_ID}' with albums {} and {}", holos.name, trades.name);
    Ok(())
}
