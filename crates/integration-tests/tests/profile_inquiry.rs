//! Integration tests for the public vitrine and inquiry composition.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (`nexus-cli migrate`)
//! - The storefront running (`cargo run -p nexus-hub-storefront`)
//!
//! Run with: `cargo test -p nexus-hub-integration-tests -- --ignored`

use reqwest::Client;
use serde_json::{Value, json};

use nexus_hub_integration_tests::{TestSeller, base_url, get_json, post_json, sign_in};

/// Set up a seller with a contact handle and two priced cards.
async fn seller_with_inventory() -> (TestSeller, Vec<i64>) {
    let seller = sign_in("Vitrine Seller").await;

    post_json(
        &seller.client,
        "/account/contact",
        &json!({ "phone": "+56 9 1234 5678" }),
        200,
    )
    .await;

    let album = post_json(&seller.client, "/albums", &json!({ "name": "VITRINA" }), 201).await;
    let album_id = album["id"].as_i64().expect("album id");

    let mut card_ids = Vec::new();
    for (catalog_id, name, price) in [
        ("base1-4", "Charizard", "50000"),
        ("swsh3-5", "Pikachu", "5000"),
    ] {
        let card = post_json(
            &seller.client,
            &format!("/albums/{album_id}/cards"),
            &json!({
                "catalog": {
                    "id": catalog_id,
                    "name": name,
                    "image": format!("https://assets.tcgdex.net/x/{catalog_id}")
                },
                "price": price
            }),
            201,
        )
        .await;
        card_ids.push(card["id"].as_i64().expect("card id"));
    }

    (seller, card_ids)
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_vitrine_snapshot_is_public_and_featured_sorted() {
    let (seller, _card_ids) = seller_with_inventory().await;

    // A visitor with no session can read the vitrine
    let visitor = Client::new();
    let profile: Value = visitor
        .get(format!("{}/profile/{}", base_url(), seller.user_id))
        .send()
        .await
        .expect("GET /profile failed")
        .json()
        .await
        .expect("profile is not JSON");

    assert_eq!(profile["seller"]["display_name"], "Vitrine Seller");
    assert_eq!(profile["seller"]["has_contact"], true);
    assert_eq!(profile["cards"].as_array().map(Vec::len), Some(2));

    // Featured strip is sorted by price, best first
    let featured = profile["featured"].as_array().expect("featured");
    assert_eq!(featured[0]["name"], "Charizard");
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_inquiry_composes_message_and_link() {
    let (seller, card_ids) = seller_with_inventory().await;

    let visitor = Client::new();
    let inquiry: Value = visitor
        .post(format!("{}/profile/{}/inquiry", base_url(), seller.user_id))
        .json(&json!({ "card_ids": card_ids }))
        .send()
        .await
        .expect("POST /inquiry failed")
        .json()
        .await
        .expect("inquiry is not JSON");

    let message = inquiry["message"].as_str().expect("message");
    assert!(message.contains("Charizard"));
    assert!(message.contains("Pikachu"));
    assert!(message.contains("Total: $55.000 CLP"));

    let url = inquiry["whatsapp_url"].as_str().expect("whatsapp_url");
    assert!(url.starts_with("https://wa.me/56912345678?text="));
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_inquiry_with_empty_selection_warns() {
    let (seller, _card_ids) = seller_with_inventory().await;

    let visitor = Client::new();
    let resp = visitor
        .post(format!("{}/profile/{}/inquiry", base_url(), seller.user_id))
        .json(&json!({ "card_ids": [] }))
        .send()
        .await
        .expect("POST /inquiry failed");
    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_inquiry_without_seller_contact_warns() {
    let seller = sign_in("Unreachable Seller").await;
    let album = post_json(&seller.client, "/albums", &json!({ "name": "SOLO" }), 201).await;
    let album_id = album["id"].as_i64().expect("album id");
    let card = post_json(
        &seller.client,
        &format!("/albums/{album_id}/cards"),
        &json!({
            "catalog": {
                "id": "base1-2",
                "name": "Blastoise",
                "image": "https://assets.tcgdex.net/x/base1-2"
            },
            "price": "32000"
        }),
        201,
    )
    .await;

    let visitor = Client::new();
    let resp = visitor
        .post(format!("{}/profile/{}/inquiry", base_url(), seller.user_id))
        .json(&json!({ "card_ids": [card["id"]] }))
        .send()
        .await
        .expect("POST /inquiry failed");
    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_contact_saved_digit_only() {
    let seller = sign_in("Contact Seller").await;

    let contact = post_json(
        &seller.client,
        "/account/contact",
        &json!({ "phone": "+56 9 1234 5678" }),
        200,
    )
    .await;
    assert_eq!(contact["whatsapp"], "56912345678");

    // Too few digits is rejected before any write
    let resp = seller
        .client
        .post(format!("{}/account/contact", base_url()))
        .json(&json!({ "phone": "123 45 67" }))
        .send()
        .await
        .expect("POST /account/contact failed");
    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_vitrine_album_filter() {
    let (seller, _card_ids) = seller_with_inventory().await;

    // Album from the seller's own list scopes the view
    let albums = get_json(&seller.client, "/albums").await;
    let album_id = albums[0]["id"].as_i64().expect("album id");

    let visitor = Client::new();
    let profile: Value = visitor
        .get(format!(
            "{}/profile/{}?album={album_id}",
            base_url(),
            seller.user_id
        ))
        .send()
        .await
        .expect("GET /profile failed")
        .json()
        .await
        .expect("profile is not JSON");
    assert_eq!(profile["album"].as_i64(), Some(album_id));

    // A foreign album id is a dead link
    let resp = visitor
        .get(format!(
            "{}/profile/{}?album=999999",
            base_url(),
            seller.user_id
        ))
        .send()
        .await
        .expect("GET /profile failed");
    assert_eq!(resp.status().as_u16(), 404);
}
