//! Integration tests for the dashboard collection flow.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (`nexus-cli migrate`)
//! - The storefront running (`cargo run -p nexus-hub-storefront`)
//!
//! Run with: `cargo test -p nexus-hub-integration-tests -- --ignored`

use serde_json::json;

use nexus_hub_integration_tests::{get_json, post_json, sign_in};

// ============================================================================
// Album Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_fresh_seller_has_empty_album_list() {
    let seller = sign_in("Fresh Seller").await;

    let albums = get_json(&seller.client, "/albums").await;
    assert_eq!(albums.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_album_name_is_uppercased_and_share_url_scoped() {
    let seller = sign_in("Album Seller").await;

    let album = post_json(
        &seller.client,
        "/albums",
        &json!({ "name": "holos" }),
        201,
    )
    .await;

    assert_eq!(album["name"], "HOLOS");
    let share_url = album["share_url"].as_str().expect("share_url");
    assert!(share_url.contains(&format!("/perfil/{}", seller.user_id)));
    assert!(share_url.contains("?album="));
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_blank_album_name_rejected() {
    let seller = sign_in("Blank Album Seller").await;

    let error = post_json(&seller.client, "/albums", &json!({ "name": "   " }), 422).await;
    assert!(error["error"].as_str().expect("error").contains("blank"));

    let albums = get_json(&seller.client, "/albums").await;
    assert_eq!(albums.as_array().map(Vec::len), Some(0));
}

// ============================================================================
// Card Tests
// ============================================================================

/// The full create -> list -> edit -> list scenario.
#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_card_create_edit_round_trip() {
    let seller = sign_in("Matías").await;

    let album = post_json(&seller.client, "/albums", &json!({ "name": "HOLOS" }), 201).await;
    let album_id = album["id"].as_i64().expect("album id");

    // Attach a catalog hit with sale metadata
    let card = post_json(
        &seller.client,
        &format!("/albums/{album_id}/cards"),
        &json!({
            "catalog": {
                "id": "base1-4",
                "name": "Charizard",
                "image": "https://assets.tcgdex.net/en/base/base1/4"
            },
            "price": "50000",
            "condition": "Near Mint",
            "quantity": 1
        }),
        201,
    )
    .await;
    let card_id = card["id"].as_i64().expect("card id");
    assert_eq!(
        card["image"],
        "https://assets.tcgdex.net/en/base/base1/4/high.webp"
    );

    // listCards shows exactly one entry with that name and price
    let grid = get_json(&seller.client, &format!("/albums/{album_id}/cards")).await;
    let cards = grid["cards"].as_array().expect("cards");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["name"], "Charizard");
    assert_eq!(cards[0]["price"], "50000");
    let created_updated_at = cards[0]["updated_at"].as_str().expect("updated_at").to_owned();

    // Edit the price; identity and catalog reference stay frozen
    let edited = seller
        .client
        .put(format!(
            "{}/cards/{card_id}",
            nexus_hub_integration_tests::base_url()
        ))
        .json(&json!({ "price": "45000", "condition": "Near Mint", "quantity": 1 }))
        .send()
        .await
        .expect("PUT /cards failed");
    assert_eq!(edited.status().as_u16(), 200);

    let grid = get_json(&seller.client, &format!("/albums/{album_id}/cards")).await;
    let cards = grid["cards"].as_array().expect("cards");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["price"], "45000");
    assert_eq!(cards[0]["catalog_id"], "base1-4");
    assert_eq!(
        cards[0]["image"],
        "https://assets.tcgdex.net/en/base/base1/4/high.webp"
    );
    // The edit advanced updated_at (NOW() at edit time vs. at creation)
    let edited_updated_at = cards[0]["updated_at"].as_str().expect("updated_at");
    assert_ne!(edited_updated_at, created_updated_at);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_non_positive_price_never_reaches_the_store() {
    let seller = sign_in("Strict Seller").await;

    let album = post_json(&seller.client, "/albums", &json!({ "name": "REJECTS" }), 201).await;
    let album_id = album["id"].as_i64().expect("album id");

    for price in ["0", "-100"] {
        let resp = seller
            .client
            .post(format!(
                "{}/albums/{album_id}/cards",
                nexus_hub_integration_tests::base_url()
            ))
            .json(&json!({
                "catalog": {
                    "id": "base1-4",
                    "name": "Charizard",
                    "image": "https://assets.tcgdex.net/en/base/base1/4"
                },
                "price": price
            }))
            .send()
            .await
            .expect("POST card failed");
        assert_eq!(resp.status().as_u16(), 422, "price {price}");
    }

    // The card list is unchanged
    let grid = get_json(&seller.client, &format!("/albums/{album_id}/cards")).await;
    assert_eq!(grid["cards"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_delete_card_then_refresh() {
    let seller = sign_in("Deleting Seller").await;

    let album = post_json(&seller.client, "/albums", &json!({ "name": "TEMP" }), 201).await;
    let album_id = album["id"].as_i64().expect("album id");

    let card = post_json(
        &seller.client,
        &format!("/albums/{album_id}/cards"),
        &json!({
            "catalog": {
                "id": "swsh3-5",
                "name": "Pikachu",
                "image": "https://assets.tcgdex.net/es/swsh/swsh3/5"
            },
            "price": "4500"
        }),
        201,
    )
    .await;
    let card_id = card["id"].as_i64().expect("card id");

    let resp = seller
        .client
        .delete(format!(
            "{}/cards/{card_id}",
            nexus_hub_integration_tests::base_url()
        ))
        .send()
        .await
        .expect("DELETE /cards failed");
    assert_eq!(resp.status().as_u16(), 204);

    let grid = get_json(&seller.client, &format!("/albums/{album_id}/cards")).await;
    assert_eq!(grid["cards"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_dashboard_requires_session() {
    let anonymous = reqwest::Client::new();
    let resp = anonymous
        .get(format!("{}/albums", nexus_hub_integration_tests::base_url()))
        .send()
        .await
        .expect("GET /albums failed");
    assert_eq!(resp.status().as_u16(), 401);
}
