//! Integration tests for NexusHub.
//!
//! These tests drive a running storefront over HTTP. They require:
//! - A migrated `PostgreSQL` database (`nexus-cli migrate`)
//! - The storefront running (`cargo run -p nexus-hub-storefront`)
//!
//! # Running Tests
//!
//! ```bash
//! NEXUS_BASE_URL=http://localhost:3000 \
//!     cargo test -p nexus-hub-integration-tests -- --ignored
//! ```
//!
//! Each test signs in as a freshly generated seller id, so runs don't
//! interfere with each other or with existing data.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("NEXUS_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A signed-in test seller: cookie-holding client plus its generated id.
pub struct TestSeller {
    pub client: Client,
    pub user_id: String,
}

/// Sign in as a brand-new seller and keep the session cookie.
///
/// # Panics
///
/// Panics if the storefront is unreachable or rejects the session.
pub async fn sign_in(display_name: &str) -> TestSeller {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client");

    let user_id = format!("it-{}", Uuid::new_v4().simple());
    let resp = client
        .post(format!("{}/auth/session", base_url()))
        .json(&json!({
            "user_id": user_id,
            "display_name": display_name,
        }))
        .send()
        .await
        .expect("Failed to establish session");
    assert!(
        resp.status().is_success(),
        "session establishment failed: {}",
        resp.status()
    );

    TestSeller { client, user_id }
}

/// POST JSON and decode the JSON response, asserting the expected status.
///
/// # Panics
///
/// Panics on transport failure, status mismatch, or an undecodable body.
pub async fn post_json(client: &Client, path: &str, body: &Value, expected_status: u16) -> Value {
    let resp = client
        .post(format!("{}{path}", base_url()))
        .json(body)
        .send()
        .await
        .unwrap_or_else(|e| panic!("POST {path} failed: {e}"));
    assert_eq!(resp.status().as_u16(), expected_status, "POST {path}");
    resp.json().await.unwrap_or_else(|e| panic!("POST {path} returned non-JSON: {e}"))
}

/// GET and decode the JSON response, asserting 200.
///
/// # Panics
///
/// Panics on transport failure, non-200 status, or an undecodable body.
pub async fn get_json(client: &Client, path: &str) -> Value {
    let resp = client
        .get(format!("{}{path}", base_url()))
        .send()
        .await
        .unwrap_or_else(|e| panic!("GET {path} failed: {e}"));
    assert_eq!(resp.status().as_u16(), 200, "GET {path}");
    resp.json().await.unwrap_or_else(|e| panic!("GET {path} returned non-JSON: {e}"))
}
