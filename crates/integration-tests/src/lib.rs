//! Integration tests for Storedeck.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the backing commerce API (or a stub of it)
//! # Start the admin server
//! cargo run -p storedeck-admin
//!
//! # Run integration tests
//! cargo test -p storedeck-integration-tests -- --ignored
//! ```
//!
//! Tests live in `tests/` and are `#[ignore]`d by default since they
//! need a running admin server and backing API.

use reqwest::Client;

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("STOREDECK_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Create a cookie-holding client and sign in with the test admin
/// credentials from the environment.
///
/// # Panics
///
/// Panics if the client cannot be built or sign-in fails; these tests
/// only run against a prepared environment.
pub async fn authenticated_client() -> Client {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client");

    let email = std::env::var("STOREDECK_TEST_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@storedeck.test".to_string());
    let password = std::env::var("STOREDECK_TEST_ADMIN_PASSWORD")
        .unwrap_or_else(|_| "storedeck-test-password".to_string());

    let resp = client
        .post(format!("{}/auth/sign-in", admin_base_url()))
        .json(&serde_json::json!({"email": email, "password": password}))
        .send()
        .await
        .expect("Failed to reach sign-in endpoint");
    assert!(resp.status().is_success(), "sign-in failed: {}", resp.status());

    client
}
