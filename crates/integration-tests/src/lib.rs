//! Integration tests for Copperleaf.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! clf-cli migrate
//!
//! # Start the API server
//! cargo run -p copperleaf-api
//!
//! # Run integration tests
//! cargo test -p copperleaf-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `COPPERLEAF_TEST_BASE_URL` - API base URL (default: `http://localhost:4000`)
//! - `COPPERLEAF_ADMIN_TOKEN` - admin bearer token for mutation tests

use reqwest::{Client, RequestBuilder};

/// Shared context for black-box tests against a running API server.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    admin_token: String,
}

impl TestContext {
    /// Build a context from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `COPPERLEAF_ADMIN_TOKEN` is unset; the mutation tests
    /// cannot run without it.
    #[must_use]
    pub fn new() -> Self {
        let base_url = std::env::var("COPPERLEAF_TEST_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:4000".to_string());
        let admin_token = std::env::var("COPPERLEAF_ADMIN_TOKEN")
            .expect("COPPERLEAF_ADMIN_TOKEN must be set for integration tests");

        Self {
            client: Client::new(),
            base_url,
            admin_token,
        }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the admin bearer token to a request.
    #[must_use]
    pub fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.admin_token)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A short unique suffix so ignored tests can be re-run against a
/// non-empty database.
#[must_use]
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string().chars().take(8).collect()
}
