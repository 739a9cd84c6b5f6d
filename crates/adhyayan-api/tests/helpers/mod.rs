//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p adhyayan-api`. The in-memory
//! backend is used, so no database is needed.

pub mod auth;
pub mod fixtures;

use adhyayan_api::constants;
use adhyayan_api::setup::{routes, services};
use adhyayan_api::state::AppState;
use adhyayan_core::Config;
use adhyayan_db::Stores;
use axum_test::TestServer;
use std::collections::HashMap;
use std::sync::Arc;

/// Seeded into ADMIN_EMAILS; registering with it yields an admin account.
pub const ADMIN_EMAIL: &str = "admin@example.com";

const TEST_JWT_SECRET: &str = "test-jwt-secret-that-is-at-least-32-characters";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus the shared state behind it.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("DATABASE_BACKEND", "memory"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("ADMIN_EMAILS", ADMIN_EMAIL),
        ("ENVIRONMENT", "test"),
    ]);
    Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .expect("Failed to build test config")
}

/// Setup a test app backed by fresh in-memory stores.
pub async fn setup_test_app() -> TestApp {
    let config = create_test_config();
    config.validate().expect("Test config should be valid");

    let state = services::initialize_services(&config, Stores::memory())
        .expect("Failed to initialize services");
    let router = routes::setup_routes(&config, state.clone()).expect("Failed to build router");

    TestApp {
        server: TestServer::new(router).expect("Failed to create test server"),
        state,
    }
}
