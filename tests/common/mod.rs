// SPDX-License-Identifier: MIT
// Copyright 2026 Fitmint contributors

use fitmint_api::config::Config;
use fitmint_api::db::FirestoreDb;
use fitmint_api::middleware::auth::create_jwt;
use fitmint_api::routes::create_router;
use fitmint_api::services::GoogleAuthVerifier;
use fitmint_api::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let google_verifier =
        GoogleAuthVerifier::new(&config).expect("Failed to build test verifier");

    let state = Arc::new(AppState {
        config,
        db,
        google_verifier,
    });

    (create_router(state.clone()), state)
}

/// Mint a session JWT for a test user.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    create_jwt(uid, signing_key).expect("Failed to create test JWT")
}
