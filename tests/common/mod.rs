//! Common test utilities and helpers
//!
//! Fixtures shared by the integration tests: configuration pointing at a
//! mock server, in-memory session stores and a frame-loop driver for
//! `AppState`.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use serde_json::{json, Value};
use synthesis::egui_app::{AppState, Config, MemoryStorage, SessionStore};
use synthesis::shared::{AppConfig, BearerToken, UserProfile};

pub const TEST_TOKEN: &str = "test-token-123";

/// Configuration pointed at a mock server
pub fn config_for(base_url: &str) -> Config {
    Config::with_builder(AppConfig::builder().server_url(base_url)).expect("valid test config")
}

pub fn test_user() -> UserProfile {
    UserProfile {
        user_id: "42".to_string(),
        username: "jane_doe".to_string(),
        email: "jane@example.com".to_string(),
        ..UserProfile::default()
    }
}

pub fn test_token() -> BearerToken {
    BearerToken::new(TEST_TOKEN).expect("non-empty token")
}

/// Body the backend returns from signin/signup
pub fn auth_body(token: &str) -> Value {
    json!({
        "success": true,
        "message": "Login successful",
        "data": {
            "user_id": "42",
            "email": "jane@example.com",
            "username": "jane_doe",
            "token": token
        }
    })
}

/// `count` preview patients out of `total` generated records
pub fn generate_body(count: usize, total: u64) -> Value {
    let patients: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "tabular_data": { "age": 30 + i, "bmi": 24.5, "diabetes": i % 2, "bp_status": 0 },
                "timeseries_sample": [
                    { "timestamp": "2024-01-01T08:00:00", "rbs_value": 110.0 },
                    { "timestamp": "2024-01-01T12:00:00", "rbs_value": 140.0 }
                ]
            })
        })
        .collect();
    json!({
        "success": true,
        "num_generated": total,
        "preview": { "sample_patients": patients }
    })
}

/// App state with an in-memory store; the returned storage shares its contents.
pub fn app_state(base_url: &str) -> (AppState, MemoryStorage) {
    let storage = MemoryStorage::new();
    let sessions = SessionStore::new(storage.clone());
    let state = AppState::with_parts(config_for(base_url), sessions).expect("runtime");
    (state, storage)
}

/// App state that starts with a persisted session
pub fn signed_in_state(base_url: &str) -> (AppState, MemoryStorage) {
    let storage = MemoryStorage::new();
    let mut sessions = SessionStore::new(storage.clone());
    sessions.save(&test_token(), &test_user());
    let state = AppState::with_parts(config_for(base_url), sessions).expect("runtime");
    (state, storage)
}

/// Run frames until no request is in flight.
pub fn settle(state: &mut AppState) {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        state.update();
        if !state.is_busy() {
            return;
        }
        assert!(Instant::now() < deadline, "requests did not settle");
        std::thread::sleep(Duration::from_millis(10));
    }
}
