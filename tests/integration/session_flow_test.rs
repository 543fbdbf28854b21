//! Session flow tests
//!
//! Drive `AppState` frame by frame against a mockito server, the way the
//! desktop loop does.

use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;
use synthesis::egui_app::home::PreviewTable;
use synthesis::egui_app::session::{TOKEN_KEY, USER_KEY};
use synthesis::egui_app::state::SESSION_EXPIRED_MESSAGE;
use synthesis::egui_app::{AppState, AuthPhase, KeyValueStorage, MemoryStorage, Resolution, Route};
use synthesis::egui_app::forms::FILL_ALL_FIELDS;

use crate::common::{app_state, auth_body, generate_body, settle, signed_in_state, TEST_TOKEN};

#[test]
fn test_sign_in_saves_session_and_opens_home() {
    let mut server = mockito::Server::new();
    let signin = server
        .mock("POST", "/api/auth/signin")
        .match_body(Matcher::Json(json!({
            "login": "jane@example.com",
            "password": "Secret1!"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body(TEST_TOKEN).to_string())
        .expect(1)
        .create();

    let (mut state, storage) = app_state(&server.url());
    state.navigate(Route::SignIn);
    state.sign_in_form.email = "Jane@Example.com".to_string();
    state.sign_in_form.password = "Secret1!".to_string();
    state.handle_sign_in();
    assert!(state.is_signing_in());
    assert_eq!(state.auth_state.phase(), AuthPhase::Authenticating);

    settle(&mut state);

    signin.assert();
    assert!(state.auth_state.is_authenticated());
    assert_eq!(state.current_route(), Route::Home);
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some(TEST_TOKEN));
    assert!(storage.get(USER_KEY).unwrap().contains("jane_doe"));
    assert!(state.sign_in_form.password.is_empty());
}

#[test]
fn test_rejected_credentials_stay_anonymous() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/auth/signin")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({ "success": false, "message": "Invalid login credentials" }).to_string())
        .create();

    let (mut state, storage) = app_state(&server.url());
    state.sign_in_form.email = "jane@example.com".to_string();
    state.sign_in_form.password = "wrong".to_string();
    state.handle_sign_in();
    settle(&mut state);

    assert_eq!(state.auth_state.phase(), AuthPhase::Anonymous);
    assert_eq!(state.auth_state.error.as_deref(), Some("Invalid login credentials"));
    assert_eq!(storage.get(TOKEN_KEY), None);
}

#[test]
fn test_unreachable_server_reports_network_error() {
    let (mut state, _) = app_state("http://127.0.0.1:1");
    state.sign_in_form.email = "jane@example.com".to_string();
    state.sign_in_form.password = "Secret1!".to_string();
    state.handle_sign_in();
    settle(&mut state);

    assert_eq!(state.auth_state.phase(), AuthPhase::Anonymous);
    assert_eq!(
        state.auth_state.error.as_deref(),
        Some("Unable to reach the server. Please try again.")
    );
    assert!(!state.toasts.is_empty());
}

#[test]
fn test_profile_401_expires_session() {
    let mut server = mockito::Server::new();
    let profile = server
        .mock("GET", "/api/auth/profile")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({ "message": "Invalid or expired token" }).to_string())
        .expect(1)
        .create();

    let (mut state, storage) = signed_in_state(&server.url());
    assert!(state.auth_state.is_authenticated());
    assert_eq!(state.navigate(Route::Profile), Resolution::Render(Route::Profile));
    settle(&mut state);

    profile.assert();
    assert_eq!(state.auth_state.phase(), AuthPhase::Anonymous);
    assert_eq!(state.current_route(), Route::SignIn);
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_KEY), None);
    assert_eq!(state.toasts.latest().unwrap().message, SESSION_EXPIRED_MESSAGE);

    assert_eq!(state.navigate(Route::Home), Resolution::Redirect(Route::SignIn));
    assert_eq!(state.navigate(Route::Profile), Resolution::Redirect(Route::SignIn));
    assert_eq!(state.navigate(Route::About), Resolution::Render(Route::About));
}

fn sign_in(server: &mut mockito::ServerGuard) -> (AppState, MemoryStorage) {
    server
        .mock("POST", "/api/auth/signin")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body(TEST_TOKEN).to_string())
        .create();

    let (mut state, storage) = app_state(&server.url());
    state.sign_in_form.email = "jane@example.com".to_string();
    state.sign_in_form.password = "Secret1!".to_string();
    state.handle_sign_in();
    settle(&mut state);
    assert!(state.auth_state.is_authenticated());
    (state, storage)
}

#[test]
fn test_profile_after_sign_in_fetches_full_record() {
    let mut server = mockito::Server::new();
    let profile = server
        .mock("GET", "/api/auth/profile")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": {
                    "user_id": "42",
                    "username": "jane_doe",
                    "email": "jane@example.com",
                    "created_at": "2025-03-14T09:30:00",
                    "gender": "Female"
                }
            })
            .to_string(),
        )
        .expect(1)
        .create();

    let (mut state, _) = sign_in(&mut server);
    assert_eq!(state.navigate(Route::Profile), Resolution::Render(Route::Profile));
    settle(&mut state);

    profile.assert();
    let loaded = state.profile.as_ref().unwrap();
    assert_eq!(loaded.member_since_display(), "March 2025");
    assert_eq!(loaded.gender.as_deref(), Some("Female"));
}

#[test]
fn test_profile_401_after_sign_in_expires_session() {
    let mut server = mockito::Server::new();
    let profile = server
        .mock("GET", "/api/auth/profile")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(json!({ "message": "Token has been revoked" }).to_string())
        .expect(1)
        .create();

    let (mut state, storage) = sign_in(&mut server);
    state.navigate(Route::Profile);
    settle(&mut state);

    profile.assert();
    assert_eq!(state.auth_state.phase(), AuthPhase::Anonymous);
    assert_eq!(state.current_route(), Route::SignIn);
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(state.toasts.latest().unwrap().message, SESSION_EXPIRED_MESSAGE);
}

#[test]
fn test_empty_sign_up_sends_nothing() {
    let mut server = mockito::Server::new();
    let signup = server.mock("POST", "/api/auth/signup").expect(0).create();

    let (mut state, _) = app_state(&server.url());
    state.navigate(Route::SignUp);
    state.handle_sign_up();

    assert!(!state.is_signing_up());
    assert_eq!(state.auth_state.phase(), AuthPhase::Anonymous);
    assert_eq!(state.sign_up_form.errors.form(), Some(FILL_ALL_FIELDS));
    signup.assert();
}

#[test]
fn test_generate_shows_preview_of_total() {
    let mut server = mockito::Server::new();
    let generate = server
        .mock("POST", "/api/healthcare-gan/generate")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .match_body(Matcher::PartialJson(json!({ "num_samples": 500 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(generate_body(5, 500).to_string())
        .expect(1)
        .create();

    let (mut state, _) = signed_in_state(&server.url());
    state.home.record_count = 500;
    state.handle_generate();
    assert!(state.is_generating());
    settle(&mut state);

    generate.assert();
    let outcome = state.home.generated.as_ref().unwrap();
    let table = PreviewTable::from_dataset(&outcome.dataset).unwrap();
    assert_eq!(table.rows.len(), 5);
    assert_eq!(
        table.note(),
        "Showing 5 sample records out of 500 total generated records."
    );
    assert!(state.home.error.is_none());
}

#[test]
fn test_generate_failure_sets_banner() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/healthcare-gan/generate")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(json!({ "error": "Model not loaded" }).to_string())
        .create();

    let (mut state, _) = signed_in_state(&server.url());
    state.handle_generate();
    settle(&mut state);

    assert!(state.home.generated.is_none());
    assert_eq!(
        state.home.error.as_deref(),
        Some("Failed to generate data: Model not loaded")
    );
    assert!(state.auth_state.is_authenticated());
}

#[test]
fn test_logout_clears_session_and_returns_to_landing() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/auth/logout")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "success": true }).to_string())
        .create();

    let (mut state, storage) = signed_in_state(&server.url());
    state.navigate(Route::About);
    state.logout();

    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(state.auth_state.phase(), AuthPhase::Anonymous);
    assert_eq!(state.current_route(), Route::Landing);
    settle(&mut state);
    assert_eq!(state.navigate(Route::Home), Resolution::Redirect(Route::SignIn));
}
