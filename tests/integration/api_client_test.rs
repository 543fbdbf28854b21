//! API client integration tests
//!
//! Runs the typed operations against a wiremock server.

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde_json::json;
use synthesis::egui_app::{ApiClient, MemoryStorage, SessionStore};
use synthesis::shared::{ApiError, GenerateRequest, SignInRequest, SignUpRequest};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use crate::common::{auth_body, config_for, generate_body, test_token, TEST_TOKEN};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(config_for(&server.uri()))
}

#[tokio::test]
async fn test_sign_in_token_lands_in_session_store() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .and(body_json(json!({ "login": "jane@example.com", "password": "Secret1!" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(TEST_TOKEN)))
        .expect(1)
        .mount(&server)
        .await;

    let request = SignInRequest {
        login: "jane@example.com".to_string(),
        password: "Secret1!".to_string(),
    };
    let (token, user) = client(&server).sign_in(&request).await.unwrap();
    assert_eq!(token.as_str(), TEST_TOKEN);
    assert_eq!(user.username, "jane_doe");

    let mut store = SessionStore::new(MemoryStorage::new());
    store.save(&token, &user);
    let session = store.load().unwrap();
    assert_eq!(session.token.as_str(), TEST_TOKEN);
    assert_eq!(session.user.email, "jane@example.com");
}

#[tokio::test]
async fn test_sign_up_sends_all_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(body_json(json!({
            "username": "jane_doe",
            "email": "jane@example.com",
            "password": "Secret1!"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_body("fresh-token")))
        .expect(1)
        .mount(&server)
        .await;

    let request = SignUpRequest {
        username: "jane_doe".to_string(),
        email: "jane@example.com".to_string(),
        password: "Secret1!".to_string(),
    };
    let (token, _) = client(&server).sign_up(&request).await.unwrap();
    assert_eq!(token.as_str(), "fresh-token");
}

#[tokio::test]
async fn test_auth_response_without_token_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "email": "jane@example.com", "username": "jane_doe" }
        })))
        .mount(&server)
        .await;

    let request = SignInRequest {
        login: "jane@example.com".to_string(),
        password: "x".to_string(),
    };
    let result = client(&server).sign_in(&request).await;
    assert_matches!(result, Err(ApiError::Decode { .. }));
}

#[tokio::test]
async fn test_profile_401_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid or expired token" })),
        )
        .mount(&server)
        .await;

    let error = client(&server).profile(&test_token()).await.unwrap_err();
    assert!(error.is_auth());
    assert_eq!(error.status(), 401);
    assert_eq!(error.to_string(), "Invalid or expired token");
}

#[tokio::test]
async fn test_non_2xx_json_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "message": "Email already registered"
        })))
        .mount(&server)
        .await;

    let request = SignUpRequest {
        username: "jane_doe".to_string(),
        email: "jane@example.com".to_string(),
        password: "Secret1!".to_string(),
    };
    let error = client(&server).sign_up(&request).await.unwrap_err();
    assert_eq!(error, ApiError::server(409, "Email already registered"));

    let raw = client(&server)
        .request(Method::POST, "/api/auth/signup", Some(&json!({})), None)
        .await;
    assert!(!raw.success);
    assert_eq!(raw.status, 409);
    assert_eq!(raw.data["message"], "Email already registered");
}

#[tokio::test]
async fn test_unreachable_server_reports_status_zero() {
    let api = ApiClient::new(config_for("http://127.0.0.1:1"));
    let response = api.request(Method::GET, "/api/healthcare-gan/health", None, None).await;
    assert!(!response.success);
    assert_eq!(response.status, 0);

    let error = api.health().await.unwrap_err();
    assert_matches!(error, ApiError::Network { .. });
    assert_eq!(error.status(), 0);
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/healthcare-gan/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_body(2, 20)))
        .mount(&server)
        .await;

    let request = GenerateRequest {
        num_samples: 20,
        diabetes_ratio: 0.5,
        hypertension_ratio: 0.5,
    };
    let outcome = client(&server).generate(None, &request).await.unwrap();
    assert_eq!(outcome.dataset.num_generated, 20);

    let received: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_generate_attaches_bearer_when_signed_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/healthcare-gan/generate"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_body(5, 500)))
        .expect(1)
        .mount(&server)
        .await;

    let request = GenerateRequest {
        num_samples: 500,
        diabetes_ratio: 0.5,
        hypertension_ratio: 0.7,
    };
    let outcome = client(&server)
        .generate(Some(&test_token()), &request)
        .await
        .unwrap();
    assert_eq!(outcome.dataset.preview.sample_patients.len(), 5);
    assert_eq!(outcome.raw["num_generated"], 500);
}
