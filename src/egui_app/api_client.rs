//! Synthesis API Client
//!
//! A thin wrapper over `reqwest`. [`ApiClient::request`] never fails: a
//! transport error becomes an [`ApiResponse`] with `status == 0`, and
//! non-2xx bodies are still parsed as JSON when possible. The typed
//! operations convert that envelope into `Result<_, ApiError>` so callers
//! match on variants instead of probing fields.

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::egui_app::config::Config;
use crate::shared::api::{AuthPayload, BearerToken, ProfileUpdate, SignInRequest, SignUpRequest, UserProfile};
use crate::shared::dataset::{
    GenerateOutcome, GenerateRequest, GeneratedDataset, ServiceHealth, TrainRequest, TrainingResult,
};
use crate::shared::error::ApiError;

pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const SIGNIN_PATH: &str = "/api/auth/signin";
pub const PROFILE_PATH: &str = "/api/auth/profile";
pub const LOGOUT_PATH: &str = "/api/auth/logout";
pub const GENERATE_PATH: &str = "/api/healthcare-gan/generate";
pub const TRAIN_PATH: &str = "/api/healthcare-gan/train";
pub const HEALTH_PATH: &str = "/api/healthcare-gan/health";

/// Normalized outcome of a single HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Value,
    /// HTTP status, or 0 when no response arrived
    pub status: u16,
}

impl ApiResponse {
    fn network_failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: json!({ "message": message.into() }),
            status: 0,
        }
    }

    /// Build a response from a status and raw body text.
    pub fn from_parts(status: StatusCode, body: &str) -> Self {
        let data = parse_body(status, body);
        let reported_failure = data.get("success").and_then(Value::as_bool) == Some(false);
        Self {
            success: status.is_success() && !reported_failure,
            data,
            status: status.as_u16(),
        }
    }

    /// Best message the payload offers, falling back to a status default.
    pub fn message(&self) -> String {
        ["message", "error", "detail"]
            .iter()
            .find_map(|key| self.data.get(*key).and_then(Value::as_str))
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| default_message(self.status))
    }

    pub fn into_result(self) -> Result<Value, ApiError> {
        if self.success {
            return Ok(self.data);
        }
        let message = self.message();
        Err(match self.status {
            0 => ApiError::network(message),
            401 => ApiError::auth(message),
            status => ApiError::server(status, message),
        })
    }
}

fn parse_body(status: StatusCode, body: &str) -> Value {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return if status.is_success() {
            json!({})
        } else {
            json!({ "message": status.canonical_reason().unwrap_or("Request failed") })
        };
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| json!({ "message": trimmed }))
}

fn default_message(status: u16) -> String {
    match status {
        0 => "Unable to reach the server".to_string(),
        401 => "Authentication required".to_string(),
        _ => StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(|reason| format!("Request failed: {} {}", status, reason))
            .unwrap_or_else(|| format!("Request failed with status {}", status)),
    }
}

/// The backend wraps most answers as `{ success, message, data }`.
fn envelope_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(ApiError::from)
}

/// HTTP client for the Synthesis backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Issue one request. Never returns an error; see [`ApiResponse`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&BearerToken>,
    ) -> ApiResponse {
        let url = self.config.api_url(path);
        let mut builder = self.client.request(method.clone(), &url);

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, token.header_value());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{} {} failed: {}", method, path, e);
                return ApiResponse::network_failure(e.to_string());
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{} {} body read failed: {}", method, path, e);
                return ApiResponse::network_failure(e.to_string());
            }
        };

        let result = ApiResponse::from_parts(status, &text);
        if result.success {
            tracing::debug!("{} {} -> {}", method, path, result.status);
        } else {
            tracing::warn!("{} {} -> {}: {}", method, path, result.status, result.message());
        }
        result
    }

    async fn send_json<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&BearerToken>,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(body)?;
        self.request(method, path, Some(&body), token).await.into_result()
    }

    /// Create an account. Success yields the session token and user.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(BearerToken, UserProfile), ApiError> {
        let value = self.send_json(Method::POST, SIGNUP_PATH, request, None).await?;
        decode::<AuthPayload>(envelope_data(value))?.into_session_parts()
    }

    /// Sign in with an email or username in `login`.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<(BearerToken, UserProfile), ApiError> {
        let value = self.send_json(Method::POST, SIGNIN_PATH, request, None).await?;
        decode::<AuthPayload>(envelope_data(value))?.into_session_parts()
    }

    pub async fn profile(&self, token: &BearerToken) -> Result<UserProfile, ApiError> {
        let value = self
            .request(Method::GET, PROFILE_PATH, None, Some(token))
            .await
            .into_result()?;
        decode(envelope_data(value))
    }

    pub async fn update_profile(&self, token: &BearerToken, update: &ProfileUpdate) -> Result<(), ApiError> {
        self.send_json(Method::PUT, PROFILE_PATH, update, Some(token)).await?;
        Ok(())
    }

    pub async fn logout(&self, token: &BearerToken) -> Result<(), ApiError> {
        self.request(Method::POST, LOGOUT_PATH, None, Some(token))
            .await
            .into_result()?;
        Ok(())
    }

    pub async fn generate(
        &self,
        token: Option<&BearerToken>,
        request: &GenerateRequest,
    ) -> Result<GenerateOutcome, ApiError> {
        let raw = self.send_json(Method::POST, GENERATE_PATH, request, token).await?;
        let dataset: GeneratedDataset = decode(envelope_data(raw.clone()))?;
        Ok(GenerateOutcome { dataset, raw })
    }

    pub async fn train(
        &self,
        token: Option<&BearerToken>,
        request: &TrainRequest,
    ) -> Result<TrainingResult, ApiError> {
        let value = self.send_json(Method::POST, TRAIN_PATH, request, token).await?;
        decode(envelope_data(value))
    }

    pub async fn health(&self) -> Result<ServiceHealth, ApiError> {
        let value = self
            .request(Method::GET, HEALTH_PATH, None, None)
            .await
            .into_result()?;
        decode(envelope_data(value))
    }
}
