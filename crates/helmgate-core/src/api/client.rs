//! API client for the console's identity endpoint.
//!
//! This module provides the `ApiClient` struct for submitting credentials
//! to the remote login endpoint and decoding the response envelope.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::UserRecord;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the hosted console API
const DEFAULT_BASE_URL: &str = "https://api.helmgate.dev";

/// Login endpoint path, relative to the base URL
const LOGIN_PATH: &str = "/login";

/// HTTP request timeout in seconds.
/// A transport timeout is reported as an ordinary failure, so 30s just
/// bounds how long the form stays in its submitting state.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Outbound login body. `rememberMe` is deliberately absent - it governs
/// local persistence only and never goes over the wire.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Success envelope: `{ "data": { "token": ..., "user": ... } }`
#[derive(Debug, Deserialize)]
struct LoginResponseBody {
    data: LoginPayload,
}

/// Token and user record issued by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: UserRecord,
}

/// API client for the console's identity endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the hosted console API
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a specific console deployment
    pub fn with_base_url(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit credentials to the login endpoint.
    ///
    /// Returns the issued token and user record on success. Any non-success
    /// status is decoded into `ApiError::Auth` via the error envelope;
    /// transport failures surface as `ApiError::Network`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginPayload, ApiError> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: LoginResponseBody = response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
            debug!(user_id = body.data.user.id, "Login response decoded");
            Ok(body.data)
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Login rejected");
            Err(ApiError::from_failure(&body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn success_body() -> serde_json::Value {
        serde_json::json!({
            "data": {
                "token": "tok-123",
                "user": {"id": 9, "fullName": "Sam Admin", "preferedLanguage": "fr"}
            }
        })
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(serde_json::json!({
                "email": "sam@example.com",
                "password": "hunter2"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let api = ApiClient::with_base_url(&server.uri()).expect("client");
        let payload = api.login("sam@example.com", "hunter2").await.expect("login");
        assert_eq!(payload.token, "tok-123");
        assert_eq!(payload.user.id, 9);
        assert_eq!(payload.user.prefered_language.as_deref(), Some("fr"));
    }

    #[tokio::test]
    async fn test_login_failure_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Invalid credentials"}
            })))
            .mount(&server)
            .await;

        let api = ApiClient::with_base_url(&server.uri()).expect("client");
        let err = api.login("sam@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, ApiError::Auth(ref m) if m == "Invalid credentials"));
    }

    #[tokio::test]
    async fn test_login_failure_without_message_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let api = ApiClient::with_base_url(&server.uri()).expect("client");
        let err = api.login("sam@example.com", "hunter2").await.unwrap_err();
        assert_eq!(err.user_message(), crate::api::GENERIC_AUTH_MESSAGE);
    }

    #[tokio::test]
    async fn test_login_malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let api = ApiClient::with_base_url(&server.uri()).expect("client");
        let err = api.login("sam@example.com", "hunter2").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}
