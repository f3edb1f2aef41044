//! Remote computation service client
//!
//! Every remote widget action is one JSON POST with a single designated
//! field in the success body and an optional `error` field otherwise.
//! [`RemoteAction`] captures the per-action differences (endpoint, request
//! shape, response field); [`ServiceClient::call`] implements the shared
//! request/response contract once.

pub mod actions;

pub use actions::{DecodeBase64, EncodeBase64, GenerateHash, GenerateTotp, HashAlgorithm};

use crate::config::{Endpoints, ServiceConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from a single service call
#[derive(Debug)]
pub enum RemoteError {
    /// Request could not complete (connection refused, DNS, reset)
    Transport(String),
    /// No response within the configured timeout
    Timeout,
    /// Service answered with a human-readable `error` field
    Server { status: u16, message: String },
    /// Non-2xx without a usable error body
    Status(u16),
    /// 2xx body missing the designated field
    Malformed(String),
    /// HTTP client could not be constructed
    Client(String),
}

impl RemoteError {
    /// Message shown to the user
    ///
    /// Server-reported messages are surfaced verbatim; everything else maps
    /// to the action's fixed fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Network error: {}", msg),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Server { status, message } => write!(f, "Service error ({}): {}", status, message),
            Self::Status(status) => write!(f, "Service returned status {}", status),
            Self::Malformed(msg) => write!(f, "Malformed response: {}", msg),
            Self::Client(msg) => write!(f, "HTTP client error: {}", msg),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Error shape shared by every endpoint
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Action contract
// ─────────────────────────────────────────────────────────────────────────────

/// One remote operation: where it goes, what it sends, what it reads back
pub trait RemoteAction: Send + Sync + 'static {
    /// JSON request body
    type Request: Serialize + Send;
    /// JSON success body
    type Response: DeserializeOwned;

    /// Verb used in validation messages ("please enter text to <verb>")
    fn verb(&self) -> &'static str;

    /// Message shown when the failure carries no server-provided text
    fn fallback_error(&self) -> &'static str;

    /// Endpoint path relative to the service base URL
    fn endpoint<'a>(&self, endpoints: &'a Endpoints) -> &'a str;

    /// Build the request body from already-trimmed input
    fn request(&self, text: &str) -> Self::Request;

    /// Pull the designated result field out of a success body
    fn extract(response: Self::Response) -> String;
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client bound to one computation service
#[derive(Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    base_url: String,
    endpoints: Endpoints,
}

impl ServiceClient {
    /// Build a client with the configured timeout
    pub fn new(config: &ServiceConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            endpoints: config.endpoints.clone(),
        })
    }

    /// Join an endpoint path onto the base URL
    pub fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Issue exactly one request for `action` with already-trimmed `text`
    pub async fn call<A: RemoteAction>(&self, action: &A, text: &str) -> Result<String, RemoteError> {
        let url = self.url_for(action.endpoint(&self.endpoints));
        tracing::debug!("POST {} ({})", url, action.verb());

        let response = self
            .http
            .post(&url)
            .json(&action.request(text))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            tracing::warn!("{} returned {}", url, status);
            return Err(match message {
                Some(message) => RemoteError::Server {
                    status: status.as_u16(),
                    message,
                },
                None => RemoteError::Status(status.as_u16()),
            });
        }

        match serde_json::from_str::<A::Response>(&body) {
            Ok(parsed) => Ok(A::extract(parsed)),
            Err(e) => {
                // A 2xx can still carry the error shape
                if let Some(message) = serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.error)
                {
                    return Err(RemoteError::Server {
                        status: status.as_u16(),
                        message,
                    });
                }
                tracing::warn!("{} returned an unexpected body: {}", url, e);
                Err(RemoteError::Malformed(e.to_string()))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_server;
    use super::*;

    fn client(base_url: &str) -> ServiceClient {
        ServiceClient::new(&ServiceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 1,
            endpoints: Endpoints::default(),
        })
        .unwrap()
    }

    #[test]
    fn url_join_normalizes_slashes() {
        let c = client("http://localhost:5000/api/");
        assert_eq!(
            c.url_for("/generate_totp"),
            "http://localhost:5000/api/generate_totp"
        );
        let c = client("http://localhost:5000/api");
        assert_eq!(
            c.url_for("generate_totp"),
            "http://localhost:5000/api/generate_totp"
        );
    }

    #[tokio::test]
    async fn totp_success_returns_designated_field() {
        let mock = test_server::spawn().await;
        let c = client(&format!("{}/api", mock.base_url));

        let code = c.call(&GenerateTotp, "JBSWY3DPEHPK3PXP").await.unwrap();
        assert_eq!(code, "123456");
        assert_eq!(mock.hit_count(), 1);
    }

    #[tokio::test]
    async fn server_error_message_is_preserved() {
        let mock = test_server::spawn().await;
        let c = client(&format!("{}/api", mock.base_url));

        let err = c.call(&DecodeBase64, "not-valid-base64!!").await.unwrap_err();
        match &err {
            RemoteError::Server { status, message } => {
                assert_eq!(*status, 400);
                assert_eq!(message, "Invalid base64 string");
            }
            other => panic!("expected server error, got {:?}", other),
        }
        assert_eq!(err.user_message("fallback"), "Invalid base64 string");
    }

    #[tokio::test]
    async fn status_without_error_body_uses_fallback() {
        let mock = test_server::spawn().await;
        let c = client(&format!("{}/broken", mock.base_url));

        let err = c.call(&GenerateTotp, "anything").await.unwrap_err();
        assert!(matches!(err, RemoteError::Status(500)));
        assert_eq!(err.user_message("An error occurred"), "An error occurred");
    }

    #[tokio::test]
    async fn missing_field_is_malformed() {
        let mock = test_server::spawn().await;
        let c = client(&format!("{}/broken", mock.base_url));

        let err = c
            .call(&GenerateHash::new(HashAlgorithm::Md5), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Malformed(_)));
    }

    #[tokio::test]
    async fn success_status_with_error_shape_is_server_error() {
        let mock = test_server::spawn().await;
        let c = client(&format!("{}/broken", mock.base_url));

        let err = c.call(&EncodeBase64, "x").await.unwrap_err();
        assert_eq!(err.user_message("fallback"), "Secret rejected");
    }

    #[tokio::test]
    async fn unreachable_service_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let c = client(&format!("http://{}/api", addr));
        let err = c.call(&GenerateTotp, "JBSWY3DPEHPK3PXP").await.unwrap_err();
        assert!(matches!(err, RemoteError::Transport(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn hung_service_times_out() {
        let mock = test_server::spawn().await;
        let c = client(&format!("{}/slow", mock.base_url));

        let err = c.call(&GenerateTotp, "JBSWY3DPEHPK3PXP").await.unwrap_err();
        assert!(matches!(err, RemoteError::Timeout), "got {:?}", err);
    }
}
