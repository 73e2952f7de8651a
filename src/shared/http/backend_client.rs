// src/shared/http/backend_client.rs
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::application::ports::outgoing::session_store::{SessionKey, SessionStore};
use crate::shared::api::backend_error_message;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx answer; `message` is already user-facing.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Thin wrapper over `reqwest::Client` that knows the API base URL and
/// attaches the stored bearer token to every request.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .field("session", &"<dyn SessionStore>")
            .finish()
    }
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, session)
    }

    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Endpoint URL with a query string; empty values are left out.
    pub fn endpoint_with_query(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Url, BackendError> {
        let filtered = params
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (*k, v.as_str()));

        Url::parse_with_params(&self.endpoint(path), filtered)
            .map_err(|e| BackendError::InvalidRequest(e.to_string()))
    }

    pub fn get(&self, url: impl reqwest::IntoUrl) -> RequestBuilder {
        self.authorize(self.http.get(url))
    }

    pub fn post(&self, url: impl reqwest::IntoUrl) -> RequestBuilder {
        self.authorize(self.http.post(url))
    }

    pub fn patch(&self, url: impl reqwest::IntoUrl) -> RequestBuilder {
        self.authorize(self.http.patch(url))
    }

    /// Missing or unreadable tokens send the request anonymously; the
    /// backend decides what an anonymous caller may see.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.get(SessionKey::Token) {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                warn!(error = %e, "Session store unreadable, sending request without token");
                request
            }
        }
    }

    /// Send and read the body as JSON. Non-2xx statuses become `Rejected`.
    pub async fn send_json(&self, request: RequestBuilder) -> Result<Value, BackendError> {
        self.send_json_accepting(request, &[]).await
    }

    /// Like `send_json`, but also reads the body for the listed statuses.
    /// The sub-service detail endpoint answers `302 Found` with the record.
    pub async fn send_json_accepting(
        &self,
        request: RequestBuilder,
        also_ok: &[u16],
    ) -> Result<Value, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        let accepted = status.is_success() || also_ok.contains(&status.as_u16());
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(v) => v,
                Err(e) if accepted => return Err(BackendError::Decode(e.to_string())),
                Err(_) => Value::Null,
            }
        };

        debug!(status = status.as_u16(), "Backend responded");

        if accepted {
            return Ok(body);
        }

        let message = backend_error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
        });

        Err(BackendError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, BackendError> {
        serde_json::from_value(value).map_err(|e| BackendError::Decode(e.to_string()))
    }
}
