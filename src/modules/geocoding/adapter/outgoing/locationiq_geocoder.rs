use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use crate::geocoding::application::domain::entities::AddressSuggestion;
use crate::geocoding::application::ports::outgoing::geocoding_provider::{
    GeocodingError, GeocodingProvider,
};

/// LocationIQ answers "no match" with 404 and this body.
const NO_MATCH_ERROR: &str = "Unable to geocode";

/// Keyed LocationIQ autocomplete client.
#[derive(Clone)]
pub struct LocationIqGeocoder {
    http: reqwest::Client,
    endpoint: String,
    key: String,
}

impl fmt::Debug for LocationIqGeocoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationIqGeocoder")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl LocationIqGeocoder {
    pub fn new(endpoint: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            key: key.into(),
        }
    }

    fn request_url(&self, query: &str, limit: usize) -> Result<Url, GeocodingError> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("key", self.key.as_str()),
                ("q", query),
                ("limit", &limit.to_string()),
            ],
        )
        .map_err(|e| GeocodingError::InvalidResponse(format!("bad endpoint: {e}")))
    }
}

/// Anything other than an array means "no suggestions". Malformed entries
/// are skipped rather than failing the whole list.
pub(crate) fn parse_suggestions(body: Value) -> Vec<AddressSuggestion> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<AddressSuggestion>(item) {
                Ok(s) => Some(s),
                Err(e) => {
                    debug!(error = %e, "Skipping malformed suggestion");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl GeocodingProvider for LocationIqGeocoder {
    async fn autocomplete(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, GeocodingError> {
        let url = self.request_url(query, limit)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GeocodingError::Network(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            if status.as_u16() == 404 && message == NO_MATCH_ERROR {
                return Ok(Vec::new());
            }

            warn!(status = status.as_u16(), error = %message, "Geocoder rejected query");
            return Err(GeocodingError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(parse_suggestions(body))
    }
}
