use async_trait::async_trait;

use crate::geocoding::application::domain::entities::AddressSuggestion;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum GeocodingError {
    #[error("Geocoder unreachable: {0}")]
    Network(String),

    #[error("Geocoder rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid geocoder response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    async fn autocomplete(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, GeocodingError>;
}
