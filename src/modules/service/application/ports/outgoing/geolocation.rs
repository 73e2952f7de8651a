use async_trait::async_trait;

use crate::shared::geo::Coordinates;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation not supported.")]
    Unsupported,

    #[error("Unable to get your location. Using default (Lahore).")]
    Denied,
}

/// Source of the device position.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}
