use async_trait::async_trait;

use crate::service::application::ports::outgoing::{GeolocationError, GeolocationProvider};
use crate::shared::geo::Coordinates;

/// Device position taken from configuration. Without one, geolocation is
/// reported as unsupported and callers fall back to the default location.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfiguredGeolocation {
    position: Option<Coordinates>,
}

impl ConfiguredGeolocation {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeolocationProvider for ConfiguredGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.position.ok_or(GeolocationError::Unsupported)
    }
}
