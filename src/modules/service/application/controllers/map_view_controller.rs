use std::sync::Arc;

use tracing::{info, warn};

use crate::service::application::domain::entities::SubService;
use crate::service::application::domain::filters::{ServiceFilters, SubServiceQuery};
use crate::service::application::domain::map::{build_markers, MapMarker, MapViewState, MarkerKind};
use crate::service::application::ports::incoming::use_cases::BrowseSubServicesUseCase;
use crate::service::application::ports::outgoing::GeolocationProvider;
use crate::shared::geo::Coordinates;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch services.";

/// Nearby services around the device position.
pub struct MapViewController {
    geolocation: Arc<dyn GeolocationProvider>,
    browse: Arc<dyn BrowseSubServicesUseCase>,
    filters: ServiceFilters,
    state: MapViewState,
}

impl MapViewController {
    pub fn new(
        geolocation: Arc<dyn GeolocationProvider>,
        browse: Arc<dyn BrowseSubServicesUseCase>,
    ) -> Self {
        Self {
            geolocation,
            browse,
            filters: ServiceFilters::default(),
            state: MapViewState::default(),
        }
    }

    pub fn state(&self) -> &MapViewState {
        &self.state
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.state.markers
    }

    pub fn filters(&self) -> &ServiceFilters {
        &self.filters
    }

    /// Takes effect on the next `load`.
    pub fn set_filters(&mut self, filters: ServiceFilters) {
        self.filters = filters;
    }

    /// Locate the device, then fetch services near it. When the position is
    /// unavailable the map centres on the default location and nothing is
    /// fetched.
    pub async fn load(&mut self) {
        self.state.loading = true;
        self.state.error = None;
        self.state.selected = None;

        let center = match self.geolocation.current_position().await {
            Ok(position) => position,
            Err(e) => {
                warn!(error = %e, "Device position unavailable, using default location");
                self.state.center = Some(Coordinates::DEFAULT_LOCATION);
                self.state.error = Some(e.to_string());
                self.state.services.clear();
                self.state.markers = vec![MapMarker::user(Coordinates::DEFAULT_LOCATION)];
                self.state.loading = false;
                return;
            }
        };
        self.state.center = Some(center);

        let query = SubServiceQuery {
            filters: self.filters.clone(),
            near: Some(center),
            page: None,
        };

        match self.browse.execute(query).await {
            Ok(listing) => {
                self.state.markers = build_markers(center, &listing.items);
                self.state.services = listing.items;
                info!(
                    services = self.state.services.len(),
                    markers = self.state.markers.len(),
                    "Map loaded"
                );
            }
            Err(e) => {
                warn!(error = %e, "Fetching nearby services failed");
                self.state.error = Some(FETCH_FAILED_MESSAGE.to_string());
                self.state.services.clear();
                self.state.markers = vec![MapMarker::user(center)];
            }
        }

        self.state.loading = false;
    }

    /// The user marker selects nothing.
    pub fn select_marker(&mut self, index: usize) -> bool {
        match self.state.markers.get(index).map(|m| m.kind) {
            Some(MarkerKind::Service { sub_service_id }) => self.select_service(sub_service_id),
            _ => false,
        }
    }

    /// Sidebar selection.
    pub fn select_service(&mut self, id: i64) -> bool {
        let found = self.state.services.iter().find(|s| s.id == id).cloned();
        let selected = found.is_some();
        self.state.selected = found;
        selected
    }

    pub fn selected(&self) -> Option<&SubService> {
        self.state.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.state.selected = None;
    }
}
