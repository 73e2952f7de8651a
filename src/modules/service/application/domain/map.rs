use crate::service::application::domain::entities::SubService;
use crate::shared::geo::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    User,
    Service { sub_service_id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub kind: MarkerKind,
    pub position: Coordinates,
    pub title: String,
    pub subtitle: Option<String>,
}

impl MapMarker {
    pub fn user(position: Coordinates) -> Self {
        Self {
            kind: MarkerKind::User,
            position,
            title: "Your Location".to_string(),
            subtitle: None,
        }
    }

    /// `None` when the service has no usable coordinates.
    pub fn for_service(service: &SubService) -> Option<Self> {
        let position = service.coordinates()?;
        Some(Self {
            kind: MarkerKind::Service {
                sub_service_id: service.id,
            },
            position,
            title: service.sub_service_name.clone(),
            subtitle: Some(service.address_text().to_string()),
        })
    }
}

/// The user marker first, then one marker per locatable service.
pub fn build_markers(user: Coordinates, services: &[SubService]) -> Vec<MapMarker> {
    std::iter::once(MapMarker::user(user))
        .chain(services.iter().filter_map(MapMarker::for_service))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapViewState {
    pub loading: bool,
    pub center: Option<Coordinates>,
    /// User-facing problem, e.g. a location fallback or failed fetch.
    pub error: Option<String>,
    pub services: Vec<SubService>,
    pub markers: Vec<MapMarker>,
    pub selected: Option<SubService>,
}
