pub mod geolocation;
pub mod service_catalog;

pub use geolocation::{GeolocationError, GeolocationProvider};
pub use service_catalog::{ServiceCatalog, ServiceCatalogError};
