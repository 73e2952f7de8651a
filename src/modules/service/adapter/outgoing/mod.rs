pub mod configured_geolocation;
pub mod service_catalog_http;

pub use configured_geolocation::ConfiguredGeolocation;
pub use service_catalog_http::HttpServiceCatalog;
