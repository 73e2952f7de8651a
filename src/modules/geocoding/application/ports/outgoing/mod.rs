pub mod geocoding_provider;

pub use geocoding_provider::{GeocodingError, GeocodingProvider};
