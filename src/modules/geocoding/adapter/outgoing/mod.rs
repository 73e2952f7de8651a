pub mod locationiq_geocoder;

pub use locationiq_geocoder::LocationIqGeocoder;
