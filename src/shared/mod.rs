pub mod api;
pub mod config;
pub mod geo;
pub mod http;
pub mod media;
