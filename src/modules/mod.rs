pub mod auth;
pub mod geocoding;
pub mod notification;
pub mod profile;
pub mod service;
