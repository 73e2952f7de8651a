pub mod modules;
pub mod shared;

pub use modules::{auth, geocoding, notification, profile, service};

#[cfg(test)]
mod tests;
