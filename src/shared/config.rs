// src/shared/config.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::shared::geo::Coordinates;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3300/api/v1";
pub const DEFAULT_GEOCODER_URL: &str = "https://api.locationiq.com/v1/autocomplete";
pub const DEFAULT_SESSION_STORE_PATH: &str = ".marketplace/session.json";

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub geocoder_url: String,
    pub geocoder_key: String,
    pub autocomplete_debounce: Duration,
    pub autocomplete_limit: usize,
    pub session_store_path: PathBuf,
    /// Position reported by the headless geolocation adapter, if any.
    pub device_position: Option<Coordinates>,
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// `.env.{RUST_ENV}` is tried first, then `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let env_file = format!(".env.{}", rust_env);
        if dotenvy::from_filename(&env_file).is_err() {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (no env reads). Handy for tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = read("MARKETPLACE_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let geocoder_url = read("LOCATIONIQ_URL").unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string());
        let geocoder_key = read("LOCATIONIQ_KEY").ok_or(ConfigError::Missing("LOCATIONIQ_KEY"))?;

        let debounce_ms = parse_number::<u64>(&read, "AUTOCOMPLETE_DEBOUNCE_MS", 500)?;
        let autocomplete_limit = parse_number::<usize>(&read, "AUTOCOMPLETE_LIMIT", 5)?;
        if autocomplete_limit == 0 {
            return Err(ConfigError::Invalid {
                key: "AUTOCOMPLETE_LIMIT",
                value: "0".to_string(),
            });
        }

        let session_store_path = read("SESSION_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_STORE_PATH));

        let device_position = match (read("DEVICE_LATITUDE"), read("DEVICE_LONGITUDE")) {
            (Some(lat), Some(lon)) => Some(Coordinates::parse(&lat, &lon).map_err(|_| {
                ConfigError::Invalid {
                    key: "DEVICE_LATITUDE/DEVICE_LONGITUDE",
                    value: format!("{lat},{lon}"),
                }
            })?),
            _ => None,
        };

        Ok(Self {
            api_base_url,
            geocoder_url,
            geocoder_key,
            autocomplete_debounce: Duration::from_millis(debounce_ms),
            autocomplete_limit,
            session_store_path,
            device_position,
        })
    }
}

fn parse_number<T>(
    read: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match read(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied_when_only_key_present() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[("LOCATIONIQ_KEY", "pk.test")])).unwrap();

        assert_eq!(cfg.api_base_url, DEFAULT_API_URL);
        assert_eq!(cfg.geocoder_url, DEFAULT_GEOCODER_URL);
        assert_eq!(cfg.autocomplete_debounce, Duration::from_millis(500));
        assert_eq!(cfg.autocomplete_limit, 5);
        assert_eq!(cfg.session_store_path, PathBuf::from(DEFAULT_SESSION_STORE_PATH));
        assert!(cfg.device_position.is_none());
    }

    #[test]
    fn test_missing_geocoder_key_is_an_error() {
        let err = ClientConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("LOCATIONIQ_KEY"));
    }

    #[test]
    fn test_trailing_slash_trimmed_from_api_url() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("LOCATIONIQ_KEY", "k"),
            ("MARKETPLACE_API_URL", "https://api.example.com/v1/"),
        ]))
        .unwrap();

        assert_eq!(cfg.api_base_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_invalid_debounce_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            ("LOCATIONIQ_KEY", "k"),
            ("AUTOCOMPLETE_DEBOUNCE_MS", "soon"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid { key: "AUTOCOMPLETE_DEBOUNCE_MS", .. }
        ));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[
            ("LOCATIONIQ_KEY", "k"),
            ("AUTOCOMPLETE_LIMIT", "0"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: "AUTOCOMPLETE_LIMIT", .. }));
    }

    #[test]
    fn test_device_position_parsed() {
        let cfg = ClientConfig::from_lookup(lookup_from(&[
            ("LOCATIONIQ_KEY", "k"),
            ("DEVICE_LATITUDE", "24.86"),
            ("DEVICE_LONGITUDE", "67.01"),
        ]))
        .unwrap();

        assert_eq!(cfg.device_position, Some(Coordinates::new(24.86, 67.01)));
    }
}
