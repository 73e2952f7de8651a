// src/shared/geo.rs
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A resolved latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    #[error("Invalid latitude: {0}")]
    InvalidLatitude(String),

    #[error("Invalid longitude: {0}")]
    InvalidLongitude(String),
}

impl Coordinates {
    /// Lahore, used whenever the device position is unavailable.
    pub const DEFAULT_LOCATION: Coordinates = Coordinates {
        latitude: 31.5204,
        longitude: 74.3587,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parses the string pair geocoders and the backend hand out.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, CoordinateError> {
        let lat = latitude
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| (-90.0..=90.0).contains(v))
            .ok_or_else(|| CoordinateError::InvalidLatitude(latitude.to_string()))?;

        let lon = longitude
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| (-180.0..=180.0).contains(v))
            .ok_or_else(|| CoordinateError::InvalidLongitude(longitude.to_string()))?;

        Ok(Self::new(lat, lon))
    }

    pub fn latitude_param(&self) -> String {
        self.latitude.to_string()
    }

    pub fn longitude_param(&self) -> String {
        self.longitude.to_string()
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Accepts `"31.52"`, `31.52`, `""` or `null` and yields the textual form.
///
/// The backend is inconsistent about coordinate types, so payload structs
/// keep the raw text and parse on demand.
pub fn de_loose_coordinate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "de_loose_coordinate")]
        lat: Option<String>,
    }

    #[test]
    fn test_parse_valid_pair() {
        let c = Coordinates::parse("31.5204", " 74.3587 ").unwrap();
        assert_eq!(c, Coordinates::new(31.5204, 74.3587));
    }

    #[test]
    fn test_parse_rejects_out_of_range_latitude() {
        let err = Coordinates::parse("95.0", "10.0").unwrap_err();
        assert_eq!(err, CoordinateError::InvalidLatitude("95.0".to_string()));
    }

    #[test]
    fn test_parse_rejects_garbage_longitude() {
        let err = Coordinates::parse("10.0", "east").unwrap_err();
        assert_eq!(err, CoordinateError::InvalidLongitude("east".to_string()));
    }

    #[test]
    fn test_loose_coordinate_accepts_strings_and_numbers() {
        let s: Probe = serde_json::from_str(r#"{"lat":"31.5"}"#).unwrap();
        let n: Probe = serde_json::from_str(r#"{"lat":31.5}"#).unwrap();
        let empty: Probe = serde_json::from_str(r#"{"lat":""}"#).unwrap();
        let missing: Probe = serde_json::from_str(r#"{}"#).unwrap();

        assert_eq!(s.lat.as_deref(), Some("31.5"));
        assert_eq!(n.lat.as_deref(), Some("31.5"));
        assert_eq!(empty.lat, None);
        assert_eq!(missing.lat, None);
    }
}
