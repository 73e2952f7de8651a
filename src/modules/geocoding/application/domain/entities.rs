use serde::{Deserialize, Serialize};

use crate::shared::geo::{CoordinateError, Coordinates};

/// One autocomplete hit. Coordinates stay textual until the user picks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    #[serde(default)]
    pub place_id: Option<String>,
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl AddressSuggestion {
    pub fn coordinates(&self) -> Result<Coordinates, CoordinateError> {
        Coordinates::parse(&self.lat, &self.lon)
    }
}

/// Address text plus the coordinates fixed by selecting a suggestion.
///
/// Typing resets `coordinates`; only `select` sets them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressSelection {
    pub text: String,
    pub coordinates: Option<Coordinates>,
}

impl AddressSelection {
    pub fn typed(&mut self, text: &str) {
        self.text = text.to_string();
        self.coordinates = None;
    }

    pub fn select(&mut self, suggestion: &AddressSuggestion) -> Result<(), CoordinateError> {
        let coordinates = suggestion.coordinates()?;
        self.text = suggestion.display_name.clone();
        self.coordinates = Some(coordinates);
        Ok(())
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion() -> AddressSuggestion {
        AddressSuggestion {
            place_id: Some("321".to_string()),
            display_name: "Gulberg III, Lahore, Punjab, Pakistan".to_string(),
            lat: "31.5120".to_string(),
            lon: "74.3456".to_string(),
        }
    }

    #[test]
    fn test_select_fixes_text_and_coordinates() {
        let mut sel = AddressSelection::default();
        sel.typed("Gulb");
        assert!(!sel.is_resolved());

        sel.select(&suggestion()).unwrap();

        assert_eq!(sel.text, "Gulberg III, Lahore, Punjab, Pakistan");
        assert_eq!(sel.coordinates, Some(Coordinates::new(31.5120, 74.3456)));
    }

    #[test]
    fn test_typing_after_select_unresolves() {
        let mut sel = AddressSelection::default();
        sel.select(&suggestion()).unwrap();

        sel.typed("Gulberg III, Lahore, Punjab, Pakistan!");

        assert!(!sel.is_resolved());
    }

    #[test]
    fn test_select_with_bad_coordinates_leaves_state() {
        let mut sel = AddressSelection::default();
        sel.typed("Somewhere");
        let mut bad = suggestion();
        bad.lat = "north".to_string();

        assert!(sel.select(&bad).is_err());
        assert_eq!(sel.text, "Somewhere");
        assert!(!sel.is_resolved());
    }
}
