use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::profile::application::domain::entities::ProfileKind;
use crate::profile::application::domain::form::ProfileForm;

const PHONE_PATTERN: &str = r"^\+?[\d\s\-()]+$";
const MIN_PHONE_DIGITS: usize = 10;
const MIN_NAME_CHARS: usize = 2;
const MIN_ADDRESS_CHARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FullName,
    PhoneNumber,
    SecondPhoneNumber,
    Address,
    ProfileImage,
    PortfolioExperience(usize),
    PortfolioImages(usize),
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::FullName => write!(f, "full_name"),
            FormField::PhoneNumber => write!(f, "phone_number"),
            FormField::SecondPhoneNumber => write!(f, "second_phone_number"),
            FormField::Address => write!(f, "address"),
            FormField::ProfileImage => write!(f, "profile_image"),
            FormField::PortfolioExperience(i) => write!(f, "vendor_portfolios[{i}].work_experience"),
            FormField::PortfolioImages(i) => write!(f, "vendor_portfolios[{i}].work_images"),
        }
    }
}

/// One message per field, ordered for stable display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&FormField) -> bool) {
        self.0.retain(|field, _| keep(field));
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FormField, &String)> {
        self.0.iter()
    }
}

fn phone_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(PHONE_PATTERN).ok()).as_ref()
}

/// `None` when the number is acceptable.
pub fn phone_error(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Phone number is required");
    }
    if !phone_pattern().is_some_and(|re| re.is_match(value)) {
        return Some("Please enter a valid phone number");
    }
    if value.chars().filter(char::is_ascii_digit).count() < MIN_PHONE_DIGITS {
        return Some("Phone number must be at least 10 digits");
    }
    None
}

pub fn validate_profile(kind: ProfileKind, form: &ProfileForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name = form.full_name.trim();
    if name.is_empty() {
        errors.set(FormField::FullName, "Full name is required");
    } else if name.chars().count() < MIN_NAME_CHARS {
        errors.set(FormField::FullName, "Full name must be at least 2 characters");
    }

    if !form.profile_image.is_present() {
        errors.set(FormField::ProfileImage, "Profile image is required");
    }

    if let Some(message) = phone_error(&form.phone_number) {
        errors.set(FormField::PhoneNumber, message);
    }

    let address = form.address.text.trim();
    if address.is_empty() {
        errors.set(FormField::Address, "Address is required");
    } else if address.chars().count() < MIN_ADDRESS_CHARS {
        errors.set(FormField::Address, "Please enter a complete address");
    } else if !form.address.is_resolved() {
        errors.set(
            FormField::Address,
            "Please select a valid address from the suggestions",
        );
    }

    if kind == ProfileKind::Vendor {
        if !form.second_phone_number.trim().is_empty() {
            if let Some(message) = phone_error(&form.second_phone_number) {
                errors.set(FormField::SecondPhoneNumber, message);
            }
        }

        for (i, entry) in form.portfolios.iter().enumerate() {
            if entry.experience.trim().is_empty() {
                errors.set(FormField::PortfolioExperience(i), "Work experience is required");
            }
            if entry.image_count() == 0 {
                errors.set(FormField::PortfolioImages(i), "Add at least one work image");
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::application::domain::entities::AddressSelection;
    use crate::profile::application::domain::form::{PortfolioEntry, ProfileImage};
    use crate::shared::geo::Coordinates;

    fn valid_form() -> ProfileForm {
        ProfileForm {
            full_name: "Ali Raza".to_string(),
            phone_number: "+92 300 1234567".to_string(),
            address: AddressSelection {
                text: "Model Town, Lahore".to_string(),
                coordinates: Some(Coordinates::new(31.48, 74.32)),
            },
            profile_image: ProfileImage::Persisted("https://cdn/me.jpg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate_profile(ProfileKind::Vendor, &valid_form()).is_empty());
    }

    #[test]
    fn test_empty_form_flags_every_required_field() {
        let errors = validate_profile(ProfileKind::Customer, &ProfileForm::default());

        assert_eq!(errors.get(FormField::FullName), Some("Full name is required"));
        assert_eq!(errors.get(FormField::PhoneNumber), Some("Phone number is required"));
        assert_eq!(errors.get(FormField::Address), Some("Address is required"));
        assert_eq!(errors.get(FormField::ProfileImage), Some("Profile image is required"));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_phone_rules() {
        assert_eq!(phone_error("0300-12ab"), Some("Please enter a valid phone number"));
        assert_eq!(phone_error("0300 123"), Some("Phone number must be at least 10 digits"));
        assert_eq!(phone_error("(042) 3575-1234"), None);
    }

    #[test]
    fn test_typed_address_without_selection_is_invalid() {
        let mut form = valid_form();
        form.address.typed("Model Town, Lahore");

        let errors = validate_profile(ProfileKind::Customer, &form);

        assert_eq!(
            errors.get(FormField::Address),
            Some("Please select a valid address from the suggestions")
        );
    }

    #[test]
    fn test_short_address_and_name() {
        let mut form = valid_form();
        form.full_name = "A".to_string();
        form.address.typed("DHA");

        let errors = validate_profile(ProfileKind::Customer, &form);

        assert_eq!(
            errors.get(FormField::FullName),
            Some("Full name must be at least 2 characters")
        );
        assert_eq!(errors.get(FormField::Address), Some("Please enter a complete address"));
    }

    #[test]
    fn test_second_phone_optional_but_checked() {
        let mut form = valid_form();
        assert!(validate_profile(ProfileKind::Vendor, &form).is_empty());

        form.second_phone_number = "12".to_string();
        let errors = validate_profile(ProfileKind::Vendor, &form);

        assert_eq!(
            errors.get(FormField::SecondPhoneNumber),
            Some("Phone number must be at least 10 digits")
        );
    }

    #[test]
    fn test_portfolio_entries_need_text_and_image() {
        let mut form = valid_form();
        form.portfolios.push(PortfolioEntry::default());

        let errors = validate_profile(ProfileKind::Vendor, &form);

        assert!(errors.get(FormField::PortfolioExperience(0)).is_some());
        assert!(errors.get(FormField::PortfolioImages(0)).is_some());
    }

    #[test]
    fn test_customer_ignores_portfolio_rules() {
        let mut form = valid_form();
        form.portfolios.push(PortfolioEntry::default());

        assert!(validate_profile(ProfileKind::Customer, &form).is_empty());
    }
}
