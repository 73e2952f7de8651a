use serde_json::json;

use crate::geocoding::application::domain::entities::{AddressSelection, AddressSuggestion};
use crate::profile::ProfileLookup;
use crate::service::application::domain::draft::SubServiceDraft;
use crate::service::application::domain::entities::{PriceBargain, SubService};
use crate::shared::geo::Coordinates;
use crate::shared::media::ImagePolicy;

pub fn lahore_suggestions() -> Vec<AddressSuggestion> {
    vec![
        AddressSuggestion {
            place_id: Some("331".to_string()),
            display_name: "Model Town, Lahore, Punjab, Pakistan".to_string(),
            lat: "31.4834".to_string(),
            lon: "74.3254".to_string(),
        },
        AddressSuggestion {
            place_id: Some("332".to_string()),
            display_name: "Gulberg III, Lahore, Punjab, Pakistan".to_string(),
            lat: "31.5120".to_string(),
            lon: "74.3456".to_string(),
        },
    ]
}

/// Existing vendor profile in the shape the backend sends it.
pub fn vendor_lookup() -> ProfileLookup {
    serde_json::from_value(json!({
        "exists": true,
        "profile": {
            "id": 12,
            "full_name": "Hamza Electric Works",
            "phone_number": "0300 1234567",
            "second_phone_number": "",
            "address": "Johar Town, Lahore, Punjab, Pakistan",
            "latitude": "31.4697",
            "longitude": "74.2728",
            "profile_image": "https://cdn.example.com/vendors/12/logo.png",
            "vendor_portfolios": [
                {
                    "id": 4,
                    "work_experience": "Commercial wiring for two plazas in Johar Town",
                    "work_images": [
                        "https://cdn.example.com/portfolios/4/1.jpg",
                        "https://cdn.example.com/portfolios/4/2.jpg"
                    ]
                }
            ]
        }
    }))
    .unwrap()
}

pub fn customer_lookup() -> ProfileLookup {
    serde_json::from_value(json!({
        "exists": true,
        "profile": {
            "id": 30,
            "full_name": "Sana Malik",
            "phone_number": "0321 7654321",
            "gender": "female",
            "address": "DHA Phase 5, Lahore",
            "latitude": 31.4627,
            "longitude": 74.4085,
            "profile_image": "https://cdn.example.com/customers/21/avatar.jpg"
        }
    }))
    .unwrap()
}

/// A sub-service draft that passes validation.
pub fn complete_draft() -> SubServiceDraft {
    SubServiceDraft {
        service_id: Some(3),
        sub_service_name: "AC gas refill".to_string(),
        description: "Split units up to 2 ton".to_string(),
        price: "3500".to_string(),
        price_bargain: Some(PriceBargain::Fixed),
        city: "Lahore".to_string(),
        address: AddressSelection {
            text: "Gulberg III, Lahore, Punjab, Pakistan".to_string(),
            coordinates: Some(Coordinates::new(31.512, 74.3456)),
        },
        active_status: true,
        cover_image: Some(ImagePolicy::default().stage("ac.jpg", vec![9]).unwrap()),
    }
}

pub fn sub_service(id: i64, latitude: Option<&str>, longitude: Option<&str>) -> SubService {
    serde_json::from_value(json!({
        "id": id,
        "service_name": "Electrician",
        "sub_service_name": format!("Wiring job {id}"),
        "description": "Full house wiring",
        "price": 2500,
        "price_bargain": "negotiable",
        "vendor_profile": { "id": 12, "full_name": "Hamza Electric Works" },
        "address": {
            "city": "Lahore",
            "latitude": latitude,
            "longitude": longitude,
            "address": "Johar Town, Lahore"
        }
    }))
    .unwrap()
}
