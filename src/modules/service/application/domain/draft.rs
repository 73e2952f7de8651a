use std::collections::BTreeMap;

use crate::auth::application::domain::entities::UserId;
use crate::geocoding::application::domain::entities::AddressSelection;
use crate::service::application::domain::entities::PriceBargain;
use crate::shared::http::MultipartBody;
use crate::shared::media::StagedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    ServiceId,
    SubServiceName,
    Description,
    Price,
    Address,
    City,
    CoverImage,
    PriceBargain,
}

pub type DraftErrors = BTreeMap<DraftField, String>;

/// A vendor's new sub-service before it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SubServiceDraft {
    pub service_id: Option<i64>,
    pub sub_service_name: String,
    pub description: String,
    pub price: String,
    pub price_bargain: Option<PriceBargain>,
    pub city: String,
    pub address: AddressSelection,
    pub active_status: bool,
    pub cover_image: Option<StagedImage>,
}

impl Default for SubServiceDraft {
    fn default() -> Self {
        Self {
            service_id: None,
            sub_service_name: String::new(),
            description: String::new(),
            price: String::new(),
            price_bargain: None,
            city: String::new(),
            address: AddressSelection::default(),
            active_status: true,
            cover_image: None,
        }
    }
}

impl SubServiceDraft {
    pub fn validate(&self) -> DraftErrors {
        let mut errors = DraftErrors::new();
        let mut fail = |field, message: &str| {
            errors.insert(field, message.to_string());
        };

        if self.service_id.is_none() {
            fail(DraftField::ServiceId, "Please select your Parent Service");
        }
        if self.sub_service_name.trim().is_empty() {
            fail(DraftField::SubServiceName, "Sub-Service Name is required");
        }
        if self.description.trim().is_empty() {
            fail(DraftField::Description, "Description is required");
        }

        let price = self.price.trim();
        if price.is_empty() {
            fail(DraftField::Price, "Price is required");
        } else if !price.parse::<f64>().is_ok_and(|p| p > 0.0) {
            fail(DraftField::Price, "Price must be greater than 0");
        }

        if self.address.text.trim().is_empty() {
            fail(DraftField::Address, "Address is required");
        } else if !self.address.is_resolved() {
            fail(
                DraftField::Address,
                "Please select a valid address from the suggestions",
            );
        }

        if self.city.trim().is_empty() {
            fail(DraftField::City, "City is required");
        }
        if self.cover_image.is_none() {
            fail(DraftField::CoverImage, "Cover image is required");
        }
        if self.price_bargain.is_none() {
            fail(DraftField::PriceBargain, "Price type is required");
        }

        errors
    }

    /// Flat multipart body for `POST /services/sub_services`.
    pub fn to_body(&self, user_id: UserId) -> MultipartBody {
        let mut body = MultipartBody::new();

        if let Some(service_id) = self.service_id {
            body.text("service_id", service_id.to_string());
        }
        body.text("user_id", user_id.to_string());
        body.text("sub_service_name", self.sub_service_name.trim());
        body.text("description", self.description.trim());
        body.text("price", self.price.trim());
        if let Some(bargain) = self.price_bargain {
            body.text("price_bargain", bargain.as_str());
        }
        body.text("city", self.city.trim());
        body.text("address", self.address.text.trim());
        if let Some(coordinates) = self.address.coordinates {
            body.text("latitude", coordinates.latitude_param());
            body.text("longitude", coordinates.longitude_param());
        }
        body.text("active_status", self.active_status.to_string());
        if let Some(cover) = &self.cover_image {
            body.file("cover_image", cover);
        }

        body
    }
}
