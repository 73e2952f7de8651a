use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::shared::geo::{de_loose_coordinate, Coordinates};

/// Accepts `1500`, `1500.0`, `"1500"` or null.
fn de_loose_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_loose_coordinate(deserializer)?.and_then(|raw| raw.trim().parse::<f64>().ok()))
}

fn de_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: i64,
    pub service_name: String,
    #[serde(default)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceBargain {
    Fixed,
    Negotiable,
}

impl PriceBargain {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBargain::Fixed => "fixed",
            PriceBargain::Negotiable => "negotiable",
        }
    }
}

impl fmt::Display for PriceBargain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VendorSummary {
    pub id: i64,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceAddress {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "de_loose_coordinate")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "de_loose_coordinate")]
    pub longitude: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ServiceAddress {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (&self.latitude, &self.longitude) {
            (Some(lat), Some(lon)) => Coordinates::parse(lat, lon).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubService {
    pub id: i64,
    #[serde(default)]
    pub service_name: String,
    pub sub_service_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "de_loose_price")]
    pub price: Option<f64>,
    /// Free text on the wire; normally "fixed" or "negotiable".
    #[serde(default)]
    pub price_bargain: Option<String>,
    #[serde(default)]
    pub active_status: Option<bool>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub vendor_profile: Option<VendorSummary>,
    #[serde(default)]
    pub address: Option<ServiceAddress>,
}

impl SubService {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.address.as_ref().and_then(ServiceAddress::coordinates)
    }

    pub fn address_text(&self) -> &str {
        self.address
            .as_ref()
            .and_then(|a| a.address.as_deref())
            .filter(|a| !a.trim().is_empty())
            .unwrap_or("Address not available")
    }

    pub fn is_active(&self) -> bool {
        self.active_status.unwrap_or(true)
    }
}

/// One page of `GET /services/sub_services`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubServicePage {
    #[serde(default, deserialize_with = "de_null_as_empty")]
    pub sub_services: Vec<SubService>,
    #[serde(default)]
    pub total_sub_services: Option<u64>,
}

impl SubServicePage {
    pub fn total(&self) -> u64 {
        self.total_sub_services.unwrap_or(0)
    }

    /// Never less than one, so an empty result still has a page to show.
    pub fn page_count(&self, per_page: u32) -> u32 {
        let per_page = u64::from(per_page.max(1));
        let pages = self.total().div_ceil(per_page);
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }
}
