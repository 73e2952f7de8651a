use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::auth::application::domain::entities::UserRole;
use crate::shared::geo::{de_loose_coordinate, Coordinates};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Customer,
    Vendor,
}

impl ProfileKind {
    /// Collection path under the API base URL.
    pub fn resource_path(&self) -> &'static str {
        match self {
            ProfileKind::Customer => "customer/customer_profiles",
            ProfileKind::Vendor => "vendor/vendor_profiles",
        }
    }

    /// Prefix of every multipart field name, e.g. `vendor_profile[full_name]`.
    pub fn form_scope(&self) -> &'static str {
        match self {
            ProfileKind::Customer => "customer_profile",
            ProfileKind::Vendor => "vendor_profile",
        }
    }

    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Customer => ProfileKind::Customer,
            UserRole::Vendor => ProfileKind::Vendor,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Customer => write!(f, "customer"),
            ProfileKind::Vendor => write!(f, "vendor"),
        }
    }
}

/// Ids show up as numbers or strings depending on the endpoint.
fn de_loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    de_loose_coordinate(deserializer)
}

fn de_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `GET /{resource}/{user_id}` answer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileLookup {
    #[serde(default)]
    pub exists: bool,
    #[serde(default)]
    pub profile: Option<ProfileRecord>,
}

impl ProfileLookup {
    pub fn existing(&self) -> Option<&ProfileRecord> {
        if self.exists {
            self.profile.as_ref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "de_loose_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub second_phone_number: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de_loose_coordinate")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "de_loose_coordinate")]
    pub longitude: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(
        default,
        alias = "vendor_portfolio",
        deserialize_with = "de_null_as_empty"
    )]
    pub vendor_portfolios: Vec<PortfolioRecord>,
}

impl ProfileRecord {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (&self.latitude, &self.longitude) {
            (Some(lat), Some(lon)) => Coordinates::parse(lat, lon).ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PortfolioRecord {
    #[serde(default, deserialize_with = "de_loose_id")]
    pub id: Option<String>,
    #[serde(default, alias = "workExperience")]
    pub work_experience: Option<String>,
    #[serde(default, alias = "images", deserialize_with = "de_null_as_empty")]
    pub work_images: Vec<String>,
}
