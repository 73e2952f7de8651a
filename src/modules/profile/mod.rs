pub mod adapter;
pub mod application;

pub use application::domain::entities::{ProfileKind, ProfileLookup, ProfileRecord};
pub use application::domain::form::{FormMode, PortfolioEntry, ProfileForm, ProfileImage};
pub use application::services::{ProfileFormController, UserProfileContext};
