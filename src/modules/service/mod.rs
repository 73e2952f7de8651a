pub mod adapter;
pub mod application;

pub use application::controllers::{MapViewController, ServiceBrowserController, SubServiceFormController};
pub use application::domain::entities::{ServiceCategory, SubService};
