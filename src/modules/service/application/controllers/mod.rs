pub mod map_view_controller;
pub mod service_browser_controller;
pub mod sub_service_form_controller;

pub use map_view_controller::MapViewController;
pub use service_browser_controller::ServiceBrowserController;
pub use sub_service_form_controller::SubServiceFormController;
