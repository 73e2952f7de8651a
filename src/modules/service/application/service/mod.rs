mod browse_sub_services_service;
mod create_sub_service_service;
mod get_sub_service_service;
mod list_categories_service;

pub use browse_sub_services_service::BrowseSubServicesService;
pub use create_sub_service_service::CreateSubServiceService;
pub use get_sub_service_service::GetSubServiceService;
pub use list_categories_service::ListCategoriesService;
