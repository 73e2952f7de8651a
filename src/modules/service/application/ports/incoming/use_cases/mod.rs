mod browse_sub_services;
mod create_sub_service;
mod get_sub_service;
mod list_categories;

pub use browse_sub_services::{BrowseSubServicesError, BrowseSubServicesUseCase, SubServiceListing};
pub use create_sub_service::{CreateSubServiceError, CreateSubServiceUseCase};
pub use get_sub_service::{GetSubServiceError, GetSubServiceUseCase};
pub use list_categories::{ListCategoriesError, ListCategoriesUseCase};
