use async_trait::async_trait;

use crate::service::application::domain::entities::{ServiceCategory, SubService, SubServicePage};
use crate::service::application::domain::filters::SubServiceQuery;
use crate::shared::http::MultipartBody;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ServiceCatalogError {
    #[error("Sub-service not found")]
    NotFound,

    /// Backend refusal with its own message.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, ServiceCatalogError>;

    async fn list_sub_services(
        &self,
        query: &SubServiceQuery,
    ) -> Result<SubServicePage, ServiceCatalogError>;

    async fn get_sub_service(&self, id: i64) -> Result<SubService, ServiceCatalogError>;

    async fn create_sub_service(&self, body: MultipartBody) -> Result<(), ServiceCatalogError>;
}
