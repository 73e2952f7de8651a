use async_trait::async_trait;

use crate::service::application::domain::entities::SubService;
use crate::service::application::ports::outgoing::ServiceCatalogError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GetSubServiceError {
    #[error("Service not found")]
    NotFound,

    #[error("{0}")]
    Unavailable(String),
}

impl From<ServiceCatalogError> for GetSubServiceError {
    fn from(err: ServiceCatalogError) -> Self {
        match err {
            ServiceCatalogError::NotFound => GetSubServiceError::NotFound,
            other => GetSubServiceError::Unavailable(other.to_string()),
        }
    }
}

#[async_trait]
pub trait GetSubServiceUseCase: Send + Sync {
    async fn execute(&self, id: i64) -> Result<SubService, GetSubServiceError>;
}
