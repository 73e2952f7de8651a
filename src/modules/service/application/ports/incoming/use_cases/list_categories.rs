use async_trait::async_trait;

use crate::service::application::domain::entities::ServiceCategory;
use crate::service::application::ports::outgoing::ServiceCatalogError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListCategoriesError {
    #[error("{0}")]
    Unavailable(String),
}

impl From<ServiceCatalogError> for ListCategoriesError {
    fn from(err: ServiceCatalogError) -> Self {
        ListCategoriesError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait ListCategoriesUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<ServiceCategory>, ListCategoriesError>;
}
