use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::service::application::domain::draft::{DraftErrors, SubServiceDraft};
use crate::service::application::ports::outgoing::ServiceCatalogError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateSubServiceError {
    #[error("Please fill all required fields correctly")]
    Invalid(DraftErrors),

    #[error("{0}")]
    Rejected(String),

    #[error("Network error. Please try again.")]
    Unavailable(String),
}

impl From<ServiceCatalogError> for CreateSubServiceError {
    fn from(err: ServiceCatalogError) -> Self {
        match err {
            ServiceCatalogError::Rejected(msg) if !msg.trim().is_empty() => {
                CreateSubServiceError::Rejected(msg)
            }
            ServiceCatalogError::Rejected(_) | ServiceCatalogError::NotFound => {
                CreateSubServiceError::Rejected("Failed to create service".to_string())
            }
            ServiceCatalogError::Network(msg) | ServiceCatalogError::InvalidResponse(msg) => {
                CreateSubServiceError::Unavailable(msg)
            }
        }
    }
}

#[async_trait]
pub trait CreateSubServiceUseCase: Send + Sync {
    /// Validates first; an invalid draft never reaches the backend.
    async fn execute(&self, user_id: UserId, draft: &SubServiceDraft) -> Result<(), CreateSubServiceError>;
}
