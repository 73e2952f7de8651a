use async_trait::async_trait;

use crate::service::application::domain::entities::SubService;
use crate::service::application::domain::filters::SubServiceQuery;
use crate::service::application::ports::outgoing::ServiceCatalogError;

//
// ──────────────────────────────────────────────────────────
// Result
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubServiceListing {
    pub items: Vec<SubService>,
    pub total: u64,
    /// Page that was asked for; 1 when the query was unpaged.
    pub page: u32,
    pub page_count: u32,
}

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BrowseSubServicesError {
    /// Carries the backend's message when there is one.
    #[error("{0}")]
    Unavailable(String),
}

impl From<ServiceCatalogError> for BrowseSubServicesError {
    fn from(err: ServiceCatalogError) -> Self {
        BrowseSubServicesError::Unavailable(err.to_string())
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port (Use Case)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait BrowseSubServicesUseCase: Send + Sync {
    async fn execute(&self, query: SubServiceQuery) -> Result<SubServiceListing, BrowseSubServicesError>;
}
