use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::service::application::domain::filters::SubServiceQuery;
use crate::service::application::ports::incoming::use_cases::{
    BrowseSubServicesError, BrowseSubServicesUseCase, SubServiceListing,
};
use crate::service::application::ports::outgoing::ServiceCatalog;

#[derive(Clone)]
pub struct BrowseSubServicesService {
    catalog: Arc<dyn ServiceCatalog>,
}

impl BrowseSubServicesService {
    pub fn new(catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl BrowseSubServicesUseCase for BrowseSubServicesService {
    async fn execute(
        &self,
        query: SubServiceQuery,
    ) -> Result<SubServiceListing, BrowseSubServicesError> {
        let result = self
            .catalog
            .list_sub_services(&query)
            .await
            .map_err(BrowseSubServicesError::from)?;

        // Unpaged queries (the map) return everything on a single page.
        let (page, page_count) = match query.page {
            Some(request) => (request.page, result.page_count(request.per_page)),
            None => (1, 1),
        };

        debug!(
            returned = result.sub_services.len(),
            total = result.total(),
            page,
            "Sub-services fetched"
        );

        Ok(SubServiceListing {
            total: result.total(),
            items: result.sub_services,
            page,
            page_count,
        })
    }
}
