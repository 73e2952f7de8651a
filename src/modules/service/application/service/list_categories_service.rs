use async_trait::async_trait;
use std::sync::Arc;

use crate::service::application::domain::entities::ServiceCategory;
use crate::service::application::ports::incoming::use_cases::{
    ListCategoriesError, ListCategoriesUseCase,
};
use crate::service::application::ports::outgoing::ServiceCatalog;

#[derive(Clone)]
pub struct ListCategoriesService {
    catalog: Arc<dyn ServiceCatalog>,
}

impl ListCategoriesService {
    pub fn new(catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ListCategoriesUseCase for ListCategoriesService {
    async fn execute(&self) -> Result<Vec<ServiceCategory>, ListCategoriesError> {
        self.catalog
            .list_categories()
            .await
            .map_err(ListCategoriesError::from)
    }
}
