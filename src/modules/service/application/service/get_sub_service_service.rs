use async_trait::async_trait;
use std::sync::Arc;

use crate::service::application::domain::entities::SubService;
use crate::service::application::ports::incoming::use_cases::{
    GetSubServiceError, GetSubServiceUseCase,
};
use crate::service::application::ports::outgoing::ServiceCatalog;

#[derive(Clone)]
pub struct GetSubServiceService {
    catalog: Arc<dyn ServiceCatalog>,
}

impl GetSubServiceService {
    pub fn new(catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl GetSubServiceUseCase for GetSubServiceService {
    async fn execute(&self, id: i64) -> Result<SubService, GetSubServiceError> {
        self.catalog
            .get_sub_service(id)
            .await
            .map_err(GetSubServiceError::from)
    }
}
