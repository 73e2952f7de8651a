use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::application::domain::entities::UserId;
use crate::service::application::domain::draft::SubServiceDraft;
use crate::service::application::ports::incoming::use_cases::{
    CreateSubServiceError, CreateSubServiceUseCase,
};
use crate::service::application::ports::outgoing::ServiceCatalog;

#[derive(Clone)]
pub struct CreateSubServiceService {
    catalog: Arc<dyn ServiceCatalog>,
}

impl CreateSubServiceService {
    pub fn new(catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CreateSubServiceUseCase for CreateSubServiceService {
    async fn execute(
        &self,
        user_id: UserId,
        draft: &SubServiceDraft,
    ) -> Result<(), CreateSubServiceError> {
        let errors = draft.validate();
        if !errors.is_empty() {
            warn!(user_id = %user_id, invalid = errors.len(), "Sub-service draft rejected locally");
            return Err(CreateSubServiceError::Invalid(errors));
        }

        self.catalog
            .create_sub_service(draft.to_body(user_id))
            .await
            .map_err(CreateSubServiceError::from)?;

        info!(user_id = %user_id, name = %draft.sub_service_name.trim(), "Sub-service created");
        Ok(())
    }
}
