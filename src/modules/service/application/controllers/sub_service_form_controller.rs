use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::auth::application::domain::entities::UserId;
use crate::geocoding::application::domain::entities::AddressSuggestion;
use crate::geocoding::application::services::AddressAutocomplete;
use crate::notification::{Notification, NotificationService};
use crate::service::application::domain::draft::{DraftErrors, DraftField, SubServiceDraft};
use crate::service::application::domain::entities::{PriceBargain, ServiceCategory};
use crate::service::application::ports::incoming::use_cases::{
    CreateSubServiceError, CreateSubServiceUseCase, ListCategoriesUseCase,
};
use crate::shared::media::ImagePolicy;

pub const SERVICE_ADDED_MESSAGE: &str = "Service Added Successfully";

/// The vendor's "new sub-service" form.
pub struct SubServiceFormController {
    user_id: UserId,
    list_categories: Arc<dyn ListCategoriesUseCase>,
    create: Arc<dyn CreateSubServiceUseCase>,
    autocomplete: AddressAutocomplete,
    notifier: NotificationService,
    image_policy: ImagePolicy,
    categories: Vec<ServiceCategory>,
    draft: SubServiceDraft,
    errors: DraftErrors,
}

impl SubServiceFormController {
    pub fn new(
        user_id: UserId,
        list_categories: Arc<dyn ListCategoriesUseCase>,
        create: Arc<dyn CreateSubServiceUseCase>,
        autocomplete: AddressAutocomplete,
        notifier: NotificationService,
    ) -> Self {
        Self {
            user_id,
            list_categories,
            create,
            autocomplete,
            notifier,
            image_policy: ImagePolicy::default(),
            categories: Vec::new(),
            draft: SubServiceDraft::default(),
            errors: DraftErrors::new(),
        }
    }

    pub fn with_image_policy(mut self, policy: ImagePolicy) -> Self {
        self.image_policy = policy;
        self
    }

    pub fn draft(&self) -> &SubServiceDraft {
        &self.draft
    }

    pub fn errors(&self) -> &DraftErrors {
        &self.errors
    }

    pub fn categories(&self) -> &[ServiceCategory] {
        &self.categories
    }

    /// Parent services for the picker. Failures only reach the log.
    pub async fn load_categories(&mut self) {
        match self.list_categories.execute().await {
            Ok(categories) => self.categories = categories,
            Err(e) => warn!(error = %e, "Parent services unavailable"),
        }
    }

    pub fn set_service(&mut self, service_id: Option<i64>) {
        self.draft.service_id = service_id;
        self.errors.remove(&DraftField::ServiceId);
    }

    pub fn set_sub_service_name(&mut self, value: &str) {
        self.draft.sub_service_name = value.to_string();
        self.errors.remove(&DraftField::SubServiceName);
    }

    pub fn set_description(&mut self, value: &str) {
        self.draft.description = value.to_string();
        self.errors.remove(&DraftField::Description);
    }

    pub fn set_price(&mut self, value: &str) {
        self.draft.price = value.to_string();
        self.errors.remove(&DraftField::Price);
    }

    pub fn set_price_bargain(&mut self, bargain: PriceBargain) {
        self.draft.price_bargain = Some(bargain);
        self.errors.remove(&DraftField::PriceBargain);
    }

    pub fn set_city(&mut self, value: &str) {
        self.draft.city = value.to_string();
        self.errors.remove(&DraftField::City);
    }

    pub fn set_active(&mut self, active: bool) {
        self.draft.active_status = active;
    }

    pub fn type_address(&mut self, text: &str) -> Option<JoinHandle<()>> {
        self.draft.address.typed(text);
        self.errors.remove(&DraftField::Address);
        self.autocomplete.input(text)
    }

    pub fn address_suggestions(&self) -> Vec<AddressSuggestion> {
        self.autocomplete.suggestions()
    }

    pub fn select_address(&mut self, index: usize) -> bool {
        let Some(suggestion) = self.autocomplete.select(index) else {
            return false;
        };
        match self.draft.address.select(&suggestion) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, place = %suggestion.display_name, "Suggestion has unusable coordinates");
                false
            }
        }
    }

    pub fn stage_cover_image(&mut self, file_name: &str, bytes: Vec<u8>) -> bool {
        match self.image_policy.stage(file_name, bytes) {
            Ok(image) => {
                self.draft.cover_image = Some(image);
                self.errors.remove(&DraftField::CoverImage);
                true
            }
            Err(rejection) => {
                self.errors
                    .insert(DraftField::CoverImage, rejection.field_message().to_string());
                false
            }
        }
    }

    /// Every outcome produces exactly one notification. Success starts a
    /// fresh draft.
    pub async fn submit(&mut self) -> bool {
        match self.create.execute(self.user_id, &self.draft).await {
            Ok(()) => {
                self.notifier
                    .notify(Notification::success(SERVICE_ADDED_MESSAGE));
                self.draft = SubServiceDraft::default();
                self.errors.clear();
                self.autocomplete.clear();
                true
            }
            Err(e) => {
                if let CreateSubServiceError::Invalid(errors) = &e {
                    self.errors = errors.clone();
                }
                self.notifier.notify(Notification::error(e.to_string()));
                false
            }
        }
    }
}
