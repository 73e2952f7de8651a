use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::auth::application::domain::entities::UserId;
use crate::geocoding::application::domain::entities::AddressSuggestion;
use crate::geocoding::application::services::AddressAutocomplete;
use crate::notification::{Notification, NotificationService};
use crate::profile::application::domain::entities::ProfileKind;
use crate::profile::application::domain::form::{
    FormMode, PortfolioEntry, ProfileForm, ProfileImage,
};
use crate::profile::application::domain::submission::{build_profile_body, SubmitTarget};
use crate::profile::application::domain::validation::{validate_profile, FieldErrors, FormField};
use crate::profile::application::ports::outgoing::profile_api::ProfileApi;
use crate::shared::media::ImagePolicy;

pub const INCOMPLETE_FORM_MESSAGE: &str = "All fields are required before submitting";
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully";

/// Read-only rendering of a saved profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub full_name: String,
    pub phone_number: String,
    pub second_phone_number: Option<String>,
    pub gender: Option<String>,
    pub address: String,
    pub coordinates: Option<String>,
    pub image: Option<String>,
    pub portfolios: Vec<PortfolioView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioView {
    pub experience: String,
    pub images: Vec<String>,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// State machine behind the customer and vendor profile screens.
///
/// `Loading` becomes `Creating` or `Viewing` after `load`; `Viewing` and
/// `Editing` toggle through `start_editing`, `cancel_editing` and a
/// successful `submit`. Mutators are ignored outside the editable modes.
pub struct ProfileFormController {
    kind: ProfileKind,
    user_id: UserId,
    api: Arc<dyn ProfileApi>,
    autocomplete: AddressAutocomplete,
    notifier: NotificationService,
    image_policy: ImagePolicy,
    mode: FormMode,
    exists: bool,
    form: ProfileForm,
    saved: ProfileForm,
    errors: FieldErrors,
}

impl ProfileFormController {
    pub fn new(
        kind: ProfileKind,
        user_id: UserId,
        api: Arc<dyn ProfileApi>,
        autocomplete: AddressAutocomplete,
        notifier: NotificationService,
    ) -> Self {
        Self {
            kind,
            user_id,
            api,
            autocomplete,
            notifier,
            image_policy: ImagePolicy::default(),
            mode: FormMode::Loading,
            exists: false,
            form: ProfileForm::default(),
            saved: ProfileForm::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn with_image_policy(mut self, policy: ImagePolicy) -> Self {
        self.image_policy = policy;
        self
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn editable(&self, action: &str) -> bool {
        let editable = self.mode.is_editable();
        if !editable {
            debug!(action, mode = ?self.mode, "Ignoring edit outside edit mode");
        }
        editable
    }

    /// Fetch the user's profile. A failed fetch is reported and the
    /// controller stays in `Loading`.
    pub async fn load(&mut self) {
        self.mode = FormMode::Loading;

        match self.api.fetch(self.kind, self.user_id).await {
            Ok(lookup) => {
                match lookup.existing() {
                    Some(record) => {
                        self.form = ProfileForm::from(record);
                        self.exists = true;
                        self.mode = FormMode::Viewing;
                    }
                    None => {
                        self.form = ProfileForm::default();
                        self.exists = false;
                        self.mode = FormMode::Creating;
                    }
                }
                self.saved = self.form.clone();
                self.errors = FieldErrors::new();
                info!(kind = %self.kind, user_id = %self.user_id, exists = self.exists, "Profile loaded");
            }
            Err(e) => {
                warn!(kind = %self.kind, user_id = %self.user_id, error = %e, "Profile load failed");
                self.notifier.notify(Notification::error(e.to_string()));
            }
        }
    }

    pub fn start_editing(&mut self) -> bool {
        if self.mode != FormMode::Viewing {
            return false;
        }
        self.saved = self.form.clone();
        self.mode = FormMode::Editing;
        true
    }

    /// Drop unsaved changes and go back to the read-only view.
    pub fn cancel_editing(&mut self) -> bool {
        if self.mode != FormMode::Editing {
            return false;
        }
        self.form = self.saved.clone();
        self.errors = FieldErrors::new();
        self.autocomplete.clear();
        self.mode = FormMode::Viewing;
        true
    }

    pub fn set_full_name(&mut self, value: &str) {
        if self.editable("full_name") {
            self.form.full_name = value.to_string();
            self.errors.clear(FormField::FullName);
        }
    }

    pub fn set_phone_number(&mut self, value: &str) {
        if self.editable("phone_number") {
            self.form.phone_number = value.to_string();
            self.errors.clear(FormField::PhoneNumber);
        }
    }

    pub fn set_second_phone_number(&mut self, value: &str) {
        if self.editable("second_phone_number") {
            self.form.second_phone_number = value.to_string();
            self.errors.clear(FormField::SecondPhoneNumber);
        }
    }

    pub fn set_gender(&mut self, value: &str) {
        if self.editable("gender") {
            self.form.gender = value.to_string();
        }
    }

    /// Typing unresolves the address and schedules a suggestion lookup.
    pub fn type_address(&mut self, text: &str) -> Option<JoinHandle<()>> {
        if !self.editable("address") {
            return None;
        }
        self.form.address.typed(text);
        self.errors.clear(FormField::Address);
        self.autocomplete.input(text)
    }

    pub fn address_suggestions(&self) -> Vec<AddressSuggestion> {
        self.autocomplete.suggestions()
    }

    pub fn is_searching_address(&self) -> bool {
        self.autocomplete.is_searching()
    }

    /// Take a suggestion: fixes text and coordinates, closes the list.
    pub fn select_address(&mut self, index: usize) -> bool {
        if !self.editable("address") {
            return false;
        }
        let Some(suggestion) = self.autocomplete.select(index) else {
            return false;
        };

        match self.form.address.select(&suggestion) {
            Ok(()) => {
                self.errors.clear(FormField::Address);
                true
            }
            Err(e) => {
                warn!(error = %e, place = %suggestion.display_name, "Suggestion has unusable coordinates");
                self.errors.set(
                    FormField::Address,
                    "Please select a valid address from the suggestions",
                );
                false
            }
        }
    }

    pub fn stage_profile_image(&mut self, file_name: &str, bytes: Vec<u8>) -> bool {
        if !self.editable("profile_image") {
            return false;
        }
        match self.image_policy.stage(file_name, bytes) {
            Ok(image) => {
                self.form.profile_image = ProfileImage::Staged(image);
                self.errors.clear(FormField::ProfileImage);
                true
            }
            Err(rejection) => {
                self.errors
                    .set(FormField::ProfileImage, rejection.field_message());
                false
            }
        }
    }

    /// Returns the index of the new, empty entry.
    pub fn add_portfolio(&mut self) -> Option<usize> {
        if self.kind != ProfileKind::Vendor || !self.editable("portfolio") {
            return None;
        }
        self.form.portfolios.push(PortfolioEntry::default());
        Some(self.form.portfolios.len() - 1)
    }

    pub fn remove_portfolio(&mut self, index: usize) -> bool {
        if !self.editable("portfolio") || index >= self.form.portfolios.len() {
            return false;
        }
        self.form.portfolios.remove(index);
        // Entry-indexed errors no longer line up.
        self.errors.retain(|field| {
            !matches!(
                field,
                FormField::PortfolioExperience(_) | FormField::PortfolioImages(_)
            )
        });
        true
    }

    pub fn set_portfolio_experience(&mut self, index: usize, text: &str) -> bool {
        if !self.editable("portfolio") {
            return false;
        }
        match self.form.portfolios.get_mut(index) {
            Some(entry) => {
                entry.experience = text.to_string();
                self.errors.clear(FormField::PortfolioExperience(index));
                true
            }
            None => false,
        }
    }

    /// Stage picked files onto a portfolio entry. Each rejected file is
    /// reported on its own and skipped; returns how many were accepted.
    pub fn stage_portfolio_images(&mut self, index: usize, files: Vec<(String, Vec<u8>)>) -> usize {
        if !self.editable("portfolio") || index >= self.form.portfolios.len() {
            return 0;
        }

        let mut accepted = Vec::new();
        for (file_name, bytes) in files {
            match self.image_policy.stage(&file_name, bytes) {
                Ok(image) => accepted.push(image),
                Err(rejection) => {
                    self.notifier
                        .notify(Notification::error(rejection.to_string()));
                }
            }
        }

        let count = accepted.len();
        if let Some(entry) = self.form.portfolios.get_mut(index) {
            entry.staged_images.extend(accepted);
        }
        if count > 0 {
            self.errors.clear(FormField::PortfolioImages(index));
        }
        count
    }

    pub fn remove_portfolio_image(&mut self, index: usize, display_index: usize) -> bool {
        if !self.editable("portfolio") {
            return false;
        }
        self.form
            .portfolios
            .get_mut(index)
            .is_some_and(|entry| entry.remove_image(display_index))
    }

    /// Refetch after a save so uploaded files come back as server URLs.
    /// Without a usable answer the local form is kept minus the uploaded
    /// portfolio files.
    async fn reload_saved(&mut self) {
        match self.api.fetch(self.kind, self.user_id).await {
            Ok(lookup) => match lookup.existing() {
                Some(record) => {
                    let profile_id = self.form.profile_id.take();
                    self.form = ProfileForm::from(record);
                    if self.form.profile_id.is_none() {
                        self.form.profile_id = profile_id;
                    }
                }
                None => {
                    warn!(kind = %self.kind, user_id = %self.user_id, "Saved profile missing on refetch");
                    self.form.discard_uploaded_images();
                }
            },
            Err(e) => {
                warn!(kind = %self.kind, user_id = %self.user_id, error = %e, "Refetch after save failed");
                self.form.discard_uploaded_images();
            }
        }
        self.saved = self.form.clone();
    }

    /// Validate and save. Returns `true` once the backend accepted the profile.
    pub async fn submit(&mut self) -> bool {
        if !self.editable("submit") {
            return false;
        }

        self.errors = validate_profile(self.kind, &self.form);
        if !self.errors.is_empty() {
            debug!(kind = %self.kind, errors = self.errors.len(), "Submission blocked by validation");
            self.notifier
                .notify(Notification::error(INCOMPLETE_FORM_MESSAGE));
            return false;
        }

        let body = build_profile_body(self.kind, &self.form, self.user_id);
        let target = if self.exists {
            SubmitTarget::Update {
                profile_id: self
                    .form
                    .profile_id
                    .clone()
                    .unwrap_or_else(|| self.user_id.to_string()),
            }
        } else {
            SubmitTarget::Create
        };

        let result = match &target {
            SubmitTarget::Create => self.api.create(self.kind, body).await,
            SubmitTarget::Update { profile_id } => {
                self.api.update(self.kind, profile_id.clone(), body).await
            }
        };

        match result {
            Ok(saved) => {
                if let Some(id) = saved.and_then(|record| record.id) {
                    self.form.profile_id = Some(id);
                }
                let message = match target {
                    SubmitTarget::Create => match self.kind {
                        ProfileKind::Vendor => "Vendor profile created",
                        ProfileKind::Customer => "Customer profile created",
                    },
                    SubmitTarget::Update { .. } => PROFILE_UPDATED_MESSAGE,
                };
                self.notifier.notify(Notification::success(message));

                self.exists = true;
                self.reload_saved().await;
                self.mode = FormMode::Viewing;
                info!(kind = %self.kind, user_id = %self.user_id, "Profile saved");
                true
            }
            Err(e) => {
                warn!(kind = %self.kind, user_id = %self.user_id, error = %e, "Profile save failed");
                self.notifier.notify(Notification::error(e.to_string()));
                false
            }
        }
    }

    /// Values as the read-only screen shows them; `None` unless viewing.
    pub fn read_only_view(&self) -> Option<ProfileView> {
        if self.mode != FormMode::Viewing {
            return None;
        }
        let form = &self.form;
        let vendor = self.kind == ProfileKind::Vendor;

        Some(ProfileView {
            full_name: form.full_name.trim().to_string(),
            phone_number: form.phone_number.trim().to_string(),
            second_phone_number: vendor
                .then(|| non_blank(&form.second_phone_number))
                .flatten(),
            gender: (!vendor).then(|| non_blank(&form.gender)).flatten(),
            address: form.address.text.trim().to_string(),
            coordinates: form.address.coordinates.map(|c| c.to_string()),
            image: form.profile_image.source().map(str::to_string),
            portfolios: form
                .portfolios
                .iter()
                .map(|entry| PortfolioView {
                    experience: entry.experience.trim().to_string(),
                    images: entry
                        .displayed_images()
                        .iter()
                        .map(|img| img.source().to_string())
                        .collect(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::application::domain::entities::{ProfileLookup, ProfileRecord};
    use crate::profile::application::ports::outgoing::profile_api::ProfileApiError;
    use crate::shared::http::MultipartBody;
    use crate::tests::support::fixtures::{lahore_suggestions, vendor_lookup};
    use crate::tests::support::{record_notifications, stubs::StaticGeocoder};
    use crate::notification::NotificationKind;
    use async_trait::async_trait;
    use mockall::{mock, predicate::*};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    mock! {
        pub Api {}
        #[async_trait]
        impl ProfileApi for Api {
            async fn fetch(&self, kind: ProfileKind, user_id: UserId)
                -> Result<ProfileLookup, ProfileApiError>;
            async fn create(
                &self,
                kind: ProfileKind,
                body: MultipartBody,
            ) -> Result<Option<ProfileRecord>, ProfileApiError>;
            async fn update(
                &self,
                kind: ProfileKind,
                profile_id: String,
                body: MultipartBody,
            ) -> Result<Option<ProfileRecord>, ProfileApiError>;
        }
    }

    fn controller(kind: ProfileKind, api: MockApi) -> (ProfileFormController, NotificationService) {
        let notifier = NotificationService::new();
        let autocomplete = AddressAutocomplete::new(Arc::new(StaticGeocoder::new(lahore_suggestions())));
        let c = ProfileFormController::new(
            kind,
            UserId::from(21),
            Arc::new(api),
            autocomplete,
            notifier.clone(),
        );
        (c, notifier)
    }

    /// Answers fetches in order, repeating the last answer.
    fn api_fetching(lookups: Vec<ProfileLookup>) -> MockApi {
        let calls = AtomicUsize::new(0);
        let mut api = MockApi::new();
        api.expect_fetch().returning(move |_, _| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok(lookups[n.min(lookups.len() - 1)].clone())
        });
        api
    }

    fn vendor_lookup_with(edit: impl FnOnce(&mut ProfileRecord)) -> ProfileLookup {
        let mut lookup = vendor_lookup();
        if let Some(record) = lookup.profile.as_mut() {
            edit(record);
        }
        lookup
    }

    fn api_returning(lookup: ProfileLookup) -> MockApi {
        let mut api = MockApi::new();
        api.expect_fetch()
            .returning(move |_, _| Ok(lookup.clone()));
        api
    }

    async fn fill_valid_customer(c: &mut ProfileFormController) {
        c.set_full_name("Sana Malik");
        c.set_phone_number("0300 1234567");
        c.set_gender("female");
        c.type_address("Model").unwrap().await.unwrap();
        assert!(c.select_address(0));
        assert!(c.stage_profile_image("me.png", vec![1, 2]));
    }

    #[tokio::test]
    async fn test_missing_profile_opens_blank_creation_form() {
        let (mut c, _) = controller(ProfileKind::Vendor, api_returning(ProfileLookup::default()));

        c.load().await;

        assert_eq!(c.mode(), FormMode::Creating);
        assert!(!c.exists());
        assert!(c.form().is_blank());
    }

    #[tokio::test]
    async fn test_existing_profile_opens_read_only() {
        let (mut c, _) = controller(ProfileKind::Vendor, api_returning(vendor_lookup()));

        c.load().await;

        assert_eq!(c.mode(), FormMode::Viewing);
        let view = c.read_only_view().unwrap();
        assert_eq!(view.full_name, "Hamza Electric Works");
        assert_eq!(view.portfolios[0].images.len(), 2);
        assert_eq!(view.gender, None);
    }

    #[tokio::test]
    async fn test_failed_load_notifies_and_stays_loading() {
        let mut api = MockApi::new();
        api.expect_fetch()
            .returning(|_, _| Err(ProfileApiError::Network("connection refused".to_string())));
        let (mut c, notifier) = controller(ProfileKind::Customer, api);
        let seen = record_notifications(&notifier);

        c.load().await;

        assert_eq!(c.mode(), FormMode::Loading);
        assert_eq!(seen.lock().unwrap()[0].kind, NotificationKind::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_selecting_suggestion_sets_coordinates_and_clears_list() {
        let (mut c, _) = controller(ProfileKind::Customer, api_returning(ProfileLookup::default()));
        c.load().await;

        c.type_address("Gulberg").unwrap().await.unwrap();
        assert_eq!(c.address_suggestions().len(), 2);

        assert!(c.select_address(1));

        let address = &c.form().address;
        assert_eq!(address.text, "Gulberg III, Lahore, Punjab, Pakistan");
        assert_eq!(address.coordinates.map(|p| p.latitude), Some(31.5120));
        assert_eq!(address.coordinates.map(|p| p.longitude), Some(74.3456));
        assert!(c.address_suggestions().is_empty());
    }

    #[tokio::test]
    async fn test_empty_required_field_blocks_network_call() {
        let mut api = api_returning(ProfileLookup::default());
        api.expect_create().times(0);
        let (mut c, notifier) = controller(ProfileKind::Customer, api);
        let seen = record_notifications(&notifier);
        c.load().await;

        assert!(!c.submit().await);

        assert_eq!(c.errors().get(FormField::FullName), Some("Full name is required"));
        assert_eq!(c.mode(), FormMode::Creating);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message, INCOMPLETE_FORM_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typed_address_without_selection_blocks_submit() {
        let mut api = api_returning(ProfileLookup::default());
        api.expect_create().times(0);
        let (mut c, _) = controller(ProfileKind::Customer, api);
        c.load().await;
        fill_valid_customer(&mut c).await;

        c.type_address("Model Town, Lahore, Punjab").unwrap().await.unwrap();

        assert!(!c.submit().await);
        assert_eq!(
            c.errors().get(FormField::Address),
            Some("Please select a valid address from the suggestions")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_then_read_only_reflects_saved_values() {
        let mut api = api_returning(ProfileLookup::default());
        api.expect_create()
            .withf(|kind, body| {
                *kind == ProfileKind::Customer
                    && body.text_value("customer_profile[full_name]") == Some("Sana Malik")
                    && body.file_names("customer_profile[profile_image]") == vec!["me.png"]
            })
            .times(1)
            .returning(|_, _| {
                Ok(Some(ProfileRecord {
                    id: Some("77".to_string()),
                    ..Default::default()
                }))
            });
        let (mut c, notifier) = controller(ProfileKind::Customer, api);
        let seen = record_notifications(&notifier);
        c.load().await;
        fill_valid_customer(&mut c).await;

        assert!(c.submit().await);

        assert_eq!(c.mode(), FormMode::Viewing);
        assert!(c.exists());
        assert_eq!(c.form().profile_id.as_deref(), Some("77"));
        let view = c.read_only_view().unwrap();
        assert_eq!(view.full_name, "Sana Malik");
        assert_eq!(view.gender.as_deref(), Some("female"));
        assert_eq!(view.address, "Model Town, Lahore, Punjab, Pakistan");
        assert!(view.image.unwrap().starts_with("data:image/png;base64,"));
        assert_eq!(seen.lock().unwrap()[0].kind, NotificationKind::Success);

        // read-only now
        c.set_full_name("Changed");
        assert_eq!(c.form().full_name, "Sana Malik");
    }

    #[tokio::test]
    async fn test_update_goes_to_profile_resource() {
        let updated = vendor_lookup_with(|r| r.phone_number = Some("0321 7654321".to_string()));
        let mut api = api_fetching(vec![vendor_lookup(), updated]);
        api.expect_update()
            .with(eq(ProfileKind::Vendor), eq("12".to_string()), always())
            .times(1)
            .returning(|_, _, _| Ok(None));
        let (mut c, notifier) = controller(ProfileKind::Vendor, api);
        let seen = record_notifications(&notifier);
        c.load().await;

        assert!(c.start_editing());
        c.set_phone_number("0321 7654321");
        assert!(c.submit().await);

        assert_eq!(c.read_only_view().unwrap().phone_number, "0321 7654321");
        assert_eq!(seen.lock().unwrap()[0].message, PROFILE_UPDATED_MESSAGE);
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_form_editable() {
        let mut api = api_returning(vendor_lookup());
        api.expect_update()
            .returning(|_, _, _| Err(ProfileApiError::Rejected("Phone number has already been taken".to_string())));
        let (mut c, notifier) = controller(ProfileKind::Vendor, api);
        let seen = record_notifications(&notifier);
        c.load().await;
        c.start_editing();

        assert!(!c.submit().await);

        assert_eq!(c.mode(), FormMode::Editing);
        assert_eq!(seen.lock().unwrap()[0].message, "Phone number has already been taken");
    }

    #[tokio::test]
    async fn test_cancel_restores_last_saved_values() {
        let (mut c, _) = controller(ProfileKind::Vendor, api_returning(vendor_lookup()));
        c.load().await;
        c.start_editing();

        c.set_full_name("Someone Else");
        c.remove_portfolio_image(0, 0);
        assert!(c.cancel_editing());

        assert_eq!(c.form().full_name, "Hamza Electric Works");
        assert_eq!(c.form().portfolios[0].image_count(), 2);
        assert_eq!(c.mode(), FormMode::Viewing);
    }

    #[tokio::test]
    async fn test_portfolio_image_removal_respects_provenance() {
        let (mut c, _) = controller(ProfileKind::Vendor, api_returning(vendor_lookup()));
        c.load().await;
        c.start_editing();
        assert_eq!(
            c.stage_portfolio_images(0, vec![("new.jpg".to_string(), vec![1])]),
            1
        );

        // persisted: 2, staged: 1
        assert!(c.remove_portfolio_image(0, 0));
        let entry = &c.form().portfolios[0];
        assert_eq!(entry.persisted_images.len(), 1);
        assert_eq!(entry.staged_images.len(), 1);

        assert!(c.remove_portfolio_image(0, 1));
        let entry = &c.form().portfolios[0];
        assert_eq!(entry.persisted_images.len(), 1);
        assert!(entry.staged_images.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_portfolio_files_reported_individually() {
        let (mut c, notifier) = controller(ProfileKind::Vendor, api_returning(vendor_lookup()));
        let seen = record_notifications(&notifier);
        c.load().await;
        c.start_editing();
        let policy = ImagePolicy {
            max_file_size_bytes: 2,
            ..Default::default()
        };
        let mut c = c.with_image_policy(policy);

        let accepted = c.stage_portfolio_images(
            0,
            vec![
                ("ok.png".to_string(), vec![1]),
                ("notes.txt".to_string(), vec![1]),
                ("huge.jpg".to_string(), vec![1, 2, 3]),
            ],
        );

        assert_eq!(accepted, 1);
        let messages: Vec<String> = seen.lock().unwrap().iter().map(|n| n.message.clone()).collect();
        assert_eq!(messages, vec!["notes.txt is not a valid image", "huge.jpg exceeds 2 bytes"]);
    }

    #[tokio::test]
    async fn test_bad_profile_image_sets_field_error() {
        let (mut c, _) = controller(ProfileKind::Customer, api_returning(ProfileLookup::default()));
        c.load().await;

        assert!(!c.stage_profile_image("avatar.gif.exe", vec![0]));

        assert_eq!(
            c.errors().get(FormField::ProfileImage),
            Some("Please select a valid image file")
        );
        assert!(!c.form().profile_image.is_present());
    }

    #[tokio::test]
    async fn test_customer_cannot_add_portfolio() {
        let (mut c, _) = controller(ProfileKind::Customer, api_returning(ProfileLookup::default()));
        c.load().await;
        assert_eq!(c.add_portfolio(), None);
    }

    #[tokio::test]
    async fn test_new_portfolio_entry_must_be_filled() {
        let mut api = api_returning(vendor_lookup());
        api.expect_update().times(0);
        let (mut c, _) = controller(ProfileKind::Vendor, api);
        c.load().await;
        c.start_editing();

        let index = c.add_portfolio().unwrap();
        assert!(!c.submit().await);
        assert!(c.errors().get(FormField::PortfolioImages(index)).is_some());

        assert!(c.remove_portfolio(index));
        assert!(c.errors().get(FormField::PortfolioImages(index)).is_none());
    }

    #[tokio::test]
    async fn test_second_save_does_not_reupload_portfolio_images() {
        let after_first_save = vendor_lookup_with(|r| {
            r.vendor_portfolios[0]
                .work_images
                .push("https://cdn.example.com/portfolios/4/3.jpg".to_string());
        });
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&bodies);
        let mut api = api_fetching(vec![vendor_lookup(), after_first_save]);
        api.expect_update()
            .times(2)
            .returning(move |_, _, body| {
                sink.lock().unwrap().push(body);
                Ok(None)
            });
        let (mut c, _) = controller(ProfileKind::Vendor, api);
        c.load().await;

        c.start_editing();
        assert_eq!(c.stage_portfolio_images(0, vec![("new.jpg".to_string(), vec![1])]), 1);
        assert!(c.submit().await);

        let entry = &c.form().portfolios[0];
        assert!(entry.staged_images.is_empty());
        assert_eq!(entry.persisted_images.len(), 3);

        c.start_editing();
        c.set_phone_number("0321 7654321");
        assert!(c.submit().await);

        let bodies = bodies.lock().unwrap();
        let uploads = "vendor_profile[vendor_portfolios][0][work_images][]";
        let kept = "vendor_profile[vendor_portfolios][0][existing_images][]";
        assert_eq!(bodies[0].file_names(uploads), vec!["new.jpg"]);
        assert!(bodies[1].file_names(uploads).is_empty());
        assert_eq!(bodies[1].text_values(kept).len(), 3);
    }

    #[tokio::test]
    async fn test_failed_refetch_drops_uploaded_portfolio_files() {
        let calls = AtomicUsize::new(0);
        let mut api = MockApi::new();
        api.expect_fetch().returning(move |_, _| {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 => Ok(vendor_lookup()),
                _ => Err(ProfileApiError::Network("connection reset".to_string())),
            }
        });
        api.expect_update().times(1).returning(|_, _, _| Ok(None));
        let (mut c, _) = controller(ProfileKind::Vendor, api);
        c.load().await;
        c.start_editing();
        c.stage_portfolio_images(0, vec![("new.jpg".to_string(), vec![1])]);

        assert!(c.submit().await);

        assert_eq!(c.mode(), FormMode::Viewing);
        let entry = &c.form().portfolios[0];
        assert!(entry.staged_images.is_empty());
        assert_eq!(entry.persisted_images.len(), 2);
    }
}
