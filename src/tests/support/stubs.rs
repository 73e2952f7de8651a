use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::geocoding::application::domain::entities::AddressSuggestion;
use crate::geocoding::application::ports::outgoing::geocoding_provider::{
    GeocodingError, GeocodingProvider,
};
use crate::profile::application::ports::outgoing::profile_api::{ProfileApi, ProfileApiError};
use crate::profile::{ProfileKind, ProfileLookup, ProfileRecord};
use crate::service::application::domain::entities::{ServiceCategory, SubService, SubServicePage};
use crate::service::application::domain::filters::SubServiceQuery;
use crate::service::application::ports::outgoing::{
    GeolocationError, GeolocationProvider, ServiceCatalog, ServiceCatalogError,
};
use crate::shared::geo::Coordinates;
use crate::shared::http::MultipartBody;

/// Answers every query with the same suggestions.
pub struct StaticGeocoder {
    suggestions: Vec<AddressSuggestion>,
    queries: Mutex<Vec<String>>,
}

impl StaticGeocoder {
    pub fn new(suggestions: Vec<AddressSuggestion>) -> Self {
        Self {
            suggestions,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodingProvider for StaticGeocoder {
    async fn autocomplete(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<AddressSuggestion>, GeocodingError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.suggestions.iter().take(limit).cloned().collect())
    }
}

/// Read-only profile backend keyed by kind; unknown kinds have no profile.
#[derive(Default)]
pub struct StubProfileApi {
    lookups: HashMap<ProfileKind, ProfileLookup>,
    failing: HashSet<ProfileKind>,
    saved: Mutex<Vec<(ProfileKind, MultipartBody)>>,
}

impl StubProfileApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookup(mut self, kind: ProfileKind, lookup: ProfileLookup) -> Self {
        self.lookups.insert(kind, lookup);
        self
    }

    pub fn failing(mut self, kind: ProfileKind) -> Self {
        self.failing.insert(kind);
        self
    }

    pub fn saved(&self) -> Vec<(ProfileKind, MultipartBody)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileApi for StubProfileApi {
    async fn fetch(
        &self,
        kind: ProfileKind,
        _user_id: UserId,
    ) -> Result<ProfileLookup, ProfileApiError> {
        if self.failing.contains(&kind) {
            return Err(ProfileApiError::Network("connection refused".to_string()));
        }
        Ok(self.lookups.get(&kind).cloned().unwrap_or_default())
    }

    async fn create(
        &self,
        kind: ProfileKind,
        body: MultipartBody,
    ) -> Result<Option<ProfileRecord>, ProfileApiError> {
        self.saved.lock().unwrap().push((kind, body));
        Ok(None)
    }

    async fn update(
        &self,
        kind: ProfileKind,
        _profile_id: String,
        body: MultipartBody,
    ) -> Result<Option<ProfileRecord>, ProfileApiError> {
        self.saved.lock().unwrap().push((kind, body));
        Ok(None)
    }
}

/// In-memory catalog. `failing_with` makes every call return that error.
#[derive(Default)]
pub struct StubServiceCatalog {
    categories: Vec<ServiceCategory>,
    page: SubServicePage,
    details: HashMap<i64, SubService>,
    failure: Option<ServiceCatalogError>,
    queries: Mutex<Vec<SubServiceQuery>>,
    created: Mutex<Vec<MultipartBody>>,
}

impl StubServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(mut self, categories: Vec<ServiceCategory>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_page(mut self, page: SubServicePage) -> Self {
        self.page = page;
        self
    }

    pub fn with_detail(mut self, sub_service: SubService) -> Self {
        self.details.insert(sub_service.id, sub_service);
        self
    }

    pub fn failing_with(mut self, error: ServiceCatalogError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn queries(&self) -> Vec<SubServiceQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<MultipartBody> {
        self.created.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ServiceCatalogError> {
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ServiceCatalog for StubServiceCatalog {
    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, ServiceCatalogError> {
        self.check()?;
        Ok(self.categories.clone())
    }

    async fn list_sub_services(
        &self,
        query: &SubServiceQuery,
    ) -> Result<SubServicePage, ServiceCatalogError> {
        self.queries.lock().unwrap().push(query.clone());
        self.check()?;
        Ok(self.page.clone())
    }

    async fn get_sub_service(&self, id: i64) -> Result<SubService, ServiceCatalogError> {
        self.check()?;
        self.details
            .get(&id)
            .cloned()
            .ok_or(ServiceCatalogError::NotFound)
    }

    async fn create_sub_service(&self, body: MultipartBody) -> Result<(), ServiceCatalogError> {
        self.check()?;
        self.created.lock().unwrap().push(body);
        Ok(())
    }
}

/// Device position that never changes.
pub struct FixedGeolocation(pub Result<Coordinates, GeolocationError>);

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        self.0.clone()
    }
}
