use std::sync::Arc;

use tracing::warn;

use crate::notification::{Notification, NotificationService};
use crate::service::application::domain::entities::{ServiceCategory, SubService};
use crate::service::application::domain::filters::{PageRequest, ServiceFilters, SubServiceQuery};
use crate::service::application::ports::incoming::use_cases::{
    BrowseSubServicesUseCase, GetSubServiceUseCase, ListCategoriesUseCase, SubServiceListing,
};

/// Paged, filterable sub-service grid with a category list and detail view.
pub struct ServiceBrowserController {
    list_categories: Arc<dyn ListCategoriesUseCase>,
    browse: Arc<dyn BrowseSubServicesUseCase>,
    get_sub_service: Arc<dyn GetSubServiceUseCase>,
    notifier: NotificationService,
    categories: Vec<ServiceCategory>,
    filters: ServiceFilters,
    page: PageRequest,
    listing: SubServiceListing,
}

impl ServiceBrowserController {
    pub fn new(
        list_categories: Arc<dyn ListCategoriesUseCase>,
        browse: Arc<dyn BrowseSubServicesUseCase>,
        get_sub_service: Arc<dyn GetSubServiceUseCase>,
        notifier: NotificationService,
    ) -> Self {
        Self {
            list_categories,
            browse,
            get_sub_service,
            notifier,
            categories: Vec::new(),
            filters: ServiceFilters::default(),
            page: PageRequest::first(),
            listing: SubServiceListing::default(),
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.page.per_page = per_page.max(1);
        self
    }

    pub fn categories(&self) -> &[ServiceCategory] {
        &self.categories
    }

    pub fn filters(&self) -> &ServiceFilters {
        &self.filters
    }

    pub fn listing(&self) -> &SubServiceListing {
        &self.listing
    }

    pub fn page(&self) -> u32 {
        self.page.page
    }

    pub async fn load_categories(&mut self) {
        match self.list_categories.execute().await {
            Ok(categories) => self.categories = categories,
            Err(e) => {
                warn!(error = %e, "Service categories unavailable");
                self.notifier.notify(Notification::error(e.to_string()));
            }
        }
    }

    /// New filters always start again from the first page.
    pub async fn apply_filters(&mut self, filters: ServiceFilters) {
        self.filters = filters;
        self.page.page = 1;
        self.refresh().await;
    }

    /// Pages outside `1..=page_count` are clamped. Returns whether the page
    /// changed.
    pub async fn go_to_page(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.listing.page_count.max(1));
        if target == self.page.page {
            return false;
        }
        self.page.page = target;
        self.refresh().await;
        true
    }

    /// A failed fetch empties the grid and is reported once.
    pub async fn refresh(&mut self) {
        let query = SubServiceQuery {
            filters: self.filters.clone(),
            near: None,
            page: Some(self.page),
        };

        match self.browse.execute(query).await {
            Ok(listing) => self.listing = listing,
            Err(e) => {
                warn!(error = %e, page = self.page.page, "Sub-service listing failed");
                self.listing = SubServiceListing {
                    page: self.page.page,
                    page_count: 1,
                    ..Default::default()
                };
                self.notifier.notify(Notification::error(e.to_string()));
            }
        }
    }

    pub async fn open(&self, id: i64) -> Option<SubService> {
        match self.get_sub_service.execute(id).await {
            Ok(sub_service) => Some(sub_service),
            Err(e) => {
                warn!(error = %e, sub_service_id = id, "Sub-service detail unavailable");
                self.notifier.notify(Notification::error(e.to_string()));
                None
            }
        }
    }
}
