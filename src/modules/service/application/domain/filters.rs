use crate::shared::geo::Coordinates;

/// Filters shared by the grid and the map. Blank values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilters {
    pub city: String,
    pub service_name: String,
    pub sub_service_name: String,
    pub price_min: String,
    pub price_max: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub const DEFAULT_PER_PAGE: u32 = 12;

    pub fn first() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Everything `GET /services/sub_services` understands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubServiceQuery {
    pub filters: ServiceFilters,
    pub near: Option<Coordinates>,
    pub page: Option<PageRequest>,
}

impl SubServiceQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(near) = self.near {
            params.push(("latitude", near.latitude_param()));
            params.push(("longitude", near.longitude_param()));
        }

        let f = &self.filters;
        for (key, value) in [
            ("city", &f.city),
            ("service_name", &f.service_name),
            ("sub_service_name", &f.sub_service_name),
            ("price_min", &f.price_min),
            ("price_max", &f.price_max),
        ] {
            let value = value.trim();
            if !value.is_empty() {
                params.push((key, value.to_string()));
            }
        }

        if let Some(page) = self.page {
            params.push(("page", page.page.to_string()));
            params.push(("per_page", page.per_page.to_string()));
        }

        params
    }
}
