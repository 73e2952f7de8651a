use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::service::application::domain::entities::{ServiceCategory, SubService, SubServicePage};
use crate::service::application::domain::filters::SubServiceQuery;
use crate::service::application::ports::outgoing::{ServiceCatalog, ServiceCatalogError};
use crate::shared::http::{BackendClient, BackendError, MultipartBody};

const CATEGORIES_PATH: &str = "services/service_icons";
const SUB_SERVICES_PATH: &str = "services/sub_services";

#[derive(Debug, Clone)]
pub struct HttpServiceCatalog {
    client: BackendClient,
}

impl HttpServiceCatalog {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

fn map_backend_error(e: BackendError) -> ServiceCatalogError {
    match e {
        BackendError::Rejected { status: 404, .. } => ServiceCatalogError::NotFound,
        BackendError::Rejected { message, .. } => ServiceCatalogError::Rejected(message),
        BackendError::Network(msg) => ServiceCatalogError::Network(msg),
        BackendError::Decode(msg) | BackendError::InvalidRequest(msg) => {
            ServiceCatalogError::InvalidResponse(msg)
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ServiceCatalogError> {
    BackendClient::decode(value).map_err(map_backend_error)
}

/// Categories come back as a bare array or wrapped in `data`.
pub(crate) fn parse_categories(body: Value) -> Result<Vec<ServiceCategory>, ServiceCatalogError> {
    match body {
        Value::Null => Ok(Vec::new()),
        Value::Object(mut map) => match map.remove("data") {
            Some(inner) => parse_categories(inner),
            None => Err(ServiceCatalogError::InvalidResponse(
                "expected a list of services".to_string(),
            )),
        },
        other => decode(other),
    }
}

/// Detail may be sent bare or under `sub_service`.
pub(crate) fn parse_detail(body: Value) -> Result<SubService, ServiceCatalogError> {
    let record = match body.get("sub_service") {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => body,
    };
    if record.is_null() {
        return Err(ServiceCatalogError::NotFound);
    }
    decode(record)
}

#[async_trait]
impl ServiceCatalog for HttpServiceCatalog {
    async fn list_categories(&self) -> Result<Vec<ServiceCategory>, ServiceCatalogError> {
        let url = self.client.endpoint(CATEGORIES_PATH);
        let body = self
            .client
            .send_json(self.client.get(url))
            .await
            .map_err(map_backend_error)?;

        parse_categories(body)
    }

    async fn list_sub_services(
        &self,
        query: &SubServiceQuery,
    ) -> Result<SubServicePage, ServiceCatalogError> {
        let url = self
            .client
            .endpoint_with_query(SUB_SERVICES_PATH, &query.params())
            .map_err(map_backend_error)?;
        debug!(url = %url, "Listing sub-services");

        let body = self
            .client
            .send_json(self.client.get(url))
            .await
            .map_err(map_backend_error)?;

        if body.is_null() {
            return Ok(SubServicePage::default());
        }
        decode(body)
    }

    async fn get_sub_service(&self, id: i64) -> Result<SubService, ServiceCatalogError> {
        let url = self.client.endpoint(&format!("{SUB_SERVICES_PATH}/{id}"));
        let body = self
            .client
            .send_json_accepting(self.client.get(url), &[302])
            .await
            .map_err(map_backend_error)?;

        parse_detail(body)
    }

    async fn create_sub_service(&self, body: MultipartBody) -> Result<(), ServiceCatalogError> {
        let url = self.client.endpoint(SUB_SERVICES_PATH);
        let form = body.into_form().map_err(map_backend_error)?;

        self.client
            .send_json(self.client.post(url).multipart(form))
            .await
            .map_err(map_backend_error)?;

        info!("Sub-service submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_categories_bare_or_wrapped() {
        let bare = json!([{ "id": 1, "service_name": "Plumber", "icon_url": "https://cdn.example.com/p.png" }]);
        let wrapped = json!({ "data": [{ "id": 2, "service_name": "Carpenter" }] });

        assert_eq!(parse_categories(bare).unwrap()[0].service_name, "Plumber");
        let categories = parse_categories(wrapped).unwrap();
        assert_eq!(categories[0].id, 2);
        assert_eq!(categories[0].icon_url, None);
    }

    #[test]
    fn test_categories_unexpected_object() {
        let err = parse_categories(json!({ "message": "oops" })).unwrap_err();
        assert!(matches!(err, ServiceCatalogError::InvalidResponse(_)));
    }

    #[test]
    fn test_detail_bare_or_wrapped() {
        let bare = json!({ "id": 5, "sub_service_name": "Geyser repair" });
        let wrapped = json!({ "sub_service": { "id": 6, "sub_service_name": "Tap fitting" } });

        assert_eq!(parse_detail(bare).unwrap().id, 5);
        assert_eq!(parse_detail(wrapped).unwrap().id, 6);
        assert_eq!(parse_detail(Value::Null).unwrap_err(), ServiceCatalogError::NotFound);
    }

    #[test]
    fn test_404_maps_to_not_found() {
        let err = map_backend_error(BackendError::Rejected {
            status: 404,
            message: "Not Found".to_string(),
        });
        assert_eq!(err, ServiceCatalogError::NotFound);

        let err = map_backend_error(BackendError::Rejected {
            status: 422,
            message: "Price must be positive".to_string(),
        });
        assert_eq!(err.to_string(), "Price must be positive");
    }
}
