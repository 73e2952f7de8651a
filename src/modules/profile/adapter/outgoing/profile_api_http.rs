use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::auth::application::domain::entities::UserId;
use crate::profile::application::domain::entities::{ProfileKind, ProfileLookup, ProfileRecord};
use crate::profile::application::ports::outgoing::profile_api::{ProfileApi, ProfileApiError};
use crate::shared::http::{BackendClient, BackendError, MultipartBody};

#[derive(Debug, Clone)]
pub struct HttpProfileApi {
    client: BackendClient,
}

impl HttpProfileApi {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

fn map_backend_error(e: BackendError) -> ProfileApiError {
    match e {
        BackendError::Rejected { message, .. } => ProfileApiError::Rejected(message),
        BackendError::Network(msg) => ProfileApiError::Network(msg),
        BackendError::Decode(msg) | BackendError::InvalidRequest(msg) => {
            ProfileApiError::InvalidResponse(msg)
        }
    }
}

/// Lookup bodies are `{exists, profile}`; an empty body means no profile.
pub(crate) fn parse_lookup(body: Value) -> Result<ProfileLookup, ProfileApiError> {
    if body.is_null() {
        return Ok(ProfileLookup::default());
    }
    serde_json::from_value(body).map_err(|e| ProfileApiError::InvalidResponse(e.to_string()))
}

/// Save responses differ per endpoint: the record may be wrapped in
/// `profile`, `data`, `<kind>_profile`, or sent bare.
pub(crate) fn parse_saved(kind: ProfileKind, body: Value) -> Option<ProfileRecord> {
    let candidate = ["profile", "data", kind.form_scope()]
        .iter()
        .find_map(|key| body.get(*key).filter(|v| v.is_object()).cloned())
        .or_else(|| body.get("id").map(|_| body.clone()))?;

    match serde_json::from_value(candidate) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(error = %e, "Saved profile not readable from response");
            None
        }
    }
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn fetch(
        &self,
        kind: ProfileKind,
        user_id: UserId,
    ) -> Result<ProfileLookup, ProfileApiError> {
        let url = self
            .client
            .endpoint(&format!("{}/{}", kind.resource_path(), user_id));

        match self.client.send_json(self.client.get(url)).await {
            Ok(body) => parse_lookup(body),
            Err(BackendError::Rejected { status: 404, .. }) => Ok(ProfileLookup::default()),
            Err(e) => Err(map_backend_error(e)),
        }
    }

    async fn create(
        &self,
        kind: ProfileKind,
        body: MultipartBody,
    ) -> Result<Option<ProfileRecord>, ProfileApiError> {
        let url = self.client.endpoint(kind.resource_path());
        let form = body.into_form().map_err(map_backend_error)?;

        let response = self
            .client
            .send_json(self.client.post(url).multipart(form))
            .await
            .map_err(map_backend_error)?;

        info!(kind = %kind, "Profile created");
        Ok(parse_saved(kind, response))
    }

    async fn update(
        &self,
        kind: ProfileKind,
        profile_id: String,
        body: MultipartBody,
    ) -> Result<Option<ProfileRecord>, ProfileApiError> {
        let url = self
            .client
            .endpoint(&format!("{}/{}", kind.resource_path(), profile_id));
        let form = body.into_form().map_err(map_backend_error)?;

        let response = self
            .client
            .send_json(self.client.patch(url).multipart(form))
            .await
            .map_err(map_backend_error)?;

        info!(kind = %kind, profile_id = %profile_id, "Profile updated");
        Ok(parse_saved(kind, response))
    }
}
