use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;
use crate::profile::application::domain::entities::{ProfileKind, ProfileLookup, ProfileRecord};
use crate::shared::http::MultipartBody;

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ProfileApiError {
    /// Backend said no; the message is shown to the user as-is.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch(&self, kind: ProfileKind, user_id: UserId)
        -> Result<ProfileLookup, ProfileApiError>;

    /// Returns the stored profile when the backend echoes it back.
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
