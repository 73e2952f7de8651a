use async_trait::async_trait;
use serde::Serialize;

use crate::auth::application::domain::entities::{AuthUser, UserId, UserRole};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful sign-in payload. `token` may still be absent if the backend
/// misbehaves; the use case treats that as a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInResponse {
    pub token: Option<String>,
    pub user: AuthUser,
    /// Raw user JSON, cached verbatim for other views.
    pub raw_user: serde_json::Value,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum AuthApiError {
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse, AuthApiError>;

    /// Returns the updated user record and its raw JSON.
    async fn update_role(
        &self,
        user_id: UserId,
        role: UserRole,
    ) -> Result<(AuthUser, serde_json::Value), AuthApiError>;
}
