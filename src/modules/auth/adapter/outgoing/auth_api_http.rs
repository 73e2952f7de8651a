use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::application::domain::entities::{AuthUser, UserId, UserRole};
use crate::auth::application::ports::outgoing::auth_api::{
    AuthApi, AuthApiError, Credentials, SignInResponse,
};
use crate::shared::http::{BackendClient, BackendError};

#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: BackendClient,
}

impl HttpAuthApi {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

fn map_backend_error(e: BackendError) -> AuthApiError {
    match e {
        BackendError::Rejected { message, .. } => AuthApiError::Rejected(message),
        BackendError::Network(msg) => AuthApiError::Network(msg),
        BackendError::Decode(msg) | BackendError::InvalidRequest(msg) => {
            AuthApiError::InvalidResponse(msg)
        }
    }
}

/// Interpret the sign-in envelope:
/// `{"status": {"code": 200, "message": ".."}, "data": {"token": "..", "user": {..}}}`
pub(crate) fn parse_sign_in(body: Value) -> Result<SignInResponse, AuthApiError> {
    let code = body
        .pointer("/status/code")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    if code != 200 {
        let message = body
            .pointer("/status/message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("Login failed")
            .to_string();
        return Err(AuthApiError::Rejected(message));
    }

    let raw_user = body
        .pointer("/data/user")
        .cloned()
        .ok_or_else(|| AuthApiError::InvalidResponse("user missing from response".to_string()))?;

    let user: AuthUser = serde_json::from_value(raw_user.clone())
        .map_err(|e| AuthApiError::InvalidResponse(e.to_string()))?;

    let token = body
        .pointer("/data/token")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string);

    Ok(SignInResponse {
        token,
        user,
        raw_user,
    })
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse, AuthApiError> {
        let url = self.client.endpoint("signin");
        let request = self.client.post(url).json(&json!({ "user": credentials }));

        // Rejections keep the envelope's status.message via backend_error_message.
        let body = self
            .client
            .send_json(request)
            .await
            .map_err(map_backend_error)?;

        let response = parse_sign_in(body)?;
        info!(user_id = %response.user.id, "Signed in");
        Ok(response)
    }

    async fn update_role(
        &self,
        user_id: UserId,
        role: UserRole,
    ) -> Result<(AuthUser, Value), AuthApiError> {
        let url = self.client.endpoint(&format!("users/{}/update_role", user_id));
        let request = self.client.patch(url).json(&json!({ "role": role }));

        let body = self
            .client
            .send_json(request)
            .await
            .map_err(map_backend_error)?;

        let raw_user = body
            .get("user")
            .cloned()
            .ok_or_else(|| AuthApiError::InvalidResponse("user missing from response".to_string()))?;
        let user: AuthUser = serde_json::from_value(raw_user.clone())
            .map_err(|e| AuthApiError::InvalidResponse(e.to_string()))?;

        Ok((user, raw_user))
    }
}
