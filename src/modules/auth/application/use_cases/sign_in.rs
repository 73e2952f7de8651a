use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::auth::application::domain::entities::AuthSession;
use crate::auth::application::domain::token::TokenDecodeError;
use crate::auth::application::ports::outgoing::{
    AuthApi, AuthApiError, Credentials, SessionKey, SessionStore, SessionStoreError,
};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SignInError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Token is missing from response")]
    MissingToken,

    #[error("{0}")]
    Api(#[from] AuthApiError),

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenDecodeError),

    #[error("Could not persist session: {0}")]
    Storage(#[from] SessionStoreError),
}

#[async_trait]
pub trait ISignInUseCase: Send + Sync {
    async fn execute(&self, credentials: Credentials) -> Result<AuthSession, SignInError>;
}

#[derive(Clone)]
pub struct SignInUseCase {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
}

impl SignInUseCase {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }
}

#[async_trait]
impl ISignInUseCase for SignInUseCase {
    async fn execute(&self, credentials: Credentials) -> Result<AuthSession, SignInError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(SignInError::MissingCredentials);
        }

        let response = self.api.sign_in(&credentials).await?;

        let token = response.token.ok_or(SignInError::MissingToken)?;
        let full_name = response.user.full_name.clone();
        let session = AuthSession::from_token(&token, full_name.clone())?;

        self.store.set(SessionKey::User, &response.raw_user.to_string())?;
        self.store.set(SessionKey::Token, &token)?;
        match full_name {
            Some(name) => self.store.set(SessionKey::FullName, &name)?,
            None => {
                warn!(user_id = %session.user_id, "Signed-in user has no full name");
                self.store.remove(SessionKey::FullName)?
            }
        }

        Ok(session)
    }
}
