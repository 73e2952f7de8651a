use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::application::domain::entities::AuthSession;
use crate::auth::application::domain::token::TokenDecodeError;
use crate::auth::application::ports::outgoing::{SessionKey, SessionStore, SessionStoreError};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum OAuthCallbackError {
    #[error("Authentication failed: {0}")]
    Provider(String),

    #[error("No token received")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenDecodeError),

    #[error("Token already expired")]
    Expired,

    #[error("Could not persist session: {0}")]
    Storage(#[from] SessionStoreError),
}

/// Query parameters the OAuth redirect lands with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OAuthCallbackParams {
    pub token: Option<String>,
    pub error: Option<String>,
}

pub trait IAcceptOAuthCallbackUseCase: Send + Sync {
    fn execute(
        &self,
        params: OAuthCallbackParams,
        now: DateTime<Utc>,
    ) -> Result<AuthSession, OAuthCallbackError>;
}

#[derive(Clone)]
pub struct AcceptOAuthCallbackUseCase {
    store: Arc<dyn SessionStore>,
}

impl AcceptOAuthCallbackUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

impl IAcceptOAuthCallbackUseCase for AcceptOAuthCallbackUseCase {
    fn execute(
        &self,
        params: OAuthCallbackParams,
        now: DateTime<Utc>,
    ) -> Result<AuthSession, OAuthCallbackError> {
        let token = match (params.token, params.error) {
            (Some(token), _) if !token.trim().is_empty() => token,
            (_, Some(error)) => {
                warn!(error = %error, "OAuth provider returned an error");
                return Err(OAuthCallbackError::Provider(error));
            }
            _ => return Err(OAuthCallbackError::MissingToken),
        };

        let session = AuthSession::from_token(&token, None)?;
        if session.is_expired_at(now) {
            return Err(OAuthCallbackError::Expired);
        }

        self.store.set(SessionKey::Token, &token)?;
        info!(user_id = %session.user_id, "OAuth login stored");
        Ok(session)
    }
}
