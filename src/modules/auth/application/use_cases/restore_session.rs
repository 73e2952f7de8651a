use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::application::domain::entities::AuthSession;
use crate::auth::application::ports::outgoing::session_store::{SessionKey, SessionStore};

// Interface for RestoreSession use case
pub trait IRestoreSessionUseCase: Send + Sync {
    /// `None` means logged out. Storage and token problems never surface as
    /// errors; they downgrade to a logged-out state.
    fn execute(&self, now: DateTime<Utc>) -> Option<AuthSession>;
}

#[derive(Clone)]
pub struct RestoreSessionUseCase {
    store: Arc<dyn SessionStore>,
}

impl RestoreSessionUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    fn forget_login(&self) {
        for key in [SessionKey::Token, SessionKey::FullName] {
            if let Err(e) = self.store.remove(key) {
                warn!(key = %key, error = %e, "Failed to clear session key");
            }
        }
    }
}

impl IRestoreSessionUseCase for RestoreSessionUseCase {
    fn execute(&self, now: DateTime<Utc>) -> Option<AuthSession> {
        let token = match self.store.get(SessionKey::Token) {
            Ok(Some(token)) if !token.trim().is_empty() => token,
            Ok(_) => return None,
            Err(e) => {
                warn!(error = %e, "Session store unreadable, treating as logged out");
                return None;
            }
        };

        let full_name = self.store.get(SessionKey::FullName).ok().flatten();

        let session = match AuthSession::from_token(&token, full_name) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Stored token is invalid");
                return None;
            }
        };

        if session.is_expired_at(now) {
            info!(user_id = %session.user_id, "Token expired");
            self.forget_login();
            return None;
        }

        Some(session)
    }
}
