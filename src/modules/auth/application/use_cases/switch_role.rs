use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::auth::application::domain::entities::{AuthUser, UserId, UserRole};
use crate::auth::application::ports::outgoing::{
    AuthApi, AuthApiError, SessionKey, SessionStore, SessionStoreError,
};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SwitchRoleError {
    #[error("{0}")]
    Api(#[from] AuthApiError),

    #[error("Could not persist user: {0}")]
    Storage(#[from] SessionStoreError),
}

#[async_trait]
pub trait ISwitchRoleUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId, role: UserRole) -> Result<AuthUser, SwitchRoleError>;
}

#[derive(Clone)]
pub struct SwitchRoleUseCase {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
}

impl SwitchRoleUseCase {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store }
    }
}

#[async_trait]
impl ISwitchRoleUseCase for SwitchRoleUseCase {
    async fn execute(&self, user_id: UserId, role: UserRole) -> Result<AuthUser, SwitchRoleError> {
        let (user, raw_user) = self.api.update_role(user_id, role).await?;
        self.store.set(SessionKey::User, &raw_user.to_string())?;
        info!(user_id = %user_id, role = %role, "Role switched");
        Ok(user)
    }
}
