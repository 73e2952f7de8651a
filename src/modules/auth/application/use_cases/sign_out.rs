use std::sync::Arc;
use tracing::info;

use crate::auth::application::ports::outgoing::session_store::{
    SessionKey, SessionStore, SessionStoreError,
};

pub trait ISignOutUseCase: Send + Sync {
    fn execute(&self) -> Result<(), SessionStoreError>;
}

#[derive(Clone)]
pub struct SignOutUseCase {
    store: Arc<dyn SessionStore>,
}

impl SignOutUseCase {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

impl ISignOutUseCase for SignOutUseCase {
    fn execute(&self) -> Result<(), SessionStoreError> {
        for key in SessionKey::ALL {
            self.store.remove(key)?;
        }
        info!("Signed out");
        Ok(())
    }
}
