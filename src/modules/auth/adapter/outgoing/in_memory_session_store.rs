use std::collections::HashMap;
use std::sync::Mutex;

use crate::auth::application::ports::outgoing::session_store::{
    SessionKey, SessionStore, SessionStoreError,
};

/// Process-local session storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<SessionKey, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<SessionKey, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError> {
        Ok(self.entries().get(&key).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError> {
        self.entries().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError> {
        self.entries().remove(&key);
        Ok(())
    }
}
