use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

use crate::auth::application::ports::outgoing::session_store::{
    SessionKey, SessionStore, SessionStoreError,
};

/// Session storage persisted as a flat JSON object on disk.
///
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug)]
pub struct JsonFileSessionStore {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    guard: Mutex<()>,
}

impl JsonFileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SessionStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(SessionStoreError::Io(e.to_string())),
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| SessionStoreError::Corrupt(e.to_string()))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SessionStoreError::Io(e.to_string()))?;
        }

        let body = serde_json::to_vec_pretty(entries)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).map_err(|e| SessionStoreError::Io(e.to_string()))?;
        file.write_all(&body)
            .and_then(|_| file.sync_all())
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| SessionStoreError::Io(e.to_string()))?;

        debug!(path = %self.path.display(), keys = entries.len(), "Session store written");
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for JsonFileSessionStore {
    fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError> {
        let _guard = self.lock();
        Ok(self.load()?.remove(key.as_str()))
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError> {
        let _guard = self.lock();
        let mut entries = self.load()?;
        entries.insert(key.as_str().to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError> {
        let _guard = self.lock();
        let mut entries = self.load()?;
        if entries.remove(key.as_str()).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
