use std::fmt;

/// Keys the client keeps in local persisted storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Token,
    FullName,
    User,
}

impl SessionKey {
    pub const ALL: [SessionKey; 3] = [SessionKey::Token, SessionKey::FullName, SessionKey::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Token => "token",
            SessionKey::FullName => "full_name",
            SessionKey::User => "user",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SessionStoreError {
    #[error("Session storage I/O error: {0}")]
    Io(String),

    #[error("Session storage is corrupt: {0}")]
    Corrupt(String),
}

/// Local key-value storage for the auth token and cached user fields.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: SessionKey) -> Result<Option<String>, SessionStoreError>;
    fn set(&self, key: SessionKey, value: &str) -> Result<(), SessionStoreError>;
    fn remove(&self, key: SessionKey) -> Result<(), SessionStoreError>;
}
