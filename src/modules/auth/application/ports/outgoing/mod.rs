pub mod auth_api;
pub mod session_store;

pub use auth_api::{AuthApi, AuthApiError, Credentials, SignInResponse};
pub use session_store::{SessionKey, SessionStore, SessionStoreError};
