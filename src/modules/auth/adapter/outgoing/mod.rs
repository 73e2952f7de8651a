pub mod auth_api_http;
pub mod in_memory_session_store;
pub mod json_file_session_store;

pub use auth_api_http::HttpAuthApi;
pub use in_memory_session_store::InMemorySessionStore;
pub use json_file_session_store::JsonFileSessionStore;
