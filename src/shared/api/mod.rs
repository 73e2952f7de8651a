pub mod error_body;

pub use error_body::backend_error_message;
