pub mod backend_client;
pub mod multipart;

pub use backend_client::{BackendClient, BackendError};
pub use multipart::{FormPart, MultipartBody};
