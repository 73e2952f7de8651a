use base64::Engine;
use std::fmt;
use uuid::Uuid;

/// Rules for images picked on the client before upload.
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    pub max_file_size_bytes: u64,
    pub max_file_name_len: usize,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: Self::DEFAULT_MAX_FILE_SIZE_BYTES,
            max_file_name_len: 255,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    #[error("{file_name} is not a valid image")]
    NotAnImage { file_name: String },

    #[error("{file_name} exceeds {}", size_label(*.max_bytes))]
    TooLarge { file_name: String, max_bytes: u64 },
}

/// `5242880` -> "5MB", `512000` -> "500KB", anything else in bytes.
pub fn size_label(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    match bytes {
        b if b >= MIB && b % MIB == 0 => format!("{}MB", b / MIB),
        b if b >= KIB && b % KIB == 0 => format!("{}KB", b / KIB),
        b => format!("{b} bytes"),
    }
}

impl ImageRejection {
    /// Wording used when the file is the only one in its field.
    pub fn field_message(&self) -> String {
        match self {
            ImageRejection::NotAnImage { .. } => "Please select a valid image file".to_string(),
            ImageRejection::TooLarge { max_bytes, .. } => {
                format!("Image size must be less than {}", size_label(*max_bytes))
            }
        }
    }
}

impl ImagePolicy {
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

    /// Type is judged by file name, like a browser file input does.
    pub fn stage(&self, file_name: &str, bytes: Vec<u8>) -> Result<StagedImage, ImageRejection> {
        let mime_type = mime_guess::from_path(file_name)
            .first()
            .map(|m| m.essence_str().to_string())
            .filter(|m| m.starts_with("image/"))
            .filter(|_| !file_name.is_empty() && file_name.len() <= self.max_file_name_len)
            .ok_or_else(|| ImageRejection::NotAnImage {
                file_name: file_name.to_string(),
            })?;

        if bytes.len() as u64 > self.max_file_size_bytes {
            return Err(ImageRejection::TooLarge {
                file_name: file_name.to_string(),
                max_bytes: self.max_file_size_bytes,
            });
        }

        Ok(StagedImage::new(file_name, mime_type, bytes))
    }
}

/// A file picked locally and not uploaded yet.
#[derive(Clone, PartialEq)]
pub struct StagedImage {
    pub id: Uuid,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// `data:` URL usable as an image source before upload.
    pub preview: String,
}

impl fmt::Debug for StagedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedImage")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl StagedImage {
    fn new(file_name: &str, mime_type: String, bytes: Vec<u8>) -> Self {
        let preview = format!(
            "data:{};base64,{}",
            mime_type,
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );
        Self {
            id: Uuid::new_v4(),
            file_name: file_name.to_string(),
            mime_type,
            bytes,
            preview,
        }
    }
}
