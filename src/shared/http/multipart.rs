use reqwest::multipart::{Form, Part};

use crate::shared::http::BackendError;
use crate::shared::media::StagedImage;

#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Ordered multipart payload, kept as plain data until it is sent so it can
/// be inspected in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartBody {
    parts: Vec<FormPart>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn file(&mut self, name: impl Into<String>, image: &StagedImage) {
        self.parts.push(FormPart::File {
            name: name.into(),
            file_name: image.file_name.clone(),
            mime_type: image.mime_type.clone(),
            bytes: image.bytes.clone(),
        });
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.text_values(name).into_iter().next()
    }

    pub fn text_values(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn file_names(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                FormPart::File {
                    name: n, file_name, ..
                } if n == name => Some(file_name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn into_form(self) -> Result<Form, BackendError> {
        let mut form = Form::new();
        for part in self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    mime_type,
                    bytes,
                } => {
                    let file = Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&mime_type)
                        .map_err(|e| BackendError::InvalidRequest(e.to_string()))?;
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::media::ImagePolicy;

    #[test]
    fn test_lookup_by_name_preserves_order() {
        let image = ImagePolicy::default().stage("a.png", vec![1]).unwrap();
        let mut body = MultipartBody::new();
        body.text("tags[]", "one");
        body.file("photos[]", &image);
        body.text("tags[]", "two");

        assert_eq!(body.text_values("tags[]"), vec!["one", "two"]);
        assert_eq!(body.text_value("tags[]"), Some("one"));
        assert_eq!(body.file_names("photos[]"), vec!["a.png"]);
        assert_eq!(body.parts()[1].name(), "photos[]");
    }

    #[test]
    fn test_into_form_accepts_staged_files() {
        let image = ImagePolicy::default().stage("a.jpg", vec![1, 2]).unwrap();
        let mut body = MultipartBody::new();
        body.text("name", "x");
        body.file("cover", &image);

        assert!(body.into_form().is_ok());
    }
}
