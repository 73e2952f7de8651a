use crate::geocoding::application::domain::entities::AddressSelection;
use crate::profile::application::domain::entities::{PortfolioRecord, ProfileRecord};
use crate::shared::media::StagedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Loading,
    /// No profile on the server yet.
    Creating,
    Viewing,
    Editing,
}

impl FormMode {
    pub fn is_editable(&self) -> bool {
        matches!(self, FormMode::Creating | FormMode::Editing)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProfileImage {
    #[default]
    None,
    Persisted(String),
    Staged(StagedImage),
}

impl ProfileImage {
    /// Image source to show: the server URL or the local preview.
    pub fn source(&self) -> Option<&str> {
        match self {
            ProfileImage::None => None,
            ProfileImage::Persisted(url) => Some(url),
            ProfileImage::Staged(image) => Some(&image.preview),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, ProfileImage::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayedImage<'a> {
    Persisted(&'a str),
    Staged(&'a StagedImage),
}

impl<'a> DisplayedImage<'a> {
    /// Borrowed from the entry, not from this value.
    pub fn source(&self) -> &'a str {
        match self {
            DisplayedImage::Persisted(url) => url,
            DisplayedImage::Staged(image) => &image.preview,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioEntry {
    pub id: Option<String>,
    pub experience: String,
    pub persisted_images: Vec<String>,
    pub staged_images: Vec<StagedImage>,
}

impl PortfolioEntry {
    /// Persisted images first, then staged ones.
    pub fn displayed_images(&self) -> Vec<DisplayedImage<'_>> {
        self.persisted_images
            .iter()
            .map(|url| DisplayedImage::Persisted(url))
            .chain(self.staged_images.iter().map(DisplayedImage::Staged))
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.persisted_images.len() + self.staged_images.len()
    }

    /// Remove by position in `displayed_images`. Returns `false` when out of range.
    pub fn remove_image(&mut self, display_index: usize) -> bool {
        let persisted = self.persisted_images.len();
        if display_index < persisted {
            self.persisted_images.remove(display_index);
            return true;
        }

        let staged_index = display_index - persisted;
        if staged_index < self.staged_images.len() {
            self.staged_images.remove(staged_index);
            return true;
        }

        false
    }
}

impl From<&PortfolioRecord> for PortfolioEntry {
    fn from(record: &PortfolioRecord) -> Self {
        Self {
            id: record.id.clone(),
            experience: record.work_experience.clone().unwrap_or_default(),
            persisted_images: record.work_images.clone(),
            staged_images: Vec::new(),
        }
    }
}

/// Everything the user edits. Customer forms leave the vendor-only fields
/// (second phone, portfolios) empty and vice versa for gender.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub profile_id: Option<String>,
    pub full_name: String,
    pub phone_number: String,
    pub second_phone_number: String,
    pub gender: String,
    pub address: AddressSelection,
    pub profile_image: ProfileImage,
    pub portfolios: Vec<PortfolioEntry>,
}

impl From<&ProfileRecord> for ProfileForm {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            profile_id: record.id.clone(),
            full_name: record.full_name.clone().unwrap_or_default(),
            phone_number: record.phone_number.clone().unwrap_or_default(),
            second_phone_number: record.second_phone_number.clone().unwrap_or_default(),
            gender: record.gender.clone().unwrap_or_default(),
            address: AddressSelection {
                text: record.address.clone().unwrap_or_default(),
                coordinates: record.coordinates(),
            },
            profile_image: record
                .profile_image
                .clone()
                .filter(|url| !url.trim().is_empty())
                .map(ProfileImage::Persisted)
                .unwrap_or_default(),
            portfolios: record
                .vendor_portfolios
                .iter()
                .map(PortfolioEntry::from)
                .collect(),
        }
    }
}

impl ProfileForm {
    /// True for a fresh creation form.
    pub fn is_blank(&self) -> bool {
        self == &ProfileForm::default()
    }

    /// Drop portfolio files that have already been uploaded, so a later
    /// save does not append them again. The staged profile image is kept:
    /// re-sending it replaces the stored one.
    pub fn discard_uploaded_images(&mut self) {
        for entry in &mut self.portfolios {
            entry.staged_images.clear();
        }
    }
}
