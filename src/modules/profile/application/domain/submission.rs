use crate::auth::application::domain::entities::UserId;
use crate::profile::application::domain::entities::ProfileKind;
use crate::profile::application::domain::form::{ProfileForm, ProfileImage};
use crate::shared::http::MultipartBody;

/// Where a save goes: the collection for a new profile, the resource otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update { profile_id: String },
}

/// Full-replace payload. Only newly picked files are uploaded; persisted
/// portfolio images that survive the edit are listed by URL.
pub fn build_profile_body(kind: ProfileKind, form: &ProfileForm, user_id: UserId) -> MultipartBody {
    let scope = kind.form_scope();
    let field = |name: &str| format!("{scope}[{name}]");
    let mut body = MultipartBody::new();

    body.text(field("full_name"), form.full_name.trim());
    body.text(field("phone_number"), form.phone_number.trim());
    match kind {
        ProfileKind::Vendor => {
            body.text(field("second_phone_number"), form.second_phone_number.trim());
        }
        ProfileKind::Customer => body.text(field("gender"), form.gender.trim()),
    }
    body.text(field("address"), form.address.text.trim());
    if let Some(coordinates) = form.address.coordinates {
        body.text(field("latitude"), coordinates.latitude_param());
        body.text(field("longitude"), coordinates.longitude_param());
    }
    body.text(field("user_id"), user_id.to_string());

    if let ProfileImage::Staged(image) = &form.profile_image {
        body.file(field("profile_image"), image);
    }

    if kind == ProfileKind::Vendor {
        for (i, entry) in form.portfolios.iter().enumerate() {
            let prefix = format!("{scope}[vendor_portfolios][{i}]");

            if let Some(id) = &entry.id {
                body.text(format!("{prefix}[id]"), id.as_str());
            }
            body.text(format!("{prefix}[work_experience]"), entry.experience.trim());
            for url in &entry.persisted_images {
                body.text(format!("{prefix}[existing_images][]"), url.as_str());
            }
            for image in &entry.staged_images {
                body.file(format!("{prefix}[work_images][]"), image);
            }
        }
    }

    body
}
