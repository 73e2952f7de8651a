pub mod profile_form_controller;
pub mod user_profile_context;

pub use profile_form_controller::ProfileFormController;
pub use user_profile_context::UserProfileContext;
