pub mod adapter;
pub mod application;

pub use application::domain::entities::{Notification, NotificationKind};
pub use application::services::notification_service::{ListenerId, NotificationService};
