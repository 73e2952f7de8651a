use tracing::{error, info};

use crate::notification::application::domain::entities::{Notification, NotificationKind};
use crate::notification::application::services::notification_service::{
    ListenerId, NotificationService,
};

fn log_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Success => info!(text = %notification.message, "notification"),
        NotificationKind::Error => error!(text = %notification.message, "notification"),
    }
}

/// Mirror every notification into the log.
pub fn attach(service: &NotificationService) -> ListenerId {
    service.subscribe(log_notification)
}
