pub mod fixtures;
pub mod stubs;

use std::sync::{Arc, Mutex};

use crate::notification::{Notification, NotificationService};

/// Collect every notification sent through `service`.
pub fn record_notifications(service: &NotificationService) -> Arc<Mutex<Vec<Notification>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    service.subscribe(move |n| sink.lock().unwrap().push(n.clone()));
    seen
}
