use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use crate::notification::application::domain::entities::Notification;

type Listener = Arc<dyn Fn(&Notification) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

/// In-process publish/subscribe for user-facing messages.
///
/// Clones share one listener list. `global()` hands out the process-wide
/// instance; tests build private ones with `new()`.
#[derive(Clone, Default)]
pub struct NotificationService {
    listeners: Arc<Mutex<Listeners>>,
}

impl fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationService")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

static GLOBAL: OnceLock<NotificationService> = OnceLock::new();

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global() -> &'static NotificationService {
        GLOBAL.get_or_init(NotificationService::new)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Listeners> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let mut listeners = self.lock();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if the listener was already gone.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.entries.len();
        listeners.entries.retain(|(existing, _)| *existing != id);
        listeners.entries.len() != before
    }

    /// Deliver to every current listener, in subscription order.
    pub fn notify(&self, notification: Notification) {
        // Snapshot so listeners may (un)subscribe while being called.
        let snapshot: Vec<Listener> = self
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(&notification);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().entries.len()
    }
}
