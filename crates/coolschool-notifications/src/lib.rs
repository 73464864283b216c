//! Bounded queue of transient notifications with automatic expiry.
//!
//! [`NotificationQueue`] keeps at most `max_visible` entries in insertion
//! order. Inserting into a full queue evicts the oldest entries, and every
//! entry removes itself once its lifetime elapses. Expiry goes through the
//! same removal path as manual dismissal, so removing an entry that already
//! expired (or was evicted, or cleared) is a harmless no-op.
//!
//! The queue is an explicitly constructed service handle: clone it and pass
//! it to whoever produces or displays notifications. Consumers observe the
//! ordered contents through [`NotificationQueue::snapshot`] or
//! [`NotificationQueue::subscribe`].

use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::Duration;

use coolschool_bridge::config::NotificationConfig;
use coolschool_bridge::notification::{Notification, NotificationId, NotificationKind};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Capacity and lifetime limits of a [`NotificationQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueSettings {
    /// Maximum amount of live entries. Never less than 1.
    pub max_visible: usize,
    /// Lifetime of every entry.
    pub unmount_after: Duration,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self::from(&NotificationConfig::default())
    }
}

impl From<&NotificationConfig> for QueueSettings {
    fn from(config: &NotificationConfig) -> Self {
        Self {
            max_visible: config.max_visible,
            unmount_after: config.unmount_after(),
        }
    }
}

#[derive(Debug)]
struct Entry {
    notification: Notification,
    /// Pending expiry task. `None` when no runtime was available to schedule it.
    timer: Option<AbortHandle>,
}

impl Entry {
    fn cancel_timer(&self) {
        if let Some(timer) = &self.timer {
            timer.abort();
        }
    }
}

#[derive(Debug)]
struct Shared {
    settings: QueueSettings,
    entries: Mutex<VecDeque<Entry>>,
    changes: watch::Sender<Vec<Notification>>,
}

impl Shared {
    fn publish(&self, entries: &VecDeque<Entry>) {
        self.changes.send_replace(
            entries
                .iter()
                .map(|entry| entry.notification.clone())
                .collect(),
        );
    }

    fn remove(&self, id: &NotificationId) -> Option<Notification> {
        let mut entries = self.entries.lock();
        let index = entries.iter().position(|e| &e.notification.id == id)?;
        let entry = entries.remove(index)?;
        entry.cancel_timer();
        self.publish(&entries);
        Some(entry.notification)
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        for entry in self.entries.get_mut().iter() {
            entry.cancel_timer();
        }
    }
}

/// Handle to a bounded, self-expiring notification queue.
///
/// Mutations must happen inside a tokio runtime so that expiry timers can be
/// spawned; outside of one, entries are still inserted but only leave the
/// queue through eviction or explicit removal.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    shared: Arc<Shared>,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(QueueSettings::default())
    }
}

impl NotificationQueue {
    pub fn new(settings: QueueSettings) -> Self {
        let settings = QueueSettings {
            max_visible: settings.max_visible.max(1),
            ..settings
        };
        let (changes, _) = watch::channel(Vec::new());

        Self {
            shared: Arc::new(Shared {
                settings,
                entries: Mutex::new(VecDeque::with_capacity(settings.max_visible)),
                changes,
            }),
        }
    }

    pub fn settings(&self) -> QueueSettings {
        self.shared.settings
    }

    /// Appends a new notification and returns its id.
    ///
    /// If the queue already holds `max_visible` entries, the oldest ones are
    /// evicted first so the new entry always fits. A missing `kind` defaults
    /// to [`NotificationKind::Exception`].
    pub fn add(&self, message: impl Into<String>, kind: Option<NotificationKind>) -> NotificationId {
        let notification = Notification {
            id: NotificationId::generate(),
            message: message.into(),
            kind: kind.unwrap_or_default(),
            expires_after: self.shared.settings.unmount_after,
        };
        let id = notification.id.clone();

        let mut entries = self.shared.entries.lock();
        while entries.len() >= self.shared.settings.max_visible {
            let Some(evicted) = entries.pop_front() else {
                break;
            };
            evicted.cancel_timer();
            log::debug!("Evicted notification {}", evicted.notification.id);
        }

        let timer = self.schedule_expiry(id.clone());
        entries.push_back(Entry {
            notification,
            timer,
        });
        self.shared.publish(&entries);

        id
    }

    /// Removes the notification with the given id. Returns the removed entry,
    /// or `None` if it was already gone.
    pub fn remove(&self, id: &NotificationId) -> Option<Notification> {
        self.shared.remove(id)
    }

    /// Removes every notification.
    pub fn clear(&self) {
        let mut entries = self.shared.entries.lock();
        if entries.is_empty() {
            return;
        }

        for entry in entries.drain(..) {
            entry.cancel_timer();
        }
        self.shared.publish(&entries);
    }

    /// Ordered copy of the live notifications, oldest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.shared
            .entries
            .lock()
            .iter()
            .map(|entry| entry.notification.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.shared.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receiver that observes a fresh snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.shared.changes.subscribe()
    }

    fn schedule_expiry(&self, id: NotificationId) -> Option<AbortHandle> {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                log::warn!("Notification {id} will not expire automatically: {err}");
                return None;
            }
        };

        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let deadline = tokio::time::Instant::now() + self.shared.settings.unmount_after;
        let task = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(shared) = shared.upgrade()
                && shared.remove(&id).is_some()
            {
                log::debug!("Notification {id} expired");
            }
        });

        Some(task.abort_handle())
    }
}
