//! Ephemeral, client-only notifications.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Maximum number of notifications retained.
const CAPACITY: usize = 5;

/// A short-lived message about a completed action.
///
/// Never persisted; the buffer starts empty on every process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonically increasing within one buffer.
    pub id: u64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Ring buffer of the most recent notifications, newest first.
#[derive(Debug, Default)]
pub struct NotificationBuffer {
    entries: VecDeque<Notification>,
    next_id: u64,
}

impl NotificationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message, evicting the oldest entry beyond the cap.
    pub fn push(&mut self, message: impl Into<String>) {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_front(Notification {
            id,
            message: message.into(),
            timestamp: Utc::now(),
        });
        self.entries.truncate(CAPACITY);
    }

    /// Notifications, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
