//! Transient operation-result notifications.
//!
//! A bounded queue of dismissable messages. When full, the oldest entry is
//! dropped to make room.

use serde::Serialize;
use std::collections::VecDeque;

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Operation applied.
    Success,
    /// Operation failed; local state untouched.
    Error,
}

/// A single message for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Handle for [`Notifications::dismiss`].
    pub id: u64,
    /// Severity.
    pub level: NotificationLevel,
    /// Human-readable text.
    pub message: String,
}

/// Ring buffer of notifications (oldest at front, newest at back).
#[derive(Debug)]
pub struct Notifications {
    entries: VecDeque<Notification>,
    capacity: usize,
    next_id: u64,
}

impl Notifications {
    /// Create a queue retaining at most `capacity` entries.
    ///
    /// A capacity of zero accepts pushes but retains nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    /// Append a notification and return its id.
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;

        if self.capacity == 0 {
            return id;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Notification {
            id,
            level,
            message: message.into(),
        });
        id
    }

    /// Shorthand for a `Success` notification.
    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Success, message)
    }

    /// Shorthand for an `Error` notification.
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Error, message)
    }

    /// Remove a notification. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        match self.entries.iter().position(|n| n.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Current notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// Most recent notification.
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    /// Number of retained notifications.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(50)
    }
}
