// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftdesk_domain::{Notification, NotificationType, ShiftId, StaffId};
use std::collections::{HashMap, VecDeque};

/// Notifications kept per recipient before the oldest are evicted.
pub const DEFAULT_NOTIFICATION_LIMIT: usize = 50;

/// Receives notifications produced by the dispatcher.
pub trait NotificationSink {
    /// Accepts one notification for its recipient.
    fn deliver(&mut self, notification: Notification);
}

/// A bounded, newest-first notification list per recipient.
#[derive(Debug, Clone)]
pub struct NotificationStore {
    limit: usize,
    by_user: HashMap<StaffId, VecDeque<Notification>>,
}

impl NotificationStore {
    /// Creates a store keeping at most `limit` notifications per recipient.
    ///
    /// A limit of zero is treated as one.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            by_user: HashMap::new(),
        }
    }

    /// Returns the per-recipient limit.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns a recipient's notifications, newest first.
    #[must_use]
    pub fn for_user(&self, user_id: &StaffId) -> Vec<&Notification> {
        self.by_user
            .get(user_id)
            .map(|list| list.iter().collect())
            .unwrap_or_default()
    }

    /// Returns how many of a recipient's notifications are unread.
    #[must_use]
    pub fn unread_count(&self, user_id: &StaffId) -> usize {
        self.by_user
            .get(user_id)
            .map_or(0, |list| list.iter().filter(|n| !n.is_read).count())
    }

    /// Returns true if the recipient still has an unread coverage alert for
    /// `shift_id`.
    #[must_use]
    pub fn has_unread_coverage(&self, user_id: &StaffId, shift_id: &ShiftId) -> bool {
        self.by_user.get(user_id).is_some_and(|list| {
            list.iter().any(|n| {
                !n.is_read
                    && n.notification_type == NotificationType::CoverageNeeded
                    && n.metadata.shift_id.as_ref() == Some(shift_id)
            })
        })
    }

    /// Marks one notification read. Returns false if it does not exist.
    pub fn mark_read(&mut self, user_id: &StaffId, notification_id: &str) -> bool {
        let found: Option<&mut Notification> = self
            .by_user
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|n| n.id == notification_id));
        if let Some(notification) = found {
            notification.is_read = true;
            return true;
        }
        false
    }

    /// Marks all of a recipient's notifications read and returns how many changed.
    pub fn mark_all_read(&mut self, user_id: &StaffId) -> usize {
        let Some(list) = self.by_user.get_mut(user_id) else {
            return 0;
        };
        let mut changed: usize = 0;
        for notification in list.iter_mut().filter(|n| !n.is_read) {
            notification.is_read = true;
            changed += 1;
        }
        changed
    }

    /// Deletes one notification. Returns false if it does not exist.
    pub fn delete(&mut self, user_id: &StaffId, notification_id: &str) -> bool {
        let Some(list) = self.by_user.get_mut(user_id) else {
            return false;
        };
        let before: usize = list.len();
        list.retain(|n| n.id != notification_id);
        before != list.len()
    }

    /// Removes every notification for a recipient.
    pub fn clear(&mut self, user_id: &StaffId) {
        self.by_user.remove(user_id);
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_LIMIT)
    }
}

impl NotificationSink for NotificationStore {
    fn deliver(&mut self, notification: Notification) {
        let list: &mut VecDeque<Notification> =
            self.by_user.entry(notification.user_id.clone()).or_default();
        list.push_front(notification);
        list.truncate(self.limit);
    }
}
