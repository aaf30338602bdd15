// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ephemeral toast notifications.
//!
//! Toasts are a best-effort mirror of stored notifications for whoever
//! is watching right now. They expire on their own and are never
//! authoritative: the notification store is.

use serde::{Deserialize, Serialize};
use shiftdesk_domain::Notification;
use time::{Duration, OffsetDateTime};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::{debug, warn};

/// Maximum number of toasts to buffer in the broadcast channel.
/// Receivers that fall further behind lose the oldest toasts.
const TOAST_BUFFER_SIZE: usize = 100;

/// How long a toast stays visible by default.
pub const DEFAULT_TOAST_TTL: Duration = Duration::seconds(6);

/// A notification shown briefly to an online recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub notification: Notification,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl Toast {
    /// Returns true once the toast should no longer be shown.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        now >= self.expires_at
    }
}

/// Broadcaster for toasts.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast`. Sending
/// never blocks and never fails the caller.
#[derive(Debug, Clone)]
pub struct ToastChannel {
    tx: broadcast::Sender<Toast>,
    ttl: Duration,
}

impl ToastChannel {
    /// Creates a channel whose toasts expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let (tx, _rx) = broadcast::channel(TOAST_BUFFER_SIZE);
        Self { tx, ttl }
    }

    /// Returns the toast lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Publishes a toast for `notification`.
    ///
    /// If nobody is subscribed the toast is silently dropped. An expiry past
    /// the representable range is clamped to the latest instant.
    pub fn publish(&self, notification: &Notification, now: OffsetDateTime) {
        let toast: Toast = Toast {
            notification: notification.clone(),
            expires_at: now.saturating_add(self.ttl),
        };
        match self.tx.send(toast) {
            Ok(count) => {
                debug!(
                    notification_id = %notification.id,
                    receivers = count,
                    "Published toast"
                );
            }
            Err(_) => {
                // No receivers, which is fine
                debug!(notification_id = %notification.id, "No receivers for toast");
            }
        }
    }

    /// Subscribes to future toasts.
    ///
    /// Toasts published before subscription are not received.
    #[must_use]
    pub fn subscribe(&self) -> ToastReceiver {
        ToastReceiver {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ToastChannel {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

/// The receiving side of a [`ToastChannel`].
#[derive(Debug)]
pub struct ToastReceiver {
    rx: broadcast::Receiver<Toast>,
}

impl ToastReceiver {
    /// Waits for the next toast.
    ///
    /// Returns `None` once every sender is gone. Toasts lost to lag are
    /// skipped.
    pub async fn recv(&mut self) -> Option<Toast> {
        loop {
            match self.rx.recv().await {
                Ok(toast) => return Some(toast),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Toast receiver lagged, dropping oldest toasts");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Takes every toast already queued that has not expired at `now`.
    pub fn drain_active(&mut self, now: OffsetDateTime) -> Vec<Toast> {
        let mut active: Vec<Toast> = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(toast) if toast.is_expired(now) => {
                    debug!(notification_id = %toast.notification.id, "Dropping expired toast");
                }
                Ok(toast) => active.push(toast),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Toast receiver lagged, dropping oldest toasts");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        active
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shiftdesk_domain::{NotificationMetadata, NotificationPriority, NotificationType, StaffId};
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-03-01 09:00 UTC);

    fn create_notification(id: &str) -> Notification {
        Notification {
            id: id.to_string(),
            notification_type: NotificationType::ShiftChange,
            title: String::from("New shift assignment"),
            message: String::from("You have been assigned"),
            timestamp: NOW,
            is_read: false,
            user_id: StaffId::new("n1"),
            priority: NotificationPriority::Medium,
            action_url: None,
            metadata: NotificationMetadata::default(),
        }
    }

    #[test]
    fn test_publish_no_receivers() {
        let channel = ToastChannel::default();
        // Should not panic when no receivers
        channel.publish(&create_notification("notif-1"), NOW);
    }

    #[test]
    fn test_toast_expires_after_ttl() {
        let channel = ToastChannel::default();
        let mut rx = channel.subscribe();

        channel.publish(&create_notification("notif-1"), NOW);

        let toasts = rx.drain_active(NOW + Duration::seconds(5));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].expires_at, NOW + DEFAULT_TOAST_TTL);
        assert!(toasts[0].is_expired(NOW + Duration::seconds(6)));
    }

    #[test]
    fn test_huge_ttl_clamps_expiry() {
        let channel = ToastChannel::new(Duration::MAX);
        let mut rx = channel.subscribe();

        channel.publish(&create_notification("notif-1"), NOW);

        let toasts = rx.drain_active(NOW + Duration::days(365));
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].expires_at > NOW);
    }

    #[test]
    fn test_drain_skips_expired_toasts() {
        let channel = ToastChannel::new(Duration::seconds(2));
        let mut rx = channel.subscribe();

        channel.publish(&create_notification("notif-1"), NOW);
        channel.publish(&create_notification("notif-2"), NOW + Duration::seconds(5));

        let toasts = rx.drain_active(NOW + Duration::seconds(6));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].notification.id, "notif-2");
    }

    #[test]
    fn test_multiple_receivers() {
        let channel = ToastChannel::default();
        let mut rx1 = channel.subscribe();
        let mut rx2 = channel.subscribe();

        channel.publish(&create_notification("notif-1"), NOW);

        assert_eq!(rx1.drain_active(NOW).len(), 1);
        assert_eq!(rx2.drain_active(NOW).len(), 1);
    }

    #[test]
    fn test_lagging_receiver_keeps_newest() {
        let channel = ToastChannel::default();
        let mut rx = channel.subscribe();
        let sent: usize = TOAST_BUFFER_SIZE * 3;

        for i in 0..sent {
            channel.publish(&create_notification(&format!("notif-{i}")), NOW);
        }

        let toasts = rx.drain_active(NOW);
        assert!(toasts.len() >= TOAST_BUFFER_SIZE);
        assert!(toasts.len() < sent);
        assert_eq!(
            toasts.last().unwrap().notification.id,
            format!("notif-{}", sent - 1)
        );
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_channel_dropped() {
        let channel = ToastChannel::default();
        let mut rx = channel.subscribe();
        channel.publish(&create_notification("notif-1"), NOW);
        drop(channel);

        assert_eq!(rx.recv().await.unwrap().notification.id, "notif-1");
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_toast_serialization() {
        let toast = Toast {
            notification: create_notification("notif-1"),
            expires_at: NOW + DEFAULT_TOAST_TTL,
        };

        let json = serde_json::to_string(&toast).unwrap();
        let deserialized: Toast = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, toast);
    }
}
