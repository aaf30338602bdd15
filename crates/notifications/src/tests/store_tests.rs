// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_notification;
use crate::{DEFAULT_NOTIFICATION_LIMIT, NotificationSink, NotificationStore};
use shiftdesk_domain::{NotificationType, ShiftId, StaffId};

#[test]
fn test_newest_notification_comes_first() {
    let mut store = NotificationStore::default();
    store.deliver(create_notification("notif-1", "n1"));
    store.deliver(create_notification("notif-2", "n1"));

    let ids: Vec<&str> = store
        .for_user(&StaffId::new("n1"))
        .iter()
        .map(|n| n.id.as_str())
        .collect();

    assert_eq!(ids, vec!["notif-2", "notif-1"]);
}

#[test]
fn test_store_is_bounded_and_evicts_oldest() {
    let mut store = NotificationStore::default();
    for i in 0..(DEFAULT_NOTIFICATION_LIMIT + 5) {
        store.deliver(create_notification(&format!("notif-{i}"), "n1"));
    }

    let list = store.for_user(&StaffId::new("n1"));

    assert_eq!(list.len(), DEFAULT_NOTIFICATION_LIMIT);
    assert_eq!(list[0].id, format!("notif-{}", DEFAULT_NOTIFICATION_LIMIT + 4));
    assert!(list.iter().all(|n| n.id != "notif-4"));
    assert!(list.iter().any(|n| n.id == "notif-5"));
}

#[test]
fn test_recipients_are_kept_apart() {
    let mut store = NotificationStore::new(10);
    store.deliver(create_notification("notif-1", "n1"));
    store.deliver(create_notification("notif-2", "n2"));

    assert_eq!(store.for_user(&StaffId::new("n1")).len(), 1);
    assert_eq!(store.for_user(&StaffId::new("n2")).len(), 1);
    assert!(store.for_user(&StaffId::new("n3")).is_empty());
}

#[test]
fn test_mark_read_and_unread_count() {
    let mut store = NotificationStore::default();
    store.deliver(create_notification("notif-1", "n1"));
    store.deliver(create_notification("notif-2", "n1"));
    let user = StaffId::new("n1");

    assert_eq!(store.unread_count(&user), 2);
    assert!(store.mark_read(&user, "notif-1"));
    assert!(!store.mark_read(&user, "missing"));
    assert_eq!(store.unread_count(&user), 1);
}

#[test]
fn test_mark_all_read_reports_changed_count() {
    let mut store = NotificationStore::default();
    store.deliver(create_notification("notif-1", "n1"));
    store.deliver(create_notification("notif-2", "n1"));
    let user = StaffId::new("n1");
    store.mark_read(&user, "notif-2");

    assert_eq!(store.mark_all_read(&user), 1);
    assert_eq!(store.unread_count(&user), 0);
    assert_eq!(store.mark_all_read(&StaffId::new("nobody")), 0);
}

#[test]
fn test_delete_and_clear() {
    let mut store = NotificationStore::default();
    store.deliver(create_notification("notif-1", "n1"));
    store.deliver(create_notification("notif-2", "n1"));
    let user = StaffId::new("n1");

    assert!(store.delete(&user, "notif-1"));
    assert!(!store.delete(&user, "notif-1"));
    assert_eq!(store.for_user(&user).len(), 1);

    store.clear(&user);
    assert!(store.for_user(&user).is_empty());
}

#[test]
fn test_zero_limit_keeps_one() {
    let mut store = NotificationStore::new(0);
    store.deliver(create_notification("notif-1", "n1"));
    store.deliver(create_notification("notif-2", "n1"));

    assert_eq!(store.limit(), 1);
    assert_eq!(store.for_user(&StaffId::new("n1"))[0].id, "notif-2");
}

#[test]
fn test_unread_coverage_is_tracked_per_shift() {
    let mut store = NotificationStore::default();
    let mut alert = create_notification("notif-1", "n1");
    alert.notification_type = NotificationType::CoverageNeeded;
    alert.metadata.shift_id = Some(ShiftId::new("day"));
    store.deliver(alert);
    let user = StaffId::new("n1");

    assert!(store.has_unread_coverage(&user, &ShiftId::new("day")));
    assert!(!store.has_unread_coverage(&user, &ShiftId::new("night")));
    assert!(!store.has_unread_coverage(&StaffId::new("n2"), &ShiftId::new("day")));

    store.mark_read(&user, "notif-1");
    assert!(!store.has_unread_coverage(&user, &ShiftId::new("day")));
}
