// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    NOW, create_day_shift, create_test_admin, create_test_cause, create_test_context,
    create_test_nurse, create_test_supervisor, time_off_request,
};
use crate::{
    ApiError, BroadcastAlertRequest, SchedulerConfig, ServiceContext, assign_staff,
    broadcast_alert, check_coverage, clear_notifications, deactivate_staff, delete_notification,
    list_notifications, mark_all_notifications_read, mark_notification_read, submit_request,
};
use shiftdesk_domain::{NotificationPriority, NotificationType, RequestId};
use shiftdesk_persistence::InMemoryRepository;
use time::macros::datetime;

#[test]
fn test_notifications_are_per_recipient_and_newest_first() {
    let mut ctx = create_test_context();
    let day: String = create_day_shift(&mut ctx, 2);
    assign_staff(
        &mut ctx,
        &create_test_supervisor(),
        &day,
        "n1",
        create_test_cause(),
        NOW,
    )
    .unwrap();
    submit_request(
        &mut ctx,
        &create_test_nurse("n1"),
        time_off_request(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let nurse = list_notifications(&ctx, &create_test_nurse("n1"));
    let supervisor = list_notifications(&ctx, &create_test_supervisor());

    assert_eq!(nurse.notifications.len(), 1);
    assert_eq!(
        nurse.notifications[0].notification_type,
        NotificationType::ShiftChange
    );
    assert_eq!(supervisor.unread_count, 1);
    assert_eq!(
        supervisor.notifications[0].notification_type,
        NotificationType::NewRequest
    );
}

#[test]
fn test_mark_read_and_delete() {
    let mut ctx = create_test_context();
    let day: String = create_day_shift(&mut ctx, 2);
    let nurse = create_test_nurse("n1");
    let supervisor = create_test_supervisor();
    assign_staff(&mut ctx, &supervisor, &day, "n1", create_test_cause(), NOW).unwrap();
    let id: String = list_notifications(&ctx, &nurse).notifications[0].id.clone();

    mark_notification_read(&mut ctx, &nurse, &id).unwrap();
    assert_eq!(list_notifications(&ctx, &nurse).unread_count, 0);

    let someone_else = mark_notification_read(&mut ctx, &create_test_nurse("n2"), &id);
    assert!(matches!(
        someone_else,
        Err(ApiError::ResourceNotFound { .. })
    ));

    delete_notification(&mut ctx, &nurse, &id).unwrap();
    assert!(list_notifications(&ctx, &nurse).notifications.is_empty());
}

#[test]
fn test_mark_all_read_and_clear() {
    let mut ctx = create_test_context();
    for _ in 0..3 {
        submit_request(
            &mut ctx,
            &create_test_nurse("n1"),
            time_off_request(),
            create_test_cause(),
            NOW,
        )
        .unwrap();
    }
    let admin = create_test_admin();

    assert_eq!(mark_all_notifications_read(&mut ctx, &admin), 3);
    assert_eq!(list_notifications(&ctx, &admin).unread_count, 0);

    clear_notifications(&mut ctx, &admin);
    assert!(list_notifications(&ctx, &admin).notifications.is_empty());
}

#[test]
fn test_store_keeps_configured_limit() {
    let repository = create_test_context().repository;
    let mut ctx = ServiceContext::<InMemoryRepository>::new(
        repository,
        SchedulerConfig {
            notification_limit: 2,
            ..SchedulerConfig::default()
        },
    );
    for _ in 0..4 {
        submit_request(
            &mut ctx,
            &create_test_nurse("n1"),
            time_off_request(),
            create_test_cause(),
            NOW,
        )
        .unwrap();
    }

    let admin = list_notifications(&ctx, &create_test_admin());

    assert_eq!(admin.notifications.len(), 2);
    assert_eq!(
        admin.notifications[0]
            .metadata
            .request_id
            .as_ref()
            .map(RequestId::value),
        Some("req-4")
    );
}

#[test]
fn test_coverage_scan_alerts_matching_staff() {
    let mut ctx = create_test_context();
    let day: String = create_day_shift(&mut ctx, 2);
    assign_staff(
        &mut ctx,
        &create_test_supervisor(),
        &day,
        "n1",
        create_test_cause(),
        NOW,
    )
    .unwrap();

    // 2026-03-01 20:00 is eleven hours before the 07:00 start
    let alerts = check_coverage(
        &mut ctx,
        &create_test_supervisor(),
        datetime!(2026-03-01 20:00 UTC),
    )
    .unwrap();

    let mut recipients: Vec<String> = alerts.iter().map(|n| n.user_id.to_string()).collect();
    recipients.sort();
    assert_eq!(recipients, vec!["n1", "n2"]);
    assert!(alerts.iter().all(|n| n.priority == NotificationPriority::High));
    assert!(
        alerts
            .iter()
            .all(|n| n.notification_type == NotificationType::CoverageNeeded)
    );
}

#[test]
fn test_coverage_scan_outside_threshold_is_quiet() {
    let mut ctx = create_test_context();
    create_day_shift(&mut ctx, 2);

    let alerts = check_coverage(&mut ctx, &create_test_supervisor(), NOW).unwrap();

    assert!(alerts.is_empty());
}

#[test]
fn test_dispatch_publishes_toasts() {
    let mut ctx = create_test_context();
    let mut toasts = ctx.toasts().subscribe();
    let day: String = create_day_shift(&mut ctx, 2);

    assign_staff(
        &mut ctx,
        &create_test_supervisor(),
        &day,
        "n1",
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let active = toasts.drain_active(NOW);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].notification.user_id.value(), "n1");
    assert_eq!(active[0].expires_at, NOW + time::Duration::seconds(6));

    assign_staff(
        &mut ctx,
        &create_test_supervisor(),
        &day,
        "n2",
        create_test_cause(),
        NOW,
    )
    .unwrap();
    assert!(
        toasts
            .drain_active(NOW + time::Duration::seconds(7))
            .is_empty()
    );
}

#[test]
fn test_out_of_range_toast_ttl_does_not_break_delivery() {
    let repository = create_test_context().repository;
    let mut ctx = ServiceContext::<InMemoryRepository>::new(
        repository,
        SchedulerConfig {
            toast_ttl_secs: u64::MAX,
            ..SchedulerConfig::default()
        },
    );
    let mut toasts = ctx.toasts().subscribe();

    let result = submit_request(
        &mut ctx,
        &create_test_nurse("n1"),
        time_off_request(),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    assert!(!result.notifications.is_empty());
    let active = toasts.drain_active(NOW);
    assert_eq!(active.len(), result.notifications.len());
    assert!(active.iter().all(|toast| toast.expires_at > NOW));
}

#[test]
fn test_repeated_coverage_scan_skips_unread_alerts() {
    let mut ctx = create_test_context();
    create_day_shift(&mut ctx, 2);
    let evening = datetime!(2026-03-01 20:00 UTC);

    let first = check_coverage(&mut ctx, &create_test_supervisor(), evening).unwrap();
    let second = check_coverage(&mut ctx, &create_test_supervisor(), evening).unwrap();

    assert_eq!(first.len(), 2);
    assert!(second.is_empty());
    assert_eq!(
        list_notifications(&ctx, &create_test_nurse("n1"))
            .notifications
            .len(),
        1
    );

    mark_all_notifications_read(&mut ctx, &create_test_nurse("n1"));
    let third = check_coverage(&mut ctx, &create_test_supervisor(), evening).unwrap();

    let recipients: Vec<String> = third.iter().map(|n| n.user_id.to_string()).collect();
    assert_eq!(recipients, vec!["n1"]);
}

fn alert(recipients: &[&str]) -> BroadcastAlertRequest {
    BroadcastAlertRequest {
        title: String::from("Fire drill"),
        message: String::from(" ICU drill at 14:00 "),
        recipients: recipients.iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn test_broadcast_alert_reaches_every_active_staff_member() {
    let mut ctx = create_test_context();

    let sent = broadcast_alert(&mut ctx, &create_test_admin(), alert(&[]), NOW).unwrap();

    let mut recipients: Vec<String> = sent.iter().map(|n| n.user_id.to_string()).collect();
    recipients.sort();
    assert_eq!(recipients, vec!["admin-1", "d1", "n1", "n2", "sup-1"]);
    assert!(
        sent.iter()
            .all(|n| n.notification_type == NotificationType::SystemAlert)
    );
    assert_eq!(sent[0].message, "ICU drill at 14:00");
    assert_eq!(
        list_notifications(&ctx, &create_test_nurse("n1")).unread_count,
        1
    );
}

#[test]
fn test_broadcast_alert_to_named_staff_skips_inactive() {
    let mut ctx = create_test_context();
    deactivate_staff(
        &mut ctx,
        &create_test_admin(),
        "n2",
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let sent = broadcast_alert(
        &mut ctx,
        &create_test_admin(),
        alert(&["n1", "n2", "n1"]),
        NOW,
    )
    .unwrap();

    let recipients: Vec<String> = sent.iter().map(|n| n.user_id.to_string()).collect();
    assert_eq!(recipients, vec!["n1"]);
}

#[test]
fn test_broadcast_alert_requires_system_configuration() {
    let mut ctx = create_test_context();

    let result = broadcast_alert(&mut ctx, &create_test_supervisor(), alert(&[]), NOW);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert!(
        list_notifications(&ctx, &create_test_nurse("n1"))
            .notifications
            .is_empty()
    );
}

#[test]
fn test_broadcast_alert_rejects_blank_text_and_unknown_staff() {
    let mut ctx = create_test_context();
    let mut blank = alert(&[]);
    blank.title = String::from("  ");

    let blank_result = broadcast_alert(&mut ctx, &create_test_admin(), blank, NOW);
    let unknown_result = broadcast_alert(&mut ctx, &create_test_admin(), alert(&["ghost"]), NOW);

    assert!(matches!(
        blank_result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "title"
    ));
    assert!(matches!(
        unknown_result,
        Err(ApiError::ResourceNotFound { .. })
    ));
}
