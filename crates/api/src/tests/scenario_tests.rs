// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end flows through the service boundary.

use super::helpers::{
    NOW, create_day_shift, create_icu_shift, create_test_admin, create_test_cause,
    create_test_context, create_test_nurse, create_test_supervisor, time_off_request,
};
use crate::{
    ApiError, ShiftFilter, approve_request, assign_staff, list_activity, list_notifications,
    list_shifts, reject_request, submit_request, validate_assignment,
};
use shiftdesk_domain::NotificationType;
use time::macros::datetime;

#[test]
fn test_overlapping_evening_shift_is_refused_for_assigned_nurse() {
    let mut ctx = create_test_context();
    let supervisor = create_test_supervisor();
    let day: String = create_day_shift(&mut ctx, 1);
    let evening: String = create_icu_shift(
        &mut ctx,
        datetime!(2026-03-02 14:00 UTC),
        datetime!(2026-03-02 22:00 UTC),
        1,
    );

    let check = validate_assignment(&ctx, &supervisor, &day, "n1").unwrap();
    assert!(check.is_valid);
    let assigned = assign_staff(&mut ctx, &supervisor, &day, "n1", create_test_cause(), NOW)
        .unwrap();
    assert_eq!(assigned.response.status, "filled");

    let check = validate_assignment(&ctx, &supervisor, &evening, "n1").unwrap();
    assert!(!check.is_valid);
    assert_eq!(check.reasons, vec![String::from("overlapping shift")]);

    let result = assign_staff(
        &mut ctx,
        &supervisor,
        &evening,
        "n1",
        create_test_cause(),
        NOW,
    );
    assert_eq!(
        result,
        Err(ApiError::ValidationFailed {
            reasons: vec![String::from("overlapping shift")],
        })
    );

    let shifts = list_shifts(&ctx, &supervisor, &ShiftFilter::default()).unwrap();
    let evening_shift = shifts.iter().find(|s| s.id == evening).unwrap();
    assert!(evening_shift.assigned_staff.is_empty());
    assert_eq!(evening_shift.status, "open");
}

#[test]
fn test_time_off_is_approved_once() {
    let mut ctx = create_test_context();
    let nurse = create_test_nurse("n1");
    let supervisor = create_test_supervisor();

    let submitted = submit_request(
        &mut ctx,
        &nurse,
        time_off_request(),
        create_test_cause(),
        NOW,
    )
    .unwrap();
    let request_id: String = submitted.response.id;

    let approved = approve_request(
        &mut ctx,
        &supervisor,
        &request_id,
        None,
        create_test_cause(),
        datetime!(2026-03-01 10:00 UTC),
    )
    .unwrap();
    assert_eq!(approved.response.status, "approved");
    assert_eq!(approved.response.reviewed_by.as_deref(), Some("sup-1"));
    assert_eq!(approved.response.review_notes, None);

    let inbox = list_notifications(&ctx, &nurse);
    assert_eq!(inbox.unread_count, 1);
    assert_eq!(
        inbox.notifications[0].notification_type,
        NotificationType::RequestApproved
    );

    let second = reject_request(
        &mut ctx,
        &supervisor,
        &request_id,
        String::from("Changed my mind"),
        create_test_cause(),
        datetime!(2026-03-01 11:00 UTC),
    );
    assert!(matches!(second, Err(ApiError::InvalidState { .. })));

    let activity = list_activity(&ctx, &create_test_admin(), None).unwrap();
    let actions: Vec<&str> = activity.iter().map(|a| a.action.as_str()).collect();
    assert_eq!(actions, vec!["ApproveRequest", "SubmitRequest"]);
}
