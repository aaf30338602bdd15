// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    NOW, create_test_admin, create_test_cause, create_test_context, create_test_nurse,
    create_test_supervisor,
};
use crate::{
    ApiError, ApiResult, CreateStaffRequest, StaffResponse, UpdateStaffRequest, create_staff,
    deactivate_staff, get_capabilities, list_activity, list_staff, update_staff,
};
use shiftdesk_domain::{NotificationType, StaffId};
use shiftdesk_persistence::SchedulingRepository;

fn new_nurse_request(email: &str) -> CreateStaffRequest {
    CreateStaffRequest {
        name: String::from("Priya Patel"),
        email: email.to_string(),
        role: String::from("Nurse"),
        department_id: String::from("ICU"),
        certifications: vec![String::from("RN"), String::from(" "), String::from("BLS")],
    }
}

#[test]
fn test_create_staff_allocates_id_and_persists() {
    let mut ctx = create_test_context();

    let result: ApiResult<StaffResponse> = create_staff(
        &mut ctx,
        &create_test_admin(),
        new_nurse_request("priya.patel@hospital.com"),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    assert_eq!(result.response.id, "staff-1");
    assert_eq!(result.response.role, "nurse");
    assert_eq!(result.response.certifications, vec!["BLS", "RN"]);
    assert!(result.audit_event.is_some());
    assert!(
        ctx.repository
            .get_staff(&StaffId::new("staff-1"))
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_create_staff_notifies_admins_and_supervisors() {
    let mut ctx = create_test_context();

    let result = create_staff(
        &mut ctx,
        &create_test_admin(),
        new_nurse_request("priya.patel@hospital.com"),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let mut recipients: Vec<String> = result
        .notifications
        .iter()
        .map(|n| n.user_id.to_string())
        .collect();
    recipients.sort();
    assert_eq!(recipients, vec!["admin-1", "sup-1"]);
    assert!(
        result
            .notifications
            .iter()
            .all(|n| n.notification_type == NotificationType::SystemAlert)
    );
}

#[test]
fn test_nurse_cannot_create_staff() {
    let mut ctx = create_test_context();

    let result = create_staff(
        &mut ctx,
        &create_test_nurse("n1"),
        new_nurse_request("priya.patel@hospital.com"),
        create_test_cause(),
        NOW,
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert_eq!(ctx.repository.list_staff().unwrap().len(), 5);
}

#[test]
fn test_unknown_role_is_invalid_input() {
    let mut ctx = create_test_context();
    let mut request = new_nurse_request("priya.patel@hospital.com");
    request.role = String::from("janitor");

    let result = create_staff(&mut ctx, &create_test_admin(), request, create_test_cause(), NOW);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "role"
    ));
}

#[test]
fn test_duplicate_email_is_rejected_without_side_effects() {
    let mut ctx = create_test_context();

    let result = create_staff(
        &mut ctx,
        &create_test_admin(),
        new_nurse_request("N1@hospital.com"),
        create_test_cause(),
        NOW,
    );

    assert!(result.is_err());
    assert_eq!(ctx.repository.list_staff().unwrap().len(), 5);
    assert!(ctx.repository.list_activity(None).unwrap().is_empty());
}

#[test]
fn test_update_staff_changes_only_given_fields() {
    let mut ctx = create_test_context();

    let result = update_staff(
        &mut ctx,
        &create_test_supervisor(),
        "n1",
        UpdateStaffRequest {
            certifications: Some(vec![
                String::from("RN"),
                String::from("BLS"),
                String::from("CCRN"),
            ]),
            ..UpdateStaffRequest::default()
        },
        create_test_cause(),
        NOW,
    )
    .unwrap();

    assert_eq!(result.response.name, "Emily Rodriguez");
    assert_eq!(result.response.certifications, vec!["BLS", "CCRN", "RN"]);
}

#[test]
fn test_only_admin_may_deactivate() {
    let mut ctx = create_test_context();

    let refused = deactivate_staff(
        &mut ctx,
        &create_test_supervisor(),
        "n2",
        create_test_cause(),
        NOW,
    );
    let done = deactivate_staff(&mut ctx, &create_test_admin(), "n2", create_test_cause(), NOW)
        .unwrap();

    assert!(matches!(refused, Err(ApiError::Unauthorized { .. })));
    assert!(!done.response.is_active);
    let active: Vec<StaffResponse> = list_staff(&ctx, &create_test_admin(), false).unwrap();
    let everyone: Vec<StaffResponse> = list_staff(&ctx, &create_test_admin(), true).unwrap();
    assert_eq!(active.len(), 4);
    assert_eq!(everyone.len(), 5);
}

#[test]
fn test_deactivated_staff_lose_access() {
    let mut ctx = create_test_context();
    deactivate_staff(&mut ctx, &create_test_admin(), "n2", create_test_cause(), NOW).unwrap();

    let listing = list_staff(&ctx, &create_test_nurse("n2"), false);
    let caps = get_capabilities(&ctx, &create_test_nurse("n2")).unwrap();

    assert!(matches!(listing, Err(ApiError::Unauthorized { .. })));
    assert!(caps.granted.is_empty());
}

#[test]
fn test_activity_feed_is_restricted_to_log_viewers() {
    let mut ctx = create_test_context();
    create_staff(
        &mut ctx,
        &create_test_admin(),
        new_nurse_request("priya.patel@hospital.com"),
        create_test_cause(),
        NOW,
    )
    .unwrap();

    let feed = list_activity(&ctx, &create_test_admin(), Some(10)).unwrap();
    let refused = list_activity(&ctx, &create_test_supervisor(), None);

    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].action, "CreateStaff");
    assert_eq!(feed[0].description, "New staff member added: Priya Patel");
    assert_eq!(feed[0].actor_id, "admin-1");
    assert!(matches!(refused, Err(ApiError::Unauthorized { .. })));
}
