// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_activity, create_request, create_shift, create_staff};
use crate::{IdKind, InMemoryRepository, PersistenceError, SchedulingDocument, SchedulingRepository};
use shiftdesk::State;
use shiftdesk_domain::{ShiftId, StaffId, StaffMember};
use time::macros::datetime;

#[test]
fn test_insert_and_get_staff() {
    let mut repo = InMemoryRepository::new();
    repo.insert_staff(&create_staff("n1")).unwrap();

    let loaded: Option<StaffMember> = repo.get_staff(&StaffId::new("n1")).unwrap();

    assert_eq!(loaded, Some(create_staff("n1")));
    assert_eq!(repo.get_staff(&StaffId::new("n2")).unwrap(), None);
}

#[test]
fn test_duplicate_insert_is_rejected() {
    let mut repo = InMemoryRepository::new();
    repo.insert_shift(&create_shift("day")).unwrap();

    let result = repo.insert_shift(&create_shift("day"));

    assert!(matches!(
        result,
        Err(PersistenceError::Duplicate { entity: "shift", ref id }) if id == "day"
    ));
    assert_eq!(repo.list_shifts().unwrap().len(), 1);
}

#[test]
fn test_update_replaces_record() {
    let mut repo = InMemoryRepository::new();
    repo.insert_staff(&create_staff("n1")).unwrap();

    let mut changed: StaffMember = create_staff("n1");
    changed.name = String::from("Emily Rodriguez");
    repo.update_staff(&changed).unwrap();

    assert_eq!(
        repo.get_staff(&StaffId::new("n1")).unwrap().unwrap().name,
        "Emily Rodriguez"
    );
}

#[test]
fn test_update_unknown_record_is_not_found() {
    let mut repo = InMemoryRepository::new();

    let result = repo.update_request(&create_request("req-1", "n1"));

    assert!(matches!(
        result,
        Err(PersistenceError::NotFound {
            entity: "request",
            ..
        })
    ));
}

#[test]
fn test_delete_removes_only_the_named_record() {
    let mut repo = InMemoryRepository::new();
    repo.insert_shift(&create_shift("day")).unwrap();
    repo.insert_shift(&create_shift("night")).unwrap();

    repo.delete_shift(&ShiftId::new("day")).unwrap();

    let remaining: Vec<String> = repo
        .list_shifts()
        .unwrap()
        .iter()
        .map(|s| s.id.to_string())
        .collect();
    assert_eq!(remaining, vec![String::from("night")]);
    assert!(repo.delete_shift(&ShiftId::new("day")).is_err());
}

#[test]
fn test_allocated_ids_are_sequential_per_kind() {
    let mut repo = InMemoryRepository::new();

    assert_eq!(repo.allocate_id(IdKind::Staff).unwrap(), "staff-1");
    assert_eq!(repo.allocate_id(IdKind::Staff).unwrap(), "staff-2");
    assert_eq!(repo.allocate_id(IdKind::Shift).unwrap(), "shift-1");
    assert_eq!(repo.allocate_id(IdKind::Request).unwrap(), "req-1");
}

#[test]
fn test_allocation_skips_ids_already_in_use() {
    let mut repo = InMemoryRepository::new();
    repo.insert_staff(&create_staff("staff-1")).unwrap();
    repo.insert_staff(&create_staff("staff-2")).unwrap();

    let id: StaffId = repo.next_staff_id().unwrap();

    assert_eq!(id, StaffId::new("staff-3"));
}

#[test]
fn test_activity_is_listed_newest_first_with_limit() {
    let mut repo = InMemoryRepository::new();
    repo.append_activity(&create_activity("CreateShift", datetime!(2026-03-01 09:00 UTC)))
        .unwrap();
    repo.append_activity(&create_activity("AssignStaff", datetime!(2026-03-01 09:05 UTC)))
        .unwrap();
    repo.append_activity(&create_activity("CancelShift", datetime!(2026-03-01 09:10 UTC)))
        .unwrap();

    let all: Vec<String> = repo
        .list_activity(None)
        .unwrap()
        .into_iter()
        .map(|e| e.action.name)
        .collect();
    let recent = repo.list_activity(Some(2)).unwrap();

    assert_eq!(all, vec!["CancelShift", "AssignStaff", "CreateShift"]);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].action.name, "CancelShift");
}

#[test]
fn test_load_state_contains_every_record() {
    let mut repo = InMemoryRepository::new();
    repo.insert_staff(&create_staff("n1")).unwrap();
    repo.insert_shift(&create_shift("day")).unwrap();
    repo.insert_request(&create_request("req-1", "n1")).unwrap();

    let state: State = repo.load_state().unwrap();

    assert!(state.find_staff(&StaffId::new("n1")).is_some());
    assert!(state.find_shift(&ShiftId::new("day")).is_some());
    assert_eq!(state.requests.len(), 1);
}

#[test]
fn test_from_document_keeps_counters() {
    let mut document = SchedulingDocument::default();
    document.counters.shift = 7;
    let mut repo = InMemoryRepository::from_document(document);

    assert_eq!(repo.allocate_id(IdKind::Shift).unwrap(), "shift-8");
}

#[test]
fn test_commit_writes_diff_and_activity() {
    let mut repo = InMemoryRepository::new();
    repo.insert_staff(&create_staff("n1")).unwrap();
    repo.insert_shift(&create_shift("day")).unwrap();
    let before: State = repo.load_state().unwrap();
    let mut after: State = before.clone();
    after.shifts[0].add_assignee(StaffId::new("n1"), datetime!(2026-03-01 09:00 UTC));
    after.staff.push(create_staff("n2"));

    repo.commit(
        &before,
        &after,
        &create_activity("AssignStaff", datetime!(2026-03-01 09:00 UTC)),
    )
    .unwrap();

    assert_eq!(repo.load_state().unwrap(), after);
    assert_eq!(repo.list_activity(None).unwrap().len(), 1);
}

#[test]
fn test_commit_failing_midway_keeps_nothing() {
    let mut repo = InMemoryRepository::new();
    repo.insert_shift(&create_shift("day")).unwrap();
    // `before` does not know about the stored shift, so inserting it again
    // fails after the new staff member has been written.
    let before: State = State::default();
    let after: State = State::new(
        vec![create_staff("n2")],
        vec![create_shift("day")],
        Vec::new(),
    );

    let result = repo.commit(
        &before,
        &after,
        &create_activity("CreateShift", datetime!(2026-03-01 09:00 UTC)),
    );

    assert!(matches!(result, Err(PersistenceError::Duplicate { .. })));
    assert!(repo.get_staff(&StaffId::new("n2")).unwrap().is_none());
    assert!(repo.list_activity(None).unwrap().is_empty());
}
