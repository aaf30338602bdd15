// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftdesk_audit::{Action, Actor, AuditEvent, AuditSubject, Cause, StateSnapshot};
use shiftdesk_domain::{
    DepartmentId, Request, RequestId, RequestType, Role, Shift, ShiftId, StaffId, StaffMember,
    TimeWindow,
};
use std::collections::BTreeSet;
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub fn create_staff(id: &str) -> StaffMember {
    StaffMember::new(
        StaffId::new(id),
        &format!("Staff {id}"),
        &format!("{id}@hospital.com"),
        Role::Nurse,
        DepartmentId::new("ICU"),
        BTreeSet::from([String::from("RN")]),
        datetime!(2026-01-01 00:00 UTC),
    )
}

pub fn create_shift(id: &str) -> Shift {
    Shift::new(
        ShiftId::new(id),
        DepartmentId::new("ICU"),
        TimeWindow::new(
            datetime!(2026-03-02 07:00 UTC),
            datetime!(2026-03-02 15:00 UTC),
        )
        .unwrap(),
        2,
        datetime!(2026-01-01 00:00 UTC),
    )
    .unwrap()
    .with_required_role(Role::Nurse)
}

pub fn create_request(id: &str, requester: &str) -> Request {
    Request::new(
        RequestId::new(id),
        StaffId::new(requester),
        &format!("Staff {requester}"),
        RequestType::TimeOff,
        date!(2026 - 03 - 10),
        date!(2026 - 03 - 12),
        Some(String::from("Family event")),
        datetime!(2026-03-01 09:00 UTC),
    )
    .unwrap()
}

pub fn create_activity(name: &str, at: OffsetDateTime) -> AuditEvent {
    AuditEvent::new(
        Actor::new(String::from("admin-1"), String::from("admin")),
        Cause::new(String::from("req-1"), String::from("Test")),
        Action::new(name.to_string(), None),
        AuditSubject::new("shift", "day"),
        StateSnapshot::new(String::from("before")),
        StateSnapshot::new(String::from("after")),
        at,
    )
}
