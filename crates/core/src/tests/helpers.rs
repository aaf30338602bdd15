// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Caller, Command, CoreError, State, TransitionResult, apply};
use shiftdesk_audit::Cause;
use shiftdesk_domain::{
    DepartmentId, Role, Shift, ShiftId, StaffId, StaffMember, TimeWindow,
};
use std::collections::BTreeSet;
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2026-03-01 09:00 UTC);

pub fn certs(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

pub fn window(start: OffsetDateTime, end: OffsetDateTime) -> TimeWindow {
    TimeWindow::new(start, end).unwrap()
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Dashboard action"))
}

pub fn admin() -> Caller {
    Caller::new(StaffId::new("admin-1"), Role::Admin)
}

pub fn supervisor() -> Caller {
    Caller::new(StaffId::new("sup-1"), Role::Supervisor)
}

pub fn nurse_caller(id: &str) -> Caller {
    Caller::new(StaffId::new(id), Role::Nurse)
}

pub fn staff(id: &str, role: Role, department: &str, held: &[&str]) -> StaffMember {
    StaffMember::new(
        StaffId::new(id),
        &format!("Staff {id}"),
        &format!("{id}@hospital.com"),
        role,
        DepartmentId::new(department),
        certs(held),
        datetime!(2026-01-01 00:00 UTC),
    )
}

pub fn icu_nurse(id: &str) -> StaffMember {
    staff(id, Role::Nurse, "ICU", &["RN", "BLS"])
}

pub fn icu_shift(
    id: &str,
    start: OffsetDateTime,
    end: OffsetDateTime,
    staff_required: u32,
) -> Shift {
    Shift::new(
        ShiftId::new(id),
        DepartmentId::new("ICU"),
        window(start, end),
        staff_required,
        datetime!(2026-01-01 00:00 UTC),
    )
    .unwrap()
    .with_required_role(Role::Nurse)
    .with_required_certifications(certs(&["RN"]))
}

pub fn icu_day_shift(id: &str, staff_required: u32) -> Shift {
    icu_shift(
        id,
        datetime!(2026-03-02 07:00 UTC),
        datetime!(2026-03-02 15:00 UTC),
        staff_required,
    )
}

/// An ICU ward with two nurses, a supervisor, an admin and one open day shift.
pub fn create_icu_state() -> State {
    State::new(
        vec![
            staff("admin-1", Role::Admin, "Administration", &[]),
            staff("sup-1", Role::Supervisor, "ICU", &[]),
            icu_nurse("n1"),
            icu_nurse("n2"),
        ],
        vec![icu_day_shift("day", 2)],
        Vec::new(),
    )
}

pub fn run(
    state: &State,
    command: Command,
    caller: &Caller,
) -> Result<TransitionResult, CoreError> {
    apply(state, command, caller, create_test_cause(), NOW)
}

pub fn assign_command(shift: &str, staff: &str) -> Command {
    Command::AssignStaff {
        shift_id: ShiftId::new(shift),
        staff_id: StaffId::new(staff),
    }
}
