// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DepartmentId, Role, Shift, ShiftId, StaffId, StaffMember, TimeWindow};
use std::collections::BTreeSet;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn certs(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

pub fn window(start: OffsetDateTime, end: OffsetDateTime) -> TimeWindow {
    TimeWindow::new(start, end).unwrap()
}

pub fn create_icu_nurse(id: &str) -> StaffMember {
    StaffMember::new(
        StaffId::new(id),
        "Emily Rodriguez",
        "emily.rodriguez@hospital.com",
        Role::Nurse,
        DepartmentId::new("ICU"),
        certs(&["RN", "BLS"]),
        datetime!(2026-01-01 00:00 UTC),
    )
}

pub fn create_shift(
    id: &str,
    department: &str,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Shift {
    Shift::new(
        ShiftId::new(id),
        DepartmentId::new(department),
        window(start, end),
        1,
        datetime!(2026-01-01 00:00 UTC),
    )
    .unwrap()
}

pub fn create_icu_day_shift(id: &str) -> Shift {
    create_shift(
        id,
        "ICU",
        datetime!(2026-03-02 07:00 UTC),
        datetime!(2026-03-02 15:00 UTC),
    )
    .with_required_role(Role::Nurse)
    .with_required_certifications(certs(&["RN"]))
}

pub fn assigned(mut shift: Shift, staff_id: &str) -> Shift {
    shift.add_assignee(StaffId::new(staff_id), datetime!(2026-01-01 00:00 UTC));
    shift
}
