// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{
    AuthenticatedActor, CreateShiftRequest, SchedulerConfig, ServiceContext, SubmitRequestRequest,
    create_shift,
};
use shiftdesk_audit::Cause;
use shiftdesk_domain::{DepartmentId, Role, StaffId, StaffMember};
use shiftdesk_persistence::{InMemoryRepository, SchedulingRepository};
use std::collections::BTreeSet;
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub const NOW: OffsetDateTime = datetime!(2026-03-01 09:00 UTC);

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::Admin)
}

pub fn create_test_supervisor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("sup-1"), Role::Supervisor)
}

pub fn create_test_nurse(id: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(id.to_string(), Role::Nurse)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

fn member(id: &str, name: &str, role: Role, department: &str, certs: &[&str]) -> StaffMember {
    StaffMember::new(
        StaffId::new(id),
        name,
        &format!("{id}@hospital.com"),
        role,
        DepartmentId::new(department),
        certs.iter().map(|c| (*c).to_string()).collect::<BTreeSet<String>>(),
        datetime!(2026-01-01 00:00 UTC),
    )
}

/// A context holding an admin, an ICU supervisor, two ICU nurses and an
/// ICU doctor. No shifts or requests.
pub fn create_test_context() -> ServiceContext<InMemoryRepository> {
    let mut repository = InMemoryRepository::new();
    for staff in [
        member("admin-1", "Alex Admin", Role::Admin, "Administration", &[]),
        member("sup-1", "Michael Chen", Role::Supervisor, "ICU", &[]),
        member("n1", "Emily Rodriguez", Role::Nurse, "ICU", &["RN", "BLS"]),
        member("n2", "James Wilson", Role::Nurse, "ICU", &["RN", "BLS"]),
        member("d1", "Sarah Johnson", Role::Doctor, "ICU", &["ACLS"]),
    ] {
        repository.insert_staff(&staff).unwrap();
    }
    ServiceContext::new(repository, SchedulerConfig::default())
}

pub fn icu_shift_request(
    start: OffsetDateTime,
    end: OffsetDateTime,
    staff_required: u32,
) -> CreateShiftRequest {
    CreateShiftRequest {
        department_id: String::from("ICU"),
        start,
        end,
        required_role: Some(String::from("nurse")),
        required_certifications: vec![String::from("RN")],
        staff_required: Some(staff_required),
        assigned_staff: Vec::new(),
    }
}

/// Creates an ICU nurse shift as the supervisor and returns its id.
pub fn create_icu_shift(
    ctx: &mut ServiceContext<InMemoryRepository>,
    start: OffsetDateTime,
    end: OffsetDateTime,
    staff_required: u32,
) -> String {
    create_shift(
        ctx,
        &create_test_supervisor(),
        icu_shift_request(start, end, staff_required),
        create_test_cause(),
        NOW,
    )
    .unwrap()
    .response
    .id
}

pub fn create_day_shift(
    ctx: &mut ServiceContext<InMemoryRepository>,
    staff_required: u32,
) -> String {
    create_icu_shift(
        ctx,
        datetime!(2026-03-02 07:00 UTC),
        datetime!(2026-03-02 15:00 UTC),
        staff_required,
    )
}

pub fn time_off_request() -> SubmitRequestRequest {
    SubmitRequestRequest {
        request_type: String::from("time_off"),
        start_date: date!(2026 - 03 - 10),
        end_date: date!(2026 - 03 - 12),
        reason: Some(String::from("Family event")),
        urgency: None,
        shift_id: None,
    }
}
