// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::DashboardStats;
use shiftdesk::State;
use shiftdesk_domain::{DepartmentId, RequestStatus, ShiftStatus};
use std::collections::BTreeSet;
use time::Duration;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Computes the dashboard headline numbers from `state`.
///
/// Departments are the distinct department ids found on staff and shifts.
#[must_use]
pub fn compute_stats(state: &State) -> DashboardStats {
    let shifts_with = |status: ShiftStatus| {
        state
            .shifts
            .iter()
            .filter(|s| s.status() == status)
            .count()
    };
    let requests_with = |status: RequestStatus| {
        state
            .requests
            .iter()
            .filter(|r| r.status() == status)
            .count()
    };

    let departments: BTreeSet<&DepartmentId> = state
        .staff
        .iter()
        .map(|s| &s.department_id)
        .chain(state.shifts.iter().map(|s| &s.department_id))
        .collect();
    let average_staff_per_department: usize = if departments.is_empty() {
        0
    } else {
        (state.staff.len() + departments.len() / 2) / departments.len()
    };

    let scheduled: Duration = state
        .shifts
        .iter()
        .filter(|s| s.status() != ShiftStatus::Cancelled)
        .map(|s| s.window.duration())
        .sum();

    DashboardStats {
        total_staff: state.staff.len(),
        active_staff: state.staff.iter().filter(|s| s.is_active).count(),
        total_shifts: state.shifts.len(),
        open_shifts: shifts_with(ShiftStatus::Open),
        understaffed_shifts: shifts_with(ShiftStatus::Understaffed),
        filled_shifts: shifts_with(ShiftStatus::Filled),
        cancelled_shifts: shifts_with(ShiftStatus::Cancelled),
        pending_requests: requests_with(RequestStatus::Pending),
        approved_requests: requests_with(RequestStatus::Approved),
        rejected_requests: requests_with(RequestStatus::Rejected),
        departments: departments.len(),
        average_staff_per_department,
        total_hours_scheduled: scheduled.as_seconds_f64() / SECONDS_PER_HOUR,
    }
}
