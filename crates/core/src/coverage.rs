// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::events::DomainEvent;
use crate::state::State;
use shiftdesk_domain::{NotificationPriority, Shift};
use time::{Duration, OffsetDateTime};

/// Finds shifts that start within `threshold` of `now` and are still
/// short of staff.
///
/// Shifts that have already started but not ended are included. A gap is
/// urgent once its shift has started or starts within a quarter of the
/// threshold, and high priority otherwise.
///
/// This is a read-only scan and produces no audit event.
#[must_use]
pub fn coverage_gaps(state: &State, now: OffsetDateTime, threshold: Duration) -> Vec<DomainEvent> {
    let urgent_within: Duration = threshold / 4;

    state
        .shifts
        .iter()
        .filter(|shift| shift.status().needs_coverage())
        .filter(|shift| shift.window.end() > now)
        .filter(|shift| shift.window.start() - now <= threshold)
        .map(|shift: &Shift| {
            let priority: NotificationPriority = if shift.window.start() - now <= urgent_within {
                NotificationPriority::Urgent
            } else {
                NotificationPriority::High
            };
            DomainEvent::CoverageNeeded {
                shift_id: shift.id.clone(),
                department_id: shift.department_id.clone(),
                required_role: shift.required_role,
                window: shift.window,
                assigned: shift.assigned_staff().len(),
                required: shift.staff_required(),
                priority,
            }
        })
        .collect()
}
