// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Shift, ShiftId, StaffId, TimeWindow};

/// Returns the ids of shifts assigned to `staff_id` that overlap `window`.
///
/// Only shifts the staff member is assigned to are considered, and
/// cancelled shifts are ignored. Windows are half-open, so a shift ending
/// exactly when `window` starts is not a conflict.
///
/// Callers evaluating an existing shift must leave that shift out of
/// `existing_shifts`.
pub fn find_conflicts<'a, I>(
    staff_id: &StaffId,
    window: &TimeWindow,
    existing_shifts: I,
) -> Vec<ShiftId>
where
    I: IntoIterator<Item = &'a Shift>,
{
    existing_shifts
        .into_iter()
        .filter(|shift| !shift.status().is_terminal())
        .filter(|shift| shift.is_assigned(staff_id))
        .filter(|shift| shift.window.overlaps(window))
        .map(|shift| shift.id.clone())
        .collect()
}

/// Returns true if `staff_id` already works a shift overlapping `window`.
///
/// See [`find_conflicts`] for the exact rule.
pub fn has_conflict<'a, I>(staff_id: &StaffId, window: &TimeWindow, existing_shifts: I) -> bool
where
    I: IntoIterator<Item = &'a Shift>,
{
    existing_shifts.into_iter().any(|shift| {
        !shift.status().is_terminal()
            && shift.is_assigned(staff_id)
            && shift.window.overlaps(window)
    })
}
