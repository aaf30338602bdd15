// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod caller;
mod command;
mod coverage;
mod error;
mod events;
mod lifecycle;
mod state;
mod workflow;

#[cfg(test)]
mod tests;

use shiftdesk_domain::{ShiftId, StaffId, ValidationResult, validate_assignment};

// Re-export public types and functions
pub use apply::apply;
pub use caller::Caller;
pub use command::{Command, ShiftPatch, StaffPatch};
pub use coverage::coverage_gaps;
pub use error::CoreError;
pub use events::{DomainEvent, ScheduleChange};
pub use state::{State, TransitionResult, request_snapshot, shift_snapshot, staff_snapshot};
pub use workflow::visible_requests;

/// Validates a prospective assignment by identifier.
///
/// This is a read-only check that does not create audit events. It is
/// re-evaluated against `state` on every call.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the shift or the staff member does
/// not exist.
pub fn validate_assignment_by_id(
    state: &State,
    shift_id: &ShiftId,
    staff_id: &StaffId,
) -> Result<ValidationResult, CoreError> {
    let shift = state.shift(shift_id)?;
    let staff = state.staff(staff_id)?;
    Ok(validate_assignment(shift, staff, &state.shifts))
}
