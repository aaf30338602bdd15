// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift lifecycle transitions.
//!
//! Every transition works on a clone of the state. Only a fully successful
//! transition hands its clone back, so a failed batch never leaves a
//! partial assignment behind.

use crate::apply::{Recorder, noop};
use crate::command::ShiftPatch;
use crate::error::CoreError;
use crate::events::{DomainEvent, ScheduleChange};
use crate::state::{State, TransitionResult, shift_snapshot};
use shiftdesk_audit::{AuditSubject, StateSnapshot};
use shiftdesk_domain::{
    Shift, ShiftId, StaffId, StaffMember, ValidationReason, ValidationResult, validate_assignment,
};
use time::OffsetDateTime;

fn cancelled_error(shift_id: &ShiftId) -> CoreError {
    CoreError::InvalidState {
        entity: "shift",
        id: shift_id.to_string(),
        reason: String::from("shift is cancelled"),
    }
}

fn schedule_events(shift: &Shift, change: ScheduleChange) -> Vec<DomainEvent> {
    shift
        .assigned_staff()
        .iter()
        .map(|staff_id| DomainEvent::ScheduleUpdated {
            shift_id: shift.id.clone(),
            staff_id: staff_id.clone(),
            department_id: shift.department_id.clone(),
            window: shift.window,
            change,
        })
        .collect()
}

fn prefixed_reasons(staff_id: &StaffId, result: &ValidationResult) -> Vec<String> {
    result
        .messages()
        .into_iter()
        .map(|message| format!("{staff_id}: {message}"))
        .collect()
}

/// Assigns one staff member inside `working`.
///
/// Returns `Ok(None)` when the staff member is already assigned.
fn assign_one(
    working: &mut State,
    shift_id: &ShiftId,
    staff_id: &StaffId,
    now: OffsetDateTime,
) -> Result<Option<DomainEvent>, CoreError> {
    let shift: &Shift = working.shift(shift_id)?;
    let staff: &StaffMember = working.staff(staff_id)?;

    if shift.status().is_terminal() {
        return Err(cancelled_error(shift_id));
    }
    if shift.is_assigned(staff_id) {
        return Ok(None);
    }

    let result: ValidationResult = validate_assignment(shift, staff, &working.shifts);
    if !result.is_valid {
        return Err(CoreError::ValidationFailed {
            reasons: result.messages(),
        });
    }

    if shift.is_at_capacity() {
        return Err(CoreError::InvalidState {
            entity: "shift",
            id: shift_id.to_string(),
            reason: format!(
                "shift already has all {} required staff assigned",
                shift.staff_required()
            ),
        });
    }

    let event: DomainEvent = DomainEvent::StaffAssigned {
        shift_id: shift_id.clone(),
        staff_id: staff_id.clone(),
        department_id: shift.department_id.clone(),
        window: shift.window,
    };
    working
        .shift_mut(shift_id)?
        .add_assignee(staff_id.clone(), now);
    Ok(Some(event))
}

pub(crate) fn create_shift(
    state: &State,
    recorder: Recorder<'_>,
    mut shift: Shift,
    assigned_staff: Vec<StaffId>,
) -> Result<TransitionResult, CoreError> {
    if state.find_shift(&shift.id).is_some() {
        return Err(CoreError::InvalidState {
            entity: "shift",
            id: shift.id.to_string(),
            reason: String::from("a shift with this id already exists"),
        });
    }

    let mut staff_ids: Vec<StaffId> = Vec::with_capacity(assigned_staff.len());
    for staff_id in assigned_staff {
        if !staff_ids.contains(&staff_id) {
            staff_ids.push(staff_id);
        }
    }

    let mut reasons: Vec<String> = Vec::new();
    for staff_id in &staff_ids {
        let staff: &StaffMember = state.staff(staff_id)?;
        let result: ValidationResult = validate_assignment(&shift, staff, &state.shifts);

        for reason in &result.reasons {
            if let ValidationReason::OverlappingShift { conflicting } = reason {
                return Err(CoreError::Conflict {
                    staff_id: staff_id.clone(),
                    conflicting_shifts: conflicting.clone(),
                });
            }
        }
        reasons.extend(prefixed_reasons(staff_id, &result));
    }
    if !reasons.is_empty() {
        return Err(CoreError::ValidationFailed { reasons });
    }

    if staff_ids.len() > shift.staff_required() as usize {
        return Err(CoreError::InvalidState {
            entity: "shift",
            id: shift.id.to_string(),
            reason: format!(
                "{} staff listed but the shift requires only {}",
                staff_ids.len(),
                shift.staff_required()
            ),
        });
    }

    let mut events: Vec<DomainEvent> = Vec::with_capacity(staff_ids.len());
    for staff_id in staff_ids {
        events.push(DomainEvent::StaffAssigned {
            shift_id: shift.id.clone(),
            staff_id: staff_id.clone(),
            department_id: shift.department_id.clone(),
            window: shift.window,
        });
        shift.add_assignee(staff_id, recorder.now());
    }

    let before: StateSnapshot = state.to_snapshot();
    let details: String = format!(
        "Created {} shift {} ({} of {} staff assigned)",
        shift.department_id,
        shift.id,
        shift.assigned_staff().len(),
        shift.staff_required()
    );
    let subject: AuditSubject = AuditSubject::new("shift", shift.id.value());

    let mut new_state: State = state.clone();
    new_state.shifts.push(shift);
    let after: StateSnapshot = new_state.to_snapshot();

    Ok(recorder.finish(new_state, details, subject, (before, after), events))
}

pub(crate) fn assign(
    state: &State,
    recorder: Recorder<'_>,
    shift_id: &ShiftId,
    staff_id: &StaffId,
) -> Result<TransitionResult, CoreError> {
    let before: StateSnapshot = shift_snapshot(state.shift(shift_id)?);

    let mut new_state: State = state.clone();
    let Some(event) = assign_one(&mut new_state, shift_id, staff_id, recorder.now())? else {
        return Ok(noop(state));
    };
    let after: StateSnapshot = shift_snapshot(new_state.shift(shift_id)?);

    Ok(recorder.finish(
        new_state,
        format!("Assigned {staff_id} to shift {shift_id}"),
        AuditSubject::new("shift", shift_id.value()),
        (before, after),
        vec![event],
    ))
}

pub(crate) fn bulk_assign(
    state: &State,
    recorder: Recorder<'_>,
    shift_id: &ShiftId,
    staff_ids: &[StaffId],
) -> Result<TransitionResult, CoreError> {
    let before: StateSnapshot = shift_snapshot(state.shift(shift_id)?);

    let mut new_state: State = state.clone();
    let mut events: Vec<DomainEvent> = Vec::new();
    for staff_id in staff_ids {
        if let Some(event) = assign_one(&mut new_state, shift_id, staff_id, recorder.now())? {
            events.push(event);
        }
    }
    if events.is_empty() {
        return Ok(noop(state));
    }
    let after: StateSnapshot = shift_snapshot(new_state.shift(shift_id)?);

    Ok(recorder.finish(
        new_state,
        format!("Assigned {} staff to shift {shift_id}", events.len()),
        AuditSubject::new("shift", shift_id.value()),
        (before, after),
        events,
    ))
}

pub(crate) fn unassign(
    state: &State,
    recorder: Recorder<'_>,
    shift_id: &ShiftId,
    staff_id: &StaffId,
) -> Result<TransitionResult, CoreError> {
    let shift: &Shift = state.shift(shift_id)?;
    if shift.status().is_terminal() {
        return Err(cancelled_error(shift_id));
    }
    if !shift.is_assigned(staff_id) {
        return Ok(noop(state));
    }
    let before: StateSnapshot = shift_snapshot(shift);
    let event: DomainEvent = DomainEvent::StaffUnassigned {
        shift_id: shift_id.clone(),
        staff_id: staff_id.clone(),
        department_id: shift.department_id.clone(),
        window: shift.window,
    };

    let mut new_state: State = state.clone();
    let updated: &mut Shift = new_state.shift_mut(shift_id)?;
    updated.remove_assignee(staff_id);
    let after: StateSnapshot = shift_snapshot(updated);

    Ok(recorder.finish(
        new_state,
        format!("Removed {staff_id} from shift {shift_id}"),
        AuditSubject::new("shift", shift_id.value()),
        (before, after),
        vec![event],
    ))
}

pub(crate) fn update(
    state: &State,
    recorder: Recorder<'_>,
    shift_id: &ShiftId,
    patch: ShiftPatch,
) -> Result<TransitionResult, CoreError> {
    let current: &Shift = state.shift(shift_id)?;
    if current.status().is_terminal() {
        return Err(cancelled_error(shift_id));
    }

    let mut updated: Shift = current.clone();
    if let Some(window) = patch.window {
        updated.window = window;
    }
    if let Some(department_id) = patch.department_id {
        updated.department_id = department_id;
    }
    if patch.clear_required_role {
        updated.required_role = None;
    } else if let Some(role) = patch.required_role {
        updated.required_role = Some(role);
    }
    if let Some(certifications) = patch.required_certifications {
        updated.required_certifications = certifications;
    }
    if let Some(staff_required) = patch.staff_required {
        updated.set_staff_required(staff_required)?;
        let assigned: usize = updated.assigned_staff().len();
        if (staff_required as usize) < assigned {
            return Err(CoreError::InvalidState {
                entity: "shift",
                id: shift_id.to_string(),
                reason: format!(
                    "capacity {staff_required} is below the {assigned} staff already assigned"
                ),
            });
        }
    }

    let mut reasons: Vec<String> = Vec::new();
    for staff_id in updated.assigned_staff() {
        let staff: &StaffMember = state.staff(staff_id)?;
        let result: ValidationResult = validate_assignment(&updated, staff, &state.shifts);
        reasons.extend(prefixed_reasons(staff_id, &result));
    }
    if !reasons.is_empty() {
        return Err(CoreError::ValidationFailed { reasons });
    }

    let before: StateSnapshot = shift_snapshot(current);
    let after: StateSnapshot = shift_snapshot(&updated);
    let events: Vec<DomainEvent> = schedule_events(&updated, ScheduleChange::Updated);

    let mut new_state: State = state.clone();
    *new_state.shift_mut(shift_id)? = updated;

    Ok(recorder.finish(
        new_state,
        format!("Updated shift {shift_id}"),
        AuditSubject::new("shift", shift_id.value()),
        (before, after),
        events,
    ))
}

pub(crate) fn cancel(
    state: &State,
    recorder: Recorder<'_>,
    shift_id: &ShiftId,
) -> Result<TransitionResult, CoreError> {
    let current: &Shift = state.shift(shift_id)?;
    let before: StateSnapshot = shift_snapshot(current);

    let mut new_state: State = state.clone();
    let shift: &mut Shift = new_state.shift_mut(shift_id)?;
    shift
        .cancel(recorder.now())
        .map_err(|_| CoreError::InvalidState {
            entity: "shift",
            id: shift_id.to_string(),
            reason: String::from("shift is already cancelled"),
        })?;
    let after: StateSnapshot = shift_snapshot(shift);
    let events: Vec<DomainEvent> = schedule_events(shift, ScheduleChange::Cancelled);

    Ok(recorder.finish(
        new_state,
        format!("Cancelled shift {shift_id}"),
        AuditSubject::new("shift", shift_id.value()),
        (before, after),
        events,
    ))
}

pub(crate) fn delete(
    state: &State,
    recorder: Recorder<'_>,
    shift_id: &ShiftId,
) -> Result<TransitionResult, CoreError> {
    let current: &Shift = state.shift(shift_id)?;
    let events: Vec<DomainEvent> = schedule_events(current, ScheduleChange::Deleted);
    let before: StateSnapshot = state.to_snapshot();

    let mut new_state: State = state.clone();
    new_state.shifts.retain(|shift| &shift.id != shift_id);
    let after: StateSnapshot = new_state.to_snapshot();

    Ok(recorder.finish(
        new_state,
        format!("Deleted shift {shift_id}"),
        AuditSubject::new("shift", shift_id.value()),
        (before, after),
        events,
    ))
}
