// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::caller::Caller;
use crate::command::{Command, StaffPatch};
use crate::error::CoreError;
use crate::events::DomainEvent;
use crate::lifecycle;
use crate::state::{State, TransitionResult, staff_snapshot};
use crate::workflow;
use shiftdesk_audit::{Action, AuditEvent, AuditSubject, Cause, StateSnapshot};
use shiftdesk_domain::{
    Shift, StaffId, StaffMember, has_permission, validate_email_unique, validate_staff_fields,
};
use time::OffsetDateTime;

/// Collects what every successful transition needs to build its audit event.
pub(crate) struct Recorder<'a> {
    caller: &'a Caller,
    cause: Cause,
    action: &'static str,
    now: OffsetDateTime,
}

impl<'a> Recorder<'a> {
    pub(crate) const fn caller(&self) -> &'a Caller {
        self.caller
    }

    pub(crate) const fn now(&self) -> OffsetDateTime {
        self.now
    }

    /// Finishes a transition that changed state.
    pub(crate) fn finish(
        self,
        new_state: State,
        details: String,
        subject: AuditSubject,
        snapshots: (StateSnapshot, StateSnapshot),
        events: Vec<DomainEvent>,
    ) -> TransitionResult {
        let (before, after) = snapshots;
        let audit_event: AuditEvent = AuditEvent::new(
            self.caller.to_audit_actor(),
            self.cause,
            Action::new(String::from(self.action), Some(details)),
            subject,
            before,
            after,
            self.now,
        );

        TransitionResult {
            new_state,
            audit_event: Some(audit_event),
            events,
        }
    }
}

/// Finishes a transition that changed nothing.
pub(crate) fn noop(state: &State) -> TransitionResult {
    TransitionResult {
        new_state: state.clone(),
        audit_event: None,
        events: Vec::new(),
    }
}

/// Applies a command to the current state, producing a new state, an audit
/// event and the events the notification dispatcher should react to.
///
/// The caller's role is checked against the permission model before
/// anything else.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `caller` - The staff member issuing the command
/// * `cause` - The cause or reason for this action
/// * `now` - The transition timestamp
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command is refused
///
/// # Errors
///
/// Returns an error if:
/// - The caller lacks the required capability
/// - A referenced record does not exist
/// - The command violates domain rules
pub fn apply(
    state: &State,
    command: Command,
    caller: &Caller,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let capability = command.required_capability();
    if !has_permission(caller.role, capability) {
        return Err(CoreError::PermissionDenied {
            action: command.name().to_string(),
            capability,
        });
    }

    let recorder: Recorder<'_> = Recorder {
        caller,
        cause,
        action: command.name(),
        now,
    };

    match command {
        Command::CreateStaff {
            id,
            name,
            email,
            role,
            department_id,
            certifications,
        } => {
            let staff: StaffMember =
                StaffMember::new(id, &name, &email, role, department_id, certifications, now);
            create_staff(state, recorder, staff)
        }
        Command::UpdateStaff { staff_id, patch } => {
            update_staff(state, recorder, &staff_id, patch)
        }
        Command::DeactivateStaff { staff_id } => deactivate_staff(state, recorder, &staff_id),
        Command::CreateShift {
            id,
            department_id,
            window,
            required_role,
            required_certifications,
            staff_required,
            assigned_staff,
        } => {
            let mut shift: Shift = Shift::new(id, department_id, window, staff_required, now)?
                .with_required_certifications(required_certifications);
            shift.required_role = required_role;
            lifecycle::create_shift(state, recorder, shift, assigned_staff)
        }
        Command::AssignStaff { shift_id, staff_id } => {
            lifecycle::assign(state, recorder, &shift_id, &staff_id)
        }
        Command::BulkAssign {
            shift_id,
            staff_ids,
        } => lifecycle::bulk_assign(state, recorder, &shift_id, &staff_ids),
        Command::UnassignStaff { shift_id, staff_id } => {
            lifecycle::unassign(state, recorder, &shift_id, &staff_id)
        }
        Command::UpdateShift { shift_id, patch } => {
            lifecycle::update(state, recorder, &shift_id, patch)
        }
        Command::CancelShift { shift_id } => lifecycle::cancel(state, recorder, &shift_id),
        Command::DeleteShift { shift_id } => lifecycle::delete(state, recorder, &shift_id),
        Command::SubmitRequest {
            id,
            request_type,
            start_date,
            end_date,
            reason,
            urgency,
            shift_id,
        } => workflow::submit(
            state,
            recorder,
            workflow::Submission {
                id,
                request_type,
                start_date,
                end_date,
                reason,
                urgency,
                shift_id,
            },
        ),
        Command::ApproveRequest { request_id, notes } => {
            workflow::approve(state, recorder, &request_id, notes)
        }
        Command::RejectRequest { request_id, notes } => {
            workflow::reject(state, recorder, &request_id, notes)
        }
    }
}

fn create_staff(
    state: &State,
    recorder: Recorder<'_>,
    staff: StaffMember,
) -> Result<TransitionResult, CoreError> {
    validate_staff_fields(&staff)?;
    validate_email_unique(&staff.email, &state.staff, None)?;

    if state.find_staff(&staff.id).is_some() {
        return Err(CoreError::InvalidState {
            entity: "staff",
            id: staff.id.to_string(),
            reason: String::from("a staff member with this id already exists"),
        });
    }

    let before: StateSnapshot = state.to_snapshot();
    let details: String = format!("New staff member added: {}", staff.name);
    let subject: AuditSubject = AuditSubject::new("staff", staff.id.value());
    let event: DomainEvent = DomainEvent::StaffCreated {
        staff_id: staff.id.clone(),
        name: staff.name.clone(),
        department_id: staff.department_id.clone(),
    };

    let mut new_state: State = state.clone();
    new_state.staff.push(staff);
    let after: StateSnapshot = new_state.to_snapshot();

    Ok(recorder.finish(new_state, details, subject, (before, after), vec![event]))
}

fn update_staff(
    state: &State,
    recorder: Recorder<'_>,
    staff_id: &StaffId,
    patch: StaffPatch,
) -> Result<TransitionResult, CoreError> {
    let current: &StaffMember = state.staff(staff_id)?;
    let before: StateSnapshot = staff_snapshot(current);

    let mut updated: StaffMember = current.clone();
    if let Some(name) = patch.name {
        updated.name = name;
    }
    if let Some(email) = patch.email {
        updated.email = email;
    }
    if let Some(role) = patch.role {
        updated.role = role;
    }
    if let Some(department_id) = patch.department_id {
        updated.department_id = department_id;
    }
    if let Some(certifications) = patch.certifications {
        updated.certifications = certifications;
    }
    updated.updated_at = Some(recorder.now());

    validate_staff_fields(&updated)?;
    validate_email_unique(&updated.email, &state.staff, Some(staff_id))?;

    let after: StateSnapshot = staff_snapshot(&updated);
    let mut new_state: State = state.clone();
    *new_state.staff_mut(staff_id)? = updated;

    Ok(recorder.finish(
        new_state,
        format!("Staff member updated: {staff_id}"),
        AuditSubject::new("staff", staff_id.value()),
        (before, after),
        Vec::new(),
    ))
}

fn deactivate_staff(
    state: &State,
    recorder: Recorder<'_>,
    staff_id: &StaffId,
) -> Result<TransitionResult, CoreError> {
    let current: &StaffMember = state.staff(staff_id)?;
    if !current.is_active {
        return Err(CoreError::InvalidState {
            entity: "staff",
            id: staff_id.to_string(),
            reason: String::from("staff member is already inactive"),
        });
    }
    let before: StateSnapshot = staff_snapshot(current);

    let mut new_state: State = state.clone();
    let staff: &mut StaffMember = new_state.staff_mut(staff_id)?;
    staff.is_active = false;
    staff.deactivated_at = Some(recorder.now());
    staff.updated_at = Some(recorder.now());
    let after: StateSnapshot = staff_snapshot(staff);

    Ok(recorder.finish(
        new_state,
        format!("Staff member deactivated: {staff_id}"),
        AuditSubject::new("staff", staff_id.value()),
        (before, after),
        Vec::new(),
    ))
}
