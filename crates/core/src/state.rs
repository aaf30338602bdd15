// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::events::DomainEvent;
use shiftdesk_audit::{AuditEvent, StateSnapshot};
use shiftdesk_domain::{Request, RequestId, Shift, ShiftId, StaffId, StaffMember};

/// The complete scheduling state a transition reads from.
///
/// Transitions never mutate a `State` in place. They clone it, change the
/// clone and hand it back in a [`TransitionResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// All staff members, active or not.
    pub staff: Vec<StaffMember>,
    /// All shifts that have not been deleted.
    pub shifts: Vec<Shift>,
    /// All requests.
    pub requests: Vec<Request>,
}

impl State {
    /// Creates a state from loaded records.
    #[must_use]
    pub const fn new(staff: Vec<StaffMember>, shifts: Vec<Shift>, requests: Vec<Request>) -> Self {
        Self {
            staff,
            shifts,
            requests,
        }
    }

    /// Looks up a staff member.
    #[must_use]
    pub fn find_staff(&self, id: &StaffId) -> Option<&StaffMember> {
        self.staff.iter().find(|s| &s.id == id)
    }

    /// Looks up a shift.
    #[must_use]
    pub fn find_shift(&self, id: &ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }

    /// Looks up a request.
    #[must_use]
    pub fn find_request(&self, id: &RequestId) -> Option<&Request> {
        self.requests.iter().find(|r| &r.id == id)
    }

    /// Looks up a staff member, failing with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no staff member has this id.
    pub fn staff(&self, id: &StaffId) -> Result<&StaffMember, CoreError> {
        self.find_staff(id).ok_or_else(|| CoreError::NotFound {
            entity: "staff",
            id: id.to_string(),
        })
    }

    /// Looks up a shift, failing with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no shift has this id.
    pub fn shift(&self, id: &ShiftId) -> Result<&Shift, CoreError> {
        self.find_shift(id).ok_or_else(|| CoreError::NotFound {
            entity: "shift",
            id: id.to_string(),
        })
    }

    /// Looks up a request, failing with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no request has this id.
    pub fn request(&self, id: &RequestId) -> Result<&Request, CoreError> {
        self.find_request(id).ok_or_else(|| CoreError::NotFound {
            entity: "request",
            id: id.to_string(),
        })
    }

    pub(crate) fn shift_mut(&mut self, id: &ShiftId) -> Result<&mut Shift, CoreError> {
        self.shifts
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "shift",
                id: id.to_string(),
            })
    }

    pub(crate) fn staff_mut(&mut self, id: &StaffId) -> Result<&mut StaffMember, CoreError> {
        self.staff
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "staff",
                id: id.to_string(),
            })
    }

    pub(crate) fn request_mut(&mut self, id: &RequestId) -> Result<&mut Request, CoreError> {
        self.requests
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "request",
                id: id.to_string(),
            })
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "staff_count={},shifts_count={},requests_count={}",
            self.staff.len(),
            self.shifts.len(),
            self.requests.len()
        ))
    }
}

/// Snapshot of a single staff member.
#[must_use]
pub fn staff_snapshot(staff: &StaffMember) -> StateSnapshot {
    StateSnapshot::new(format!(
        "staff={},role={},department={},active={}",
        staff.id, staff.role, staff.department_id, staff.is_active
    ))
}

/// Snapshot of a single shift.
#[must_use]
pub fn shift_snapshot(shift: &Shift) -> StateSnapshot {
    StateSnapshot::new(format!(
        "shift={},status={},assigned={}/{}",
        shift.id,
        shift.status(),
        shift.assigned_staff().len(),
        shift.staff_required()
    ))
}

/// Snapshot of a single request.
#[must_use]
pub fn request_snapshot(request: &Request) -> StateSnapshot {
    StateSnapshot::new(format!(
        "request={},type={},status={}",
        request.id,
        request.request_type.as_str(),
        request.status()
    ))
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. A transition that changes nothing (for example assigning
/// someone who is already assigned) succeeds with no audit event and no
/// events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition, absent for no-ops.
    pub audit_event: Option<AuditEvent>,
    /// Events for the notification dispatcher, in emission order.
    pub events: Vec<DomainEvent>,
}

impl TransitionResult {
    /// Returns true if the transition changed nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.audit_event.is_none()
    }
}
