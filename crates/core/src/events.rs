// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Events emitted by successful transitions.
//!
//! Events describe what changed. Turning them into notifications, and
//! deciding who receives them, happens outside the core.

use shiftdesk_domain::{
    DepartmentId, NotificationPriority, RequestId, RequestType, Role, ShiftId, StaffId, TimeWindow,
};

/// How a schedule change affected a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleChange {
    Updated,
    Cancelled,
    Deleted,
}

impl ScheduleChange {
    /// Returns the past-tense verb used in notification text.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Cancelled => "cancelled",
            Self::Deleted => "removed",
        }
    }
}

/// Something that happened as the result of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    /// A staff member was added.
    StaffCreated {
        staff_id: StaffId,
        name: String,
        department_id: DepartmentId,
    },
    /// A staff member was assigned to a shift.
    StaffAssigned {
        shift_id: ShiftId,
        staff_id: StaffId,
        department_id: DepartmentId,
        window: TimeWindow,
    },
    /// A staff member was removed from a shift.
    StaffUnassigned {
        shift_id: ShiftId,
        staff_id: StaffId,
        department_id: DepartmentId,
        window: TimeWindow,
    },
    /// A shift an assignee works on changed.
    ScheduleUpdated {
        shift_id: ShiftId,
        staff_id: StaffId,
        department_id: DepartmentId,
        window: TimeWindow,
        change: ScheduleChange,
    },
    /// A request was submitted and awaits review.
    RequestSubmitted {
        request_id: RequestId,
        requester_id: StaffId,
        requester_name: String,
        request_type: RequestType,
        date_range: String,
    },
    /// A request was approved.
    RequestApproved {
        request_id: RequestId,
        requester_id: StaffId,
        request_type: RequestType,
        date_range: String,
        notes: Option<String>,
    },
    /// A request was rejected.
    RequestRejected {
        request_id: RequestId,
        requester_id: StaffId,
        request_type: RequestType,
        date_range: String,
        reason: String,
    },
    /// A shift starting soon is still short of staff.
    CoverageNeeded {
        shift_id: ShiftId,
        department_id: DepartmentId,
        required_role: Option<Role>,
        window: TimeWindow,
        assigned: usize,
        required: u32,
        priority: NotificationPriority,
    },
    /// A free-form alert for specific staff.
    SystemAlert {
        recipients: Vec<StaffId>,
        title: String,
        message: String,
    },
}

impl DomainEvent {
    /// Returns the event name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StaffCreated { .. } => "staff_created",
            Self::StaffAssigned { .. } => "staff_assigned",
            Self::StaffUnassigned { .. } => "staff_unassigned",
            Self::ScheduleUpdated { .. } => "schedule_updated",
            Self::RequestSubmitted { .. } => "request_submitted",
            Self::RequestApproved { .. } => "request_approved",
            Self::RequestRejected { .. } => "request_rejected",
            Self::CoverageNeeded { .. } => "coverage_needed",
            Self::SystemAlert { .. } => "system_alert",
        }
    }
}
