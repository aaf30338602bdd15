// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftdesk_domain::{
    Capability, DepartmentId, RequestId, RequestType, Role, ShiftId, StaffId, TimeWindow, Urgency,
};
use std::collections::BTreeSet;
use time::Date;

/// Changes to apply to a staff member. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub department_id: Option<DepartmentId>,
    pub certifications: Option<BTreeSet<String>>,
}

/// Changes to apply to a shift. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftPatch {
    pub window: Option<TimeWindow>,
    pub department_id: Option<DepartmentId>,
    pub required_role: Option<Role>,
    /// Removes the role requirement. Takes precedence over `required_role`.
    pub clear_required_role: bool,
    pub required_certifications: Option<BTreeSet<String>>,
    pub staff_required: Option<u32>,
}

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes. Identifiers for
/// new records are allocated by the caller before the command is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a staff member.
    CreateStaff {
        /// The new staff member's id.
        id: StaffId,
        name: String,
        email: String,
        role: Role,
        department_id: DepartmentId,
        certifications: BTreeSet<String>,
    },
    /// Edit a staff member.
    UpdateStaff {
        staff_id: StaffId,
        patch: StaffPatch,
    },
    /// Soft-delete a staff member. The record is kept.
    DeactivateStaff { staff_id: StaffId },
    /// Create a shift, optionally with staff already assigned.
    CreateShift {
        /// The new shift's id.
        id: ShiftId,
        department_id: DepartmentId,
        window: TimeWindow,
        required_role: Option<Role>,
        required_certifications: BTreeSet<String>,
        staff_required: u32,
        assigned_staff: Vec<StaffId>,
    },
    /// Assign one staff member to a shift.
    AssignStaff { shift_id: ShiftId, staff_id: StaffId },
    /// Assign several staff members to a shift, all or nothing.
    BulkAssign {
        shift_id: ShiftId,
        staff_ids: Vec<StaffId>,
    },
    /// Remove a staff member from a shift.
    UnassignStaff { shift_id: ShiftId, staff_id: StaffId },
    /// Edit a shift.
    UpdateShift { shift_id: ShiftId, patch: ShiftPatch },
    /// Cancel a shift. Cancellation is terminal.
    CancelShift { shift_id: ShiftId },
    /// Remove a shift record.
    DeleteShift { shift_id: ShiftId },
    /// Submit a request on behalf of the caller.
    SubmitRequest {
        /// The new request's id.
        id: RequestId,
        request_type: RequestType,
        start_date: Date,
        end_date: Date,
        reason: Option<String>,
        urgency: Option<Urgency>,
        shift_id: Option<ShiftId>,
    },
    /// Approve a pending request.
    ApproveRequest {
        request_id: RequestId,
        notes: Option<String>,
    },
    /// Reject a pending request. A reason is required.
    RejectRequest { request_id: RequestId, notes: String },
}

impl Command {
    /// Returns the audit action name for this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateStaff { .. } => "CreateStaff",
            Self::UpdateStaff { .. } => "UpdateStaff",
            Self::DeactivateStaff { .. } => "DeactivateStaff",
            Self::CreateShift { .. } => "CreateShift",
            Self::AssignStaff { .. } => "AssignStaff",
            Self::BulkAssign { .. } => "BulkAssign",
            Self::UnassignStaff { .. } => "UnassignStaff",
            Self::UpdateShift { .. } => "UpdateShift",
            Self::CancelShift { .. } => "CancelShift",
            Self::DeleteShift { .. } => "DeleteShift",
            Self::SubmitRequest { .. } => "SubmitRequest",
            Self::ApproveRequest { .. } => "ApproveRequest",
            Self::RejectRequest { .. } => "RejectRequest",
        }
    }

    /// Returns the capability a caller must hold to issue this command.
    #[must_use]
    pub const fn required_capability(&self) -> Capability {
        match self {
            Self::CreateStaff { .. } => Capability::CreateStaff,
            Self::UpdateStaff { .. } => Capability::EditStaff,
            Self::DeactivateStaff { .. } => Capability::DeleteStaff,
            Self::CreateShift { .. } => Capability::CreateShifts,
            Self::AssignStaff { .. } | Self::BulkAssign { .. } | Self::UnassignStaff { .. } => {
                Capability::AssignStaff
            }
            Self::UpdateShift { .. } | Self::CancelShift { .. } => Capability::EditShifts,
            Self::DeleteShift { .. } => Capability::DeleteShifts,
            Self::SubmitRequest { .. } => Capability::CreateRequests,
            Self::ApproveRequest { .. } => Capability::ApproveRequests,
            Self::RejectRequest { .. } => Capability::RejectRequests,
        }
    }
}
