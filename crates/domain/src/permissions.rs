// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based permission model.
//!
//! Every role maps to a fixed capability set. The mapping is pure and is
//! used both for UI gating and for enforcement inside state transitions.

use crate::error::DomainError;
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named permission flag gating one category of action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    ViewStaff,
    CreateStaff,
    EditStaff,
    DeleteStaff,
    ViewSchedule,
    CreateShifts,
    EditShifts,
    DeleteShifts,
    AssignStaff,
    ViewRequests,
    CreateRequests,
    ApproveRequests,
    RejectRequests,
    ViewReports,
    ExportData,
    ManageUsers,
    ViewLogs,
    ConfigureSystem,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Self; 18] = [
        Self::ViewStaff,
        Self::CreateStaff,
        Self::EditStaff,
        Self::DeleteStaff,
        Self::ViewSchedule,
        Self::CreateShifts,
        Self::EditShifts,
        Self::DeleteShifts,
        Self::AssignStaff,
        Self::ViewRequests,
        Self::CreateRequests,
        Self::ApproveRequests,
        Self::RejectRequests,
        Self::ViewReports,
        Self::ExportData,
        Self::ManageUsers,
        Self::ViewLogs,
        Self::ConfigureSystem,
    ];

    /// Returns the capability key as used by clients (e.g. `canApproveRequests`).
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ViewStaff => "canViewStaff",
            Self::CreateStaff => "canCreateStaff",
            Self::EditStaff => "canEditStaff",
            Self::DeleteStaff => "canDeleteStaff",
            Self::ViewSchedule => "canViewSchedule",
            Self::CreateShifts => "canCreateShifts",
            Self::EditShifts => "canEditShifts",
            Self::DeleteShifts => "canDeleteShifts",
            Self::AssignStaff => "canAssignStaff",
            Self::ViewRequests => "canViewRequests",
            Self::CreateRequests => "canCreateRequests",
            Self::ApproveRequests => "canApproveRequests",
            Self::RejectRequests => "canRejectRequests",
            Self::ViewReports => "canViewReports",
            Self::ExportData => "canExportData",
            Self::ManageUsers => "canManageUsers",
            Self::ViewLogs => "canViewLogs",
            Self::ConfigureSystem => "canConfigureSystem",
        }
    }
}

impl FromStr for Capability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|capability| capability.key() == s)
            .ok_or_else(|| DomainError::InvalidCapability(s.to_string()))
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The fixed set of capabilities held by a role.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySet {
    pub can_view_staff: bool,
    pub can_create_staff: bool,
    pub can_edit_staff: bool,
    pub can_delete_staff: bool,
    pub can_view_schedule: bool,
    pub can_create_shifts: bool,
    pub can_edit_shifts: bool,
    pub can_delete_shifts: bool,
    pub can_assign_staff: bool,
    pub can_view_requests: bool,
    pub can_create_requests: bool,
    pub can_approve_requests: bool,
    pub can_reject_requests: bool,
    pub can_view_reports: bool,
    pub can_export_data: bool,
    pub can_manage_users: bool,
    pub can_view_logs: bool,
    pub can_configure_system: bool,
}

impl CapabilitySet {
    /// Returns whether the set grants `capability`.
    #[must_use]
    pub const fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewStaff => self.can_view_staff,
            Capability::CreateStaff => self.can_create_staff,
            Capability::EditStaff => self.can_edit_staff,
            Capability::DeleteStaff => self.can_delete_staff,
            Capability::ViewSchedule => self.can_view_schedule,
            Capability::CreateShifts => self.can_create_shifts,
            Capability::EditShifts => self.can_edit_shifts,
            Capability::DeleteShifts => self.can_delete_shifts,
            Capability::AssignStaff => self.can_assign_staff,
            Capability::ViewRequests => self.can_view_requests,
            Capability::CreateRequests => self.can_create_requests,
            Capability::ApproveRequests => self.can_approve_requests,
            Capability::RejectRequests => self.can_reject_requests,
            Capability::ViewReports => self.can_view_reports,
            Capability::ExportData => self.can_export_data,
            Capability::ManageUsers => self.can_manage_users,
            Capability::ViewLogs => self.can_view_logs,
            Capability::ConfigureSystem => self.can_configure_system,
        }
    }

    /// Returns the granted capabilities.
    #[must_use]
    pub fn granted(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.allows(*capability))
            .collect()
    }

    /// Returns how many capabilities the set grants.
    #[must_use]
    pub fn count(&self) -> usize {
        self.granted().len()
    }
}

const ADMIN: CapabilitySet = CapabilitySet {
    can_view_staff: true,
    can_create_staff: true,
    can_edit_staff: true,
    can_delete_staff: true,
    can_view_schedule: true,
    can_create_shifts: true,
    can_edit_shifts: true,
    can_delete_shifts: true,
    can_assign_staff: true,
    can_view_requests: true,
    can_create_requests: true,
    can_approve_requests: true,
    can_reject_requests: true,
    can_view_reports: true,
    can_export_data: true,
    can_manage_users: true,
    can_view_logs: true,
    can_configure_system: true,
};

// Supervisors manage schedules and staff but cannot delete staff or
// administer the system.
const SUPERVISOR: CapabilitySet = CapabilitySet {
    can_delete_staff: false,
    can_manage_users: false,
    can_view_logs: false,
    can_configure_system: false,
    ..ADMIN
};

const CLINICAL: CapabilitySet = CapabilitySet {
    can_view_staff: true,
    can_create_staff: false,
    can_edit_staff: false,
    can_delete_staff: false,
    can_view_schedule: true,
    can_create_shifts: false,
    can_edit_shifts: false,
    can_delete_shifts: false,
    can_assign_staff: false,
    can_view_requests: true,
    can_create_requests: true,
    can_approve_requests: false,
    can_reject_requests: false,
    can_view_reports: false,
    can_export_data: false,
    can_manage_users: false,
    can_view_logs: false,
    can_configure_system: false,
};

/// Returns the capability set for a role.
#[must_use]
pub const fn capabilities(role: Role) -> CapabilitySet {
    match role {
        Role::Admin => ADMIN,
        Role::Supervisor => SUPERVISOR,
        Role::Doctor | Role::Nurse => CLINICAL,
    }
}

/// Returns whether `role` holds `capability`.
#[must_use]
pub const fn has_permission(role: Role, capability: Capability) -> bool {
    capabilities(role).allows(capability)
}

/// String-keyed permission check for untyped callers.
///
/// Returns false for an unknown role or an unknown capability key.
#[must_use]
pub fn has_permission_named(role: &str, capability: &str) -> bool {
    match (role.parse::<Role>(), capability.parse::<Capability>()) {
        (Ok(role), Ok(capability)) => has_permission(role, capability),
        _ => false,
    }
}

/// Returns whether `role` may create or edit staff.
#[must_use]
pub const fn can_manage_staff(role: Role) -> bool {
    has_permission(role, Capability::CreateStaff) || has_permission(role, Capability::EditStaff)
}

/// Returns whether `role` may create or edit shifts.
#[must_use]
pub const fn can_manage_schedule(role: Role) -> bool {
    has_permission(role, Capability::CreateShifts) || has_permission(role, Capability::EditShifts)
}
