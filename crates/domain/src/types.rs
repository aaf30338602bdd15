// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::shift_status::ShiftStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            value: String,
        }

        impl $name {
            /// Creates a new identifier from its string value.
            #[must_use]
            pub fn new(value: &str) -> Self {
                Self {
                    value: value.to_string(),
                }
            }

            /// Returns the identifier value.
            #[must_use]
            pub fn value(&self) -> &str {
                &self.value
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.value)
            }
        }
    };
}

string_id!(
    /// Identifies a staff member.
    StaffId
);
string_id!(
    /// Identifies a shift.
    ShiftId
);
string_id!(
    /// Identifies a staff request.
    RequestId
);
string_id!(
    /// Identifies a hospital department (e.g. "ICU").
    DepartmentId
);

/// Staff roles.
///
/// Roles are the only input to the permission model. Code outside the
/// permission model never compares roles to decide what a caller may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative authority.
    Admin,
    /// Schedules departments and reviews requests.
    Supervisor,
    /// Clinical staff.
    Doctor,
    /// Clinical staff.
    Nurse,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Self; 4] = [Self::Admin, Self::Supervisor, Self::Doctor, Self::Nurse];

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Supervisor => "supervisor",
            Self::Doctor => "doctor",
            Self::Nurse => "nurse",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "supervisor" => Ok(Self::Supervisor),
            "doctor" => Ok(Self::Doctor),
            "nurse" => Ok(Self::Nurse),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "time::serde::rfc3339")]
    start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end: OffsetDateTime,
}

impl TimeWindow {
    /// Creates a new window.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeWindow` unless `start < end`.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidTimeWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the window start.
    #[must_use]
    pub const fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns the window end.
    #[must_use]
    pub const fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Returns the length of the window.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if the two windows share any instant.
    ///
    /// Touching windows (`self.end == other.start`) do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A member of hospital staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department_id: DepartmentId,
    pub certifications: BTreeSet<String>,
    /// False once the staff member has been deactivated. The record is kept.
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub deactivated_at: Option<OffsetDateTime>,
}

impl StaffMember {
    /// Creates a new, active staff member.
    #[must_use]
    pub fn new(
        id: StaffId,
        name: &str,
        email: &str,
        role: Role,
        department_id: DepartmentId,
        certifications: BTreeSet<String>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            department_id,
            certifications,
            is_active: true,
            created_at,
            updated_at: None,
            deactivated_at: None,
        }
    }

    /// Returns the required certifications this staff member does not hold.
    #[must_use]
    pub fn missing_certifications(&self, required: &BTreeSet<String>) -> Vec<String> {
        required
            .difference(&self.certifications)
            .cloned()
            .collect()
    }
}

/// A scheduled work interval in a department with a staffing capacity.
///
/// The status of a shift is never stored. It is derived from the number
/// of assignees and the capacity, except for the terminal cancelled state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub department_id: DepartmentId,
    pub window: TimeWindow,
    pub required_role: Option<Role>,
    #[serde(default)]
    pub required_certifications: BTreeSet<String>,
    assigned_staff: Vec<StaffId>,
    staff_required: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub assigned_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    cancelled_at: Option<OffsetDateTime>,
}

impl Shift {
    /// Creates a new unassigned shift.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCapacity` if `staff_required` is zero.
    pub fn new(
        id: ShiftId,
        department_id: DepartmentId,
        window: TimeWindow,
        staff_required: u32,
        created_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if staff_required == 0 {
            return Err(DomainError::InvalidCapacity {
                count: staff_required,
            });
        }
        Ok(Self {
            id,
            department_id,
            window,
            required_role: None,
            required_certifications: BTreeSet::new(),
            assigned_staff: Vec::new(),
            staff_required,
            created_at,
            assigned_at: None,
            cancelled_at: None,
        })
    }

    /// Sets the role an assignee must hold.
    #[must_use]
    pub const fn with_required_role(mut self, role: Role) -> Self {
        self.required_role = Some(role);
        self
    }

    /// Sets the certifications an assignee must hold.
    #[must_use]
    pub fn with_required_certifications(mut self, certifications: BTreeSet<String>) -> Self {
        self.required_certifications = certifications;
        self
    }

    /// Returns the current status derived from assignment count and capacity.
    #[must_use]
    pub fn status(&self) -> ShiftStatus {
        if self.cancelled_at.is_some() {
            return ShiftStatus::Cancelled;
        }
        ShiftStatus::from_counts(self.assigned_staff.len(), self.staff_required)
    }

    /// Returns the assigned staff in assignment order.
    #[must_use]
    pub fn assigned_staff(&self) -> &[StaffId] {
        &self.assigned_staff
    }

    /// Returns the number of staff this shift needs.
    #[must_use]
    pub const fn staff_required(&self) -> u32 {
        self.staff_required
    }

    /// Returns when the shift was cancelled, if it was.
    #[must_use]
    pub const fn cancelled_at(&self) -> Option<OffsetDateTime> {
        self.cancelled_at
    }

    /// Returns true if the staff member is assigned to this shift.
    #[must_use]
    pub fn is_assigned(&self, staff_id: &StaffId) -> bool {
        self.assigned_staff.contains(staff_id)
    }

    /// Returns true once the shift has as many assignees as it needs.
    #[must_use]
    pub fn is_at_capacity(&self) -> bool {
        self.assigned_staff.len() >= self.staff_required as usize
    }

    /// Adds an assignee. Returns false if they were already assigned.
    pub fn add_assignee(&mut self, staff_id: StaffId, at: OffsetDateTime) -> bool {
        if self.is_assigned(&staff_id) {
            return false;
        }
        self.assigned_staff.push(staff_id);
        self.assigned_at = Some(at);
        true
    }

    /// Removes an assignee. Returns false if they were not assigned.
    pub fn remove_assignee(&mut self, staff_id: &StaffId) -> bool {
        let before: usize = self.assigned_staff.len();
        self.assigned_staff.retain(|id| id != staff_id);
        before != self.assigned_staff.len()
    }

    /// Changes the capacity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCapacity` if `staff_required` is zero.
    pub const fn set_staff_required(&mut self, staff_required: u32) -> Result<(), DomainError> {
        if staff_required == 0 {
            return Err(DomainError::InvalidCapacity {
                count: staff_required,
            });
        }
        self.staff_required = staff_required;
        Ok(())
    }

    /// Moves the shift into the terminal cancelled state.
    ///
    /// # Errors
    ///
    /// Returns an error if the shift is already cancelled.
    pub fn cancel(&mut self, at: OffsetDateTime) -> Result<(), DomainError> {
        self.status().validate_transition(ShiftStatus::Cancelled)?;
        self.cancelled_at = Some(at);
        Ok(())
    }
}
