// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::conflict::find_conflicts;
use crate::error::DomainError;
use crate::types::{Role, Shift, ShiftId, StaffId, StaffMember};
use serde::{Deserialize, Serialize};

/// A single reason an assignment was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ValidationReason {
    /// The staff member works in a different department.
    DepartmentMismatch,
    /// The staff member lacks some required certifications.
    MissingCertifications {
        /// The certifications not held.
        missing: Vec<String>,
    },
    /// The shift requires a different role.
    RoleMismatch {
        /// The role the shift requires.
        required: Role,
        /// The staff member's role.
        actual: Role,
    },
    /// The staff member is already assigned to an overlapping shift.
    OverlappingShift {
        /// The overlapping shifts.
        conflicting: Vec<ShiftId>,
    },
    /// The staff member has been deactivated.
    InactiveStaff,
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepartmentMismatch => f.write_str("department mismatch"),
            Self::MissingCertifications { .. } => f.write_str("missing required certifications"),
            Self::RoleMismatch { .. } => f.write_str("role mismatch"),
            Self::OverlappingShift { .. } => f.write_str("overlapping shift"),
            Self::InactiveStaff => f.write_str("inactive staff member"),
        }
    }
}

/// The outcome of validating an assignment.
///
/// Every failing check contributes a reason so callers can explain the
/// whole rejection at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub reasons: Vec<ValidationReason>,
}

impl ValidationResult {
    /// Builds a result from the collected reasons.
    #[must_use]
    pub fn from_reasons(reasons: Vec<ValidationReason>) -> Self {
        Self {
            is_valid: reasons.is_empty(),
            reasons,
        }
    }

    /// Returns the human-readable reason messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Validates assigning `staff` to `shift`.
///
/// Checks, independently and in this order: department, required
/// certifications, required role, overlapping assignments, and whether the
/// staff member is active. `existing_shifts` may contain `shift` itself;
/// it is skipped when looking for overlaps.
///
/// This function is pure and reads only the records it is given, so it
/// must be called again for every assignment attempt.
#[must_use]
pub fn validate_assignment(
    shift: &Shift,
    staff: &StaffMember,
    existing_shifts: &[Shift],
) -> ValidationResult {
    let mut reasons: Vec<ValidationReason> = Vec::new();

    if shift.department_id != staff.department_id {
        reasons.push(ValidationReason::DepartmentMismatch);
    }

    let missing: Vec<String> = staff.missing_certifications(&shift.required_certifications);
    if !missing.is_empty() {
        reasons.push(ValidationReason::MissingCertifications { missing });
    }

    if let Some(required) = shift.required_role
        && required != staff.role
    {
        reasons.push(ValidationReason::RoleMismatch {
            required,
            actual: staff.role,
        });
    }

    let conflicting: Vec<ShiftId> = find_conflicts(
        &staff.id,
        &shift.window,
        existing_shifts.iter().filter(|other| other.id != shift.id),
    );
    if !conflicting.is_empty() {
        reasons.push(ValidationReason::OverlappingShift { conflicting });
    }

    if !staff.is_active {
        reasons.push(ValidationReason::InactiveStaff);
    }

    ValidationResult::from_reasons(reasons)
}

/// Validates a staff member's basic field constraints.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The email is empty or has no `@`
/// - The department is empty
pub fn validate_staff_fields(staff: &StaffMember) -> Result<(), DomainError> {
    if staff.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let email: &str = staff.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{}' is not a valid email address",
            staff.email
        )));
    }

    if staff.department_id.value().trim().is_empty() {
        return Err(DomainError::InvalidDepartment(String::from(
            "Department cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that no other staff member uses `email`.
///
/// Comparison is case-insensitive. `exclude` skips the staff member being
/// updated.
///
/// # Errors
///
/// Returns `DomainError::DuplicateEmail` if the email is taken.
pub fn validate_email_unique(
    email: &str,
    existing_staff: &[StaffMember],
    exclude: Option<&StaffId>,
) -> Result<(), DomainError> {
    let taken: bool = existing_staff
        .iter()
        .filter(|staff| Some(&staff.id) != exclude)
        .any(|staff| staff.email.eq_ignore_ascii_case(email.trim()));

    if taken {
        return Err(DomainError::DuplicateEmail(email.to_string()));
    }
    Ok(())
}
