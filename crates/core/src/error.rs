// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftdesk_domain::{Capability, DomainError, ShiftId, StaffId};

/// Errors that can occur during state transitions.
///
/// A failed transition never changes state and never produces an audit
/// event or notification events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A referenced record does not exist.
    NotFound {
        /// The kind of record ("staff", "shift", "request").
        entity: &'static str,
        /// The identifier that was looked up.
        id: String,
    },
    /// One or more validation checks failed. Every failing reason is kept.
    ValidationFailed {
        /// Human-readable reasons, in check order.
        reasons: Vec<String>,
    },
    /// The caller's role does not grant the required capability.
    PermissionDenied {
        /// The command that was refused.
        action: String,
        /// The capability the caller lacks.
        capability: Capability,
    },
    /// The record is not in a state that allows the operation.
    InvalidState {
        /// The kind of record.
        entity: &'static str,
        /// The record identifier.
        id: String,
        /// Why the operation was refused.
        reason: String,
    },
    /// A staff member would be double-booked.
    Conflict {
        /// The staff member with the clash.
        staff_id: StaffId,
        /// The shifts that overlap.
        conflicting_shifts: Vec<ShiftId>,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} '{id}' not found"),
            Self::ValidationFailed { reasons } => {
                write!(f, "Validation failed: {}", reasons.join(", "))
            }
            Self::PermissionDenied { action, capability } => {
                write!(f, "{action} requires the {capability} capability")
            }
            Self::InvalidState { entity, id, reason } => {
                write!(f, "Invalid state for {entity} '{id}': {reason}")
            }
            Self::Conflict {
                staff_id,
                conflicting_shifts,
            } => {
                let shifts: Vec<&str> = conflicting_shifts.iter().map(ShiftId::value).collect();
                write!(
                    f,
                    "Staff member '{staff_id}' is already assigned to overlapping shifts: {}",
                    shifts.join(", ")
                )
            }
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
