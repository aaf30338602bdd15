// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use shiftdesk::CoreError;
use shiftdesk_domain::{Capability, DomainError};
use shiftdesk_persistence::PersistenceError;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The actor lacks the capability the action needs.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The capability required for this action.
        capability: Capability,
    },
    /// The actor is a deactivated staff member.
    InactiveActor {
        /// The actor id.
        actor_id: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, capability } => {
                write!(f, "Unauthorized: '{action}' requires {capability}")
            }
            Self::InactiveActor { actor_id } => {
                write!(f, "Unauthorized: staff member '{actor_id}' is inactive")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// What the actor was missing.
        required: String,
    },
    /// One or more validation checks failed.
    ValidationFailed {
        /// Every failing reason, in check order.
        reasons: Vec<String>,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The record is in a state that does not allow the operation.
    InvalidState {
        /// The type of record.
        resource_type: String,
        /// A human-readable description of the refusal.
        message: String,
    },
    /// An assignment would double-book a staff member.
    Conflict {
        /// The staff member involved.
        staff_id: String,
        /// The shifts that overlap.
        conflicting_shifts: Vec<String>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, required } => {
                write!(f, "Unauthorized: '{action}' requires {required}")
            }
            Self::ValidationFailed { reasons } => {
                write!(f, "Validation failed: {}", reasons.join("; "))
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidState {
                resource_type,
                message,
            } => {
                write!(f, "Invalid {resource_type} state: {message}")
            }
            Self::Conflict {
                staff_id,
                conflicting_shifts,
            } => {
                write!(
                    f,
                    "Staff member '{staff_id}' is already assigned to overlapping shift(s): {}",
                    conflicting_shifts.join(", ")
                )
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized { action, capability } => Self::Unauthorized {
                action,
                required: capability.to_string(),
            },
            AuthError::InactiveActor { actor_id } => Self::Unauthorized {
                action: String::from("any"),
                required: format!("an active staff member (got '{actor_id}')"),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::InvalidName(_) => "name",
        DomainError::InvalidEmail(_) | DomainError::DuplicateEmail(_) => "email",
        DomainError::InvalidRole(_) => "role",
        DomainError::InvalidDepartment(_) => "department_id",
        DomainError::InvalidTimeWindow { .. } => "window",
        DomainError::InvalidCapacity { .. } => "staff_required",
        DomainError::InvalidDateRange { .. } => "date_range",
        DomainError::InvalidShiftStatus(_) | DomainError::InvalidRequestStatus(_) => "status",
        DomainError::InvalidRequestType(_) => "request_type",
        DomainError::InvalidCapability(_) => "capability",
        DomainError::MissingRejectionReason => "notes",
        DomainError::InvalidStatusTransition { .. } => {
            return ApiError::InvalidState {
                resource_type: String::from("record"),
                message: err.to_string(),
            };
        }
    };
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
///
/// Reason lists are carried through whole.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::NotFound { entity, id } => ApiError::ResourceNotFound {
            resource_type: entity.to_string(),
            message: format!("{entity} '{id}' does not exist"),
        },
        CoreError::ValidationFailed { reasons } => ApiError::ValidationFailed { reasons },
        CoreError::PermissionDenied { action, capability } => ApiError::Unauthorized {
            action,
            required: capability.to_string(),
        },
        CoreError::InvalidState { entity, id, reason } => ApiError::InvalidState {
            resource_type: entity.to_string(),
            message: format!("{entity} '{id}': {reason}"),
        },
        CoreError::Conflict {
            staff_id,
            conflicting_shifts,
        } => ApiError::Conflict {
            staff_id: staff_id.to_string(),
            conflicting_shifts: conflicting_shifts
                .iter()
                .map(ToString::to_string)
                .collect(),
        },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound { entity, id } => ApiError::ResourceNotFound {
            resource_type: entity.to_string(),
            message: format!("{entity} '{id}' does not exist"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
