// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, OffsetDateTime};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Staff name is empty or invalid.
    InvalidName(String),
    /// Staff email is empty or malformed.
    InvalidEmail(String),
    /// Another staff member already uses this email.
    DuplicateEmail(String),
    /// Role string does not name a known role.
    InvalidRole(String),
    /// A department identifier is empty.
    InvalidDepartment(String),
    /// A shift window does not end after it starts.
    InvalidTimeWindow {
        /// The window start.
        start: OffsetDateTime,
        /// The window end.
        end: OffsetDateTime,
    },
    /// A shift capacity must be at least one.
    InvalidCapacity {
        /// The invalid capacity.
        count: u32,
    },
    /// A request date range ends before it starts.
    InvalidDateRange {
        /// The range start.
        start: Date,
        /// The range end.
        end: Date,
    },
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// Shift status string is not recognized.
    InvalidShiftStatus(String),
    /// Request status string is not recognized.
    InvalidRequestStatus(String),
    /// Request type string is not recognized.
    InvalidRequestType(String),
    /// Capability key is not recognized.
    InvalidCapability(String),
    /// A rejection was submitted without a reason.
    MissingRejectionReason,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::DuplicateEmail(email) => {
                write!(f, "A staff member with email '{email}' already exists")
            }
            Self::InvalidRole(role) => write!(f, "Invalid role: '{role}'"),
            Self::InvalidDepartment(msg) => write!(f, "Invalid department: {msg}"),
            Self::InvalidTimeWindow { start, end } => {
                write!(f, "Shift must end after it starts (start {start}, end {end})")
            }
            Self::InvalidCapacity { count } => {
                write!(
                    f,
                    "Invalid staff required count: {count}. Must be greater than 0"
                )
            }
            Self::InvalidDateRange { start, end } => {
                write!(
                    f,
                    "Request end date {end} must not be before start date {start}"
                )
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::InvalidShiftStatus(status) => write!(f, "Invalid shift status: '{status}'"),
            Self::InvalidRequestStatus(status) => {
                write!(f, "Invalid request status: '{status}'")
            }
            Self::InvalidRequestType(kind) => write!(f, "Invalid request type: '{kind}'"),
            Self::InvalidCapability(key) => write!(f, "Invalid capability: '{key}'"),
            Self::MissingRejectionReason => {
                write!(f, "A reason is required when rejecting a request")
            }
        }
    }
}

impl std::error::Error for DomainError {}
