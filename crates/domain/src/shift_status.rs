// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift staffing status and its derivation rule.
//!
//! A shift's status is a pure function of how many staff are assigned and
//! how many it requires. Cancellation is the only status set explicitly,
//! and it is terminal.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Staffing status of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Nobody is assigned.
    Open,
    /// Some, but not all, required staff are assigned.
    Understaffed,
    /// The required number of staff are assigned.
    Filled,
    /// The shift was cancelled. No further assignment changes are allowed.
    Cancelled,
}

impl ShiftStatus {
    /// Derives the status of an active shift from its counts.
    ///
    /// `assigned >= required` is filled, `0 < assigned < required` is
    /// understaffed and `assigned == 0` is open.
    #[must_use]
    pub fn from_counts(assigned: usize, required: u32) -> Self {
        let required: usize = usize::try_from(required).unwrap_or(usize::MAX);
        if assigned == 0 {
            Self::Open
        } else if assigned >= required {
            Self::Filled
        } else {
            Self::Understaffed
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Understaffed => "understaffed",
            Self::Filled => "filled",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if the shift still needs staff.
    #[must_use]
    pub const fn needs_coverage(&self) -> bool {
        matches!(self, Self::Open | Self::Understaffed)
    }

    /// Validates an explicit transition to `new_status`.
    ///
    /// Only cancellation is an explicit transition; the other statuses are
    /// reached by changing the assignee set.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        if new_status == Self::Cancelled {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "staffing statuses are derived from assignments".to_string(),
            })
        }
    }
}

impl FromStr for ShiftStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "understaffed" => Ok(Self::Understaffed),
            // "active" is the older spelling of a fully staffed shift
            "filled" | "active" => Ok(Self::Filled),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidShiftStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
