// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff requests and their review lifecycle.
//!
//! A request starts pending and is reviewed exactly once. The review
//! (reviewer, time, notes) is written together with the status change and
//! never afterwards.

use crate::error::DomainError;
use crate::types::{RequestId, ShiftId, StaffId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// What a staff member is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Leave for a date range.
    TimeOff,
    /// Swap an assigned shift with someone else.
    ShiftSwap,
    /// Extra coverage or overtime.
    Coverage,
}

impl RequestType {
    /// Returns the string representation of the request type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TimeOff => "time_off",
            Self::ShiftSwap => "shift_swap",
            Self::Coverage => "coverage",
        }
    }

    /// Returns a human-readable label used in notification text.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TimeOff => "time-off",
            Self::ShiftSwap => "shift swap",
            Self::Coverage => "coverage",
        }
    }
}

impl FromStr for RequestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time_off" => Ok(Self::TimeOff),
            "shift_swap" | "swap" => Ok(Self::ShiftSwap),
            "coverage" | "cover" | "overtime" => Ok(Self::Coverage),
            _ => Err(DomainError::InvalidRequestType(s.to_string())),
        }
    }
}

/// Review state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting review.
    Pending,
    /// Approved by a reviewer.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
}

impl RequestStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true once the request has been reviewed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Validates a transition from this status to `new_status`.
    ///
    /// # Errors
    ///
    /// Returns an error unless this status is pending and the new status
    /// is approved or rejected.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "request has already been reviewed".to_string(),
            });
        }

        if new_status.is_terminal() {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "a review must approve or reject".to_string(),
            })
        }
    }
}

impl FromStr for RequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidRequestStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently the requester needs an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// A reviewer's decision, recorded once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub reviewed_by: StaffId,
    #[serde(with = "time::serde::rfc3339")]
    pub reviewed_at: OffsetDateTime,
    pub notes: Option<String>,
}

/// A staff-initiated request that needs reviewer approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub requester_id: StaffId,
    pub requester_name: String,
    pub request_type: RequestType,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
    pub urgency: Option<Urgency>,
    /// The shift a swap or coverage request refers to, if any.
    pub shift_id: Option<ShiftId>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    status: RequestStatus,
    review: Option<Review>,
}

impl Request {
    /// Creates a new pending request with no review.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date` is before
    /// `start_date`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: RequestId,
        requester_id: StaffId,
        requester_name: &str,
        request_type: RequestType,
        start_date: Date,
        end_date: Date,
        reason: Option<String>,
        created_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            id,
            requester_id,
            requester_name: requester_name.to_string(),
            request_type,
            start_date,
            end_date,
            reason,
            urgency: None,
            shift_id: None,
            created_at,
            status: RequestStatus::Pending,
            review: None,
        })
    }

    /// Sets the urgency.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// Links the request to a shift.
    #[must_use]
    pub fn with_shift(mut self, shift_id: ShiftId) -> Self {
        self.shift_id = Some(shift_id);
        self
    }

    /// Returns the review status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns the review, present only once the request is approved or rejected.
    #[must_use]
    pub const fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    /// Formats the date range for display, e.g. `2026-01-15 to 2026-01-17`.
    #[must_use]
    pub fn date_range_label(&self) -> String {
        if self.start_date == self.end_date {
            self.start_date.to_string()
        } else {
            format!("{} to {}", self.start_date, self.end_date)
        }
    }

    /// Records a review decision together with the status change.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is not pending, if `decision` is not
    /// a reviewed status, or if a rejection carries no notes.
    pub fn record_review(
        &mut self,
        decision: RequestStatus,
        review: Review,
    ) -> Result<(), DomainError> {
        self.status.validate_transition(decision)?;

        if decision == RequestStatus::Rejected
            && review.notes.as_deref().is_none_or(|n| n.trim().is_empty())
        {
            return Err(DomainError::MissingRejectionReason);
        }

        self.status = decision;
        self.review = Some(review);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn create_request() -> Request {
        Request::new(
            RequestId::new("req-1"),
            StaffId::new("nurse-1"),
            "Emily Rodriguez",
            RequestType::TimeOff,
            date!(2026 - 01 - 15),
            date!(2026 - 01 - 17),
            Some(String::from("Family event")),
            datetime!(2026-01-02 09:00 UTC),
        )
        .unwrap()
    }

    fn create_review(notes: Option<&str>) -> Review {
        Review {
            reviewed_by: StaffId::new("sup-1"),
            reviewed_at: datetime!(2026-01-03 10:00 UTC),
            notes: notes.map(String::from),
        }
    }

    #[test]
    fn test_new_request_is_pending_without_review() {
        let request = create_request();

        assert_eq!(request.status(), RequestStatus::Pending);
        assert!(request.review().is_none());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let result = Request::new(
            RequestId::new("req-2"),
            StaffId::new("nurse-1"),
            "Emily Rodriguez",
            RequestType::TimeOff,
            date!(2026 - 01 - 17),
            date!(2026 - 01 - 15),
            None,
            datetime!(2026-01-02 09:00 UTC),
        );

        assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_approval_without_notes_sets_review() {
        let mut request = create_request();

        request
            .record_review(RequestStatus::Approved, create_review(None))
            .unwrap();

        assert_eq!(request.status(), RequestStatus::Approved);
        let review = request.review().unwrap();
        assert_eq!(review.reviewed_by.value(), "sup-1");
        assert_eq!(review.notes, None);
    }

    #[test]
    fn test_rejection_requires_notes() {
        let mut request = create_request();

        let result = request.record_review(RequestStatus::Rejected, create_review(Some("  ")));

        assert_eq!(result, Err(DomainError::MissingRejectionReason));
        assert_eq!(request.status(), RequestStatus::Pending);
        assert!(request.review().is_none());
    }

    #[test]
    fn test_second_review_does_not_overwrite_first() {
        let mut request = create_request();
        request
            .record_review(RequestStatus::Approved, create_review(Some("Enjoy")))
            .unwrap();

        let result =
            request.record_review(RequestStatus::Rejected, create_review(Some("Changed mind")));

        assert!(matches!(
            result,
            Err(DomainError::InvalidStatusTransition { .. })
        ));
        assert_eq!(request.status(), RequestStatus::Approved);
        assert_eq!(request.review().unwrap().notes.as_deref(), Some("Enjoy"));
    }

    #[test]
    fn test_pending_is_not_a_review_decision() {
        let mut request = create_request();

        let result = request.record_review(RequestStatus::Pending, create_review(None));

        assert!(result.is_err());
    }

    #[test]
    fn test_request_type_accepts_legacy_names() {
        assert_eq!("swap".parse::<RequestType>(), Ok(RequestType::ShiftSwap));
        assert_eq!("overtime".parse::<RequestType>(), Ok(RequestType::Coverage));
        assert!("schedule_change".parse::<RequestType>().is_err());
    }

    #[test]
    fn test_date_range_label() {
        let request = create_request();

        assert_eq!(request.date_range_label(), "2026-01-15 to 2026-01-17");
    }
}
