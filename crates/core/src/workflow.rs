// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request submission and review.

use crate::apply::Recorder;
use crate::caller::Caller;
use crate::error::CoreError;
use crate::events::DomainEvent;
use crate::state::{State, TransitionResult, request_snapshot};
use shiftdesk_audit::{AuditSubject, StateSnapshot};
use shiftdesk_domain::{
    Capability, DomainError, Request, RequestId, RequestStatus, RequestType, Review, ShiftId,
    StaffMember, Urgency, has_permission,
};
use time::Date;

/// The fields of a new request.
pub(crate) struct Submission {
    pub(crate) id: RequestId,
    pub(crate) request_type: RequestType,
    pub(crate) start_date: Date,
    pub(crate) end_date: Date,
    pub(crate) reason: Option<String>,
    pub(crate) urgency: Option<Urgency>,
    pub(crate) shift_id: Option<ShiftId>,
}

fn review_error(request_id: &RequestId, err: DomainError) -> CoreError {
    match err {
        DomainError::MissingRejectionReason => CoreError::ValidationFailed {
            reasons: vec![err.to_string()],
        },
        DomainError::InvalidStatusTransition { reason, .. } => CoreError::InvalidState {
            entity: "request",
            id: request_id.to_string(),
            reason,
        },
        other => CoreError::DomainViolation(other),
    }
}

fn pending_request<'s>(state: &'s State, request_id: &RequestId) -> Result<&'s Request, CoreError> {
    let request: &Request = state.request(request_id)?;
    if request.status().is_terminal() {
        return Err(CoreError::InvalidState {
            entity: "request",
            id: request_id.to_string(),
            reason: format!("request has already been {}", request.status()),
        });
    }
    Ok(request)
}

/// Records a review on a clone of the state.
fn review(
    state: &State,
    recorder: &Recorder<'_>,
    request_id: &RequestId,
    decision: RequestStatus,
    notes: Option<String>,
) -> Result<(State, StateSnapshot, Request), CoreError> {
    let before: StateSnapshot = request_snapshot(pending_request(state, request_id)?);

    let mut new_state: State = state.clone();
    let request: &mut Request = new_state.request_mut(request_id)?;
    request
        .record_review(
            decision,
            Review {
                reviewed_by: recorder.caller().id.clone(),
                reviewed_at: recorder.now(),
                notes,
            },
        )
        .map_err(|err| review_error(request_id, err))?;
    let reviewed: Request = request.clone();

    Ok((new_state, before, reviewed))
}

pub(crate) fn submit(
    state: &State,
    recorder: Recorder<'_>,
    submission: Submission,
) -> Result<TransitionResult, CoreError> {
    let requester: &StaffMember = state.staff(&recorder.caller().id)?;
    if !requester.is_active {
        return Err(CoreError::InvalidState {
            entity: "staff",
            id: requester.id.to_string(),
            reason: String::from("inactive staff members cannot submit requests"),
        });
    }
    if let Some(shift_id) = &submission.shift_id {
        state.shift(shift_id)?;
    }
    if state.find_request(&submission.id).is_some() {
        return Err(CoreError::InvalidState {
            entity: "request",
            id: submission.id.to_string(),
            reason: String::from("a request with this id already exists"),
        });
    }

    let mut request: Request = Request::new(
        submission.id,
        requester.id.clone(),
        &requester.name,
        submission.request_type,
        submission.start_date,
        submission.end_date,
        submission.reason.filter(|r| !r.trim().is_empty()),
        recorder.now(),
    )?;
    request.urgency = submission.urgency;
    request.shift_id = submission.shift_id;

    let event: DomainEvent = DomainEvent::RequestSubmitted {
        request_id: request.id.clone(),
        requester_id: request.requester_id.clone(),
        requester_name: request.requester_name.clone(),
        request_type: request.request_type,
        date_range: request.date_range_label(),
    };
    let details: String = format!(
        "{} submitted a {} request for {}",
        request.requester_name,
        request.request_type.label(),
        request.date_range_label()
    );
    let subject: AuditSubject = AuditSubject::new("request", request.id.value());

    let before: StateSnapshot = state.to_snapshot();
    let mut new_state: State = state.clone();
    new_state.requests.push(request);
    let after: StateSnapshot = new_state.to_snapshot();

    Ok(recorder.finish(new_state, details, subject, (before, after), vec![event]))
}

pub(crate) fn approve(
    state: &State,
    recorder: Recorder<'_>,
    request_id: &RequestId,
    notes: Option<String>,
) -> Result<TransitionResult, CoreError> {
    let notes: Option<String> = notes.filter(|n| !n.trim().is_empty());
    let (new_state, before, reviewed) =
        review(state, &recorder, request_id, RequestStatus::Approved, notes)?;

    let event: DomainEvent = DomainEvent::RequestApproved {
        request_id: request_id.clone(),
        requester_id: reviewed.requester_id.clone(),
        request_type: reviewed.request_type,
        date_range: reviewed.date_range_label(),
        notes: reviewed.review().and_then(|r| r.notes.clone()),
    };

    Ok(recorder.finish(
        new_state,
        format!(
            "Approved {} request {request_id} from {}",
            reviewed.request_type.label(),
            reviewed.requester_name
        ),
        AuditSubject::new("request", request_id.value()),
        (before, request_snapshot(&reviewed)),
        vec![event],
    ))
}

pub(crate) fn reject(
    state: &State,
    recorder: Recorder<'_>,
    request_id: &RequestId,
    notes: String,
) -> Result<TransitionResult, CoreError> {
    let reason: String = notes.trim().to_string();
    let (new_state, before, reviewed) = review(
        state,
        &recorder,
        request_id,
        RequestStatus::Rejected,
        Some(reason.clone()),
    )?;

    let event: DomainEvent = DomainEvent::RequestRejected {
        request_id: request_id.clone(),
        requester_id: reviewed.requester_id.clone(),
        request_type: reviewed.request_type,
        date_range: reviewed.date_range_label(),
        reason,
    };

    Ok(recorder.finish(
        new_state,
        format!(
            "Rejected {} request {request_id} from {}",
            reviewed.request_type.label(),
            reviewed.requester_name
        ),
        AuditSubject::new("request", request_id.value()),
        (before, request_snapshot(&reviewed)),
        vec![event],
    ))
}

/// Returns the requests `viewer` may see.
///
/// Reviewers see every request. Everyone else sees only their own.
#[must_use]
pub fn visible_requests<'r>(viewer: &Caller, requests: &'r [Request]) -> Vec<&'r Request> {
    if has_permission(viewer.role, Capability::ApproveRequests) {
        return requests.iter().collect();
    }
    requests
        .iter()
        .filter(|r| r.requester_id == viewer.id)
        .collect()
}
