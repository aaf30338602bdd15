// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use shiftdesk_domain::{
    Notification, Request, RequestStatus, RequestType, Shift, ShiftStatus, StaffMember, Urgency,
};
use time::{Date, OffsetDateTime};

/// API request to add a staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStaffRequest {
    /// Full name.
    pub name: String,
    /// Contact email, unique across staff.
    pub email: String,
    /// One of admin, supervisor, doctor, nurse.
    pub role: String,
    /// The home department.
    pub department_id: String,
    /// Certifications held.
    pub certifications: Vec<String>,
}

/// API request to change a staff member. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateStaffRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub department_id: Option<String>,
    pub certifications: Option<Vec<String>>,
}

/// API request to create a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShiftRequest {
    pub department_id: String,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    /// Role name, if the shift needs a specific role.
    pub required_role: Option<String>,
    pub required_certifications: Vec<String>,
    /// Capacity; defaults to one.
    pub staff_required: Option<u32>,
    /// Staff to assign at creation.
    pub assigned_staff: Vec<String>,
}

/// API request to change a shift. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateShiftRequest {
    /// Replacement window; both ends must be given together.
    pub window: Option<(OffsetDateTime, OffsetDateTime)>,
    pub department_id: Option<String>,
    /// `Some(None)` clears the role requirement.
    pub required_role: Option<Option<String>>,
    pub required_certifications: Option<Vec<String>>,
    pub staff_required: Option<u32>,
}

/// API request to submit a request on the actor's own behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequestRequest {
    /// One of `time_off`, `shift_swap`, `coverage`.
    pub request_type: String,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
    pub urgency: Option<Urgency>,
    /// The shift a swap or coverage request refers to.
    pub shift_id: Option<String>,
}

/// API request to send an alert to staff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastAlertRequest {
    pub title: String,
    pub message: String,
    /// Staff to alert. Empty means every active staff member.
    pub recipients: Vec<String>,
}

/// Filters for listing requests. Every set filter must match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub request_type: Option<RequestType>,
    pub status: Option<RequestStatus>,
    pub urgency: Option<Urgency>,
}

impl RequestFilter {
    /// Returns whether `request` passes every set filter.
    #[must_use]
    pub fn matches(&self, request: &Request) -> bool {
        self.request_type.is_none_or(|t| request.request_type == t)
            && self.status.is_none_or(|s| request.status() == s)
            && self.urgency.is_none_or(|u| request.urgency == Some(u))
    }
}

/// Filters for listing shifts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftFilter {
    pub department_id: Option<String>,
    pub status: Option<ShiftStatus>,
}

impl ShiftFilter {
    /// Returns whether `shift` passes every set filter.
    #[must_use]
    pub fn matches(&self, shift: &Shift) -> bool {
        self.department_id
            .as_deref()
            .is_none_or(|d| shift.department_id.value() == d)
            && self.status.is_none_or(|s| shift.status() == s)
    }
}

/// A staff member as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StaffResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department_id: String,
    pub certifications: Vec<String>,
    pub is_active: bool,
}

impl From<&StaffMember> for StaffResponse {
    fn from(staff: &StaffMember) -> Self {
        Self {
            id: staff.id.to_string(),
            name: staff.name.clone(),
            email: staff.email.clone(),
            role: staff.role.to_string(),
            department_id: staff.department_id.to_string(),
            certifications: staff.certifications.iter().cloned().collect(),
            is_active: staff.is_active,
        }
    }
}

/// A shift as returned to callers, with its derived status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShiftResponse {
    pub id: String,
    pub department_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    pub required_role: Option<String>,
    pub required_certifications: Vec<String>,
    pub assigned_staff: Vec<String>,
    pub staff_required: u32,
    pub status: String,
}

impl From<&Shift> for ShiftResponse {
    fn from(shift: &Shift) -> Self {
        Self {
            id: shift.id.to_string(),
            department_id: shift.department_id.to_string(),
            start: shift.window.start(),
            end: shift.window.end(),
            required_role: shift.required_role.map(|r| r.to_string()),
            required_certifications: shift.required_certifications.iter().cloned().collect(),
            assigned_staff: shift
                .assigned_staff()
                .iter()
                .map(ToString::to_string)
                .collect(),
            staff_required: shift.staff_required(),
            status: shift.status().to_string(),
        }
    }
}

/// A request as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RequestResponse {
    pub id: String,
    pub requester_id: String,
    pub requester_name: String,
    pub request_type: String,
    pub status: String,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
    pub urgency: Option<Urgency>,
    pub shift_id: Option<String>,
    pub reviewed_by: Option<String>,
    pub review_notes: Option<String>,
}

impl From<&Request> for RequestResponse {
    fn from(request: &Request) -> Self {
        let review = request.review();
        Self {
            id: request.id.to_string(),
            requester_id: request.requester_id.to_string(),
            requester_name: request.requester_name.clone(),
            request_type: request.request_type.as_str().to_string(),
            status: request.status().to_string(),
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason.clone(),
            urgency: request.urgency,
            shift_id: request.shift_id.as_ref().map(ToString::to_string),
            reviewed_by: review.map(|r| r.reviewed_by.to_string()),
            review_notes: review.and_then(|r| r.notes.clone()),
        }
    }
}

/// The outcome of a read-only assignment check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationResponse {
    pub is_valid: bool,
    pub reasons: Vec<String>,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DashboardStats {
    pub total_staff: usize,
    pub active_staff: usize,
    pub total_shifts: usize,
    pub open_shifts: usize,
    pub understaffed_shifts: usize,
    pub filled_shifts: usize,
    pub cancelled_shifts: usize,
    pub pending_requests: usize,
    pub approved_requests: usize,
    pub rejected_requests: usize,
    pub departments: usize,
    pub average_staff_per_department: usize,
    /// Scheduled hours across every shift that is not cancelled.
    pub total_hours_scheduled: f64,
}

/// One entry of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActivityEntry {
    pub action: String,
    pub description: String,
    pub actor_id: String,
    pub actor_type: String,
    pub entity_type: String,
    pub entity_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

/// A recipient's notifications, newest first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

/// What an actor may do, for gating controls in a front end.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CapabilitiesResponse {
    pub role: String,
    /// Capability keys, in permission-table order.
    pub granted: Vec<String>,
    pub can_manage_staff: bool,
    pub can_manage_schedule: bool,
}
