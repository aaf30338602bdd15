// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service operations.
//!
//! Every mutating operation follows the same path: authorize, load the
//! current state, apply the command, commit the changed records together
//! with the audit event, and finally hand the transition's events to the
//! notification dispatcher. A failure at any step up to and including the
//! commit leaves storage, the activity log and every notification sink
//! untouched.

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::capabilities::compute_capabilities;
use crate::config::SchedulerConfig;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    ActivityEntry, BroadcastAlertRequest, CapabilitiesResponse, CreateShiftRequest,
    CreateStaffRequest, DashboardStats, NotificationsResponse, RequestFilter, RequestResponse,
    ShiftFilter, ShiftResponse, StaffResponse, SubmitRequestRequest, UpdateShiftRequest,
    UpdateStaffRequest, ValidationResponse,
};
use crate::stats::compute_stats;
use shiftdesk::{
    Command, DomainEvent, ShiftPatch, StaffPatch, State, TransitionResult, apply, coverage_gaps,
    validate_assignment_by_id, visible_requests,
};
use shiftdesk_audit::{AuditEvent, Cause};
use shiftdesk_domain::{
    Capability, DepartmentId, Notification, Request, RequestId, RequestType, Role, Shift,
    ShiftId, StaffId, StaffMember, TimeWindow, ValidationResult,
};
use shiftdesk_notifications::{Dispatcher, NotificationStore, ToastChannel};
use shiftdesk_persistence::SchedulingRepository;
use std::collections::BTreeSet;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Everything a service operation works against.
#[derive(Debug)]
pub struct ServiceContext<R: SchedulingRepository> {
    /// Record storage.
    pub repository: R,
    /// Per-recipient notification history.
    pub notifications: NotificationStore,
    /// Turns transition events into notifications.
    pub dispatcher: Dispatcher,
    /// The configuration the context was built from.
    pub config: SchedulerConfig,
}

impl<R: SchedulingRepository> ServiceContext<R> {
    /// Builds a context over `repository` sized by `config`.
    #[must_use]
    pub fn new(repository: R, config: SchedulerConfig) -> Self {
        Self {
            repository,
            notifications: NotificationStore::new(config.notification_limit),
            dispatcher: Dispatcher::new(ToastChannel::new(config.toast_ttl())),
            config,
        }
    }

    /// Returns the toast channel, for subscribing.
    #[must_use]
    pub const fn toasts(&self) -> &ToastChannel {
        self.dispatcher.toasts()
    }
}

/// The result of an API operation.
///
/// `audit_event` is `None` only when the operation changed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: Option<AuditEvent>,
    /// The notifications the operation produced.
    pub notifications: Vec<Notification>,
}

/// State after a command went through the full pipeline.
struct Executed {
    state: State,
    audit_event: Option<AuditEvent>,
    notifications: Vec<Notification>,
}

impl Executed {
    fn into_result<T>(self, response: T) -> ApiResult<T> {
        ApiResult {
            response,
            audit_event: self.audit_event,
            notifications: self.notifications,
        }
    }
}

fn load_state<R: SchedulingRepository>(ctx: &ServiceContext<R>) -> Result<State, ApiError> {
    ctx.repository
        .load_state()
        .map_err(translate_persistence_error)
}

/// Authorizes a read and refuses deactivated actors.
fn authorize_read<R: SchedulingRepository>(
    ctx: &ServiceContext<R>,
    actor: &AuthenticatedActor,
    capability: Capability,
    action: &str,
) -> Result<State, ApiError> {
    AuthorizationService::authorize(actor, capability, action)?;
    let state: State = load_state(ctx)?;
    AuthorizationService::ensure_active(actor, &state.staff)?;
    Ok(state)
}

fn execute<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    command: Command,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<Executed, ApiError> {
    AuthorizationService::authorize_command(actor, &command)?;
    let before: State = load_state(ctx)?;
    AuthorizationService::ensure_active(actor, &before.staff)?;

    let action: &'static str = command.name();
    let TransitionResult {
        new_state,
        audit_event,
        events,
    } = apply(&before, command, &actor.to_caller(), cause, now).map_err(translate_core_error)?;

    let Some(audit_event) = audit_event else {
        debug!(action, actor = %actor.id, "Command changed nothing");
        return Ok(Executed {
            state: new_state,
            audit_event: None,
            notifications: Vec::new(),
        });
    };

    ctx.repository
        .commit(&before, &new_state, &audit_event)
        .map_err(translate_persistence_error)?;

    let notifications: Vec<Notification> = ctx.dispatcher.dispatch(
        &events,
        &new_state.staff,
        &mut ctx.notifications,
        now,
    );

    info!(
        action,
        actor = %actor.id,
        subject = %audit_event.subject.entity_id,
        notifications = notifications.len(),
        "Applied command"
    );

    Ok(Executed {
        state: new_state,
        audit_event: Some(audit_event),
        notifications,
    })
}

fn parse_role(value: &str) -> Result<Role, ApiError> {
    value.trim().parse::<Role>().map_err(translate_domain_error)
}

fn certification_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn staff_response(state: &State, id: &StaffId) -> Result<StaffResponse, ApiError> {
    state
        .staff(id)
        .map(StaffResponse::from)
        .map_err(translate_core_error)
}

fn shift_response(state: &State, id: &ShiftId) -> Result<ShiftResponse, ApiError> {
    state
        .shift(id)
        .map(ShiftResponse::from)
        .map_err(translate_core_error)
}

fn request_response(state: &State, id: &RequestId) -> Result<RequestResponse, ApiError> {
    state
        .request(id)
        .map(RequestResponse::from)
        .map_err(translate_core_error)
}

/// Adds a staff member.
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks `canCreateStaff`
/// - The role is unknown, the name is blank or the email is malformed
/// - The email is already used by another staff member
pub fn create_staff<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    request: CreateStaffRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<StaffResponse>, ApiError> {
    AuthorizationService::authorize(actor, Capability::CreateStaff, "create_staff")?;
    let role: Role = parse_role(&request.role)?;
    let id: StaffId = ctx
        .repository
        .next_staff_id()
        .map_err(translate_persistence_error)?;

    let command: Command = Command::CreateStaff {
        id: id.clone(),
        name: request.name,
        email: request.email,
        role,
        department_id: DepartmentId::new(request.department_id.trim()),
        certifications: certification_set(&request.certifications),
    };

    let executed: Executed = execute(ctx, actor, command, cause, now)?;
    let response: StaffResponse = staff_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Changes a staff member's details.
///
/// # Errors
///
/// Returns an error if the actor lacks `canEditStaff`, the staff member
/// does not exist, or a changed field is invalid.
pub fn update_staff<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    staff_id: &str,
    request: UpdateStaffRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<StaffResponse>, ApiError> {
    let role: Option<Role> = request.role.as_deref().map(parse_role).transpose()?;
    let id: StaffId = StaffId::new(staff_id);
    let patch: StaffPatch = StaffPatch {
        name: request.name,
        email: request.email,
        role,
        department_id: request
            .department_id
            .as_deref()
            .map(|d| DepartmentId::new(d.trim())),
        certifications: request.certifications.as_deref().map(certification_set),
    };

    let executed: Executed = execute(
        ctx,
        actor,
        Command::UpdateStaff {
            staff_id: id.clone(),
            patch,
        },
        cause,
        now,
    )?;
    let response: StaffResponse = staff_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Deactivates a staff member. The record is kept.
///
/// # Errors
///
/// Returns an error if the actor lacks `canDeleteStaff`, the staff member
/// does not exist, or is already inactive.
pub fn deactivate_staff<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    staff_id: &str,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<StaffResponse>, ApiError> {
    let id: StaffId = StaffId::new(staff_id);
    let executed: Executed = execute(
        ctx,
        actor,
        Command::DeactivateStaff {
            staff_id: id.clone(),
        },
        cause,
        now,
    )?;
    let response: StaffResponse = staff_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Lists staff members, sorted by name.
///
/// # Errors
///
/// Returns an error if the actor lacks `canViewStaff` or storage fails.
pub fn list_staff<R: SchedulingRepository>(
    ctx: &ServiceContext<R>,
    actor: &AuthenticatedActor,
    include_inactive: bool,
) -> Result<Vec<StaffResponse>, ApiError> {
    let state: State = authorize_read(ctx, actor, Capability::ViewStaff, "list_staff")?;
    let mut staff: Vec<&StaffMember> = state
        .staff
        .iter()
        .filter(|s| include_inactive || s.is_active)
        .collect();
    staff.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    Ok(staff.into_iter().map(StaffResponse::from).collect())
}

/// Creates a shift, optionally with staff assigned from the start.
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks `canCreateShifts`
/// - The window does not end after it starts, or the capacity is zero
/// - A pre-assigned staff member would be double-booked (`Conflict`)
/// - A pre-assigned staff member fails any other assignment check
pub fn create_shift<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    request: CreateShiftRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ShiftResponse>, ApiError> {
    AuthorizationService::authorize(actor, Capability::CreateShifts, "create_shift")?;
    let window: TimeWindow =
        TimeWindow::new(request.start, request.end).map_err(translate_domain_error)?;
    let required_role: Option<Role> = request
        .required_role
        .as_deref()
        .map(parse_role)
        .transpose()?;
    let id: ShiftId = ctx
        .repository
        .next_shift_id()
        .map_err(translate_persistence_error)?;

    let command: Command = Command::CreateShift {
        id: id.clone(),
        department_id: DepartmentId::new(request.department_id.trim()),
        window,
        required_role,
        required_certifications: certification_set(&request.required_certifications),
        staff_required: request.staff_required.unwrap_or(1),
        assigned_staff: request
            .assigned_staff
            .into_iter()
            .map(|s| StaffId::new(&s))
            .collect(),
    };

    let executed: Executed = execute(ctx, actor, command, cause, now)?;
    let response: ShiftResponse = shift_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Assigns one staff member to a shift.
///
/// Assigning someone already on the shift succeeds and changes nothing.
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks `canAssignStaff`
/// - The shift or staff member does not exist
/// - The shift is cancelled or already at capacity
/// - Any assignment check fails (every failing reason is returned)
pub fn assign_staff<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    shift_id: &str,
    staff_id: &str,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ShiftResponse>, ApiError> {
    let id: ShiftId = ShiftId::new(shift_id);
    let executed: Executed = execute(
        ctx,
        actor,
        Command::AssignStaff {
            shift_id: id.clone(),
            staff_id: StaffId::new(staff_id),
        },
        cause,
        now,
    )?;
    let response: ShiftResponse = shift_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Assigns several staff members at once. Either all are assigned or none.
///
/// # Errors
///
/// Returns the first failure among the assignments, as `assign_staff` would.
pub fn bulk_assign<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    shift_id: &str,
    staff_ids: &[String],
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ShiftResponse>, ApiError> {
    let id: ShiftId = ShiftId::new(shift_id);
    let executed: Executed = execute(
        ctx,
        actor,
        Command::BulkAssign {
            shift_id: id.clone(),
            staff_ids: staff_ids.iter().map(|s| StaffId::new(s)).collect(),
        },
        cause,
        now,
    )?;
    let response: ShiftResponse = shift_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Removes a staff member from a shift.
///
/// # Errors
///
/// Returns an error if the actor lacks `canAssignStaff`, the shift does
/// not exist or is cancelled.
pub fn unassign_staff<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    shift_id: &str,
    staff_id: &str,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ShiftResponse>, ApiError> {
    let id: ShiftId = ShiftId::new(shift_id);
    let executed: Executed = execute(
        ctx,
        actor,
        Command::UnassignStaff {
            shift_id: id.clone(),
            staff_id: StaffId::new(staff_id),
        },
        cause,
        now,
    )?;
    let response: ShiftResponse = shift_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Changes a shift. Current assignees are re-checked against the result.
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks `canEditShifts`
/// - The shift does not exist or is cancelled
/// - Any current assignee would no longer pass the assignment checks
/// - The capacity would drop below the number of assignees
pub fn update_shift<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    shift_id: &str,
    request: UpdateShiftRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ShiftResponse>, ApiError> {
    let window: Option<TimeWindow> = request
        .window
        .map(|(start, end)| TimeWindow::new(start, end))
        .transpose()
        .map_err(translate_domain_error)?;
    let (required_role, clear_required_role): (Option<Role>, bool) = match request.required_role {
        None => (None, false),
        Some(None) => (None, true),
        Some(Some(role)) => (Some(parse_role(&role)?), false),
    };
    let patch: ShiftPatch = ShiftPatch {
        window,
        department_id: request
            .department_id
            .as_deref()
            .map(|d| DepartmentId::new(d.trim())),
        required_role,
        clear_required_role,
        required_certifications: request
            .required_certifications
            .as_deref()
            .map(certification_set),
        staff_required: request.staff_required,
    };

    let id: ShiftId = ShiftId::new(shift_id);
    let executed: Executed = execute(
        ctx,
        actor,
        Command::UpdateShift {
            shift_id: id.clone(),
            patch,
        },
        cause,
        now,
    )?;
    let response: ShiftResponse = shift_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Cancels a shift. Cancellation is terminal.
///
/// # Errors
///
/// Returns an error if the actor lacks `canEditShifts`, the shift does not
/// exist, or it is already cancelled.
pub fn cancel_shift<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    shift_id: &str,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<ShiftResponse>, ApiError> {
    let id: ShiftId = ShiftId::new(shift_id);
    let executed: Executed = execute(
        ctx,
        actor,
        Command::CancelShift {
            shift_id: id.clone(),
        },
        cause,
        now,
    )?;
    let response: ShiftResponse = shift_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Removes a shift record.
///
/// # Errors
///
/// Returns an error if the actor lacks `canDeleteShifts` or the shift does
/// not exist.
pub fn delete_shift<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    shift_id: &str,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<String>, ApiError> {
    let executed: Executed = execute(
        ctx,
        actor,
        Command::DeleteShift {
            shift_id: ShiftId::new(shift_id),
        },
        cause,
        now,
    )?;
    Ok(executed.into_result(format!("Shift '{shift_id}' deleted")))
}

/// Lists shifts matching `filter`, earliest start first.
///
/// # Errors
///
/// Returns an error if the actor lacks `canViewSchedule` or storage fails.
pub fn list_shifts<R: SchedulingRepository>(
    ctx: &ServiceContext<R>,
    actor: &AuthenticatedActor,
    filter: &ShiftFilter,
) -> Result<Vec<ShiftResponse>, ApiError> {
    let state: State = authorize_read(ctx, actor, Capability::ViewSchedule, "list_shifts")?;
    let mut shifts: Vec<&Shift> = state.shifts.iter().filter(|s| filter.matches(s)).collect();
    shifts.sort_by(|a, b| {
        a.window
            .start()
            .cmp(&b.window.start())
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(shifts.into_iter().map(ShiftResponse::from).collect())
}

/// Checks whether a staff member could be assigned to a shift, without
/// assigning them.
///
/// # Errors
///
/// Returns an error if the actor lacks `canViewSchedule`, or the shift or
/// staff member does not exist.
pub fn validate_assignment<R: SchedulingRepository>(
    ctx: &ServiceContext<R>,
    actor: &AuthenticatedActor,
    shift_id: &str,
    staff_id: &str,
) -> Result<ValidationResponse, ApiError> {
    let state: State = authorize_read(ctx, actor, Capability::ViewSchedule, "validate_assignment")?;
    let result: ValidationResult =
        validate_assignment_by_id(&state, &ShiftId::new(shift_id), &StaffId::new(staff_id))
            .map_err(translate_core_error)?;
    Ok(ValidationResponse {
        is_valid: result.is_valid,
        reasons: result.messages(),
    })
}

/// Submits a request on the actor's own behalf.
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks `canCreateRequests` or is not a known active staff member
/// - The request type is unknown
/// - The date range ends before it starts
pub fn submit_request<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    request: SubmitRequestRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<RequestResponse>, ApiError> {
    AuthorizationService::authorize(actor, Capability::CreateRequests, "submit_request")?;
    let request_type: RequestType = request
        .request_type
        .trim()
        .parse::<RequestType>()
        .map_err(translate_domain_error)?;
    let id: RequestId = ctx
        .repository
        .next_request_id()
        .map_err(translate_persistence_error)?;

    let command: Command = Command::SubmitRequest {
        id: id.clone(),
        request_type,
        start_date: request.start_date,
        end_date: request.end_date,
        reason: request.reason,
        urgency: request.urgency,
        shift_id: request.shift_id.as_deref().map(ShiftId::new),
    };

    let executed: Executed = execute(ctx, actor, command, cause, now)?;
    let response: RequestResponse = request_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Approves a pending request.
///
/// # Errors
///
/// Returns an error if the actor lacks `canApproveRequests`, the request
/// does not exist, or it has already been reviewed.
pub fn approve_request<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    request_id: &str,
    notes: Option<String>,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<RequestResponse>, ApiError> {
    let id: RequestId = RequestId::new(request_id);
    let executed: Executed = execute(
        ctx,
        actor,
        Command::ApproveRequest {
            request_id: id.clone(),
            notes,
        },
        cause,
        now,
    )?;
    let response: RequestResponse = request_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Rejects a pending request. A reason is required.
///
/// # Errors
///
/// Returns an error if the actor lacks `canRejectRequests`, the request
/// does not exist or has already been reviewed, or the notes are blank.
pub fn reject_request<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    request_id: &str,
    notes: String,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<RequestResponse>, ApiError> {
    let id: RequestId = RequestId::new(request_id);
    let executed: Executed = execute(
        ctx,
        actor,
        Command::RejectRequest {
            request_id: id.clone(),
            notes,
        },
        cause,
        now,
    )?;
    let response: RequestResponse = request_response(&executed.state, &id)?;
    Ok(executed.into_result(response))
}

/// Lists the requests the actor may see that match `filter`, newest first.
///
/// Reviewers see every request; everyone else sees only their own.
///
/// # Errors
///
/// Returns an error if the actor lacks `canViewRequests` or storage fails.
pub fn list_requests<R: SchedulingRepository>(
    ctx: &ServiceContext<R>,
    actor: &AuthenticatedActor,
    filter: &RequestFilter,
) -> Result<Vec<RequestResponse>, ApiError> {
    let state: State = authorize_read(ctx, actor, Capability::ViewRequests, "list_requests")?;
    let mut requests: Vec<&Request> = visible_requests(&actor.to_caller(), &state.requests)
        .into_iter()
        .filter(|r| filter.matches(r))
        .collect();
    requests.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(requests.into_iter().map(RequestResponse::from).collect())
}

/// Returns the dashboard headline numbers.
///
/// # Errors
///
/// Returns an error if the actor lacks `canViewReports` or storage fails.
pub fn get_dashboard_stats<R: SchedulingRepository>(
    ctx: &ServiceContext<R>,
    actor: &AuthenticatedActor,
) -> Result<DashboardStats, ApiError> {
    let state: State = authorize_read(ctx, actor, Capability::ViewReports, "get_dashboard_stats")?;
    Ok(compute_stats(&state))
}

/// Scans for shifts short of staff that start within the configured
/// threshold and notifies the staff who could cover them.
///
/// The scan changes no records and produces no audit event. A recipient
/// who has not yet read an earlier alert for the same shift is not
/// alerted again.
///
/// # Errors
///
/// Returns an error if the actor lacks `canViewSchedule` or storage fails.
pub fn check_coverage<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<Vec<Notification>, ApiError> {
    let state: State = authorize_read(ctx, actor, Capability::ViewSchedule, "check_coverage")?;
    let events: Vec<DomainEvent> = coverage_gaps(&state, now, ctx.config.coverage_threshold());
    let mut notifications: Vec<Notification> = Vec::new();
    for event in &events {
        // Staff still holding an unread alert for the same gap are skipped.
        let candidates: Vec<StaffMember> = match event {
            DomainEvent::CoverageNeeded { shift_id, .. } => state
                .staff
                .iter()
                .filter(|member| !ctx.notifications.has_unread_coverage(&member.id, shift_id))
                .cloned()
                .collect(),
            _ => state.staff.clone(),
        };
        notifications.extend(ctx.dispatcher.dispatch(
            std::slice::from_ref(event),
            &candidates,
            &mut ctx.notifications,
            now,
        ));
    }
    info!(
        gaps = events.len(),
        notifications = notifications.len(),
        "Coverage scan complete"
    );
    Ok(notifications)
}

/// Sends a system alert to the named staff, or to every active staff
/// member when none are named. Inactive recipients are skipped.
///
/// Like the coverage scan, an alert changes no records.
///
/// # Errors
///
/// Returns an error if:
/// - The actor lacks `canConfigureSystem`
/// - The title or message is blank
/// - A named recipient does not exist
pub fn broadcast_alert<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    request: BroadcastAlertRequest,
    now: OffsetDateTime,
) -> Result<Vec<Notification>, ApiError> {
    let state: State = authorize_read(ctx, actor, Capability::ConfigureSystem, "broadcast_alert")?;
    for (field, value) in [("title", &request.title), ("message", &request.message)] {
        if value.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: field.to_string(),
                message: format!("{field} must not be blank"),
            });
        }
    }

    let recipients: Vec<StaffId> = if request.recipients.is_empty() {
        state
            .staff
            .iter()
            .filter(|member| member.is_active)
            .map(|member| member.id.clone())
            .collect()
    } else {
        let mut named: Vec<StaffId> = Vec::new();
        for id in &request.recipients {
            let member: &StaffMember = state
                .staff(&StaffId::new(id.trim()))
                .map_err(translate_core_error)?;
            if member.is_active && !named.contains(&member.id) {
                named.push(member.id.clone());
            }
        }
        named
    };

    let event: DomainEvent = DomainEvent::SystemAlert {
        recipients,
        title: request.title.trim().to_string(),
        message: request.message.trim().to_string(),
    };
    let notifications: Vec<Notification> = ctx.dispatcher.dispatch(
        std::slice::from_ref(&event),
        &state.staff,
        &mut ctx.notifications,
        now,
    );
    info!(
        actor = %actor.id,
        notifications = notifications.len(),
        "Broadcast system alert"
    );
    Ok(notifications)
}

/// Returns the activity feed, newest first.
///
/// # Errors
///
/// Returns an error if the actor lacks `canViewLogs` or storage fails.
pub fn list_activity<R: SchedulingRepository>(
    ctx: &ServiceContext<R>,
    actor: &AuthenticatedActor,
    limit: Option<usize>,
) -> Result<Vec<ActivityEntry>, ApiError> {
    authorize_read(ctx, actor, Capability::ViewLogs, "list_activity")?;
    let events: Vec<AuditEvent> = ctx
        .repository
        .list_activity(limit)
        .map_err(translate_persistence_error)?;
    Ok(events
        .into_iter()
        .map(|event| ActivityEntry {
            description: event.description().to_string(),
            action: event.action.name,
            actor_id: event.actor.id,
            actor_type: event.actor.actor_type,
            entity_type: event.subject.entity_type,
            entity_id: event.subject.entity_id,
            occurred_at: event.occurred_at,
        })
        .collect())
}

/// Returns the actor's own notifications, newest first.
#[must_use]
pub fn list_notifications<R: SchedulingRepository>(
    ctx: &ServiceContext<R>,
    actor: &AuthenticatedActor,
) -> NotificationsResponse {
    let user_id: StaffId = StaffId::new(&actor.id);
    NotificationsResponse {
        notifications: ctx
            .notifications
            .for_user(&user_id)
            .into_iter()
            .cloned()
            .collect(),
        unread_count: ctx.notifications.unread_count(&user_id),
    }
}

/// Marks one of the actor's notifications as read.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the actor has no such notification.
pub fn mark_notification_read<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    notification_id: &str,
) -> Result<(), ApiError> {
    if ctx
        .notifications
        .mark_read(&StaffId::new(&actor.id), notification_id)
    {
        Ok(())
    } else {
        Err(notification_not_found(notification_id))
    }
}

/// Marks all of the actor's notifications as read. Returns how many changed.
pub fn mark_all_notifications_read<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
) -> usize {
    ctx.notifications.mark_all_read(&StaffId::new(&actor.id))
}

/// Deletes one of the actor's notifications.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the actor has no such notification.
pub fn delete_notification<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
    notification_id: &str,
) -> Result<(), ApiError> {
    if ctx
        .notifications
        .delete(&StaffId::new(&actor.id), notification_id)
    {
        Ok(())
    } else {
        Err(notification_not_found(notification_id))
    }
}

/// Removes every notification the actor holds.
pub fn clear_notifications<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    actor: &AuthenticatedActor,
) {
    ctx.notifications.clear(&StaffId::new(&actor.id));
}

fn notification_not_found(notification_id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("notification"),
        message: format!("notification '{notification_id}' does not exist"),
    }
}

/// Returns what the actor may do.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn get_capabilities<R: SchedulingRepository>(
    ctx: &ServiceContext<R>,
    actor: &AuthenticatedActor,
) -> Result<CapabilitiesResponse, ApiError> {
    let staff: Option<StaffMember> = ctx
        .repository
        .get_staff(&StaffId::new(&actor.id))
        .map_err(translate_persistence_error)?;
    Ok(compute_capabilities(actor, staff.as_ref()))
}
