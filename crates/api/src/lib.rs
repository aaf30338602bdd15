// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service boundary for shiftdesk.
//!
//! This crate sits between callers (the CLI, or any front end) and the
//! core. It owns authorization at the edge, translation of raw input into
//! commands, persistence of successful transitions, the activity feed and
//! notification dispatch. Core and domain errors never leak past it; they
//! are translated into [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod capabilities;
mod config;
mod error;
mod handlers;
mod request_response;
mod stats;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService};
pub use capabilities::compute_capabilities;
pub use config::{ConfigError, MAX_TOAST_TTL_SECS, SchedulerConfig};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    ApiResult, ServiceContext, approve_request, assign_staff, broadcast_alert, bulk_assign,
    cancel_shift, check_coverage, clear_notifications, create_shift, create_staff,
    deactivate_staff, delete_notification, delete_shift, get_capabilities, get_dashboard_stats,
    list_activity, list_notifications, list_requests, list_shifts, list_staff,
    mark_all_notifications_read, mark_notification_read, reject_request, submit_request,
    unassign_staff, update_shift, update_staff, validate_assignment,
};
pub use request_response::{
    ActivityEntry, BroadcastAlertRequest, CapabilitiesResponse, CreateShiftRequest,
    CreateStaffRequest, DashboardStats, NotificationsResponse, RequestFilter, RequestResponse,
    ShiftFilter, ShiftResponse, StaffResponse, SubmitRequestRequest, UpdateShiftRequest,
    UpdateStaffRequest, ValidationResponse,
};
pub use stats::compute_stats;
