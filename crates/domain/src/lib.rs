// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod conflict;
mod error;
mod notification;
mod permissions;
mod request;
mod shift_status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use conflict::{find_conflicts, has_conflict};
pub use error::DomainError;
pub use notification::{Notification, NotificationMetadata, NotificationPriority, NotificationType};
pub use permissions::{
    Capability, CapabilitySet, can_manage_schedule, can_manage_staff, capabilities,
    has_permission, has_permission_named,
};
pub use request::{Request, RequestStatus, RequestType, Review, Urgency};
pub use shift_status::ShiftStatus;
pub use types::{DepartmentId, RequestId, Role, Shift, ShiftId, StaffId, StaffMember, TimeWindow};
pub use validation::{
    ValidationReason, ValidationResult, validate_assignment, validate_email_unique,
    validate_staff_fields,
};
