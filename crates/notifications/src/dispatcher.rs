// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::NotificationSink;
use crate::toast::ToastChannel;
use shiftdesk::{DomainEvent, ScheduleChange};
use shiftdesk_domain::{
    Capability, DepartmentId, Notification, NotificationMetadata, NotificationPriority,
    NotificationType, RequestId, RequestType, ShiftId, StaffId, StaffMember, TimeWindow,
    has_permission,
};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::{debug, info};

/// Formats a shift window for notification text, e.g. `2026-03-02 07:00-15:00`.
#[must_use]
pub fn describe_window(window: &TimeWindow) -> String {
    let start = window
        .start()
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]"));
    let end = window.end().format(format_description!("[hour]:[minute]"));
    match (start, end) {
        (Ok(start), Ok(end)) => format!("{start}-{end}"),
        _ => format!("{}-{}", window.start(), window.end()),
    }
}

/// What a notification says, before it is addressed.
struct Draft {
    notification_type: NotificationType,
    priority: NotificationPriority,
    title: String,
    message: String,
    action_url: &'static str,
    metadata: NotificationMetadata,
}

fn shift_metadata(shift_id: &ShiftId, department_id: &DepartmentId) -> NotificationMetadata {
    NotificationMetadata {
        shift_id: Some(shift_id.clone()),
        request_id: None,
        department_id: Some(department_id.clone()),
    }
}

fn request_metadata(request_id: &RequestId) -> NotificationMetadata {
    NotificationMetadata {
        request_id: Some(request_id.clone()),
        ..NotificationMetadata::default()
    }
}

fn capitalized(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn active_holders<'a>(
    staff: &'a [StaffMember],
    capability: Capability,
) -> impl Iterator<Item = &'a StaffMember> {
    staff
        .iter()
        .filter(move |member| member.is_active && has_permission(member.role, capability))
}

/// Returns who should hear about `event`, in staff-list order.
fn recipients(event: &DomainEvent, staff: &[StaffMember]) -> Vec<StaffId> {
    match event {
        DomainEvent::StaffCreated { staff_id, .. } => staff
            .iter()
            .filter(|member| member.is_active && &member.id != staff_id)
            .filter(|member| {
                has_permission(member.role, Capability::ManageUsers)
                    || has_permission(member.role, Capability::ApproveRequests)
            })
            .map(|member| member.id.clone())
            .collect(),
        DomainEvent::StaffAssigned { staff_id, .. }
        | DomainEvent::StaffUnassigned { staff_id, .. }
        | DomainEvent::ScheduleUpdated { staff_id, .. } => vec![staff_id.clone()],
        DomainEvent::RequestSubmitted { requester_id, .. } => {
            active_holders(staff, Capability::ApproveRequests)
                .filter(|member| &member.id != requester_id)
                .map(|member| member.id.clone())
                .collect()
        }
        DomainEvent::RequestApproved { requester_id, .. }
        | DomainEvent::RequestRejected { requester_id, .. } => vec![requester_id.clone()],
        DomainEvent::CoverageNeeded {
            department_id,
            required_role,
            ..
        } => staff
            .iter()
            .filter(|member| member.is_active && &member.department_id == department_id)
            .filter(|member| required_role.is_none_or(|role| member.role == role))
            .map(|member| member.id.clone())
            .collect(),
        DomainEvent::SystemAlert { recipients, .. } => recipients.clone(),
    }
}

fn request_text(request_type: RequestType, date_range: &str) -> String {
    format!("{} request for {date_range}", request_type.label())
}

#[allow(clippy::too_many_lines)]
fn draft(event: &DomainEvent) -> Draft {
    match event {
        DomainEvent::StaffCreated {
            staff_id,
            name,
            department_id,
        } => Draft {
            notification_type: NotificationType::SystemAlert,
            priority: NotificationPriority::Low,
            title: String::from("New staff member"),
            message: format!("{name} ({staff_id}) joined {department_id}"),
            action_url: "/staff",
            metadata: NotificationMetadata {
                department_id: Some(department_id.clone()),
                ..NotificationMetadata::default()
            },
        },
        DomainEvent::StaffAssigned {
            shift_id,
            department_id,
            window,
            ..
        } => Draft {
            notification_type: NotificationType::ShiftChange,
            priority: NotificationPriority::Medium,
            title: String::from("New shift assignment"),
            message: format!(
                "You have been assigned to the {department_id} shift on {}",
                describe_window(window)
            ),
            action_url: "/schedule",
            metadata: shift_metadata(shift_id, department_id),
        },
        DomainEvent::StaffUnassigned {
            shift_id,
            department_id,
            window,
            ..
        } => Draft {
            notification_type: NotificationType::ShiftChange,
            priority: NotificationPriority::Medium,
            title: String::from("Shift assignment removed"),
            message: format!(
                "You are no longer assigned to the {department_id} shift on {}",
                describe_window(window)
            ),
            action_url: "/schedule",
            metadata: shift_metadata(shift_id, department_id),
        },
        DomainEvent::ScheduleUpdated {
            shift_id,
            department_id,
            window,
            change,
            ..
        } => Draft {
            notification_type: NotificationType::ScheduleUpdate,
            priority: match change {
                ScheduleChange::Updated => NotificationPriority::Medium,
                ScheduleChange::Cancelled | ScheduleChange::Deleted => NotificationPriority::High,
            },
            title: format!("Shift {}", change.verb()),
            message: format!(
                "Your {department_id} shift on {} was {}",
                describe_window(window),
                change.verb()
            ),
            action_url: "/schedule",
            metadata: shift_metadata(shift_id, department_id),
        },
        DomainEvent::RequestSubmitted {
            request_id,
            requester_name,
            request_type,
            date_range,
            ..
        } => Draft {
            notification_type: NotificationType::NewRequest,
            priority: NotificationPriority::Medium,
            title: format!("New {} request", request_type.label()),
            message: format!(
                "{requester_name} submitted a {}",
                request_text(*request_type, date_range)
            ),
            action_url: "/requests",
            metadata: request_metadata(request_id),
        },
        DomainEvent::RequestApproved {
            request_id,
            request_type,
            date_range,
            notes,
            ..
        } => {
            let mut message: String = format!(
                "Your {} has been approved",
                request_text(*request_type, date_range)
            );
            if let Some(notes) = notes {
                message.push_str(&format!(". Notes: {notes}"));
            }
            Draft {
                notification_type: NotificationType::RequestApproved,
                priority: NotificationPriority::Medium,
                title: format!("{} request approved", capitalized(request_type.label())),
                message,
                action_url: "/requests",
                metadata: request_metadata(request_id),
            }
        }
        DomainEvent::RequestRejected {
            request_id,
            request_type,
            date_range,
            reason,
            ..
        } => Draft {
            notification_type: NotificationType::RequestRejected,
            priority: NotificationPriority::High,
            title: format!("{} request rejected", capitalized(request_type.label())),
            message: format!(
                "Your {} has been rejected. Reason: {reason}",
                request_text(*request_type, date_range)
            ),
            action_url: "/requests",
            metadata: request_metadata(request_id),
        },
        DomainEvent::CoverageNeeded {
            shift_id,
            department_id,
            window,
            assigned,
            required,
            priority,
            ..
        } => Draft {
            notification_type: NotificationType::CoverageNeeded,
            priority: *priority,
            title: String::from("Coverage needed"),
            message: format!(
                "The {department_id} shift on {} has {assigned} of {required} staff assigned",
                describe_window(window)
            ),
            action_url: "/schedule",
            metadata: shift_metadata(shift_id, department_id),
        },
        DomainEvent::SystemAlert { title, message, .. } => Draft {
            notification_type: NotificationType::SystemAlert,
            priority: NotificationPriority::Medium,
            title: title.clone(),
            message: message.clone(),
            action_url: "/",
            metadata: NotificationMetadata::default(),
        },
    }
}

/// Turns domain events into notifications and fans them out.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    toasts: ToastChannel,
    next_id: u64,
}

impl Dispatcher {
    /// Creates a dispatcher publishing toasts on `toasts`.
    #[must_use]
    pub const fn new(toasts: ToastChannel) -> Self {
        Self { toasts, next_id: 1 }
    }

    /// Returns the toast channel, for subscribing.
    #[must_use]
    pub const fn toasts(&self) -> &ToastChannel {
        &self.toasts
    }

    /// Builds the notifications for `events` without delivering them.
    pub fn build(
        &mut self,
        events: &[DomainEvent],
        staff: &[StaffMember],
        now: OffsetDateTime,
    ) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = Vec::new();
        for event in events {
            let recipients: Vec<StaffId> = recipients(event, staff);
            if recipients.is_empty() {
                debug!(event = event.name(), "No recipients for event");
                continue;
            }
            let draft: Draft = draft(event);
            for user_id in recipients {
                notifications.push(Notification {
                    id: format!("notif-{}", self.next_id),
                    notification_type: draft.notification_type,
                    title: draft.title.clone(),
                    message: draft.message.clone(),
                    timestamp: now,
                    is_read: false,
                    user_id,
                    priority: draft.priority,
                    action_url: Some(draft.action_url.to_string()),
                    metadata: draft.metadata.clone(),
                });
                self.next_id += 1;
            }
        }
        notifications
    }

    /// Delivers the notifications for `events` to `sink` and the toast channel.
    ///
    /// Recipients are resolved against `staff`, the staff list after the
    /// transition. Returns the delivered notifications.
    pub fn dispatch<S: NotificationSink>(
        &mut self,
        events: &[DomainEvent],
        staff: &[StaffMember],
        sink: &mut S,
        now: OffsetDateTime,
    ) -> Vec<Notification> {
        let notifications: Vec<Notification> = self.build(events, staff, now);
        for notification in &notifications {
            debug!(
                notification_id = %notification.id,
                user_id = %notification.user_id,
                kind = notification.notification_type.as_str(),
                "Delivering notification"
            );
            sink.deliver(notification.clone());
            self.toasts.publish(notification, now);
        }
        if !notifications.is_empty() {
            info!(
                events = events.len(),
                notifications = notifications.len(),
                "Dispatched notifications"
            );
        }
        notifications
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ToastChannel::default())
    }
}
