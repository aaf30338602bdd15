// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftdesk_domain::{
    DepartmentId, Notification, NotificationMetadata, NotificationPriority, NotificationType,
    Role, StaffId, StaffMember, TimeWindow,
};
use std::collections::BTreeSet;
use time::OffsetDateTime;
use time::macros::datetime;

pub const NOW: OffsetDateTime = datetime!(2026-03-01 09:00 UTC);

pub fn create_notification(id: &str, user: &str) -> Notification {
    Notification {
        id: id.to_string(),
        notification_type: NotificationType::ShiftChange,
        title: String::from("New shift assignment"),
        message: String::from("You have been assigned"),
        timestamp: NOW,
        is_read: false,
        user_id: StaffId::new(user),
        priority: NotificationPriority::Medium,
        action_url: None,
        metadata: NotificationMetadata::default(),
    }
}

pub fn member(id: &str, role: Role, department: &str) -> StaffMember {
    StaffMember::new(
        StaffId::new(id),
        &format!("Staff {id}"),
        &format!("{id}@hospital.com"),
        role,
        DepartmentId::new(department),
        BTreeSet::new(),
        datetime!(2026-01-01 00:00 UTC),
    )
}

/// Admin, ICU supervisor, two ICU nurses, an ICU doctor and an inactive ICU nurse.
pub fn create_staff_list() -> Vec<StaffMember> {
    let mut retired: StaffMember = member("n9", Role::Nurse, "ICU");
    retired.is_active = false;
    vec![
        member("admin-1", Role::Admin, "Administration"),
        member("sup-1", Role::Supervisor, "ICU"),
        member("n1", Role::Nurse, "ICU"),
        member("n2", Role::Nurse, "ICU"),
        member("d1", Role::Doctor, "ICU"),
        retired,
    ]
}

pub fn day_window() -> TimeWindow {
    TimeWindow::new(
        datetime!(2026-03-02 07:00 UTC),
        datetime!(2026-03-02 15:00 UTC),
    )
    .unwrap()
}
