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
    clippy::all
)]

//! Activity records for shiftdesk.
//!
//! Each successful mutation is recorded as one [`AuditEvent`], and the
//! activity feed is built from these records.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Who made a change: a staff member, or `system` for scheduled work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    /// Role name of the actor, or "system".
    pub actor_type: String,
}

impl Actor {
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor recorded for changes no staff member initiated.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), String::from("system"))
    }
}

/// The request or trigger a change was made for.
///
/// `id` correlates the change with whatever caused it (a front-end request
/// id, a CLI run); `description` is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    pub id: String,
    pub description: String,
}

impl Cause {
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The activity type and its human-readable line.
///
/// `name` is the command name ("`AssignStaff`", "`ApproveRequest`");
/// `details` is the sentence shown in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// Compact `key=value` rendering of a record on one side of a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// The record a change touched, e.g. `("shift", "shift-3")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSubject {
    /// One of "staff", "shift" or "request".
    pub entity_type: String,
    pub entity_id: String,
}

impl AuditSubject {
    #[must_use]
    pub fn new(entity_type: &str, entity_id: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
        }
    }
}

/// One entry in the activity feed.
///
/// Exactly one is produced per successful mutation and none for a failed
/// or no-op call. Events are never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub actor: Actor,
    pub cause: Cause,
    pub action: Action,
    pub subject: AuditSubject,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

impl AuditEvent {
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        subject: AuditSubject,
        before: StateSnapshot,
        after: StateSnapshot,
        occurred_at: OffsetDateTime,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            subject,
            before,
            after,
            occurred_at,
        }
    }

    /// The feed line: the action details, or its name when there are none.
    #[must_use]
    pub fn description(&self) -> &str {
        self.action.details.as_deref().unwrap_or(&self.action.name)
    }
}
