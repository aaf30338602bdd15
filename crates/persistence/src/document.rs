// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The single document both repositories keep their records in.

use crate::error::PersistenceError;
use crate::repository::IdKind;
use serde::{Deserialize, Serialize};
use shiftdesk_audit::AuditEvent;
use shiftdesk_domain::{Request, Shift, StaffMember};

/// Per-kind counters for identifier allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCounters {
    pub staff: u64,
    pub shift: u64,
    pub request: u64,
}

/// Every stored record, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingDocument {
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub requests: Vec<Request>,
    /// Oldest first.
    #[serde(default)]
    pub activity: Vec<AuditEvent>,
    #[serde(default)]
    pub counters: IdCounters,
}

pub(crate) fn insert<T, K>(
    records: &mut Vec<T>,
    record: &T,
    key: K,
    entity: &'static str,
) -> Result<(), PersistenceError>
where
    T: Clone,
    K: Fn(&T) -> &str,
{
    let id: &str = key(record);
    if records.iter().any(|r| key(r) == id) {
        return Err(PersistenceError::Duplicate {
            entity,
            id: id.to_string(),
        });
    }
    records.push(record.clone());
    Ok(())
}

pub(crate) fn update<T, K>(
    records: &mut [T],
    record: &T,
    key: K,
    entity: &'static str,
) -> Result<(), PersistenceError>
where
    T: Clone,
    K: Fn(&T) -> &str,
{
    let id: &str = key(record);
    let slot: &mut T = records
        .iter_mut()
        .find(|r| key(&**r) == id)
        .ok_or_else(|| PersistenceError::NotFound {
            entity,
            id: id.to_string(),
        })?;
    *slot = record.clone();
    Ok(())
}

pub(crate) fn delete<T, K>(
    records: &mut Vec<T>,
    id: &str,
    key: K,
    entity: &'static str,
) -> Result<(), PersistenceError>
where
    K: Fn(&T) -> &str,
{
    let before: usize = records.len();
    records.retain(|r| key(r) != id);
    if records.len() == before {
        return Err(PersistenceError::NotFound {
            entity,
            id: id.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn find<T, K>(records: &[T], id: &str, key: K) -> Option<T>
where
    T: Clone,
    K: Fn(&T) -> &str,
{
    records.iter().find(|r| key(r) == id).cloned()
}

pub(crate) fn staff_key(staff: &StaffMember) -> &str {
    staff.id.value()
}

pub(crate) fn shift_key(shift: &Shift) -> &str {
    shift.id.value()
}

pub(crate) fn request_key(request: &Request) -> &str {
    request.id.value()
}

impl SchedulingDocument {
    /// Returns the newest `limit` activity entries, newest first.
    #[must_use]
    pub fn recent_activity(&self, limit: Option<usize>) -> Vec<AuditEvent> {
        let take: usize = limit.unwrap_or(self.activity.len());
        self.activity.iter().rev().take(take).cloned().collect()
    }

    /// Allocates the next unused identifier of `kind`.
    pub fn allocate(&mut self, kind: IdKind) -> String {
        loop {
            let counter: &mut u64 = match kind {
                IdKind::Staff => &mut self.counters.staff,
                IdKind::Shift => &mut self.counters.shift,
                IdKind::Request => &mut self.counters.request,
            };
            *counter += 1;
            let candidate: String = format!("{}-{}", kind.prefix(), counter);
            if !self.is_taken(kind, &candidate) {
                return candidate;
            }
        }
    }

    fn is_taken(&self, kind: IdKind, id: &str) -> bool {
        match kind {
            IdKind::Staff => self.staff.iter().any(|s| staff_key(s) == id),
            IdKind::Shift => self.shifts.iter().any(|s| shift_key(s) == id),
            IdKind::Request => self.requests.iter().any(|r| request_key(r) == id),
        }
    }
}
