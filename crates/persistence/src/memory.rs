// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::document::{
    SchedulingDocument, delete, find, insert, request_key, shift_key, staff_key, update,
};
use crate::error::PersistenceError;
use crate::repository::{IdKind, SchedulingRepository, write_changes};
use shiftdesk::State;
use shiftdesk_audit::AuditEvent;
use shiftdesk_domain::{Request, RequestId, Shift, ShiftId, StaffId, StaffMember};

/// A repository that keeps everything in memory.
///
/// Used by tests and by short-lived CLI runs that do not need a file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    document: SchedulingDocument,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `document`.
    #[must_use]
    pub const fn from_document(document: SchedulingDocument) -> Self {
        Self { document }
    }

    /// Returns the underlying document.
    #[must_use]
    pub const fn document(&self) -> &SchedulingDocument {
        &self.document
    }
}

impl SchedulingRepository for InMemoryRepository {
    fn list_staff(&self) -> Result<Vec<StaffMember>, PersistenceError> {
        Ok(self.document.staff.clone())
    }

    fn get_staff(&self, id: &StaffId) -> Result<Option<StaffMember>, PersistenceError> {
        Ok(find(&self.document.staff, id.value(), staff_key))
    }

    fn insert_staff(&mut self, staff: &StaffMember) -> Result<(), PersistenceError> {
        insert(&mut self.document.staff, staff, staff_key, "staff")
    }

    fn update_staff(&mut self, staff: &StaffMember) -> Result<(), PersistenceError> {
        update(&mut self.document.staff, staff, staff_key, "staff")
    }

    fn delete_staff(&mut self, id: &StaffId) -> Result<(), PersistenceError> {
        delete(&mut self.document.staff, id.value(), staff_key, "staff")
    }

    fn list_shifts(&self) -> Result<Vec<Shift>, PersistenceError> {
        Ok(self.document.shifts.clone())
    }

    fn get_shift(&self, id: &ShiftId) -> Result<Option<Shift>, PersistenceError> {
        Ok(find(&self.document.shifts, id.value(), shift_key))
    }

    fn insert_shift(&mut self, shift: &Shift) -> Result<(), PersistenceError> {
        insert(&mut self.document.shifts, shift, shift_key, "shift")
    }

    fn update_shift(&mut self, shift: &Shift) -> Result<(), PersistenceError> {
        update(&mut self.document.shifts, shift, shift_key, "shift")
    }

    fn delete_shift(&mut self, id: &ShiftId) -> Result<(), PersistenceError> {
        delete(&mut self.document.shifts, id.value(), shift_key, "shift")
    }

    fn list_requests(&self) -> Result<Vec<Request>, PersistenceError> {
        Ok(self.document.requests.clone())
    }

    fn get_request(&self, id: &RequestId) -> Result<Option<Request>, PersistenceError> {
        Ok(find(&self.document.requests, id.value(), request_key))
    }

    fn insert_request(&mut self, request: &Request) -> Result<(), PersistenceError> {
        insert(&mut self.document.requests, request, request_key, "request")
    }

    fn update_request(&mut self, request: &Request) -> Result<(), PersistenceError> {
        update(&mut self.document.requests, request, request_key, "request")
    }

    fn delete_request(&mut self, id: &RequestId) -> Result<(), PersistenceError> {
        delete(&mut self.document.requests, id.value(), request_key, "request")
    }

    fn append_activity(&mut self, event: &AuditEvent) -> Result<(), PersistenceError> {
        self.document.activity.push(event.clone());
        Ok(())
    }

    fn list_activity(&self, limit: Option<usize>) -> Result<Vec<AuditEvent>, PersistenceError> {
        Ok(self.document.recent_activity(limit))
    }

    fn allocate_id(&mut self, kind: IdKind) -> Result<String, PersistenceError> {
        Ok(self.document.allocate(kind))
    }

    fn commit(
        &mut self,
        before: &State,
        after: &State,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        let mut staged: Self = self.clone();
        write_changes(&mut staged, before, after)?;
        staged.append_activity(event)?;
        *self = staged;
        Ok(())
    }
}
