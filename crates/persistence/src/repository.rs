// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use shiftdesk::State;
use shiftdesk_audit::AuditEvent;
use shiftdesk_domain::{Request, RequestId, Shift, ShiftId, StaffId, StaffMember};

/// The kinds of record that receive allocated identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Staff,
    Shift,
    Request,
}

impl IdKind {
    /// Returns the identifier prefix for this kind.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Shift => "shift",
            Self::Request => "req",
        }
    }
}

/// Storage for the scheduling records.
///
/// Implementations hold no business rules. Every check happens in the core
/// before a write is issued, so a write is only ever the result of a
/// successful transition.
pub trait SchedulingRepository {
    /// Returns every staff member.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list_staff(&self) -> Result<Vec<StaffMember>, PersistenceError>;

    /// Returns one staff member, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_staff(&self, id: &StaffId) -> Result<Option<StaffMember>, PersistenceError>;

    /// Stores a new staff member.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the id is taken.
    fn insert_staff(&mut self, staff: &StaffMember) -> Result<(), PersistenceError>;

    /// Replaces a stored staff member.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the staff member is unknown.
    fn update_staff(&mut self, staff: &StaffMember) -> Result<(), PersistenceError>;

    /// Removes a staff member record.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the staff member is unknown.
    fn delete_staff(&mut self, id: &StaffId) -> Result<(), PersistenceError>;

    /// Returns every shift.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list_shifts(&self) -> Result<Vec<Shift>, PersistenceError>;

    /// Returns one shift, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_shift(&self, id: &ShiftId) -> Result<Option<Shift>, PersistenceError>;

    /// Stores a new shift.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the id is taken.
    fn insert_shift(&mut self, shift: &Shift) -> Result<(), PersistenceError>;

    /// Replaces a stored shift.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the shift is unknown.
    fn update_shift(&mut self, shift: &Shift) -> Result<(), PersistenceError>;

    /// Removes a shift.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the shift is unknown.
    fn delete_shift(&mut self, id: &ShiftId) -> Result<(), PersistenceError>;

    /// Returns every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list_requests(&self) -> Result<Vec<Request>, PersistenceError>;

    /// Returns one request, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_request(&self, id: &RequestId) -> Result<Option<Request>, PersistenceError>;

    /// Stores a new request.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the id is taken.
    fn insert_request(&mut self, request: &Request) -> Result<(), PersistenceError>;

    /// Replaces a stored request.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the request is unknown.
    fn update_request(&mut self, request: &Request) -> Result<(), PersistenceError>;

    /// Removes a request.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the request is unknown.
    fn delete_request(&mut self, id: &RequestId) -> Result<(), PersistenceError>;

    /// Appends an entry to the activity log.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be stored.
    fn append_activity(&mut self, event: &AuditEvent) -> Result<(), PersistenceError>;

    /// Returns the activity log, newest first, at most `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list_activity(&self, limit: Option<usize>) -> Result<Vec<AuditEvent>, PersistenceError>;

    /// Allocates a fresh identifier that no stored record uses.
    ///
    /// # Errors
    ///
    /// Returns an error if the allocation cannot be recorded.
    fn allocate_id(&mut self, kind: IdKind) -> Result<String, PersistenceError>;

    /// Writes every record that differs between `before` and `after`, then
    /// appends `event` to the activity log, as one unit.
    ///
    /// The default writes record by record. Backends that can stage the
    /// whole change override it so that a failure leaves nothing behind.
    ///
    /// # Errors
    ///
    /// Returns the first write that fails.
    fn commit(
        &mut self,
        before: &State,
        after: &State,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        write_changes(self, before, after)?;
        self.append_activity(event)
    }

    /// Loads every record into a core [`State`].
    ///
    /// # Errors
    ///
    /// Returns an error if any record list cannot be read.
    fn load_state(&self) -> Result<State, PersistenceError> {
        Ok(State::new(
            self.list_staff()?,
            self.list_shifts()?,
            self.list_requests()?,
        ))
    }

    /// Allocates a staff identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the allocation cannot be recorded.
    fn next_staff_id(&mut self) -> Result<StaffId, PersistenceError> {
        Ok(StaffId::new(&self.allocate_id(IdKind::Staff)?))
    }

    /// Allocates a shift identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the allocation cannot be recorded.
    fn next_shift_id(&mut self) -> Result<ShiftId, PersistenceError> {
        Ok(ShiftId::new(&self.allocate_id(IdKind::Shift)?))
    }

    /// Allocates a request identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the allocation cannot be recorded.
    fn next_request_id(&mut self) -> Result<RequestId, PersistenceError> {
        Ok(RequestId::new(&self.allocate_id(IdKind::Request)?))
    }
}

/// Issues the insert, update and delete calls that turn `before` into `after`.
///
/// # Errors
///
/// Returns the first write that fails. Earlier writes are not undone.
pub fn write_changes<R: SchedulingRepository + ?Sized>(
    repository: &mut R,
    before: &State,
    after: &State,
) -> Result<(), PersistenceError> {
    for staff in &after.staff {
        match before.find_staff(&staff.id) {
            None => repository.insert_staff(staff)?,
            Some(old) if old != staff => repository.update_staff(staff)?,
            Some(_) => {}
        }
    }
    for old in &before.staff {
        if after.find_staff(&old.id).is_none() {
            repository.delete_staff(&old.id)?;
        }
    }

    for shift in &after.shifts {
        match before.find_shift(&shift.id) {
            None => repository.insert_shift(shift)?,
            Some(old) if old != shift => repository.update_shift(shift)?,
            Some(_) => {}
        }
    }
    for old in &before.shifts {
        if after.find_shift(&old.id).is_none() {
            repository.delete_shift(&old.id)?;
        }
    }

    for request in &after.requests {
        match before.find_request(&request.id) {
            None => repository.insert_request(request)?,
            Some(old) if old != request => repository.update_request(request)?,
            Some(_) => {}
        }
    }
    for old in &before.requests {
        if after.find_request(&old.id).is_none() {
            repository.delete_request(&old.id)?;
        }
    }

    Ok(())
}
