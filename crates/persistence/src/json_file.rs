// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::document::SchedulingDocument;
use crate::error::PersistenceError;
use crate::memory::InMemoryRepository;
use crate::repository::{IdKind, SchedulingRepository};
use shiftdesk::State;
use shiftdesk_audit::AuditEvent;
use shiftdesk_domain::{Request, RequestId, Shift, ShiftId, StaffId, StaffMember};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A repository backed by one JSON document on disk.
///
/// The whole document is rewritten after every mutation. Writes go to a
/// sibling temporary file that is then renamed over the original, so a
/// crash never leaves a half-written document behind. A mutation whose
/// write fails is not kept in memory either.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    records: InMemoryRepository,
}

impl JsonFileRepository {
    /// Opens the document at `path`, starting empty if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let document: SchedulingDocument = if path.exists() {
            let contents: String = fs::read_to_string(&path)?;
            let document: SchedulingDocument = serde_json::from_str(&contents)?;
            info!(
                path = %path.display(),
                staff = document.staff.len(),
                shifts = document.shifts.len(),
                requests = document.requests.len(),
                "Loaded scheduling document"
            );
            document
        } else {
            info!(path = %path.display(), "Starting new scheduling document");
            SchedulingDocument::default()
        };

        Ok(Self {
            path,
            records: InMemoryRepository::from_document(document),
        })
    }

    /// Returns the document path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, records: &InMemoryRepository) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json: String = serde_json::to_string_pretty(records.document())?;
        let temp: PathBuf = self.path.with_extension("json.tmp");
        fs::write(&temp, json)?;
        if let Err(err) = fs::rename(&temp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                warn!(path = %temp.display(), %cleanup, "Could not remove temporary document");
            }
            return Err(err.into());
        }
        debug!(path = %self.path.display(), "Saved scheduling document");
        Ok(())
    }

    /// Runs `f` against a copy of the records and keeps the copy only once
    /// it is on disk.
    fn mutate<T, F>(&mut self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut InMemoryRepository) -> Result<T, PersistenceError>,
    {
        let mut staged: InMemoryRepository = self.records.clone();
        let value: T = f(&mut staged)?;
        self.save(&staged)?;
        self.records = staged;
        Ok(value)
    }
}

impl SchedulingRepository for JsonFileRepository {
    fn list_staff(&self) -> Result<Vec<StaffMember>, PersistenceError> {
        self.records.list_staff()
    }

    fn get_staff(&self, id: &StaffId) -> Result<Option<StaffMember>, PersistenceError> {
        self.records.get_staff(id)
    }

    fn insert_staff(&mut self, staff: &StaffMember) -> Result<(), PersistenceError> {
        self.mutate(|records| records.insert_staff(staff))
    }

    fn update_staff(&mut self, staff: &StaffMember) -> Result<(), PersistenceError> {
        self.mutate(|records| records.update_staff(staff))
    }

    fn delete_staff(&mut self, id: &StaffId) -> Result<(), PersistenceError> {
        self.mutate(|records| records.delete_staff(id))
    }

    fn list_shifts(&self) -> Result<Vec<Shift>, PersistenceError> {
        self.records.list_shifts()
    }

    fn get_shift(&self, id: &ShiftId) -> Result<Option<Shift>, PersistenceError> {
        self.records.get_shift(id)
    }

    fn insert_shift(&mut self, shift: &Shift) -> Result<(), PersistenceError> {
        self.mutate(|records| records.insert_shift(shift))
    }

    fn update_shift(&mut self, shift: &Shift) -> Result<(), PersistenceError> {
        self.mutate(|records| records.update_shift(shift))
    }

    fn delete_shift(&mut self, id: &ShiftId) -> Result<(), PersistenceError> {
        self.mutate(|records| records.delete_shift(id))
    }

    fn list_requests(&self) -> Result<Vec<Request>, PersistenceError> {
        self.records.list_requests()
    }

    fn get_request(&self, id: &RequestId) -> Result<Option<Request>, PersistenceError> {
        self.records.get_request(id)
    }

    fn insert_request(&mut self, request: &Request) -> Result<(), PersistenceError> {
        self.mutate(|records| records.insert_request(request))
    }

    fn update_request(&mut self, request: &Request) -> Result<(), PersistenceError> {
        self.mutate(|records| records.update_request(request))
    }

    fn delete_request(&mut self, id: &RequestId) -> Result<(), PersistenceError> {
        self.mutate(|records| records.delete_request(id))
    }

    fn append_activity(&mut self, event: &AuditEvent) -> Result<(), PersistenceError> {
        self.mutate(|records| records.append_activity(event))
    }

    fn list_activity(&self, limit: Option<usize>) -> Result<Vec<AuditEvent>, PersistenceError> {
        self.records.list_activity(limit)
    }

    fn allocate_id(&mut self, kind: IdKind) -> Result<String, PersistenceError> {
        self.mutate(|records| records.allocate_id(kind))
    }

    fn commit(
        &mut self,
        before: &State,
        after: &State,
        event: &AuditEvent,
    ) -> Result<(), PersistenceError> {
        self.mutate(|records| records.commit(before, after, event))
    }
}
