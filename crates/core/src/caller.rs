// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shiftdesk_audit::Actor;
use shiftdesk_domain::{Role, StaffId};

/// The staff member issuing a command.
///
/// Identity is trusted: it is supplied by whoever authenticated the
/// session and is never verified here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: StaffId,
    pub role: Role,
}

impl Caller {
    /// Creates a new caller.
    #[must_use]
    pub const fn new(id: StaffId, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this caller into an audit actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.value().to_string(), self.role.as_str().to_string())
    }
}
