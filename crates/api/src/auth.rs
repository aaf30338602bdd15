// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity and authorization at the service boundary.

use crate::error::AuthError;
use shiftdesk::{Caller, Command};
use shiftdesk_domain::{Capability, Role, StaffId, StaffMember, has_permission};

/// An authenticated actor with an associated role.
///
/// The identity is supplied by whatever authenticated the session and is
/// trusted as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The staff id of this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this actor into the caller the core transitions expect.
    #[must_use]
    pub fn to_caller(&self) -> Caller {
        Caller::new(StaffId::new(&self.id), self.role)
    }
}

/// Authorization service for enforcing capability-based access control.
///
/// Every check routes through the permission model. The core repeats the
/// check for mutations, so this layer only has to refuse early.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that `actor` holds `capability`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the role lacks the capability.
    pub fn authorize(
        actor: &AuthenticatedActor,
        capability: Capability,
        action: &str,
    ) -> Result<(), AuthError> {
        if has_permission(actor.role, capability) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                capability,
            })
        }
    }

    /// Checks that `actor` may issue `command`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the role lacks the capability
    /// the command requires.
    pub fn authorize_command(
        actor: &AuthenticatedActor,
        command: &Command,
    ) -> Result<(), AuthError> {
        Self::authorize(actor, command.required_capability(), command.name())
    }

    /// Refuses actors who are known but deactivated staff members.
    ///
    /// Actors with no staff record pass; their identity is trusted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InactiveActor` for a deactivated staff member.
    pub fn ensure_active(
        actor: &AuthenticatedActor,
        staff: &[StaffMember],
    ) -> Result<(), AuthError> {
        match staff.iter().find(|s| s.id.value() == actor.id) {
            Some(member) if !member.is_active => Err(AuthError::InactiveActor {
                actor_id: actor.id.clone(),
            }),
            _ => Ok(()),
        }
    }
}
