// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an actor is permitted to perform.
//! They are advisory only and do not replace the checks made on every
//! operation.

use crate::auth::AuthenticatedActor;
use crate::request_response::CapabilitiesResponse;
use shiftdesk_domain::{
    Capability, CapabilitySet, StaffMember, can_manage_schedule, can_manage_staff, capabilities,
};

/// Computes the capabilities of `actor`.
///
/// A deactivated staff member holds nothing, whatever the role.
#[must_use]
pub fn compute_capabilities(
    actor: &AuthenticatedActor,
    staff: Option<&StaffMember>,
) -> CapabilitiesResponse {
    if staff.is_some_and(|s| !s.is_active) {
        return CapabilitiesResponse {
            role: actor.role.to_string(),
            granted: Vec::new(),
            can_manage_staff: false,
            can_manage_schedule: false,
        };
    }

    let set: CapabilitySet = capabilities(actor.role);
    CapabilitiesResponse {
        role: actor.role.to_string(),
        granted: set
            .granted()
            .iter()
            .map(|c: &Capability| c.key().to_string())
            .collect(),
        can_manage_staff: can_manage_staff(actor.role),
        can_manage_schedule: can_manage_schedule(actor.role),
    }
}
