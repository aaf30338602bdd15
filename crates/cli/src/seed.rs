// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A small ICU roster for trying the system out.

use color_eyre::{Result, eyre::bail};
use shiftdesk_api::{
    AuthenticatedActor, CreateShiftRequest, CreateStaffRequest, ServiceContext, create_shift,
    create_staff,
};
use shiftdesk_audit::Cause;
use shiftdesk_domain::Role;
use shiftdesk_persistence::SchedulingRepository;
use time::{Duration, OffsetDateTime};
use tracing::debug;

type StaffSeed = (&'static str, &'static str, &'static str, &'static [&'static str]);

const STAFF: [StaffSeed; 6] = [
    ("Alex Admin", "admin", "Administration", &[]),
    ("Michael Chen", "supervisor", "ICU", &[]),
    ("Emily Rodriguez", "nurse", "ICU", &["RN", "BLS"]),
    ("James Wilson", "nurse", "ICU", &["RN", "BLS"]),
    ("Priya Patel", "nurse", "ICU", &["RN", "BLS"]),
    ("Sarah Johnson", "doctor", "ICU", &["ACLS", "BLS"]),
];

/// Ids of the seeded records, in the order they were created.
#[derive(Debug, Clone)]
pub struct Roster {
    pub admin: String,
    pub supervisor: String,
    pub nurses: Vec<String>,
    pub doctor: String,
    pub day_shift: String,
    pub evening_shift: String,
    pub night_shift: String,
    /// Start of the day shift, tomorrow at 07:00 UTC.
    pub day_start: OffsetDateTime,
}

/// The actor seeding runs as. It is not a staff record.
pub fn bootstrap_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("system"), Role::Admin)
}

fn seed_cause(what: &str) -> Cause {
    Cause::new(format!("seed-{what}"), String::from("Sample roster"))
}

/// Creates the sample staff and tomorrow's ICU shifts.
///
/// # Errors
///
/// Fails if the repository already holds staff or any record is refused.
pub fn seed<R: SchedulingRepository>(
    ctx: &mut ServiceContext<R>,
    now: OffsetDateTime,
) -> Result<Roster> {
    if !ctx.repository.list_staff()?.is_empty() {
        bail!("the store already holds staff records; seeding needs an empty store");
    }
    let actor: AuthenticatedActor = bootstrap_actor();

    let mut ids: Vec<String> = Vec::with_capacity(STAFF.len());
    for (name, role, department, certifications) in STAFF {
        let email: String = format!("{}@hospital.com", name.to_lowercase().replace(' ', "."));
        let created = create_staff(
            ctx,
            &actor,
            CreateStaffRequest {
                name: name.to_string(),
                email,
                role: role.to_string(),
                department_id: department.to_string(),
                certifications: certifications.iter().map(|c| (*c).to_string()).collect(),
            },
            seed_cause("staff"),
            now,
        )?;
        debug!(staff_id = %created.response.id, name, "Seeded staff member");
        ids.push(created.response.id);
    }

    let day_start: OffsetDateTime = (now + Duration::days(1))
        .date()
        .with_hms(7, 0, 0)?
        .assume_utc();
    let mut shift = |offset_hours: i64, role: &str, certification: &str, staff_required: u32| {
        let start: OffsetDateTime = day_start + Duration::hours(offset_hours);
        create_shift(
            ctx,
            &actor,
            CreateShiftRequest {
                department_id: String::from("ICU"),
                start,
                end: start + Duration::hours(8),
                required_role: Some(role.to_string()),
                required_certifications: vec![certification.to_string()],
                staff_required: Some(staff_required),
                assigned_staff: Vec::new(),
            },
            seed_cause("shift"),
            now,
        )
        .map(|created| created.response.id)
    };
    let day_shift: String = shift(0, "nurse", "RN", 2)?;
    let evening_shift: String = shift(7, "nurse", "RN", 1)?;
    let night_shift: String = shift(15, "doctor", "ACLS", 1)?;

    Ok(Roster {
        admin: ids[0].clone(),
        supervisor: ids[1].clone(),
        nurses: ids[2..5].to_vec(),
        doctor: ids[5].clone(),
        day_shift,
        evening_shift,
        night_shift,
        day_start,
    })
}
