// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A scripted walk through a day of ICU scheduling.
//!
//! The demo seeds the sample roster, then plays through the flows a
//! supervisor and a nurse would: a valid assignment, an overlapping one that
//! is refused, two supervisors racing for the last evening slot, a time-off
//! request reviewed once, and a coverage scan. Toasts are watched from a
//! separate task for the whole run.

use crate::seed::{Roster, seed};
use color_eyre::Result;
use shiftdesk_api::{
    ApiError, AuthenticatedActor, DashboardStats, ServiceContext, SubmitRequestRequest,
    ValidationResponse, approve_request, assign_staff, check_coverage, get_dashboard_stats,
    reject_request, submit_request, validate_assignment,
};
use shiftdesk_audit::Cause;
use shiftdesk_domain::Role;
use shiftdesk_notifications::ToastReceiver;
use shiftdesk_persistence::SchedulingRepository;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// What happened during a demo run.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    /// Why the overlapping evening assignment was refused.
    pub overlap_reasons: Vec<String>,
    /// How many of the racing assignments went through.
    pub race_winners: usize,
    /// Status of the time-off request after approval.
    pub request_status: String,
    /// Whether reviewing the request a second time was refused.
    pub second_review_refused: bool,
    pub coverage_alerts: usize,
    pub toasts_seen: usize,
    pub stats: DashboardStats,
}

fn demo_cause(step: &str) -> Cause {
    Cause::new(format!("demo-{step}"), String::from("Scripted demo"))
}

async fn watch_toasts(mut receiver: ToastReceiver) -> usize {
    let mut seen: usize = 0;
    while let Some(toast) = receiver.recv().await {
        info!(
            recipient = %toast.notification.user_id,
            title = %toast.notification.title,
            "Toast"
        );
        seen += 1;
    }
    seen
}

/// Runs the demo against `ctx`, which must start with no staff.
///
/// # Errors
///
/// Fails if seeding fails or any step that should succeed is refused.
pub async fn run<R>(mut ctx: ServiceContext<R>, now: OffsetDateTime) -> Result<DemoReport>
where
    R: SchedulingRepository + Send + Sync + 'static,
{
    let roster: Roster = seed(&mut ctx, now)?;
    let supervisor: AuthenticatedActor =
        AuthenticatedActor::new(roster.supervisor.clone(), Role::Supervisor);
    let nurse: AuthenticatedActor = AuthenticatedActor::new(roster.nurses[0].clone(), Role::Nurse);

    let watcher = tokio::spawn(watch_toasts(ctx.toasts().subscribe()));
    let shared: Arc<Mutex<ServiceContext<R>>> = Arc::new(Mutex::new(ctx));

    // Day shift first, then the overlapping evening shift.
    let overlap_reasons: Vec<String> = {
        let mut ctx = shared.lock().await;
        let check: ValidationResponse =
            validate_assignment(&ctx, &supervisor, &roster.day_shift, &nurse.id)?;
        info!(valid = check.is_valid, "Checked day shift for {}", nurse.id);
        assign_staff(
            &mut ctx,
            &supervisor,
            &roster.day_shift,
            &nurse.id,
            demo_cause("day"),
            now,
        )?;

        let evening = assign_staff(
            &mut ctx,
            &supervisor,
            &roster.evening_shift,
            &nurse.id,
            demo_cause("evening"),
            now,
        );
        drop(ctx);
        match evening {
            Err(ApiError::ValidationFailed { reasons }) => {
                warn!(?reasons, "Evening assignment refused");
                reasons
            }
            Ok(_) => Vec::new(),
            Err(err) => return Err(err.into()),
        }
    };

    // Two supervisors race for the single evening slot.
    let mut race: JoinSet<bool> = JoinSet::new();
    for staff_id in &roster.nurses[1..] {
        let shared: Arc<Mutex<ServiceContext<R>>> = Arc::clone(&shared);
        let actor: AuthenticatedActor = supervisor.clone();
        let shift_id: String = roster.evening_shift.clone();
        let staff_id: String = staff_id.clone();
        race.spawn(async move {
            let result = assign_staff(
                &mut *shared.lock().await,
                &actor,
                &shift_id,
                &staff_id,
                demo_cause("race"),
                now,
            );
            if let Err(err) = &result {
                info!(%staff_id, %err, "Lost the race for the evening slot");
            }
            result.is_ok()
        });
    }
    let mut race_winners: usize = 0;
    while let Some(won) = race.join_next().await {
        if won? {
            race_winners += 1;
        }
    }

    let (request_status, second_review_refused) = {
        let mut ctx = shared.lock().await;
        let first_day = roster.day_start.date() + Duration::days(7);
        let submitted = submit_request(
            &mut ctx,
            &nurse,
            SubmitRequestRequest {
                request_type: String::from("time_off"),
                start_date: first_day,
                end_date: first_day + Duration::days(2),
                reason: Some(String::from("Family event")),
                urgency: None,
                shift_id: None,
            },
            demo_cause("submit"),
            now,
        )?;
        let approved = approve_request(
            &mut ctx,
            &supervisor,
            &submitted.response.id,
            None,
            demo_cause("approve"),
            now,
        )?;
        let second = reject_request(
            &mut ctx,
            &supervisor,
            &submitted.response.id,
            String::from("Second look"),
            demo_cause("reject"),
            now,
        );
        drop(ctx);
        (
            approved.response.status,
            matches!(second, Err(ApiError::InvalidState { .. })),
        )
    };

    let (coverage_alerts, stats) = {
        let mut ctx = shared.lock().await;
        let alerts = check_coverage(
            &mut ctx,
            &supervisor,
            roster.day_start - Duration::hours(1),
        )?;
        let stats: DashboardStats = get_dashboard_stats(&ctx, &supervisor)?;
        drop(ctx);
        (alerts.len(), stats)
    };

    // Dropping the last handle closes the toast channel and ends the watcher.
    drop(shared);
    let toasts_seen: usize = watcher.await?;

    Ok(DemoReport {
        overlap_reasons,
        race_winners,
        request_status,
        second_review_refused,
        coverage_alerts,
        toasts_seen,
        stats,
    })
}
