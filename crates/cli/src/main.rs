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
#![allow(clippy::multiple_crate_versions)]

mod demo;
mod seed;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::WrapErr};
use shiftdesk_api::{
    AuthenticatedActor, DashboardStats, SchedulerConfig, ServiceContext, check_coverage,
    get_dashboard_stats,
};
use shiftdesk_domain::{Notification, Role};
use shiftdesk_persistence::{InMemoryRepository, JsonFileRepository, SchedulingRepository};
use std::fs;
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

/// shiftdesk - hospital shift scheduling from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON document to keep records in. Without it records live in memory
    /// and are gone when the command exits.
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// JSON file with scheduler settings. Flags below override its values.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Notifications kept per recipient
    #[arg(long, global = true)]
    notification_limit: Option<usize>,

    /// How far ahead the coverage scan looks, in hours
    #[arg(long, global = true)]
    coverage_threshold_hours: Option<u32>,

    /// How long a toast stays visible, in seconds
    #[arg(long, global = true)]
    toast_ttl_secs: Option<u64>,

    /// Staff id to act as
    #[arg(long, global = true, default_value = "system")]
    actor: String,

    /// Role of the acting staff member
    #[arg(long, global = true, default_value = "admin")]
    role: String,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Subcommand)]
enum Command {
    /// Create a sample ICU roster in an empty store
    Seed,
    /// Play through a scripted scheduling day against a sample roster
    Demo,
    /// Print dashboard statistics as JSON
    Stats,
    /// Scan for understaffed shifts and notify matching staff
    Coverage,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }

    /// Builds the scheduler settings from `--config` and the override flags.
    fn scheduler_config(&self) -> Result<SchedulerConfig> {
        let mut config: SchedulerConfig = match &self.config {
            Some(path) => {
                let contents: String = fs::read_to_string(path)
                    .wrap_err_with(|| format!("reading config file {}", path.display()))?;
                serde_json::from_str(&contents)
                    .wrap_err_with(|| format!("parsing config file {}", path.display()))?
            }
            None => SchedulerConfig::default(),
        };

        if let Some(limit) = self.notification_limit {
            config.notification_limit = limit;
        }
        if let Some(hours) = self.coverage_threshold_hours {
            config.coverage_threshold_hours = hours;
        }
        if let Some(secs) = self.toast_ttl_secs {
            config.toast_ttl_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }

    fn actor(&self) -> Result<AuthenticatedActor> {
        let role: Role = self
            .role
            .parse::<Role>()
            .wrap_err_with(|| format!("unknown role '{}'", self.role))?;
        Ok(AuthenticatedActor::new(self.actor.clone(), role))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(args.log_level().into())
                .from_env_lossy(),
        )
        .init();

    run(&args).await
}

async fn run(args: &Args) -> Result<()> {
    let config: SchedulerConfig = args.scheduler_config()?;
    let actor: AuthenticatedActor = args.actor()?;

    if let Some(path) = &args.store {
        let repository: JsonFileRepository = JsonFileRepository::open(path)
            .wrap_err_with(|| format!("opening store {}", path.display()))?;
        execute(args.command, ServiceContext::new(repository, config), &actor).await
    } else {
        if args.command == Command::Seed {
            warn!("No --store given; the seeded roster is discarded on exit");
        }
        execute(
            args.command,
            ServiceContext::new(InMemoryRepository::new(), config),
            &actor,
        )
        .await
    }
}

async fn execute<R>(
    command: Command,
    mut ctx: ServiceContext<R>,
    actor: &AuthenticatedActor,
) -> Result<()>
where
    R: SchedulingRepository + Send + Sync + 'static,
{
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    match command {
        Command::Seed => {
            let roster = seed::seed(&mut ctx, now)?;
            info!(
                admin = %roster.admin,
                supervisor = %roster.supervisor,
                nurses = ?roster.nurses,
                doctor = %roster.doctor,
                "Seeded sample staff"
            );
            info!(
                day = %roster.day_shift,
                evening = %roster.evening_shift,
                night = %roster.night_shift,
                starts = %roster.day_start,
                "Seeded tomorrow's ICU shifts"
            );
        }
        Command::Demo => {
            let report: demo::DemoReport = demo::run(ctx, now).await?;
            info!(
                overlap = ?report.overlap_reasons,
                race_winners = report.race_winners,
                request_status = %report.request_status,
                second_review_refused = report.second_review_refused,
                coverage_alerts = report.coverage_alerts,
                toasts = report.toasts_seen,
                "Demo complete"
            );
            println!("{}", serde_json::to_string_pretty(&report.stats)?);
        }
        Command::Stats => {
            let stats: DashboardStats = get_dashboard_stats(&ctx, actor)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Coverage => {
            let alerts: Vec<Notification> = check_coverage(&mut ctx, actor, now)?;
            if alerts.is_empty() {
                info!("Every shift in the coverage window is staffed");
            }
            for alert in &alerts {
                println!("{} [{:?}] {}", alert.user_id, alert.priority, alert.message);
            }
        }
    }
    Ok(())
}
