//! Smokefree CLI - recovery progress and the cost of smoking.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::{Parser, Subcommand};
use smokefree_core::{format_offset, CalculatorConfig, ConsumptionInputs, OrganizationInputs};
use smokefree_progress::{BasicRecoveryTracker, Calculator, MilestoneEstimator, RecoveryTracker};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smokefree")]
#[command(about = "Track recovery after quitting smoking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file overriding the calculator assumptions
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show recovery progress and savings since the quit moment
    Progress {
        /// Quit moment (RFC 3339, or local "YYYY-MM-DD[ HH:MM[:SS]]")
        #[arg(long, value_parser = parse_instant)]
        since: DateTime<Utc>,
        /// Evaluate at this instant instead of now
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
        /// Cigarettes smoked per day
        #[arg(long, default_value = "10")]
        cigarettes_per_day: f64,
        /// Price of one pack
        #[arg(long, default_value = "75")]
        pack_price: f64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List milestones, with due dates when a quit moment is given
    Milestones {
        /// Quit moment (RFC 3339, or local "YYYY-MM-DD[ HH:MM[:SS]]")
        #[arg(long, value_parser = parse_instant)]
        since: Option<DateTime<Utc>>,
        /// Evaluate at this instant instead of now
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Estimate the yearly payroll cost of smoking in an organization
    Organization {
        /// Number of employees
        #[arg(long)]
        employees: u64,
        /// Average monthly salary
        #[arg(long)]
        salary: f64,
        /// Share of employees who smoke (0-1)
        #[arg(long)]
        smoker_fraction: f64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            CalculatorConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => CalculatorConfig::default(),
    };
    debug!("Using config: {:?}", config);
    let calculator = Calculator::new().with_config(config);

    match cli.command {
        Commands::Progress { since, now, cigarettes_per_day, pack_price, json } => {
            let tracker = BasicRecoveryTracker::with_calculator(since, calculator);
            let inputs = ConsumptionInputs { cigarettes_per_day, pack_price };
            let report = tracker.report_at(now.unwrap_or_else(Utc::now), inputs)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!(
                "Smoke-free for {} days and {} hours",
                report.smoke_free.days, report.smoke_free.hours
            );
            println!("  Cigarettes avoided: {:.0}", report.consumption.cigarettes_avoided);
            println!("  Money saved: {:.2}", report.consumption.money_saved);
            println!(
                "  Life regained: {:.1} hours",
                report.consumption.hours_of_life_regained()
            );

            println!("Milestones reached ({})", report.snapshot.completed_count());
            for milestone in report.snapshot.completed() {
                println!("  [x] {}: {}", milestone.name, milestone.description);
            }

            match (
                &report.snapshot.next_incomplete_milestone,
                report.snapshot.segment_progress_fraction,
            ) {
                (Some(next), Some(fraction)) => {
                    let remaining = MilestoneEstimator
                        .days_remaining(report.snapshot.elapsed_hours, next);
                    println!("Next: {}", next.name);
                    println!("  {}", next.description);
                    println!("  {:.0}% of the way, {:.1} days to go", fraction * 100.0, remaining);
                }
                _ => println!("All milestones reached."),
            }
        }
        Commands::Milestones { since, now, json } => {
            let Some(since) = since else {
                let table = calculator.config().milestone_table();
                if json {
                    println!("{}", serde_json::to_string_pretty(&table)?);
                    return Ok(());
                }
                println!("Milestones ({})", table.len());
                for milestone in &table {
                    println!("  {:>12} | {}", format_offset(milestone.hours_offset), milestone.name);
                }
                return Ok(());
            };

            let tracker = BasicRecoveryTracker::with_calculator(since, calculator);
            let snapshot = tracker.snapshot_at(now.unwrap_or_else(Utc::now));
            let timeline = MilestoneEstimator.timeline(&snapshot);

            if json {
                println!("{}", serde_json::to_string_pretty(&timeline)?);
                return Ok(());
            }

            println!("Timeline ({} of {} reached)", snapshot.completed_count(), timeline.len());
            for entry in timeline {
                let due = entry
                    .due_at
                    .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  {} {:>12} | {} | {}",
                    if entry.completed { "[x]" } else { "[ ]" },
                    entry.label,
                    due,
                    entry.name,
                );
            }
        }
        Commands::Organization { employees, salary, smoker_fraction, json } => {
            let inputs = OrganizationInputs {
                employee_count: employees,
                avg_monthly_salary: salary,
                smoker_fraction,
            };
            let cost = calculator.organization_cost_for(&inputs)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cost)?);
                return Ok(());
            }

            println!("Cost of smoking ({} employees)", employees);
            println!("  Estimated smokers: {}", cost.estimated_smokers);
            println!("  Break cost (presentism): {:.2}", cost.break_cost);
            println!("  Absenteeism cost: {:.2}", cost.absenteeism_cost);
            println!("  Total yearly cost: {:.2}", cost.total_cost);
            println!("  Cost per smoker: {:.2}", cost.cost_per_smoker);
        }
    }

    Ok(())
}

/// Parse an RFC 3339 instant, or a local date/time without offset.
fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("Invalid date/time: {}", s))?;

    Local
        .from_local_datetime(&naive)
        .single()
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| format!("Ambiguous or nonexistent local time: {}", s))
}
