//! Recovery tracking service.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smokefree_core::{
    ConsumptionInputs, ConsumptionMetrics, MilestoneTable, ProgressSnapshot, Result,
    SmokeFreeDuration,
};
use tracing::info;

use crate::calculator::Calculator;
use crate::estimator::{MilestoneEstimator, TimelineEntry};

/// Recovery tracking service for one quit moment.
pub trait RecoveryTracker: Send + Sync {
    /// The quit moment being tracked.
    fn start(&self) -> DateTime<Utc>;

    /// Take a progress snapshot at `now`.
    fn snapshot_at(&self, now: DateTime<Utc>) -> ProgressSnapshot;

    /// Take a progress snapshot at the current time.
    fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Build the full personal report at `now`.
    fn report_at(&self, now: DateTime<Utc>, inputs: ConsumptionInputs) -> Result<RecoveryReport>;
}

/// Everything the personal dashboard shows, evaluated at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryReport {
    /// Milestone progress
    pub snapshot: ProgressSnapshot,

    /// Days and hours smoke-free
    pub smoke_free: SmokeFreeDuration,

    /// Inputs the consumption metrics were computed from
    pub inputs: ConsumptionInputs,

    /// Savings so far
    pub consumption: ConsumptionMetrics,

    /// One entry per milestone
    pub timeline: Vec<TimelineEntry>,
}

/// Basic recovery tracker implementation.
pub struct BasicRecoveryTracker {
    start: DateTime<Utc>,
    milestones: Arc<MilestoneTable>,
    calculator: Calculator,
}

impl BasicRecoveryTracker {
    /// Track `start` against the milestone table from the default config.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_calculator(start, Calculator::new())
    }

    /// Track `start` with a configured calculator.
    pub fn with_calculator(start: DateTime<Utc>, calculator: Calculator) -> Self {
        let milestones = Arc::new(calculator.config().milestone_table());
        Self {
            start,
            milestones,
            calculator,
        }
    }

    /// Milestone table in use.
    pub fn milestones(&self) -> &MilestoneTable {
        &self.milestones
    }
}

impl RecoveryTracker for BasicRecoveryTracker {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn snapshot_at(&self, now: DateTime<Utc>) -> ProgressSnapshot {
        self.calculator.snapshot(self.start, now, &self.milestones)
    }

    fn report_at(&self, now: DateTime<Utc>, inputs: ConsumptionInputs) -> Result<RecoveryReport> {
        let snapshot = self.snapshot_at(now);
        let consumption = self.calculator.consumption_metrics(
            snapshot.elapsed_hours,
            inputs.cigarettes_per_day,
            inputs.pack_price,
        )?;
        let timeline = MilestoneEstimator.timeline(&snapshot);

        info!(
            "Recovery report: {} of {} milestones reached",
            snapshot.completed_count(),
            snapshot.statuses.len()
        );

        Ok(RecoveryReport {
            smoke_free: snapshot.smoke_free_duration(),
            snapshot,
            inputs,
            consumption,
            timeline,
        })
    }
}
