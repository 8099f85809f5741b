//! Recovery progress (milestone calculator)
//!
//! Elapsed time, milestone completion, segment progress, and the
//! consumption and organization cost metrics built on top of them.

#![warn(missing_docs)]

pub mod calculator;
pub mod tracker;
pub mod estimator;

pub use calculator::{
    compute_consumption_metrics, compute_organization_cost, compute_snapshot, elapsed_hours,
    Calculator,
};
pub use tracker::{BasicRecoveryTracker, RecoveryReport, RecoveryTracker};
pub use estimator::{MilestoneEstimator, TimelineEntry};
