//! Smokefree core data models.
//!
//! This crate defines the milestone table, the derived snapshot and metric
//! types, and the tunable domain assumptions the calculator works from.

#![warn(missing_docs)]

// Errors
mod error;

// Recovery milestones
mod milestone;
mod snapshot;

// Financial and payroll metrics
mod metrics;

// Configuration and presentation helpers
mod config;
mod format;

// Re-exports
pub use error::{ensure_non_negative, ensure_positive, CalcError, Result};

// Milestones & progress
pub use milestone::{Milestone, MilestoneTable};
pub use snapshot::{MilestoneStatus, ProgressSnapshot, SmokeFreeDuration};

// Metrics
pub use metrics::{ConsumptionInputs, ConsumptionMetrics, OrganizationCostMetrics, OrganizationInputs};

// Config
pub use config::{
    CalculatorConfig, ConfigError, DEFAULT_PACK_SIZE, EXTRA_SICK_DAYS_PER_SMOKER,
    MINUTES_OF_LIFE_PER_CIGARETTE, SALARY_DAYS_PER_MONTH, SMOKING_BREAK_MINUTES_PER_DAY,
    WORKDAYS_PER_YEAR, WORK_HOURS_PER_DAY,
};
pub use format::{format_offset, HOURS_PER_DAY, HOURS_PER_YEAR};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
