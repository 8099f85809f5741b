//! Calculator configuration - the domain assumptions behind every metric.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{ensure_non_negative, ensure_positive, CalcError};
use crate::milestone::MilestoneTable;

/// Cigarettes in a pack.
pub const DEFAULT_PACK_SIZE: u32 = 20;

/// Minutes of life lost per cigarette smoked.
pub const MINUTES_OF_LIFE_PER_CIGARETTE: f64 = 11.0;

/// Paid minutes a smoker spends on breaks each workday.
pub const SMOKING_BREAK_MINUTES_PER_DAY: f64 = 60.0;

/// Working days in a year.
pub const WORKDAYS_PER_YEAR: f64 = 250.0;

/// Extra sick days a smoker takes per year.
pub const EXTRA_SICK_DAYS_PER_SMOKER: f64 = 3.0;

/// Days a monthly salary is spread over.
pub const SALARY_DAYS_PER_MONTH: f64 = 30.0;

/// Paid hours in a workday.
pub const WORK_HOURS_PER_DAY: f64 = 8.0;

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed but out of range
    #[error("Invalid config: {0}")]
    Invalid(#[from] CalcError),
}

/// Tunable assumptions for the calculator.
///
/// Every field is optional in the JSON form; missing fields take the
/// defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Cigarettes per pack
    pub pack_size: u32,

    /// Minutes of life regained per cigarette avoided
    pub minutes_per_cigarette: f64,

    /// Break minutes per smoker per workday
    pub break_minutes_per_day: f64,

    /// Workdays per year
    pub workdays_per_year: f64,

    /// Extra sick days per smoker per year
    pub extra_sick_days: f64,

    /// Divisor turning a monthly salary into a daily one
    pub days_per_month: f64,

    /// Divisor turning a daily salary into an hourly one
    pub work_hours_per_day: f64,

    /// Custom milestone table; the built-in recovery table when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestones: Option<MilestoneTable>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            pack_size: DEFAULT_PACK_SIZE,
            minutes_per_cigarette: MINUTES_OF_LIFE_PER_CIGARETTE,
            break_minutes_per_day: SMOKING_BREAK_MINUTES_PER_DAY,
            workdays_per_year: WORKDAYS_PER_YEAR,
            extra_sick_days: EXTRA_SICK_DAYS_PER_SMOKER,
            days_per_month: SALARY_DAYS_PER_MONTH,
            work_hours_per_day: WORK_HOURS_PER_DAY,
            milestones: None,
        }
    }
}

impl CalculatorConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: CalculatorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every assumption is usable.
    pub fn validate(&self) -> crate::Result<()> {
        if self.pack_size == 0 {
            return Err(CalcError::invalid("pack_size", "must be > 0"));
        }
        ensure_non_negative("minutes_per_cigarette", self.minutes_per_cigarette)?;
        ensure_non_negative("break_minutes_per_day", self.break_minutes_per_day)?;
        ensure_non_negative("workdays_per_year", self.workdays_per_year)?;
        ensure_non_negative("extra_sick_days", self.extra_sick_days)?;
        ensure_positive("days_per_month", self.days_per_month)?;
        ensure_positive("work_hours_per_day", self.work_hours_per_day)?;
        Ok(())
    }

    /// The milestone table in effect.
    pub fn milestone_table(&self) -> MilestoneTable {
        self.milestones.clone().unwrap_or_default()
    }
}
