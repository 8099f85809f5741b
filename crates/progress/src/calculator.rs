//! Milestone progress calculator.
//!
//! Every operation here is a pure function of its inputs: nothing is cached
//! or mutated, so a [`Calculator`] can be shared freely between callers.

use chrono::{DateTime, Utc};
use smokefree_core::{
    ensure_non_negative, CalcError, CalculatorConfig, ConsumptionMetrics, MilestoneStatus,
    MilestoneTable, OrganizationCostMetrics, OrganizationInputs, ProgressSnapshot, Result, HOURS_PER_DAY,
};
use tracing::{debug, warn};

pub(crate) const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours from `start` to `now`, clamped at zero.
pub fn elapsed_hours(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - start).num_milliseconds();
    (millis as f64 / MILLIS_PER_HOUR).max(0.0)
}

/// Evaluate milestone progress at `now` for a quit moment of `start`.
pub fn compute_snapshot(
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    milestones: &MilestoneTable,
) -> ProgressSnapshot {
    let started = now > start;
    if now < start {
        warn!("Quit moment {} is after {}, elapsed time clamped to zero", start, now);
    } else if now == start {
        debug!("Quit moment {} is the evaluation instant", start);
    }
    let elapsed = elapsed_hours(start, now);

    let statuses: Vec<MilestoneStatus> = milestones
        .iter()
        .map(|m| MilestoneStatus {
            milestone: m.clone(),
            completed: started && elapsed >= m.hours_offset,
        })
        .collect();

    let last_completed = statuses.iter().rev().find(|s| s.completed).map(|s| &s.milestone);
    let next_incomplete = statuses.iter().find(|s| !s.completed).map(|s| &s.milestone);

    let segment_progress_fraction = next_incomplete.map(|next| {
        let previous = last_completed.map(|m| m.hours_offset).unwrap_or(0.0);
        let span = next.hours_offset - previous;
        if span <= 0.0 {
            0.0
        } else {
            ((elapsed - previous) / span).clamp(0.0, 1.0)
        }
    });

    debug!(
        "Snapshot: {:.2}h elapsed, next milestone {:?}, segment {:?}",
        elapsed,
        next_incomplete.map(|m| m.name.as_str()),
        segment_progress_fraction
    );

    ProgressSnapshot {
        start_instant: start,
        now_instant: now,
        elapsed_hours: elapsed,
        last_completed_milestone: last_completed.cloned(),
        next_incomplete_milestone: next_incomplete.cloned(),
        segment_progress_fraction,
        statuses,
    }
}

/// Cigarettes avoided, money saved and life regained after `elapsed_hours`.
pub fn compute_consumption_metrics(
    elapsed_hours: f64,
    cigarettes_per_day: f64,
    pack_price: f64,
    pack_size: u32,
) -> Result<ConsumptionMetrics> {
    let config = CalculatorConfig {
        pack_size,
        ..Default::default()
    };
    Calculator::new()
        .with_config(config)
        .consumption_metrics(elapsed_hours, cigarettes_per_day, pack_price)
}

/// Yearly payroll cost of smoking for an organization.
pub fn compute_organization_cost(
    employee_count: u64,
    avg_monthly_salary: f64,
    smoker_fraction: f64,
) -> Result<OrganizationCostMetrics> {
    Calculator::new().organization_cost(employee_count, avg_monthly_salary, smoker_fraction)
}

/// Calculator bound to a set of domain assumptions.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: CalculatorConfig,
}

impl Calculator {
    /// Create a calculator with the default assumptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: CalculatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// See [`compute_snapshot`].
    pub fn snapshot(
        &self,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
        milestones: &MilestoneTable,
    ) -> ProgressSnapshot {
        compute_snapshot(start, now, milestones)
    }

    /// See [`compute_consumption_metrics`]; the pack size comes from the config.
    pub fn consumption_metrics(
        &self,
        elapsed_hours: f64,
        cigarettes_per_day: f64,
        pack_price: f64,
    ) -> Result<ConsumptionMetrics> {
        self.config.validate()?;
        if elapsed_hours.is_nan() {
            return Err(CalcError::invalid("elapsed_hours", "must be a number"));
        }
        ensure_non_negative("cigarettes_per_day", cigarettes_per_day)?;
        ensure_non_negative("pack_price", pack_price)?;

        let days_elapsed = (elapsed_hours.max(0.0) / HOURS_PER_DAY).floor();
        if !days_elapsed.is_finite() {
            return Err(CalcError::invalid("elapsed_hours", "must be finite"));
        }
        // u64::MAX rounds up to 2^64 as f64, which no u64 can hold
        if days_elapsed >= u64::MAX as f64 {
            return Err(CalcError::invalid(
                "elapsed_hours",
                format!("{} days is out of range", days_elapsed),
            ));
        }

        let cigarettes_avoided = (days_elapsed * cigarettes_per_day).max(0.0);
        let money_saved = cigarettes_avoided / f64::from(self.config.pack_size) * pack_price;
        let minutes_of_life_regained = cigarettes_avoided * self.config.minutes_per_cigarette;

        debug!(
            "Consumption: {} days, {} cigarettes avoided, {:.2} saved",
            days_elapsed, cigarettes_avoided, money_saved
        );

        Ok(ConsumptionMetrics {
            days_elapsed: days_elapsed as u64,
            cigarettes_avoided,
            money_saved,
            minutes_of_life_regained,
        })
    }

    /// See [`compute_organization_cost`]; takes the inputs as one value.
    pub fn organization_cost_for(
        &self,
        inputs: &OrganizationInputs,
    ) -> Result<OrganizationCostMetrics> {
        self.organization_cost(
            inputs.employee_count,
            inputs.avg_monthly_salary,
            inputs.smoker_fraction,
        )
    }

    /// See [`compute_organization_cost`].
    pub fn organization_cost(
        &self,
        employee_count: u64,
        avg_monthly_salary: f64,
        smoker_fraction: f64,
    ) -> Result<OrganizationCostMetrics> {
        self.config.validate()?;
        if employee_count == 0 {
            return Err(CalcError::invalid("employee_count", "must be >= 1"));
        }
        ensure_non_negative("avg_monthly_salary", avg_monthly_salary)?;
        if !(0.0..=1.0).contains(&smoker_fraction) {
            return Err(CalcError::invalid(
                "smoker_fraction",
                format!("must be within [0, 1], got {}", smoker_fraction),
            ));
        }

        let estimated_smokers = (employee_count as f64 * smoker_fraction).floor() as u64;
        let smokers = estimated_smokers as f64;

        let daily_salary = avg_monthly_salary / self.config.days_per_month;
        let hourly_salary = daily_salary / self.config.work_hours_per_day;
        let per_minute_salary = hourly_salary / 60.0;

        let break_cost = smokers
            * self.config.break_minutes_per_day
            * per_minute_salary
            * self.config.workdays_per_year;
        let absenteeism_cost = smokers * self.config.extra_sick_days * daily_salary;
        let total_cost = break_cost + absenteeism_cost;
        let cost_per_smoker = if estimated_smokers > 0 {
            total_cost / smokers
        } else {
            0.0
        };

        debug!(
            "Organization cost: {} smokers of {}, total {:.2}",
            estimated_smokers, employee_count, total_cost
        );

        Ok(OrganizationCostMetrics {
            estimated_smokers,
            daily_salary,
            hourly_salary,
            per_minute_salary,
            break_cost,
            absenteeism_cost,
            total_cost,
            cost_per_smoker,
        })
    }
}
