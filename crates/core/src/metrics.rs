//! Consumption and payroll metrics derived from user inputs.

use serde::{Deserialize, Serialize};

/// Personal consumption inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionInputs {
    /// Cigarettes smoked per day before quitting
    pub cigarettes_per_day: f64,
    /// Price of one pack
    pub pack_price: f64,
}

impl Default for ConsumptionInputs {
    fn default() -> Self {
        Self {
            cigarettes_per_day: 10.0,
            pack_price: 75.0,
        }
    }
}

/// What quitting has saved so far.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionMetrics {
    /// Whole days since quitting
    pub days_elapsed: u64,
    /// Cigarettes not smoked
    pub cigarettes_avoided: f64,
    /// Money not spent on packs
    pub money_saved: f64,
    /// Estimated minutes of life regained
    pub minutes_of_life_regained: f64,
}

impl ConsumptionMetrics {
    /// Life regained expressed in hours.
    pub fn hours_of_life_regained(&self) -> f64 {
        self.minutes_of_life_regained / 60.0
    }
}

/// Organization inputs for the cost-of-smoking estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrganizationInputs {
    /// Headcount
    pub employee_count: u64,
    /// Average monthly salary per employee
    pub avg_monthly_salary: f64,
    /// Share of employees who smoke, in `[0, 1]`
    pub smoker_fraction: f64,
}

/// Estimated yearly payroll cost of smoking in an organization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrganizationCostMetrics {
    /// Smokers among the employees
    pub estimated_smokers: u64,
    /// Salary per calendar day
    pub daily_salary: f64,
    /// Salary per working hour
    pub hourly_salary: f64,
    /// Salary per working minute
    pub per_minute_salary: f64,
    /// Paid time spent on smoking breaks (presentism)
    pub break_cost: f64,
    /// Extra sick leave
    pub absenteeism_cost: f64,
    /// `break_cost + absenteeism_cost`
    pub total_cost: f64,
    /// `total_cost / estimated_smokers`, or 0 with no smokers
    pub cost_per_smoker: f64,
}
