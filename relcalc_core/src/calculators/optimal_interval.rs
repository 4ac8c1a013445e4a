//! # Optimal-Interval Two-Step Flow
//!
//! A small wizard: step 1 turns an MTBF in any supported unit into a
//! failure rate per hour; step 2 feeds that rate plus inspection and
//! failure costs into the cost-optimal interval formula and formats the
//! result into the largest unit whose value lands in [1, 100].
//!
//! "Back" returns to step 1 without clearing anything already entered,
//! so the carried failure rate and last result survive until the next
//! submit overwrites them.
//!
//! ## Example
//!
//! ```rust
//! use relcalc_core::calculators::optimal_interval::OptimalIntervalFlow;
//! use relcalc_core::units::TimeUnit;
//!
//! let mut flow = OptimalIntervalFlow::new();
//! let rate = flow.submit_mtbf(7.0, TimeUnit::Years).unwrap();
//! let result = flow.submit_costs(rate, 500.0, 10000.0).unwrap();
//! assert!(result.value >= 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::formulas;
use crate::units::{format_optimal_interval, FormattedInterval, TimeUnit};

/// Which form of the wizard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FlowStep {
    /// Step 1: enter MTBF and unit
    #[default]
    EnterMtbf,
    /// Step 2: enter costs against the carried failure rate
    EnterCosts,
}

impl FlowStep {
    /// 1-based step index for display.
    pub fn index(self) -> u8 {
        match self {
            FlowStep::EnterMtbf => 1,
            FlowStep::EnterCosts => 2,
        }
    }
}

/// State of the two-step optimal-interval wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OptimalIntervalFlow {
    step: FlowStep,
    failure_rate_per_hour: Option<f64>,
    result: Option<FormattedInterval>,
}

impl OptimalIntervalFlow {
    pub fn new() -> Self {
        OptimalIntervalFlow::default()
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    /// Failure rate carried from step 1, per hour.
    pub fn failure_rate(&self) -> Option<f64> {
        self.failure_rate_per_hour
    }

    /// Last computed result, if any.
    pub fn result(&self) -> Option<FormattedInterval> {
        self.result
    }

    /// Step 1: convert the MTBF to hours and derive the failure rate.
    ///
    /// Advances to step 2 and returns the carried rate.
    pub fn submit_mtbf(&mut self, mtbf: f64, unit: TimeUnit) -> CalcResult<f64> {
        let mtbf_hours = formulas::convert_mtbf(mtbf, unit, TimeUnit::Hours)?;
        let rate = formulas::failure_rate_from_mtbf(mtbf_hours)?;
        self.failure_rate_per_hour = Some(rate);
        self.step = FlowStep::EnterCosts;
        Ok(rate)
    }

    /// Step 2: compute and format the cost-optimal interval.
    ///
    /// The failure rate is passed explicitly because step 2 presents the
    /// carried rate as an editable field; callers default it to
    /// [`failure_rate`](Self::failure_rate).
    pub fn submit_costs(
        &mut self,
        failure_rate: f64,
        inspection_cost: f64,
        failure_cost: f64,
    ) -> CalcResult<FormattedInterval> {
        if self.step != FlowStep::EnterCosts {
            return Err(CalcError::calculation_failed(
                "optimal_interval",
                "Enter an MTBF before the costs",
            ));
        }
        let interval_hours =
            formulas::optimal_interval(inspection_cost, failure_cost, failure_rate)?;
        let formatted = format_optimal_interval(interval_hours);
        self.failure_rate_per_hour = Some(failure_rate);
        self.result = Some(formatted);
        Ok(formatted)
    }

    /// Return to step 1; entered values are retained.
    pub fn back(&mut self) {
        self.step = FlowStep::EnterMtbf;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_step_flow() {
        let mut flow = OptimalIntervalFlow::new();
        assert_eq!(flow.step().index(), 1);

        // 7 years = 61320 hours
        let rate = flow.submit_mtbf(7.0, TimeUnit::Years).unwrap();
        assert!((rate - 1.0 / 61320.0).abs() < 1e-15);
        assert_eq!(flow.step().index(), 2);

        let result = flow.submit_costs(rate, 500.0, 10000.0).unwrap();
        // sqrt(2*500 / (10000 * rate^2)) hours
        let expected_hours = (1000.0 / (10000.0 * rate * rate)).sqrt();
        assert!((result.value * result.unit.hours() - expected_hours).abs() < 1e-6);
    }

    #[test]
    fn test_costs_before_mtbf_rejected() {
        let mut flow = OptimalIntervalFlow::new();
        assert!(flow.submit_costs(0.001, 500.0, 10000.0).is_err());
    }

    #[test]
    fn test_back_retains_values() {
        let mut flow = OptimalIntervalFlow::new();
        let rate = flow.submit_mtbf(1000.0, TimeUnit::Hours).unwrap();
        flow.submit_costs(rate, 500.0, 10000.0).unwrap();

        flow.back();
        assert_eq!(flow.step(), FlowStep::EnterMtbf);
        assert_eq!(flow.failure_rate(), Some(rate));
        assert!(flow.result().is_some());
    }

    #[test]
    fn test_zero_rate_rejected_in_step_two() {
        let mut flow = OptimalIntervalFlow::new();
        flow.submit_mtbf(1000.0, TimeUnit::Hours).unwrap();
        assert!(flow.submit_costs(0.0, 500.0, 10000.0).is_err());
    }
}
