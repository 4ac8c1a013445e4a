//! # Reliability Check
//!
//! Point reliability of an item over an inspection interval, compared
//! against a target. The failure behaviour can be given either as a
//! failure rate or as an MTBF (the reciprocal), whichever the engineer
//! has to hand.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::formulas;

/// Failure behaviour given as a rate or its reciprocal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum RateInput {
    /// Failures per hour
    FailureRate(f64),
    /// Mean time between failures, in hours
    Mtbf(f64),
}

impl RateInput {
    /// Resolve to a failure rate per hour.
    pub fn failure_rate(self) -> CalcResult<f64> {
        match self {
            RateInput::FailureRate(rate) => {
                if rate <= 0.0 {
                    return Err(CalcError::invalid_input(
                        "failure_rate",
                        rate.to_string(),
                        "Failure rate must be positive",
                    ));
                }
                Ok(rate)
            }
            RateInput::Mtbf(mtbf) => formulas::failure_rate_from_mtbf(mtbf),
        }
    }
}

/// Input parameters for the reliability check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityInput {
    /// Failure rate or MTBF of the item
    pub rate: RateInput,

    /// Inspection interval, in hours
    pub inspection_interval_hours: f64,

    /// Target reliability, 0-1
    pub target_reliability: f64,
}

impl Default for ReliabilityInput {
    fn default() -> Self {
        ReliabilityInput {
            rate: RateInput::FailureRate(0.001),
            inspection_interval_hours: 1000.0,
            target_reliability: 0.95,
        }
    }
}

impl ReliabilityInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.inspection_interval_hours <= 0.0 {
            return Err(CalcError::invalid_input(
                "inspection_interval_hours",
                self.inspection_interval_hours.to_string(),
                "Inspection interval must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.target_reliability) {
            return Err(CalcError::invalid_input(
                "target_reliability",
                self.target_reliability.to_string(),
                "Target reliability must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Results from the reliability check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityResult {
    /// Reliability over the interval, 0-1
    pub reliability: f64,

    /// Resolved failure rate per hour
    pub failure_rate: f64,

    /// Resolved MTBF in hours
    pub mtbf_hours: f64,

    /// Whether the reliability meets the target
    pub meets_target: bool,
}

/// Calculate the reliability over the interval and compare to the target.
pub fn calculate(input: &ReliabilityInput) -> CalcResult<ReliabilityResult> {
    input.validate()?;

    let failure_rate = input.rate.failure_rate()?;
    let reliability = formulas::reliability(failure_rate, input.inspection_interval_hours)?;

    Ok(ReliabilityResult {
        reliability,
        failure_rate,
        mtbf_hours: formulas::mtbf_from_failure_rate(failure_rate)?,
        meets_target: reliability >= input.target_reliability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs() {
        // e^-1 ~ 0.3679, under the 0.95 target
        let result = calculate(&ReliabilityInput::default()).unwrap();
        assert!((result.reliability - (-1.0_f64).exp()).abs() < 1e-9);
        assert!(!result.meets_target);
    }

    #[test]
    fn test_mtbf_input_resolves_rate() {
        let input = ReliabilityInput {
            rate: RateInput::Mtbf(1000.0),
            inspection_interval_hours: 100.0,
            target_reliability: 0.9,
        };
        let result = calculate(&input).unwrap();
        assert!((result.failure_rate - 0.001).abs() < 1e-12);
        // e^-0.1 ~ 0.9048, meets 0.9
        assert!(result.meets_target);
    }

    #[test]
    fn test_target_out_of_range() {
        let input = ReliabilityInput {
            target_reliability: 1.5,
            ..ReliabilityInput::default()
        };
        assert!(calculate(&input).is_err());
    }
}
