//! # Failure Probability
//!
//! Probability that a failure has occurred by the end of the inspection
//! interval, with the surviving reliability alongside.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::formulas;

/// Input parameters for the failure-probability calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureProbabilityInput {
    /// Failure rate, per hour
    pub failure_rate: f64,

    /// Inspection interval, in hours
    pub inspection_interval_hours: f64,
}

impl Default for FailureProbabilityInput {
    fn default() -> Self {
        FailureProbabilityInput {
            failure_rate: 0.1,
            inspection_interval_hours: 100.0,
        }
    }
}

/// Results from the failure-probability calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureProbabilityResult {
    /// Probability of failure within the interval, 0-1
    pub probability: f64,

    /// Complementary reliability, 0-1
    pub reliability: f64,
}

/// Calculate the probability of failure over the inspection interval.
pub fn calculate(input: &FailureProbabilityInput) -> CalcResult<FailureProbabilityResult> {
    let probability =
        formulas::failure_probability(input.failure_rate, input.inspection_interval_hours)?;
    let reliability = formulas::reliability(input.failure_rate, input.inspection_interval_hours)?;

    Ok(FailureProbabilityResult {
        probability,
        reliability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs() {
        let result = calculate(&FailureProbabilityInput::default()).unwrap();
        assert!((result.probability - 0.9999546).abs() < 1e-7);
        assert!((result.probability + result.reliability - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_interval_rejected() {
        let input = FailureProbabilityInput {
            inspection_interval_hours: -1.0,
            ..FailureProbabilityInput::default()
        };
        assert!(calculate(&input).is_err());
    }
}
