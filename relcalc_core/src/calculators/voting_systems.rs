//! # Voting-Systems FFI
//!
//! Test interval for a large population of identical voting units (an
//! electoral model rather than protective-device redundancy):
//!
//! `FFI = sqrt(2·t_det / (λ·N·T_vote))`
//!
//! where λ is the per-unit failure rate, N the number of units, T_vote
//! the voting period and t_det the time to detect a failed unit. No
//! validity advisories apply to this model.

use serde::{Deserialize, Serialize};

use crate::calculators::FfiResult;
use crate::errors::{CalcError, CalcResult};

/// Input parameters for the voting-systems FFI calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingSystemsFfiInput {
    /// Total number of voting units
    pub total_voters: f64,

    /// Voting period, in years
    pub voting_period_years: f64,

    /// Failure rate of one unit, per year
    pub failure_rate: f64,

    /// Time to detect a failed unit, in years
    pub detection_time_years: f64,
}

impl Default for VotingSystemsFfiInput {
    fn default() -> Self {
        VotingSystemsFfiInput {
            total_voters: 10_000.0,
            voting_period_years: 12.0,
            failure_rate: 0.001,
            detection_time_years: 1.0,
        }
    }
}

impl VotingSystemsFfiInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.total_voters <= 0.0 {
            return Err(CalcError::invalid_input(
                "total_voters",
                self.total_voters.to_string(),
                "Total voters must be positive",
            ));
        }
        if self.voting_period_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "voting_period_years",
                self.voting_period_years.to_string(),
                "Voting period must be positive",
            ));
        }
        if self.failure_rate <= 0.0 {
            return Err(CalcError::invalid_input(
                "failure_rate",
                self.failure_rate.to_string(),
                "Failure rate must be positive",
            ));
        }
        if self.detection_time_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "detection_time_years",
                self.detection_time_years.to_string(),
                "Detection time must be positive",
            ));
        }
        Ok(())
    }
}

/// Calculate the voting-systems failure-finding interval in years.
pub fn calculate(input: &VotingSystemsFfiInput) -> CalcResult<FfiResult> {
    input.validate()?;

    let population_rate = input.failure_rate * input.total_voters;
    let interval_years =
        (2.0 * input.detection_time_years / (population_rate * input.voting_period_years)).sqrt();

    Ok(FfiResult {
        interval_years,
        warnings: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs() {
        // λN = 10, FFI = sqrt(2 / (10 * 12)) = sqrt(1/60)
        let result = calculate(&VotingSystemsFfiInput::default()).unwrap();
        let expected = (1.0_f64 / 60.0).sqrt();
        assert!((result.interval_years - expected).abs() < 1e-9);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = VotingSystemsFfiInput::default();
        input.failure_rate = 0.0;
        assert!(calculate(&input).is_err());
    }
}
