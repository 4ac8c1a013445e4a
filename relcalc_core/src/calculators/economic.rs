//! # Economic-Optimum FFI
//!
//! Balances the cost of failure-finding tests against the expected cost of
//! multiple failures:
//!
//! `FFI = ((MTBF_p^n · (n+1) · MTBD_p · C_ff) / (n · C_mf))^(1/(n+1))`
//!
//! Two post-hoc validity checks annotate the result: a demand rate that is
//! high relative to the interval, and an implied availability below the
//! 90% floor of the underlying linearization.

use serde::{Deserialize, Serialize};

use crate::calculators::{FfiResult, HIGH_DEMAND_NOTE, LOW_AVAILABILITY_NOTE};
use crate::errors::{CalcError, CalcResult};

/// Input parameters for the economic-optimum FFI calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicFfiInput {
    /// MTBF of the protective device, in years
    pub mtbf_protective_years: f64,

    /// Mean time between demands on the protective device, in years
    pub mtbd_protective_years: f64,

    /// Cost of one failure-finding task
    pub cost_failure_finding: f64,

    /// Cost of a multiple failure
    pub cost_multiple_failure: f64,

    /// Number of parallel protective devices
    pub parallel_devices: u32,
}

impl Default for EconomicFfiInput {
    fn default() -> Self {
        EconomicFfiInput {
            mtbf_protective_years: 10.0,
            mtbd_protective_years: 1.0,
            cost_failure_finding: 1000.0,
            cost_multiple_failure: 100_000.0,
            parallel_devices: 1,
        }
    }
}

impl EconomicFfiInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.mtbf_protective_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "mtbf_protective_years",
                self.mtbf_protective_years.to_string(),
                "MTBF must be positive",
            ));
        }
        if self.mtbd_protective_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "mtbd_protective_years",
                self.mtbd_protective_years.to_string(),
                "Mean time between demands must be positive",
            ));
        }
        if self.cost_failure_finding < 0.0 {
            return Err(CalcError::invalid_input(
                "cost_failure_finding",
                self.cost_failure_finding.to_string(),
                "Failure-finding cost cannot be negative",
            ));
        }
        if self.cost_multiple_failure <= 0.0 {
            return Err(CalcError::invalid_input(
                "cost_multiple_failure",
                self.cost_multiple_failure.to_string(),
                "Multiple-failure cost must be positive",
            ));
        }
        if self.parallel_devices == 0 {
            return Err(CalcError::invalid_input(
                "parallel_devices",
                "0",
                "At least one protective device is required",
            ));
        }
        Ok(())
    }
}

/// Calculate the economic-optimum failure-finding interval in years.
pub fn calculate(input: &EconomicFfiInput) -> CalcResult<FfiResult> {
    input.validate()?;

    let n = input.parallel_devices as f64;
    let interval_years = ((input.mtbf_protective_years.powf(n)
        * (n + 1.0)
        * input.mtbd_protective_years
        * input.cost_failure_finding)
        / (n * input.cost_multiple_failure))
        .powf(1.0 / (n + 1.0));

    let mut warnings = Vec::new();
    if 2.0 * interval_years > input.mtbd_protective_years {
        warnings.push(format!(
            "Warning 1 - Demand rate high in relation to failure finding interval: \
             {HIGH_DEMAND_NOTE}"
        ));
    }

    // Implied availability, re-derived from the interval via the inverse
    // of the availability formula
    let availability = 1.0
        - ((interval_years / input.mtbf_protective_years).powf(n) / (n + 1.0)).powf(1.0 / n);
    if availability < 0.9 {
        warnings.push(format!(
            "Warning: Low availability - The calculated availability is below 90%. \
             {LOW_AVAILABILITY_NOTE} The availability for the figures used is {:.2}%",
            availability * 100.0
        ));
    }

    Ok(FfiResult {
        interval_years,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs() {
        // n=1: FFI = (10 * 2 * 1 * 1000 / 100000)^(1/2) = sqrt(0.2)
        let result = calculate(&EconomicFfiInput::default()).unwrap();
        let expected = (0.2_f64).sqrt();
        assert!((result.interval_years - expected).abs() < 1e-9);
    }

    #[test]
    fn test_high_demand_warning() {
        // Default: 2 * 0.447 < 1.0, no demand warning
        let result = calculate(&EconomicFfiInput::default()).unwrap();
        assert!(!result.warnings.iter().any(|w| w.contains("Demand rate high")));

        // Shrink the demand period below twice the interval
        let input = EconomicFfiInput {
            mtbd_protective_years: 0.5,
            ..EconomicFfiInput::default()
        };
        let result = calculate(&input).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.starts_with("Warning 1 - Demand rate high")));
    }

    #[test]
    fn test_low_availability_warning_includes_percentage() {
        // Cheap multiple failure pushes the optimum interval way out,
        // dragging implied availability below 90%
        let input = EconomicFfiInput {
            cost_multiple_failure: 200.0,
            ..EconomicFfiInput::default()
        };
        let result = calculate(&input).unwrap();
        let warning = result
            .warnings
            .iter()
            .find(|w| w.contains("Low availability"))
            .expect("expected low-availability warning");
        assert!(warning.contains('%'));
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = EconomicFfiInput::default();
        input.mtbf_protective_years = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = EconomicFfiInput::default();
        input.cost_multiple_failure = -1.0;
        assert!(calculate(&input).is_err());
    }
}
