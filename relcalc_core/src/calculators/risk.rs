//! # Risk-Based FFI
//!
//! Sets the failure-finding interval from the tolerable rate of multiple
//! failures rather than from cost:
//!
//! `FFI = MTBF_p · (((n+1)·MPBD) / MTBMF)^(1/n)`
//!
//! where MPBD is the mean period between demands and MTBMF the mean time
//! between multiple failures the operation is prepared to tolerate.

use serde::{Deserialize, Serialize};

use crate::calculators::{FfiResult, HIGH_DEMAND_NOTE, LOW_AVAILABILITY_NOTE};
use crate::errors::{CalcError, CalcResult};

/// Input parameters for the risk-based FFI calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFfiInput {
    /// MTBF of the protective device, in years
    pub mtbf_protective_years: f64,

    /// Mean period between demands on the protected function, in years
    pub mean_period_between_demands_years: f64,

    /// Tolerable mean time between multiple failures, in years
    pub mtbmf_years: f64,

    /// Number of parallel protective devices
    pub parallel_devices: u32,
}

impl Default for RiskFfiInput {
    fn default() -> Self {
        RiskFfiInput {
            mtbf_protective_years: 10.0,
            mean_period_between_demands_years: 5.0,
            mtbmf_years: 100.0,
            parallel_devices: 1,
        }
    }
}

impl RiskFfiInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.mtbf_protective_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "mtbf_protective_years",
                self.mtbf_protective_years.to_string(),
                "MTBF must be positive",
            ));
        }
        if self.mean_period_between_demands_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "mean_period_between_demands_years",
                self.mean_period_between_demands_years.to_string(),
                "Mean period between demands must be positive",
            ));
        }
        if self.mtbmf_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "mtbmf_years",
                self.mtbmf_years.to_string(),
                "Mean time between multiple failures must be positive",
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

/// Shared validity checks for the risk-parameterized variants.
pub(crate) fn risk_warnings(
    interval_years: f64,
    mpbd_years: f64,
    mtbmf_years: f64,
    parallel_devices: u32,
) -> Vec<String> {
    let n = parallel_devices as f64;
    let mut warnings = Vec::new();

    let availability = 1.0 - (mpbd_years / mtbmf_years).powf(1.0 / n);
    if availability < 0.9 {
        warnings.push(format!(
            "Warning: Low availability - The calculated availability is below 90%. \
             {LOW_AVAILABILITY_NOTE} The availability for the figures used is {:.2}%",
            availability * 100.0
        ));
    }

    if 2.0 * interval_years > mpbd_years {
        warnings.push(format!("Warning: High demand rate - {HIGH_DEMAND_NOTE}"));
    }

    warnings
}

/// Calculate the risk-based failure-finding interval in years.
pub fn calculate(input: &RiskFfiInput) -> CalcResult<FfiResult> {
    input.validate()?;

    let n = input.parallel_devices as f64;
    let interval_years = input.mtbf_protective_years
        * (((n + 1.0) * input.mean_period_between_demands_years) / input.mtbmf_years)
            .powf(1.0 / n);

    let warnings = risk_warnings(
        interval_years,
        input.mean_period_between_demands_years,
        input.mtbmf_years,
        input.parallel_devices,
    );

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
        // n=1: FFI = 10 * (2 * 5 / 100) = 1.0 year
        let result = calculate(&RiskFfiInput::default()).unwrap();
        assert!((result.interval_years - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_availability_advisory() {
        // availability = 1 - 5/100 = 0.95, above the floor
        let result = calculate(&RiskFfiInput::default()).unwrap();
        assert!(!result.warnings.iter().any(|w| w.contains("Low availability")));
    }

    #[test]
    fn test_low_availability_warning() {
        let input = RiskFfiInput {
            mean_period_between_demands_years: 50.0,
            mtbmf_years: 100.0,
            ..RiskFfiInput::default()
        };
        // availability = 1 - 0.5 = 0.5
        let result = calculate(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("Low availability")));
    }

    #[test]
    fn test_high_demand_warning() {
        let input = RiskFfiInput {
            mean_period_between_demands_years: 1.0,
            mtbmf_years: 2.0,
            ..RiskFfiInput::default()
        };
        // FFI = 10 * (2 * 1 / 2) = 10 years; 2*10 > 1
        let result = calculate(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("High demand")));
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = RiskFfiInput::default();
        input.mtbmf_years = 0.0;
        assert!(calculate(&input).is_err());
    }
}
