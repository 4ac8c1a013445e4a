//! # Risk-Based Voting FFI
//!
//! Generalizes the risk-based formula to a protective system with
//! m-out-of-n voting logic: n parallel devices of which m must act to
//! activate the protection. With `r = n − m + 1`:
//!
//! `FFI = MTBF_p · ((r!·(n−r)!·(r+1)·MPBD) / (n!·MTBMF))^(1/r)`
//!
//! The factorial ratio is a binomial coefficient; factorials are computed
//! exactly over integers (inputs are restricted to n ≤ 20, far above any
//! practical voting arrangement).
//!
//! The availability advisory deliberately uses n rather than r, matching
//! the published form of the check for the non-voting variant.

use serde::{Deserialize, Serialize};

use crate::calculators::risk::risk_warnings;
use crate::calculators::FfiResult;
use crate::errors::{CalcError, CalcResult};

/// Largest n for which n! fits in u64.
const MAX_DEVICES: u32 = 20;

/// Input parameters for the risk-based voting FFI calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVotingFfiInput {
    /// MTBF of one protective device, in years
    pub mtbf_protective_years: f64,

    /// Mean period between demands on the protected function, in years
    pub mean_period_between_demands_years: f64,

    /// Tolerable mean time between multiple failures, in years
    pub mtbmf_years: f64,

    /// Total number of parallel protective devices (n)
    pub parallel_devices: u32,

    /// Number of devices that must act to activate the protection (m)
    pub devices_to_activate: u32,
}

impl Default for RiskVotingFfiInput {
    fn default() -> Self {
        RiskVotingFfiInput {
            mtbf_protective_years: 100.0,
            mean_period_between_demands_years: 50.0,
            mtbmf_years: 100_000.0,
            parallel_devices: 3,
            devices_to_activate: 2,
        }
    }
}

impl RiskVotingFfiInput {
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
        if self.parallel_devices > MAX_DEVICES {
            return Err(CalcError::invalid_input(
                "parallel_devices",
                self.parallel_devices.to_string(),
                "At most 20 parallel devices are supported",
            ));
        }
        if self.devices_to_activate == 0 {
            return Err(CalcError::invalid_input(
                "devices_to_activate",
                "0",
                "At least one device must activate the protection",
            ));
        }
        if self.devices_to_activate > self.parallel_devices {
            return Err(CalcError::invalid_input(
                "devices_to_activate",
                self.devices_to_activate.to_string(),
                "Cannot require more devices than are installed",
            ));
        }
        Ok(())
    }

    /// Redundancy depth r = n − m + 1.
    pub fn redundancy(&self) -> u32 {
        self.parallel_devices - self.devices_to_activate + 1
    }
}

/// Exact integer factorial; callers guarantee n ≤ 20.
fn factorial(n: u32) -> u64 {
    (2..=n as u64).product::<u64>().max(1)
}

/// Calculate the risk-based voting failure-finding interval in years.
pub fn calculate(input: &RiskVotingFfiInput) -> CalcResult<FfiResult> {
    input.validate()?;

    let n = input.parallel_devices;
    let r = input.redundancy();

    let numerator = factorial(n - r) as f64
        * factorial(r) as f64
        * (r as f64 + 1.0)
        * input.mean_period_between_demands_years;
    let denominator = factorial(n) as f64 * input.mtbmf_years;
    let interval_years =
        input.mtbf_protective_years * (numerator / denominator).powf(1.0 / r as f64);

    // Availability check intentionally parameterized on n, not r
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
    fn test_factorials() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(2), 2);
        assert_eq!(factorial(3), 6);
        assert_eq!(factorial(10), 3_628_800);
    }

    #[test]
    fn test_redundancy_two_out_of_three() {
        let input = RiskVotingFfiInput::default();
        assert_eq!(input.parallel_devices, 3);
        assert_eq!(input.devices_to_activate, 2);
        assert_eq!(input.redundancy(), 2);
    }

    #[test]
    fn test_two_out_of_three_interval() {
        // n=3, m=2 => r=2
        // FFI = 100 * ((1! * 2! * 3 * 50) / (3! * 100000))^(1/2)
        //     = 100 * (300 / 600000)^(1/2) = 100 * sqrt(0.0005)
        let result = calculate(&RiskVotingFfiInput::default()).unwrap();
        let expected = 100.0 * (0.0005_f64).sqrt();
        assert!((result.interval_years - expected).abs() < 1e-9);
    }

    #[test]
    fn test_one_out_of_one_matches_risk_based() {
        // n=1, m=1 => r=1, reduces to the plain risk-based formula
        let input = RiskVotingFfiInput {
            mtbf_protective_years: 10.0,
            mean_period_between_demands_years: 5.0,
            mtbmf_years: 100.0,
            parallel_devices: 1,
            devices_to_activate: 1,
        };
        let result = calculate(&input).unwrap();
        assert!((result.interval_years - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_m_greater_than_n_rejected() {
        let input = RiskVotingFfiInput {
            parallel_devices: 2,
            devices_to_activate: 3,
            ..RiskVotingFfiInput::default()
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_availability_check_uses_n() {
        // With n=3: availability = 1 - (50/100000)^(1/3) ~ 0.921, no warning.
        // Parameterized on r=2 it would be 1 - sqrt(0.0005) ~ 0.978 as well,
        // so pick figures where the two disagree across the 90% floor:
        // mpbd=300, mtbmf=100000: n=3 -> 1 - 0.003^(1/3) = 0.8557 (warn),
        // r=2 -> 1 - sqrt(0.003) = 0.9452 (no warn).
        let input = RiskVotingFfiInput {
            mean_period_between_demands_years: 300.0,
            ..RiskVotingFfiInput::default()
        };
        let result = calculate(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("Low availability")));
    }
}
