//! # Availability-Based FFI
//!
//! The simplest failure-finding formula, based on the reliability of the
//! protective device and the availability demanded of it:
//!
//! `FFI = MTBF · ((n+1)·(1−A))^(1/n)`
//!
//! where `A` is the target availability fraction and `n` the number of
//! parallel protective devices. The formula is a linearization of an
//! exponential decay and only holds for availabilities of 90% and above.
//! Below that threshold the calculator either refuses the input or
//! attaches an advisory, depending on [`AvailabilityPolicy`].

use serde::{Deserialize, Serialize};

use crate::calculators::FfiResult;
use crate::errors::{CalcError, CalcResult};

/// Threshold below which the linear approximation breaks down (%).
pub const AVAILABILITY_FLOOR_PCT: f64 = 90.0;

const LINEARIZATION_NOTE: &str =
    "The calculation uses a linear approximation to an exponential decay. The \
     formula is only valid for availabilities above 90%. Please select a figure \
     greater than 90%";

/// How to treat a target availability below the 90% validity floor.
///
/// Both behaviours exist in the field: the strict form refuses the
/// calculation outright, the lenient form computes anyway and attaches
/// the advisory. Choose per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityPolicy {
    /// Refuse inputs below the floor with an `InvalidInput` error
    #[default]
    Block,
    /// Compute the interval and attach the advisory warning
    Warn,
}

/// Input parameters for the availability-based FFI calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityFfiInput {
    /// Target availability of the protective function, in percent (0-100)
    pub target_availability_pct: f64,

    /// MTBF of the protective device, in years
    pub mtbf_years: f64,

    /// Number of parallel protective devices
    pub parallel_devices: u32,

    /// Guard behaviour below the 90% validity floor
    pub policy: AvailabilityPolicy,
}

impl Default for AvailabilityFfiInput {
    fn default() -> Self {
        AvailabilityFfiInput {
            target_availability_pct: 95.0,
            mtbf_years: 10.0,
            parallel_devices: 1,
            policy: AvailabilityPolicy::Block,
        }
    }
}

impl AvailabilityFfiInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if !(0.0..=100.0).contains(&self.target_availability_pct) {
            return Err(CalcError::invalid_input(
                "target_availability_pct",
                self.target_availability_pct.to_string(),
                "Target availability must be between 0 and 100",
            ));
        }
        if self.mtbf_years <= 0.0 {
            return Err(CalcError::invalid_input(
                "mtbf_years",
                self.mtbf_years.to_string(),
                "MTBF must be positive",
            ));
        }
        if self.parallel_devices == 0 {
            return Err(CalcError::invalid_input(
                "parallel_devices",
                "0",
                "At least one protective device is required",
            ));
        }
        if self.policy == AvailabilityPolicy::Block
            && self.target_availability_pct < AVAILABILITY_FLOOR_PCT
        {
            return Err(CalcError::invalid_input(
                "target_availability_pct",
                self.target_availability_pct.to_string(),
                LINEARIZATION_NOTE,
            ));
        }
        Ok(())
    }
}

/// Calculate the availability-based failure-finding interval in years.
pub fn calculate(input: &AvailabilityFfiInput) -> CalcResult<FfiResult> {
    input.validate()?;

    let n = input.parallel_devices as f64;
    let target_unavailability = 1.0 - input.target_availability_pct / 100.0;
    let interval_years = input.mtbf_years * ((n + 1.0) * target_unavailability).powf(1.0 / n);

    let mut warnings = Vec::new();
    if input.target_availability_pct < AVAILABILITY_FLOOR_PCT {
        warnings.push(LINEARIZATION_NOTE.to_string());
    }

    Ok(FfiResult {
        interval_years,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::DecimalSeparator;

    #[test]
    fn test_default_single_device_one_year() {
        // 95% target, 10 year MTBF, single device:
        // FFI = 10 * (2 * 0.05)^1 = 1.0 year
        let input = AvailabilityFfiInput::default();
        let result = calculate(&input).unwrap();
        assert!((result.interval_years - 1.0).abs() < 1e-9);
        assert!(result.warnings.is_empty());
        assert_eq!(result.formatted(DecimalSeparator::Point), "1 year");
    }

    #[test]
    fn test_two_devices() {
        let input = AvailabilityFfiInput {
            target_availability_pct: 95.0,
            mtbf_years: 10.0,
            parallel_devices: 2,
            policy: AvailabilityPolicy::Block,
        };
        let result = calculate(&input).unwrap();
        // 10 * (3 * 0.05)^(1/2)
        let expected = 10.0 * (0.15_f64).sqrt();
        assert!((result.interval_years - expected).abs() < 1e-9);
    }

    #[test]
    fn test_block_policy_refuses_below_floor() {
        let input = AvailabilityFfiInput {
            target_availability_pct: 85.0,
            ..AvailabilityFfiInput::default()
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_warn_policy_computes_with_advisory() {
        let input = AvailabilityFfiInput {
            target_availability_pct: 85.0,
            policy: AvailabilityPolicy::Warn,
            ..AvailabilityFfiInput::default()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.interval_years > 0.0);
    }

    #[test]
    fn test_out_of_range_availability() {
        let input = AvailabilityFfiInput {
            target_availability_pct: 120.0,
            ..AvailabilityFfiInput::default()
        };
        assert!(calculate(&input).is_err());
    }
}
