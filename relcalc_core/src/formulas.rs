//! # Formula Library
//!
//! The pure closed-form formulas shared by the calculators. All functions
//! are stateless, take scalar inputs and return a `CalcResult<f64>`; an
//! argument outside the formula's domain (zero failure rate, negative
//! interval, ...) is an explicit `InvalidInput` error instead of a
//! non-finite sentinel.
//!
//! Failure behaviour is assumed exponential throughout: a constant failure
//! rate λ gives reliability `e^(-λt)` over an interval `t`.
//!
//! ## Example
//!
//! ```rust
//! use relcalc_core::formulas;
//!
//! let p = formulas::failure_probability(0.1, 100.0).unwrap();
//! let r = formulas::reliability(0.1, 100.0).unwrap();
//! assert!((p + r - 1.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::TimeUnit;

/// Gravitational acceleration in m/s^2
const GRAVITY: f64 = 9.81;

/// Water density in kg/m^3 (assumed for pressurized drain-down)
const WATER_DENSITY: f64 = 1000.0;

/// Probability that a failure has occurred within the inspection interval:
/// `1 - e^(-λt)`.
///
/// Domain: `failure_rate > 0`, `interval >= 0`. Range `[0, 1)`.
pub fn failure_probability(failure_rate: f64, interval: f64) -> CalcResult<f64> {
    if failure_rate <= 0.0 {
        return Err(CalcError::invalid_input(
            "failure_rate",
            failure_rate.to_string(),
            "Failure rate must be positive",
        ));
    }
    if interval < 0.0 {
        return Err(CalcError::invalid_input(
            "interval",
            interval.to_string(),
            "Interval cannot be negative",
        ));
    }
    Ok(1.0 - (-failure_rate * interval).exp())
}

/// Probability of surviving the inspection interval: `e^(-λt)`.
///
/// Complement of [`failure_probability`]; the two sum to exactly 1
/// for any valid pair of arguments.
pub fn reliability(failure_rate: f64, interval: f64) -> CalcResult<f64> {
    if failure_rate <= 0.0 {
        return Err(CalcError::invalid_input(
            "failure_rate",
            failure_rate.to_string(),
            "Failure rate must be positive",
        ));
    }
    if interval < 0.0 {
        return Err(CalcError::invalid_input(
            "interval",
            interval.to_string(),
            "Interval cannot be negative",
        ));
    }
    Ok((-failure_rate * interval).exp())
}

/// Cost-optimal inspection interval: `sqrt(2·Ci / (Cf·λ²))`.
///
/// Balances the cost of inspections against the expected cost of
/// undetected failures. Domain: `inspection_cost >= 0`,
/// `failure_cost > 0`, `failure_rate > 0`.
pub fn optimal_interval(
    inspection_cost: f64,
    failure_cost: f64,
    failure_rate: f64,
) -> CalcResult<f64> {
    if inspection_cost < 0.0 {
        return Err(CalcError::invalid_input(
            "inspection_cost",
            inspection_cost.to_string(),
            "Inspection cost cannot be negative",
        ));
    }
    if failure_cost <= 0.0 {
        return Err(CalcError::invalid_input(
            "failure_cost",
            failure_cost.to_string(),
            "Failure cost must be positive",
        ));
    }
    if failure_rate <= 0.0 {
        return Err(CalcError::invalid_input(
            "failure_rate",
            failure_rate.to_string(),
            "Failure rate must be positive",
        ));
    }
    Ok((2.0 * inspection_cost / (failure_cost * failure_rate * failure_rate)).sqrt())
}

/// Failure rate from MTBF: `λ = 1/m`. Domain: `mtbf > 0`.
pub fn failure_rate_from_mtbf(mtbf: f64) -> CalcResult<f64> {
    if mtbf <= 0.0 {
        return Err(CalcError::invalid_input(
            "mtbf",
            mtbf.to_string(),
            "MTBF must be positive",
        ));
    }
    Ok(1.0 / mtbf)
}

/// MTBF from failure rate: `m = 1/λ`. Domain: `failure_rate > 0`.
///
/// Mutual inverse of [`failure_rate_from_mtbf`].
pub fn mtbf_from_failure_rate(failure_rate: f64) -> CalcResult<f64> {
    if failure_rate <= 0.0 {
        return Err(CalcError::invalid_input(
            "failure_rate",
            failure_rate.to_string(),
            "Failure rate must be positive",
        ));
    }
    Ok(1.0 / failure_rate)
}

/// Convert an MTBF value between time units via the hours table.
///
/// The conversion is purely multiplicative, so converting A→B→A returns
/// the original value up to floating-point tolerance.
pub fn convert_mtbf(value: f64, from: TimeUnit, to: TimeUnit) -> CalcResult<f64> {
    if value <= 0.0 {
        return Err(CalcError::invalid_input(
            "value",
            value.to_string(),
            "MTBF must be positive",
        ));
    }
    Ok(value * from.hours() / to.hours())
}

/// Drain-down sub-model for [`voiding_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipeSystem {
    /// Torricelli efflux: exit velocity `sqrt(2·g·L)`
    Gravity,
    /// Bernoulli: exit velocity `sqrt(2·ΔP/ρ)`, water density assumed
    Pressurized,
}

/// Time to void a tank through a drain pipe, in seconds.
///
/// `tank_volume` in m³, `pipe_length` in m, `pipe_diameter` in mm.
/// A pressurized system requires `pressure_difference` in Pa; omitting
/// it is a `MissingField` error.
pub fn voiding_time(
    tank_volume: f64,
    pipe_length: f64,
    pipe_diameter: f64,
    system: PipeSystem,
    pressure_difference: Option<f64>,
) -> CalcResult<f64> {
    if tank_volume <= 0.0 {
        return Err(CalcError::invalid_input(
            "tank_volume",
            tank_volume.to_string(),
            "Tank volume must be positive",
        ));
    }
    if pipe_length <= 0.0 {
        return Err(CalcError::invalid_input(
            "pipe_length",
            pipe_length.to_string(),
            "Pipe length must be positive",
        ));
    }
    if pipe_diameter <= 0.0 {
        return Err(CalcError::invalid_input(
            "pipe_diameter",
            pipe_diameter.to_string(),
            "Pipe diameter must be positive",
        ));
    }

    // mm diameter to m radius
    let pipe_radius = pipe_diameter / 2000.0;
    let pipe_area = std::f64::consts::PI * pipe_radius * pipe_radius;

    let exit_velocity = match system {
        PipeSystem::Gravity => (2.0 * GRAVITY * pipe_length).sqrt(),
        PipeSystem::Pressurized => {
            let dp = pressure_difference
                .ok_or_else(|| CalcError::missing_field("pressure_difference"))?;
            if dp <= 0.0 {
                return Err(CalcError::invalid_input(
                    "pressure_difference",
                    dp.to_string(),
                    "Pressure difference must be positive",
                ));
            }
            (2.0 * dp / WATER_DENSITY).sqrt()
        }
    };

    Ok(tank_volume / (pipe_area * exit_velocity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_probability_spec_value() {
        // 1 - e^-10
        let p = failure_probability(0.1, 100.0).unwrap();
        assert!((p - 0.9999546).abs() < 1e-7);
    }

    #[test]
    fn test_complement_identity() {
        for &(rate, t) in &[(0.001, 0.0), (0.001, 1000.0), (0.1, 100.0), (2.5, 0.3)] {
            let p = failure_probability(rate, t).unwrap();
            let r = reliability(rate, t).unwrap();
            assert!((p + r - 1.0).abs() < 1e-9, "identity failed for ({rate}, {t})");
        }
    }

    #[test]
    fn test_optimal_interval_spec_value() {
        // sqrt(1000 / (10000 * 1e-6)) = sqrt(100000)
        let t = optimal_interval(500.0, 10000.0, 0.001).unwrap();
        assert!((t - 316.2277660168).abs() < 1e-6);
    }

    #[test]
    fn test_optimal_interval_rejects_zero_rate() {
        let err = optimal_interval(500.0, 10000.0, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_mtbf_rate_inverses() {
        for &x in &[0.5, 1.0, 7.0, 8760.0] {
            let roundtrip = failure_rate_from_mtbf(mtbf_from_failure_rate(x).unwrap()).unwrap();
            assert!((roundtrip - x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_convert_mtbf_roundtrip() {
        let v = 7.0;
        let there = convert_mtbf(v, TimeUnit::Years, TimeUnit::Hours).unwrap();
        assert!((there - 7.0 * 8760.0).abs() < 1e-9);
        let back = convert_mtbf(there, TimeUnit::Hours, TimeUnit::Years).unwrap();
        assert!((back - v).abs() < 1e-9);
    }

    #[test]
    fn test_voiding_time_gravity() {
        // 10 m³ tank, 2 m drop, 100 mm pipe
        let area = std::f64::consts::PI * 0.05 * 0.05;
        let velocity = (2.0 * 9.81 * 2.0_f64).sqrt();
        let expected = 10.0 / (area * velocity);
        let t = voiding_time(10.0, 2.0, 100.0, PipeSystem::Gravity, None).unwrap();
        assert!((t - expected).abs() < 1e-9);
    }

    #[test]
    fn test_voiding_time_pressurized_requires_dp() {
        let err = voiding_time(10.0, 2.0, 100.0, PipeSystem::Pressurized, None).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");

        let ok = voiding_time(10.0, 2.0, 100.0, PipeSystem::Pressurized, Some(200_000.0));
        assert!(ok.is_ok());
    }
}
