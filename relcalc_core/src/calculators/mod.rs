//! # Maintenance-Interval Calculators
//!
//! Each calculator follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `validate()` - Boundary checks returning `CalcError::InvalidInput`
//! - `calculate(&input) -> CalcResult<...>` - Pure calculation function
//!
//! The failure-finding variants all produce an [`FfiResult`]: an interval
//! in years plus zero or more advisory warnings. Warnings never block the
//! result; they flag that the closed-form approximation is being used
//! outside its validity bounds.
//!
//! ## Available Calculators
//!
//! - [`availability`] - FFI from target availability of a protective device
//! - [`economic`] - Economic-optimum FFI from test and failure costs
//! - [`risk`] - Risk-based FFI from demand and multiple-failure periods
//! - [`risk_voting`] - Risk-based FFI for m-out-of-n voting systems
//! - [`voting_systems`] - FFI for a population of identical voting units
//! - [`reliability`] - Point reliability against a target
//! - [`failure_probability`] - Probability of failure over an interval
//! - [`optimal_interval`] - Two-step MTBF -> cost-optimal interval flow

pub mod availability;
pub mod economic;
pub mod failure_probability;
pub mod optimal_interval;
pub mod reliability;
pub mod risk;
pub mod risk_voting;
pub mod voting_systems;

use serde::{Deserialize, Serialize};

use crate::units::{format_interval, DecimalSeparator};

pub use availability::{AvailabilityFfiInput, AvailabilityPolicy};
pub use economic::EconomicFfiInput;
pub use failure_probability::FailureProbabilityInput;
pub use optimal_interval::{FlowStep, OptimalIntervalFlow};
pub use reliability::{RateInput, ReliabilityInput};
pub use risk::RiskFfiInput;
pub use risk_voting::RiskVotingFfiInput;
pub use voting_systems::VotingSystemsFfiInput;

/// Advisory message shared by every variant whose formula linearizes an
/// exponential decay and is only valid above 90% availability.
pub(crate) const LOW_AVAILABILITY_NOTE: &str =
    "The formula uses a linear approximation to an exponential decay and is not \
     mathematically valid for availability less than 90%. Please adjust your inputs.";

/// Advisory message for a demand rate that is high relative to the interval.
pub(crate) const HIGH_DEMAND_NOTE: &str =
    "The demand rate is high in relation to the Failure Finding Interval. Failure \
     Finding is not technically feasible in such circumstances because a high \
     proportion of tests of the protective device will be demands on it.";

/// A calculated failure-finding interval with its advisory warnings.
///
/// Recomputed fresh on every submit; no history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FfiResult {
    /// The interval, in years
    pub interval_years: f64,

    /// Non-blocking validity advisories
    pub warnings: Vec<String>,
}

impl FfiResult {
    /// Render the interval as hours/days/"years and days".
    pub fn formatted(&self, separator: DecimalSeparator) -> String {
        format_interval(self.interval_years, separator)
    }
}
