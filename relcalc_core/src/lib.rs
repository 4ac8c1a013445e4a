//! # relcalc_core - Reliability Engineering Calculation Engine
//!
//! `relcalc_core` is the computational heart of Relcalc, providing the
//! reliability-engineering calculators behind the suite: failure-finding
//! intervals for protective devices, exponential reliability checks, and
//! the RCM decision tool. All inputs and outputs are JSON-serializable,
//! so front ends and automation drive the same API.
//!
//! ## Design Philosophy
//!
//! - **Stateless calculators**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Out-of-domain input fails with a structured error,
//!   never a `NaN` in the output
//!
//! ## Quick Start
//!
//! ```rust
//! use relcalc_core::calculators::availability::{self, AvailabilityFfiInput};
//!
//! let result = availability::calculate(&AvailabilityFfiInput::default()).unwrap();
//! assert!(result.interval_years > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`formulas`] - The underlying reliability formulas
//! - [`calculators`] - Failure-finding interval and reliability calculators
//! - [`rcm`] - RCM decision graph, walker and JSON export
//! - [`units`] - Time units and number/currency/interval formatting
//! - [`settings`] - User preferences and JSON persistence
//! - [`member`] - Login and membership plan lookup
//! - [`errors`] - Structured error types

pub mod calculators;
pub mod errors;
pub mod formulas;
pub mod member;
pub mod rcm;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use settings::Settings;
pub use units::{DecimalSeparator, FormattedInterval, TimeUnit};
