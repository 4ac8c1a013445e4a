//! # RCM Decision Tool
//!
//! A Reliability Centred Maintenance decision aid: the user works
//! through a fixed yes/no decision diagram for a chosen asset and
//! failure mode and arrives at a recommended failure-management policy,
//! which can then be exported as JSON.
//!
//! - [`graph`]: the static question/answer node table and asset catalog
//! - [`walker`]: traversal state with answer, back and reset
//! - [`export`]: serialization of a completed analysis

pub mod export;
pub mod graph;
pub mod walker;

pub use export::{DecisionExport, PathEntry, RecommendedAction};
pub use graph::{node, Answer, Asset, Node, Question, StepId, ASSETS};
pub use walker::{FailureLeg, FailureType, RcmState, YesNo, TOTAL_STEPS};
