//! # RCM Decision Walker
//!
//! Mutable traversal state over the [decision graph](crate::rcm::graph):
//! tracks the current node, the answered history for "back", a progress
//! percentage against a fixed seven-step denominator, and the evident/
//! hidden and safety/financial classification flags picked up along the
//! way.
//!
//! Going back pops the history and returns to the previous question but
//! deliberately leaves the classification flags alone; they are only
//! rewritten when the relevant question is answered again.
//!
//! ## Example
//!
//! ```rust
//! use relcalc_core::rcm::walker::{RcmState, YesNo};
//!
//! let mut state = RcmState::new("Centrifugal Pump", "Bearing seizure");
//! state.answer(YesNo::Yes).unwrap(); // evident
//! state.answer(YesNo::No).unwrap();  // financial consequences
//! state.answer(YesNo::Yes).unwrap(); // on-condition task feasible
//! assert!(state.is_complete());
//! assert_eq!(state.recommendation().unwrap().recommendation,
//!            "Scheduled on-condition task");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::rcm::graph::{node, Answer, Node, Question, StepId};

/// Fixed progress denominator: the longest question chain in the graph.
pub const TOTAL_STEPS: usize = 7;

/// Whether the failure mode announces itself during normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureType {
    Evident,
    Hidden,
}

/// Which consequence leg of the diagram the walk is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureLeg {
    Safety,
    Financial,
}

/// An answer to a decision-graph question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

/// Traversal state of the RCM Decision Tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RcmState {
    /// Node currently showing
    pub current_step: StepId,

    /// Set when the Start question is answered
    pub failure_type: Option<FailureType>,

    /// Set when the consequence question is answered
    pub failure_leg: Option<FailureLeg>,

    /// Asset under analysis
    pub asset: String,

    /// Failure mode under analysis
    pub failure_mode: String,

    /// Progress percentage, 0-100
    pub progress: f64,

    /// Question nodes already answered, oldest first
    pub history: Vec<StepId>,

    /// Progress denominator, fixed at [`TOTAL_STEPS`]
    pub total_steps: usize,
}

impl RcmState {
    pub fn new(asset: impl Into<String>, failure_mode: impl Into<String>) -> Self {
        RcmState {
            current_step: StepId::Start,
            failure_type: None,
            failure_leg: None,
            asset: asset.into(),
            failure_mode: failure_mode.into(),
            progress: 0.0,
            history: Vec::new(),
            total_steps: TOTAL_STEPS,
        }
    }

    /// The question currently showing, or `None` once complete.
    pub fn current_question(&self) -> Option<Question> {
        match node(self.current_step) {
            Node::Question(q) => Some(q),
            Node::Answer(_) => None,
        }
    }

    /// The recommendation reached, once the walk is complete.
    pub fn recommendation(&self) -> Option<Answer> {
        match node(self.current_step) {
            Node::Answer(a) => Some(a),
            Node::Question(_) => None,
        }
    }

    /// Whether the walk has reached a recommendation.
    pub fn is_complete(&self) -> bool {
        self.current_step.is_answer()
    }

    /// 1-based number of the question currently showing.
    pub fn current_step_number(&self) -> usize {
        self.history.len() + 1
    }

    /// Answer the current question and advance.
    ///
    /// Errors if the walk has already reached a recommendation.
    pub fn answer(&mut self, answer: YesNo) -> CalcResult<()> {
        let question = self.current_question().ok_or_else(|| {
            CalcError::calculation_failed(
                "rcm_walker",
                "The decision tree has already reached a recommendation",
            )
        })?;

        match self.current_step {
            StepId::Start => {
                self.failure_type = Some(match answer {
                    YesNo::Yes => FailureType::Evident,
                    YesNo::No => FailureType::Hidden,
                });
            }
            StepId::Evident | StepId::Hidden => {
                self.failure_leg = Some(match answer {
                    YesNo::Yes => FailureLeg::Safety,
                    YesNo::No => FailureLeg::Financial,
                });
            }
            _ => {}
        }

        let next = match answer {
            YesNo::Yes => question.yes_next,
            YesNo::No => question.no_next,
        };

        self.history.push(self.current_step);
        self.current_step = next;
        self.progress = if next.is_answer() {
            100.0
        } else {
            (self.history.len() as f64 / self.total_steps as f64 * 100.0).min(100.0)
        };
        Ok(())
    }

    /// Return to the previous question.
    ///
    /// Classification flags are not rolled back; re-answering the
    /// relevant question overwrites them.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current_step = previous;
                self.progress =
                    (self.history.len() as f64 / self.total_steps as f64 * 100.0).min(100.0);
                true
            }
            None => false,
        }
    }

    /// Restart the walk from the beginning, clearing everything.
    pub fn reset(&mut self) {
        self.current_step = StepId::Start;
        self.failure_type = None;
        self.failure_leg = None;
        self.progress = 0.0;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_path_to_recommendation() {
        let mut state = RcmState::new("Centrifugal Pump", "Bearing seizure");
        state.answer(YesNo::Yes).unwrap();
        assert_eq!(state.failure_type, Some(FailureType::Evident));
        state.answer(YesNo::No).unwrap();
        assert_eq!(state.failure_leg, Some(FailureLeg::Financial));
        state.answer(YesNo::Yes).unwrap();

        assert!(state.is_complete());
        assert_eq!(state.current_step, StepId::OnConditionTask);
        assert_eq!(state.progress, 100.0);
        assert!(state.answer(YesNo::Yes).is_err());
    }

    #[test]
    fn test_hidden_safety_all_no_ends_in_redesign() {
        let mut state = RcmState::new("Pressure Relief Valve", "Stuck closed");
        state.answer(YesNo::No).unwrap(); // hidden
        state.answer(YesNo::Yes).unwrap(); // safety consequences
        for _ in 0..4 {
            state.answer(YesNo::No).unwrap();
        }
        assert!(state.is_complete());
        assert_eq!(state.current_step, StepId::Redesign);
    }

    #[test]
    fn test_progress_while_in_flight() {
        let mut state = RcmState::new("Electric Motor", "Overheating");
        assert_eq!(state.progress, 0.0);

        // One answered question out of seven: 14.29%
        state.answer(YesNo::Yes).unwrap();
        assert!((state.progress - 1.0 / 7.0 * 100.0).abs() < 1e-9);
        assert_eq!(state.current_step_number(), 2);

        state.answer(YesNo::No).unwrap();
        assert!((state.progress - 2.0 / 7.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_back_rewinds_progress() {
        let mut state = RcmState::new("Electric Motor", "Overheating");
        state.answer(YesNo::Yes).unwrap();
        state.answer(YesNo::No).unwrap();

        assert!(state.back());
        assert!((state.progress - 1.0 / 7.0 * 100.0).abs() < 1e-9);
        assert!(state.back());
        assert_eq!(state.progress, 0.0);
    }

    #[test]
    fn test_back_pops_but_keeps_flags() {
        let mut state = RcmState::new("Heat Exchanger", "Tube fouling");
        state.answer(YesNo::Yes).unwrap();
        state.answer(YesNo::Yes).unwrap();
        assert_eq!(state.current_step, StepId::EvidentSafetyCondition);

        assert!(state.back());
        assert_eq!(state.current_step, StepId::Evident);
        // Flags survive going back
        assert_eq!(state.failure_type, Some(FailureType::Evident));
        assert_eq!(state.failure_leg, Some(FailureLeg::Safety));

        // Re-answering overwrites
        state.answer(YesNo::No).unwrap();
        assert_eq!(state.failure_leg, Some(FailureLeg::Financial));
    }

    #[test]
    fn test_back_at_start_is_noop() {
        let mut state = RcmState::new("Electric Motor", "Bearing failure");
        assert!(!state.back());
        assert_eq!(state.current_step, StepId::Start);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = RcmState::new("Emergency Diesel Generator", "Fails to start");
        state.answer(YesNo::No).unwrap();
        state.answer(YesNo::No).unwrap();
        state.reset();

        assert_eq!(state.current_step, StepId::Start);
        assert_eq!(state.failure_type, None);
        assert_eq!(state.failure_leg, None);
        assert_eq!(state.progress, 0.0);
        assert!(state.history.is_empty());
        // Selection survives a reset
        assert_eq!(state.asset, "Emergency Diesel Generator");
    }
}
