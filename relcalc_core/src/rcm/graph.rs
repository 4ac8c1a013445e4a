//! # RCM Decision Graph
//!
//! The static node table behind the RCM Decision Tool: a fixed directed
//! graph of yes/no questions ending in recommendation nodes, entered at
//! [`StepId::Start`] and at most seven questions deep.
//!
//! Node ids form a closed enum, so every lookup is an exhaustive match
//! and a "question not found" condition cannot occur at runtime; the only
//! fallible operation is parsing an id from a user-supplied string.
//!
//! The graph follows the classic RCM decision diagram: the first question
//! separates evident from hidden failures, the second the safety/
//! environmental leg from the financial leg, then each leg works through
//! the candidate failure-management tasks in order of preference
//! (on-condition, scheduled restoration, scheduled discard, and for
//! hidden failures a failure-finding task) before falling through to
//! redesign or run-to-failure.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Identifier of a node in the decision graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepId {
    // Classification questions
    Start,
    Evident,
    Hidden,

    // Evident / safety-environmental leg
    EvidentSafetyCondition,
    EvidentSafetyRestoration,
    EvidentSafetyDiscard,
    EvidentSafetyCombination,

    // Evident / financial leg
    EvidentFinancialCondition,
    EvidentFinancialRestoration,
    EvidentFinancialDiscard,

    // Hidden / safety-environmental leg
    HiddenSafetyCondition,
    HiddenSafetyRestoration,
    HiddenSafetyDiscard,
    HiddenSafetyFailureFinding,

    // Hidden / financial leg
    HiddenFinancialCondition,
    HiddenFinancialRestoration,
    HiddenFinancialDiscard,
    HiddenFinancialFailureFinding,

    // Terminal recommendations
    OnConditionTask,
    RestorationTask,
    DiscardTask,
    CombinationTask,
    FailureFindingTask,
    Redesign,
    NoScheduledMaintenance,
}

impl StepId {
    /// Every node id, questions first.
    pub const ALL: [StepId; 25] = [
        StepId::Start,
        StepId::Evident,
        StepId::Hidden,
        StepId::EvidentSafetyCondition,
        StepId::EvidentSafetyRestoration,
        StepId::EvidentSafetyDiscard,
        StepId::EvidentSafetyCombination,
        StepId::EvidentFinancialCondition,
        StepId::EvidentFinancialRestoration,
        StepId::EvidentFinancialDiscard,
        StepId::HiddenSafetyCondition,
        StepId::HiddenSafetyRestoration,
        StepId::HiddenSafetyDiscard,
        StepId::HiddenSafetyFailureFinding,
        StepId::HiddenFinancialCondition,
        StepId::HiddenFinancialRestoration,
        StepId::HiddenFinancialDiscard,
        StepId::HiddenFinancialFailureFinding,
        StepId::OnConditionTask,
        StepId::RestorationTask,
        StepId::DiscardTask,
        StepId::CombinationTask,
        StepId::FailureFindingTask,
        StepId::Redesign,
        StepId::NoScheduledMaintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Start => "Start",
            StepId::Evident => "Evident",
            StepId::Hidden => "Hidden",
            StepId::EvidentSafetyCondition => "EvidentSafetyCondition",
            StepId::EvidentSafetyRestoration => "EvidentSafetyRestoration",
            StepId::EvidentSafetyDiscard => "EvidentSafetyDiscard",
            StepId::EvidentSafetyCombination => "EvidentSafetyCombination",
            StepId::EvidentFinancialCondition => "EvidentFinancialCondition",
            StepId::EvidentFinancialRestoration => "EvidentFinancialRestoration",
            StepId::EvidentFinancialDiscard => "EvidentFinancialDiscard",
            StepId::HiddenSafetyCondition => "HiddenSafetyCondition",
            StepId::HiddenSafetyRestoration => "HiddenSafetyRestoration",
            StepId::HiddenSafetyDiscard => "HiddenSafetyDiscard",
            StepId::HiddenSafetyFailureFinding => "HiddenSafetyFailureFinding",
            StepId::HiddenFinancialCondition => "HiddenFinancialCondition",
            StepId::HiddenFinancialRestoration => "HiddenFinancialRestoration",
            StepId::HiddenFinancialDiscard => "HiddenFinancialDiscard",
            StepId::HiddenFinancialFailureFinding => "HiddenFinancialFailureFinding",
            StepId::OnConditionTask => "OnConditionTask",
            StepId::RestorationTask => "RestorationTask",
            StepId::DiscardTask => "DiscardTask",
            StepId::CombinationTask => "CombinationTask",
            StepId::FailureFindingTask => "FailureFindingTask",
            StepId::Redesign => "Redesign",
            StepId::NoScheduledMaintenance => "NoScheduledMaintenance",
        }
    }

    /// Whether this id resolves to a terminal recommendation.
    pub fn is_answer(self) -> bool {
        matches!(node(self), Node::Answer(_))
    }
}

static STEP_LOOKUP: Lazy<HashMap<&'static str, StepId>> =
    Lazy::new(|| StepId::ALL.iter().map(|&id| (id.as_str(), id)).collect());

impl FromStr for StepId {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        STEP_LOOKUP
            .get(s)
            .copied()
            .ok_or_else(|| CalcError::node_not_found(s))
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A branching question node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub header: &'static str,
    pub main_text: &'static str,
    pub yes_next: StepId,
    pub no_next: StepId,
    pub info: &'static str,
}

/// A terminal recommendation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    pub recommendation: &'static str,
    pub explanation: &'static str,
}

/// Contents of a decision-graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Question(Question),
    Answer(Answer),
}

/// Resolve a step id to its node contents. Total function.
pub fn node(step: StepId) -> Node {
    match step {
        StepId::Start => Node::Question(Question {
            header: "Evident or Hidden?",
            main_text: "Will the loss of function caused by this failure mode on its own \
                        become evident to the operating crew under normal circumstances?",
            yes_next: StepId::Evident,
            no_next: StepId::Hidden,
            info: "An evident failure announces itself during normal operation - a tripped \
                   pump, a warning light, a product going out of specification. A hidden \
                   failure (typically of a protective device) only shows up when the \
                   protection is demanded or tested.",
        }),
        StepId::Evident => Node::Question(Question {
            header: "Safety or Environmental Consequences?",
            main_text: "Does the failure mode cause a loss of function or other damage \
                        that could hurt or kill someone, or breach a known environmental \
                        standard or regulation?",
            yes_next: StepId::EvidentSafetyCondition,
            no_next: StepId::EvidentFinancialCondition,
            info: "If the answer is yes, a proactive task is only worth doing when it \
                   reduces the risk of the failure to a tolerably low level. Otherwise the \
                   consequences are operational or non-operational and the test is purely \
                   economic.",
        }),
        StepId::Hidden => Node::Question(Question {
            header: "Multiple-Failure Consequences?",
            main_text: "Could the multiple failure - the hidden failure combined with a \
                        demand on the protected function - hurt or kill someone, or breach \
                        a known environmental standard or regulation?",
            yes_next: StepId::HiddenSafetyCondition,
            no_next: StepId::HiddenFinancialCondition,
            info: "A hidden failure has no direct consequences. What matters is the \
                   multiple failure: the protective device is in a failed state when the \
                   protected function places a demand on it.",
        }),

        StepId::EvidentSafetyCondition => Node::Question(Question {
            header: "On-Condition Task?",
            main_text: "Is a condition-monitoring or inspection task to detect the onset \
                        of this failure technically feasible, and does it reduce the risk \
                        of the failure to a tolerably low level?",
            yes_next: StepId::OnConditionTask,
            no_next: StepId::EvidentSafetyRestoration,
            info: "An on-condition task is feasible when there is a detectable potential \
                   failure condition and a reasonably consistent P-F interval that is long \
                   enough to act on.",
        }),
        StepId::EvidentSafetyRestoration => Node::Question(Question {
            header: "Scheduled Restoration?",
            main_text: "Is a scheduled restoration task technically feasible, and does it \
                        reduce the risk of the failure to a tolerably low level?",
            yes_next: StepId::RestorationTask,
            no_next: StepId::EvidentSafetyDiscard,
            info: "Scheduled restoration is feasible when there is an identifiable age at \
                   which the conditional probability of failure rises sharply and most \
                   items survive to that age.",
        }),
        StepId::EvidentSafetyDiscard => Node::Question(Question {
            header: "Scheduled Discard?",
            main_text: "Is a scheduled discard task technically feasible, and does it \
                        reduce the risk of the failure to a tolerably low level?",
            yes_next: StepId::DiscardTask,
            no_next: StepId::EvidentSafetyCombination,
            info: "Scheduled discard replaces the item or component outright at a fixed \
                   age, regardless of its condition at the time.",
        }),
        StepId::EvidentSafetyCombination => Node::Question(Question {
            header: "Combination of Tasks?",
            main_text: "Is there a combination of tasks that together reduce the risk of \
                        the failure to a tolerably low level?",
            yes_next: StepId::CombinationTask,
            no_next: StepId::Redesign,
            info: "Occasionally no single task is good enough on its own but a combination \
                   (for instance on-condition plus scheduled discard) is. This is rare; if \
                   no combination works, redesign is compulsory for safety consequences.",
        }),

        StepId::EvidentFinancialCondition => Node::Question(Question {
            header: "On-Condition Task?",
            main_text: "Is a condition-monitoring or inspection task to detect the onset \
                        of this failure technically feasible and worth doing - does it \
                        cost less over time than the consequences of the failures it \
                        prevents?",
            yes_next: StepId::OnConditionTask,
            no_next: StepId::EvidentFinancialRestoration,
            info: "With purely economic consequences the test is cost-effectiveness: the \
                   task must cost less than repairing the failures it fails to prevent \
                   plus their operational consequences.",
        }),
        StepId::EvidentFinancialRestoration => Node::Question(Question {
            header: "Scheduled Restoration?",
            main_text: "Is a scheduled restoration task technically feasible and worth \
                        doing?",
            yes_next: StepId::RestorationTask,
            no_next: StepId::EvidentFinancialDiscard,
            info: "Scheduled restoration is feasible when there is an identifiable age at \
                   which the conditional probability of failure rises sharply and most \
                   items survive to that age.",
        }),
        StepId::EvidentFinancialDiscard => Node::Question(Question {
            header: "Scheduled Discard?",
            main_text: "Is a scheduled discard task technically feasible and worth doing?",
            yes_next: StepId::DiscardTask,
            no_next: StepId::NoScheduledMaintenance,
            info: "If no proactive task is worth doing for a failure with purely economic \
                   consequences, the default decision is no scheduled maintenance; \
                   redesign may still be desirable if the failure is expensive enough.",
        }),

        StepId::HiddenSafetyCondition => Node::Question(Question {
            header: "On-Condition Task?",
            main_text: "Is a condition-monitoring or inspection task to detect the onset \
                        of the hidden failure technically feasible, and does it reduce \
                        the risk of the multiple failure to a tolerably low level?",
            yes_next: StepId::OnConditionTask,
            no_next: StepId::HiddenSafetyRestoration,
            info: "An on-condition task is feasible when there is a detectable potential \
                   failure condition and a reasonably consistent P-F interval that is long \
                   enough to act on.",
        }),
        StepId::HiddenSafetyRestoration => Node::Question(Question {
            header: "Scheduled Restoration?",
            main_text: "Is a scheduled restoration task technically feasible, and does it \
                        reduce the risk of the multiple failure to a tolerably low level?",
            yes_next: StepId::RestorationTask,
            no_next: StepId::HiddenSafetyDiscard,
            info: "Scheduled restoration is feasible when there is an identifiable age at \
                   which the conditional probability of failure rises sharply and most \
                   items survive to that age.",
        }),
        StepId::HiddenSafetyDiscard => Node::Question(Question {
            header: "Scheduled Discard?",
            main_text: "Is a scheduled discard task technically feasible, and does it \
                        reduce the risk of the multiple failure to a tolerably low level?",
            yes_next: StepId::DiscardTask,
            no_next: StepId::HiddenSafetyFailureFinding,
            info: "Scheduled discard replaces the item or component outright at a fixed \
                   age, regardless of its condition at the time.",
        }),
        StepId::HiddenSafetyFailureFinding => Node::Question(Question {
            header: "Failure-Finding Task?",
            main_text: "Is a scheduled failure-finding task to check whether the hidden \
                        function still works technically feasible, and does it reduce the \
                        risk of the multiple failure to a tolerably low level?",
            yes_next: StepId::FailureFindingTask,
            no_next: StepId::Redesign,
            info: "A failure-finding task checks the protective function at a fixed \
                   interval. The Failure Finding Interval calculators in this suite size \
                   that interval. If no task reduces the risk enough, redesign is \
                   compulsory for safety consequences.",
        }),

        StepId::HiddenFinancialCondition => Node::Question(Question {
            header: "On-Condition Task?",
            main_text: "Is a condition-monitoring or inspection task to detect the onset \
                        of the hidden failure technically feasible and worth doing?",
            yes_next: StepId::OnConditionTask,
            no_next: StepId::HiddenFinancialRestoration,
            info: "With purely economic consequences the test is cost-effectiveness over \
                   the cost of the multiple failure.",
        }),
        StepId::HiddenFinancialRestoration => Node::Question(Question {
            header: "Scheduled Restoration?",
            main_text: "Is a scheduled restoration task technically feasible and worth \
                        doing?",
            yes_next: StepId::RestorationTask,
            no_next: StepId::HiddenFinancialDiscard,
            info: "Scheduled restoration is feasible when there is an identifiable age at \
                   which the conditional probability of failure rises sharply and most \
                   items survive to that age.",
        }),
        StepId::HiddenFinancialDiscard => Node::Question(Question {
            header: "Scheduled Discard?",
            main_text: "Is a scheduled discard task technically feasible and worth doing?",
            yes_next: StepId::DiscardTask,
            no_next: StepId::HiddenFinancialFailureFinding,
            info: "Scheduled discard replaces the item or component outright at a fixed \
                   age, regardless of its condition at the time.",
        }),
        StepId::HiddenFinancialFailureFinding => Node::Question(Question {
            header: "Failure-Finding Task?",
            main_text: "Is a scheduled failure-finding task to check whether the hidden \
                        function still works technically feasible and worth doing?",
            yes_next: StepId::FailureFindingTask,
            no_next: StepId::NoScheduledMaintenance,
            info: "A failure-finding task checks the protective function at a fixed \
                   interval. If none is worth doing, the default decision is no scheduled \
                   maintenance, accepting the risk of the multiple failure.",
        }),

        StepId::OnConditionTask => Node::Answer(Answer {
            recommendation: "Scheduled on-condition task",
            explanation: "Monitor for the potential failure condition at an interval \
                          shorter than the P-F interval, and act on the condition before \
                          it becomes a functional failure.",
        }),
        StepId::RestorationTask => Node::Answer(Answer {
            recommendation: "Scheduled restoration task",
            explanation: "Rework or overhaul the item at or before the age at which the \
                          conditional probability of failure rises sharply, restoring its \
                          original resistance to failure.",
        }),
        StepId::DiscardTask => Node::Answer(Answer {
            recommendation: "Scheduled discard task",
            explanation: "Replace the item or component with a new one at or before the \
                          identified life limit, regardless of its apparent condition.",
        }),
        StepId::CombinationTask => Node::Answer(Answer {
            recommendation: "Combination of tasks",
            explanation: "Apply the identified combination of proactive tasks. Each task \
                          on its own is insufficient, but together they reduce the risk of \
                          the failure to a tolerably low level.",
        }),
        StepId::FailureFindingTask => Node::Answer(Answer {
            recommendation: "Scheduled failure-finding task",
            explanation: "Check at a fixed interval whether the hidden function still \
                          works. Use the Failure Finding Interval calculators to set the \
                          interval from the target availability, economics or tolerable \
                          risk.",
        }),
        StepId::Redesign => Node::Answer(Answer {
            recommendation: "Redesign is compulsory",
            explanation: "No proactive task reduces the risk of a failure with safety or \
                          environmental consequences to a tolerably low level, so the \
                          asset, the process or the protection must be changed.",
        }),
        StepId::NoScheduledMaintenance => Node::Answer(Answer {
            recommendation: "No scheduled maintenance",
            explanation: "No proactive task is worth doing for this failure mode. Run to \
                          failure and repair on occurrence; redesign may be desirable if \
                          the consequences prove too expensive.",
        }),
    }
}

/// An asset with its typical failure modes, for the selection form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    pub name: &'static str,
    pub failure_modes: &'static [&'static str],
}

/// Built-in asset catalog backing the asset/failure-mode selection.
pub const ASSETS: &[Asset] = &[
    Asset {
        name: "Centrifugal Pump",
        failure_modes: &[
            "Bearing seizure",
            "Mechanical seal leak",
            "Impeller wear",
            "Shaft fracture",
        ],
    },
    Asset {
        name: "Electric Motor",
        failure_modes: &[
            "Winding insulation breakdown",
            "Bearing failure",
            "Overheating",
        ],
    },
    Asset {
        name: "Pressure Relief Valve",
        failure_modes: &["Stuck closed", "Stuck open", "Lifts at wrong pressure"],
    },
    Asset {
        name: "Heat Exchanger",
        failure_modes: &["Tube fouling", "Tube rupture", "Gasket leak"],
    },
    Asset {
        name: "Emergency Diesel Generator",
        failure_modes: &["Fails to start", "Fails to take load", "Fuel supply blocked"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_id_string_roundtrip() {
        for id in StepId::ALL {
            let parsed: StepId = id.as_str().parse().unwrap();
            assert_eq!(parsed, id);
        }
    }

    #[test]
    fn test_unknown_step_is_node_not_found() {
        let err = "NotAStep".parse::<StepId>().unwrap_err();
        assert_eq!(err.error_code(), "NODE_NOT_FOUND");
    }

    #[test]
    fn test_graph_is_closed_and_answers_terminal() {
        // Every branch target resolves (guaranteed by the type) and at
        // least one of each branch kind exists
        let mut question_count = 0;
        let mut answer_count = 0;
        for id in StepId::ALL {
            match node(id) {
                Node::Question(q) => {
                    question_count += 1;
                    // Branch targets must differ, otherwise the answer
                    // has no effect
                    assert_ne!(q.yes_next, q.no_next, "{id} has identical branches");
                }
                Node::Answer(_) => answer_count += 1,
            }
        }
        assert_eq!(question_count, 18);
        assert_eq!(answer_count, 7);
    }

    #[test]
    fn test_graph_depth_within_total_steps() {
        // Longest question chain from Start must fit the fixed 7-step
        // progress denominator
        fn depth(id: StepId) -> usize {
            match node(id) {
                Node::Answer(_) => 0,
                Node::Question(q) => 1 + depth(q.yes_next).max(depth(q.no_next)),
            }
        }
        assert!(depth(StepId::Start) <= 7);
    }

    #[test]
    fn test_start_branches() {
        match node(StepId::Start) {
            Node::Question(q) => {
                assert_eq!(q.yes_next, StepId::Evident);
                assert_eq!(q.no_next, StepId::Hidden);
            }
            Node::Answer(_) => panic!("Start must be a question"),
        }
    }

    #[test]
    fn test_asset_catalog_nonempty() {
        assert!(!ASSETS.is_empty());
        for asset in ASSETS {
            assert!(!asset.failure_modes.is_empty());
        }
    }
}
