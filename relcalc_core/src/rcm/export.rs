//! # RCM Decision Export
//!
//! Serializes a completed decision walk into a pretty-printed JSON
//! document: the asset and failure mode under analysis, the evident/
//! hidden and safety/financial classification, the recommended action,
//! and the full question-by-question decision path.
//!
//! The answer recorded for each path entry is recovered from the graph
//! itself: a step answered "Yes" is one whose yes-branch leads to the
//! next step actually visited. The path closes with a terminal entry
//! for the recommendation node, carrying no question and the marker
//! answer `"Final"`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::rcm::graph::{node, Node, StepId};
use crate::rcm::walker::{FailureLeg, FailureType, RcmState};

/// The recommendation block of an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedAction {
    /// Graph node id of the recommendation
    pub id: String,
    pub recommendation: String,
    pub explanation: String,
}

/// One visited node on the decision path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathEntry {
    /// Graph node id
    pub step: String,

    /// Question text, absent for the terminal entry
    pub question: Option<String>,

    /// "Yes", "No", or "Final" for the terminal entry
    pub answer: String,
}

/// A completed RCM analysis, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionExport {
    pub asset: String,
    pub failure_mode: String,
    pub failure_type: FailureType,
    pub failure_leg: Option<FailureLeg>,
    pub recommended_action: RecommendedAction,
    pub decision_path: Vec<PathEntry>,
    pub timestamp: DateTime<Utc>,
}

impl DecisionExport {
    /// Build an export from a completed walk, stamped with the current
    /// time.
    pub fn from_state(state: &RcmState) -> CalcResult<Self> {
        Self::from_state_at(state, Utc::now())
    }

    /// Build an export from a completed walk with an explicit timestamp.
    pub fn from_state_at(state: &RcmState, timestamp: DateTime<Utc>) -> CalcResult<Self> {
        let answer = state.recommendation().ok_or_else(|| {
            CalcError::calculation_failed(
                "rcm_export",
                "The decision tree has not reached a recommendation yet",
            )
        })?;
        let failure_type = state.failure_type.ok_or_else(|| {
            CalcError::calculation_failed("rcm_export", "Failure classification is missing")
        })?;

        let mut decision_path = Vec::with_capacity(state.history.len() + 1);
        for (i, &step) in state.history.iter().enumerate() {
            let question = match node(step) {
                Node::Question(q) => q,
                // History only ever holds question nodes
                Node::Answer(_) => continue,
            };
            let next = state
                .history
                .get(i + 1)
                .copied()
                .unwrap_or(state.current_step);
            let answered_yes = question.yes_next == next;
            decision_path.push(PathEntry {
                step: step.as_str().to_string(),
                question: Some(question.main_text.to_string()),
                answer: if answered_yes { "Yes" } else { "No" }.to_string(),
            });
        }
        decision_path.push(PathEntry {
            step: state.current_step.as_str().to_string(),
            question: None,
            answer: "Final".to_string(),
        });

        Ok(DecisionExport {
            asset: state.asset.clone(),
            failure_mode: state.failure_mode.clone(),
            failure_type,
            failure_leg: state.failure_leg,
            recommended_action: RecommendedAction {
                id: state.current_step.as_str().to_string(),
                recommendation: answer.recommendation.to_string(),
                explanation: answer.explanation.to_string(),
            },
            decision_path,
            timestamp,
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(CalcError::from)
    }

    /// Suggested filename: `rcm_decision_<asset>_<YYYY-MM-DD>.json` with
    /// the asset name lowercased and whitespace collapsed to
    /// underscores.
    pub fn filename(&self) -> String {
        let slug: String = self
            .asset
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        format!("rcm_decision_{}_{}.json", slug, self.timestamp.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rcm::walker::YesNo;
    use chrono::TimeZone;

    fn completed_state() -> RcmState {
        let mut state = RcmState::new("Pressure Relief Valve", "Stuck closed");
        state.answer(YesNo::No).unwrap(); // hidden
        state.answer(YesNo::Yes).unwrap(); // safety
        state.answer(YesNo::No).unwrap(); // no on-condition
        state.answer(YesNo::No).unwrap(); // no restoration
        state.answer(YesNo::No).unwrap(); // no discard
        state.answer(YesNo::Yes).unwrap(); // failure-finding
        state
    }

    #[test]
    fn test_export_requires_completion() {
        let state = RcmState::new("Electric Motor", "Overheating");
        assert!(DecisionExport::from_state(&state).is_err());
    }

    #[test]
    fn test_path_answers_recovered_from_graph() {
        let export = DecisionExport::from_state(&completed_state()).unwrap();

        assert_eq!(export.failure_type, FailureType::Hidden);
        assert_eq!(export.failure_leg, Some(FailureLeg::Safety));
        assert_eq!(export.recommended_action.id, "FailureFindingTask");

        // 6 answered questions plus the terminal entry
        assert_eq!(export.decision_path.len(), 7);
        let answers: Vec<&str> = export
            .decision_path
            .iter()
            .map(|e| e.answer.as_str())
            .collect();
        assert_eq!(answers, ["No", "Yes", "No", "No", "No", "Yes", "Final"]);

        let last = export.decision_path.last().unwrap();
        assert_eq!(last.step, "FailureFindingTask");
        assert!(last.question.is_none());
    }

    #[test]
    fn test_json_is_camel_case() {
        let export = DecisionExport::from_state(&completed_state()).unwrap();
        let json = export.to_json().unwrap();
        assert!(json.contains("\"failureMode\""));
        assert!(json.contains("\"recommendedAction\""));
        assert!(json.contains("\"decisionPath\""));
    }

    #[test]
    fn test_filename_slug_and_date() {
        let when = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        let export = DecisionExport::from_state_at(&completed_state(), when).unwrap();
        assert_eq!(
            export.filename(),
            "rcm_decision_pressure_relief_valve_2025-03-14.json"
        );
    }
}
