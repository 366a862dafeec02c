//! Council value objects - immutable result types for one pipeline run.
//!
//! These types represent the outputs of each council stage:
//! - [`Stage1Result`] - one panel member's answer to the question
//! - [`Stage2Result`] - one panel member's critique and parsed ranking
//! - [`Stage3Result`] - the chairman's synthesized final answer
//! - [`AggregateRanking`] - mean position of one model across all judges
//! - [`CouncilOutcome`] - the complete result of a run

use super::label::LabelMap;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// Model identifier reported when stage 1 produced nothing to synthesize.
pub const NO_CHAIRMAN_MODEL: &str = "error";

/// Final answer reported when every panel member failed in stage 1.
pub const ALL_MODELS_FAILED_RESPONSE: &str = "All models failed to respond. Please try again.";

/// Final answer reported when every chairman candidate failed in stage 3.
pub const CHAIRMAN_EXHAUSTED_RESPONSE: &str =
    "Error: Unable to generate final synthesis (all chairman models failed).";

/// A panel member's answer from stage 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage1Result {
    /// The model that answered
    pub model: Model,
    /// The answer text
    pub response: String,
}

impl Stage1Result {
    pub fn new(model: Model, response: impl Into<String>) -> Self {
        Self {
            model,
            response: response.into(),
        }
    }
}

/// A panel member's evaluation from stage 2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage2Result {
    /// The model that judged
    pub model: Model,
    /// Full critique text, including the `FINAL RANKING:` section
    pub ranking: String,
    /// Labels extracted from the critique, best first (may be empty)
    #[serde(rename = "parsedRanking", default)]
    pub parsed_ranking: Vec<String>,
}

impl Stage2Result {
    /// Creates a stage-2 result, parsing the ranking out of the raw text.
    pub fn from_text(model: Model, ranking: impl Into<String>) -> Self {
        let ranking = ranking.into();
        let parsed_ranking = super::parsing::parse_ranking(&ranking);
        Self {
            model,
            ranking,
            parsed_ranking,
        }
    }
}

/// The synthesized final answer from stage 3
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage3Result {
    /// The chairman candidate that produced the answer
    pub model: Model,
    /// The synthesized answer
    pub response: String,
}

impl Stage3Result {
    pub fn new(model: Model, response: impl Into<String>) -> Self {
        Self {
            model,
            response: response.into(),
        }
    }

    /// Sentinel result for a run where no panel member answered.
    pub fn all_models_failed() -> Self {
        Self::new(
            Model::Custom(NO_CHAIRMAN_MODEL.to_string()),
            ALL_MODELS_FAILED_RESPONSE,
        )
    }

    /// Sentinel result for a run where every chairman candidate failed.
    pub fn chairman_exhausted(primary: Model) -> Self {
        Self::new(primary, CHAIRMAN_EXHAUSTED_RESPONSE)
    }

    /// Returns `true` if this is one of the failure sentinels.
    pub fn is_sentinel(&self) -> bool {
        self.response == ALL_MODELS_FAILED_RESPONSE || self.response == CHAIRMAN_EXHAUSTED_RESPONSE
    }
}

/// Mean rank of one model across every judge that mentioned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRanking {
    pub model: Model,
    /// Arithmetic mean of 1-based positions, rounded to 2 decimals
    pub average_rank: f64,
    /// Number of positions that contributed to the mean
    #[serde(rename = "rankings_count")]
    pub judge_count: usize,
}

/// Side information attached to a council result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouncilMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_to_model: Option<LabelMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_rankings: Option<Vec<AggregateRanking>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CouncilMetadata {
    pub fn rankings(label_map: LabelMap, aggregate: Vec<AggregateRanking>) -> Self {
        Self {
            label_to_model: Some(label_map),
            aggregate_rankings: Some(aggregate),
            title: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label_to_model.is_none() && self.aggregate_rankings.is_none() && self.title.is_none()
    }
}

/// Complete result of one council run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilOutcome {
    pub stage1: Vec<Stage1Result>,
    pub stage2: Vec<Stage2Result>,
    pub stage3: Stage3Result,
    pub metadata: CouncilMetadata,
}

impl CouncilOutcome {
    /// Outcome of a run that stopped after an empty stage 1.
    pub fn all_models_failed() -> Self {
        Self {
            stage1: Vec::new(),
            stage2: Vec::new(),
            stage3: Stage3Result::all_models_failed(),
            metadata: CouncilMetadata::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage2_wire_names() {
        let result = Stage2Result::from_text(
            Model::Grok4,
            "Good answers.\nFINAL RANKING:\n1. Response B\n2. Response A",
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["model"], "x-ai/grok-4");
        assert_eq!(json["parsedRanking"][0], "Response B");
        assert!(json["ranking"].as_str().unwrap().contains("FINAL RANKING:"));
    }

    #[test]
    fn test_aggregate_ranking_wire_names() {
        let ranking = AggregateRanking {
            model: Model::Gpt51,
            average_rank: 1.5,
            judge_count: 2,
        };
        let json = serde_json::to_value(&ranking).unwrap();
        assert_eq!(json["average_rank"], 1.5);
        assert_eq!(json["rankings_count"], 2);
    }

    #[test]
    fn test_empty_metadata_serializes_to_empty_object() {
        let json = serde_json::to_string(&CouncilMetadata::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_all_models_failed_outcome() {
        let outcome = CouncilOutcome::all_models_failed();
        assert!(outcome.stage1.is_empty());
        assert!(outcome.stage2.is_empty());
        assert_eq!(outcome.stage3.model.as_str(), NO_CHAIRMAN_MODEL);
        assert!(outcome.stage3.is_sentinel());
        assert!(outcome.metadata.is_empty());
    }

    #[test]
    fn test_chairman_exhausted_keeps_primary() {
        let result = Stage3Result::chairman_exhausted(Model::Gpt51);
        assert_eq!(result.model, Model::Gpt51);
        assert_eq!(result.response, CHAIRMAN_EXHAUSTED_RESPONSE);
    }
}
