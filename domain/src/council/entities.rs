//! Council run entities
//!
//! Data shapes produced by the three deliberation stages. Everything here is
//! plain data: the orchestrator builds these and hands the final
//! [`CouncilOutcome`] bundle to whatever stores or renders it.

use crate::core::model::Model;
use crate::council::label::LabelMap;
use crate::council::usage::TokenUsage;
use serde::{Deserialize, Serialize};

/// Normalized reply from one model call, tagged success or failure
///
/// Every consumer pattern-matches exhaustively instead of probing optional
/// fields. An `Error` reply may still carry non-zero usage: the endpoint
/// bills tokens even when it returns empty content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelReply {
    Content { text: String, usage: TokenUsage },
    Error { message: String, usage: TokenUsage },
}

impl ModelReply {
    pub fn usage(&self) -> &TokenUsage {
        match self {
            ModelReply::Content { usage, .. } => usage,
            ModelReply::Error { usage, .. } => usage,
        }
    }
}

/// Reply from one model, paired with its identity
///
/// Unit of work returned by the fan-out executor, one per requested model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    pub model: Model,
    pub reply: ModelReply,
}

/// One council member's answer from stage 1
///
/// `response` always holds displayable text: the model's answer, or an
/// error banner when the call failed (the banner is what gets anonymized
/// and ranked, so a failure is still visible downstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage1Entry {
    pub model: Model,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub usage: TokenUsage,
}

impl Stage1Entry {
    pub fn answered(model: Model, response: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            model,
            response: response.into(),
            error: None,
            usage,
        }
    }

    pub fn failed(model: Model, error: impl Into<String>, usage: TokenUsage) -> Self {
        let error = error.into();
        Self {
            model,
            response: format!("Error: {error}"),
            error: Some(error),
            usage,
        }
    }

    /// Synthetic `"system"` entry used when every council member failed
    pub fn outage(notice: impl Into<String>) -> Self {
        Self {
            model: Model::new("system"),
            response: notice.into(),
            error: Some("all_models_failed".to_string()),
            usage: TokenUsage::default(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One model's ranking verdict from stage 2
///
/// Both the raw text and the parsed label sequence are kept: the raw text
/// feeds the chairman prompt, the parsed labels feed aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage2Entry {
    pub model: Model,
    pub ranking: String,
    pub parsed_ranking: Vec<String>,
    pub usage: TokenUsage,
}

/// The chairman's synthesis from stage 3, or a fallback error record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage3Result {
    pub model: Model,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub usage: TokenUsage,
}

impl Stage3Result {
    pub fn synthesized(model: Model, response: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            model,
            response: response.into(),
            error: None,
            usage,
        }
    }

    pub fn failed(model: Model, error: impl Into<String>, usage: TokenUsage) -> Self {
        let error = error.into();
        Self {
            model,
            response: format!("Chairman Error: {error}"),
            error: Some(error),
            usage,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Aggregate ranking statistics for one model
///
/// `average_rank` is the mean 1-indexed position across every ranking that
/// mentioned the model (lower is better), rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRank {
    pub model: Model,
    pub average_rank: f64,
    pub rankings_count: usize,
}

/// Stage tag for cost breakdown records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouncilStage {
    #[serde(rename = "1")]
    Responses,
    #[serde(rename = "2")]
    Rankings,
    #[serde(rename = "3")]
    Synthesis,
}

impl CouncilStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouncilStage::Responses => "1",
            CouncilStage::Rankings => "2",
            CouncilStage::Synthesis => "3",
        }
    }
}

/// Monetary cost of one model call within a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub stage: CouncilStage,
    pub model: Model,
    pub cost: f64,
}

/// Run-level metadata computed once after all three stages complete
#[derive(Debug, Clone, Serialize)]
pub struct CouncilMetadata {
    pub label_to_model: LabelMap,
    pub aggregate_rankings: Vec<AggregateRank>,
    pub usage: TokenUsage,
    pub cost: f64,
    pub cost_breakdown: Vec<CostRecord>,
}

/// The full bundle returned to the caller after a council run
///
/// Persistence of this bundle is a collaborator's concern; the orchestrator
/// only produces it.
#[derive(Debug, Clone, Serialize)]
pub struct CouncilOutcome {
    pub stage1: Vec<Stage1Entry>,
    pub stage2: Vec<Stage2Entry>,
    pub stage3: Stage3Result,
    pub metadata: CouncilMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_entry_formats_banner() {
        let entry = Stage1Entry::failed("openai/gpt-4o".into(), "HTTP 429", TokenUsage::default());
        assert_eq!(entry.response, "Error: HTTP 429");
        assert_eq!(entry.error.as_deref(), Some("HTTP 429"));
        assert!(entry.is_error());
    }

    #[test]
    fn test_outage_entry_uses_system_model() {
        let entry = Stage1Entry::outage("all down");
        assert_eq!(entry.model.as_str(), "system");
        assert_eq!(entry.error.as_deref(), Some("all_models_failed"));
    }

    #[test]
    fn test_stage3_failure_keeps_usage() {
        let usage = TokenUsage::new(10, 0, 10);
        let result = Stage3Result::failed("google/gemini-flash-1.5".into(), "timeout", usage);
        assert!(result.is_error());
        assert_eq!(result.usage, usage);
        assert_eq!(result.response, "Chairman Error: timeout");
    }

    #[test]
    fn test_stage_tags_serialize_as_numbers() {
        let record = CostRecord {
            stage: CouncilStage::Rankings,
            model: "m".into(),
            cost: 0.5,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""stage":"2""#));
    }

    #[test]
    fn test_model_reply_tagged_serialization() {
        let reply = ModelReply::Error {
            message: "boom".to_string(),
            usage: TokenUsage::default(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains(r#""kind":"error""#));
    }
}
