//! Domain layer for llm-council
//!
//! This crate contains the core deliberation logic, entities, and value
//! objects. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council run sends one question to several models in parallel, has the
//! same models cross-rank the anonymized answers, and lets a chairman model
//! synthesize the final answer from both rounds.
//!
//! ## Labels
//!
//! Stage-1 answers are anonymized behind single-letter `Response A`..`Z`
//! labels so rankings cannot favor a known peer. The label space caps the
//! council at 26 members; exceeding it is a configuration error.

pub mod core;
pub mod council;
pub mod prompt;

// Re-export commonly used types
pub use self::core::{Message, Model, Question, Role};
pub use council::{
    AggregateRank, CostRecord, CouncilMetadata, CouncilOutcome, CouncilStage, LabelError,
    LabelMap, MAX_LABELS, ModelPrice, ModelReply, ModelResult, RANKING_MARKER, Stage1Entry,
    Stage2Entry, Stage3Result, TokenUsage, aggregate_rankings, label_token, parse_ranking,
    request_cost, round_currency,
};
pub use prompt::PromptTemplate;
