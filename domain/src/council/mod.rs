//! Council deliberation domain
//!
//! A council run is a three-stage pipeline over a fixed roster of models:
//!
//! 1. **Collect** - every council member answers the user's question.
//! 2. **Rank** - the answers are anonymized behind `Response A`, `Response B`,
//!    ... labels and every member ranks them; the free-text verdicts are
//!    parsed back into label sequences.
//! 3. **Synthesize** - a designated chairman model reads both rounds and
//!    writes the final answer.
//!
//! This module holds the data shapes and the pure logic of that pipeline:
//! label assignment, ranking-text parsing, aggregate-rank computation, and
//! cost arithmetic. Driving the stages against live models is the
//! application layer's job.

pub mod aggregate;
pub mod cost;
pub mod entities;
pub mod label;
pub mod ranking;
pub mod usage;

pub use aggregate::aggregate_rankings;
pub use cost::{ModelPrice, request_cost, round_currency};
pub use entities::{
    AggregateRank, CostRecord, CouncilMetadata, CouncilOutcome, CouncilStage, ModelReply,
    ModelResult, Stage1Entry, Stage2Entry, Stage3Result,
};
pub use label::{LabelError, LabelMap, MAX_LABELS, label_token};
pub use ranking::{RANKING_MARKER, parse_ranking};
pub use usage::TokenUsage;
