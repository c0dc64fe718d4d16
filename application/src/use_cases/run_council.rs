//! Run Council use case
//!
//! Drives the full three-stage deliberation: collect answers from every
//! council member in parallel, have the same members rank the anonymized
//! answers, then let the chairman synthesize a final response. Provider
//! failures never escape as errors; they degrade into diagnosable content
//! inside the returned bundle. The only hard failures are configuration
//! problems (empty roster, roster past the label space).

use crate::config::CouncilConfig;
use crate::fan_out::fan_out;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::pricing::PricingSource;
use council_domain::{
    CostRecord, CouncilMetadata, CouncilOutcome, CouncilStage, LabelError, LabelMap, MAX_LABELS,
    Message, Model, ModelReply, PromptTemplate, Question, Stage1Entry, Stage2Entry, Stage3Result,
    TokenUsage, aggregate_rankings, parse_ranking, request_cost, round_currency,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// At most this many underlying errors are echoed in the outage notice
const MAX_ECHOED_ERRORS: usize = 5;

/// Errors that can occur when starting a council run
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("No council models configured")]
    NoModels,

    #[error("Council too large for the label space: {0}")]
    CouncilTooLarge(#[from] LabelError),
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The user's question
    pub question: Question,
    /// Roster override; defaults to the configured council
    pub council: Option<Vec<Model>>,
    /// Chairman override; defaults to the configured chairman
    pub chairman: Option<Model>,
}

impl RunCouncilInput {
    pub fn new(question: impl Into<Question>) -> Self {
        Self {
            question: question.into(),
            council: None,
            chairman: None,
        }
    }

    pub fn with_council(mut self, models: Vec<Model>) -> Self {
        self.council = Some(models);
        self
    }

    pub fn with_chairman(mut self, model: Model) -> Self {
        self.chairman = Some(model);
        self
    }
}

/// Use case for running a full council deliberation
pub struct RunCouncilUseCase<G, P> {
    gateway: Arc<G>,
    pricing: Arc<P>,
    config: CouncilConfig,
}

impl<G, P> RunCouncilUseCase<G, P>
where
    G: LlmGateway + 'static,
    P: PricingSource,
{
    pub fn new(gateway: Arc<G>, pricing: Arc<P>, config: CouncilConfig) -> Self {
        Self {
            gateway,
            pricing,
            config,
        }
    }

    /// Execute the three stages and assemble the outcome bundle
    pub async fn execute(&self, input: RunCouncilInput) -> Result<CouncilOutcome, RunCouncilError> {
        let council = input
            .council
            .unwrap_or_else(|| self.config.models.clone());
        if council.is_empty() {
            return Err(RunCouncilError::NoModels);
        }
        // Reject before stage 1 so an oversized roster costs nothing
        if council.len() > MAX_LABELS {
            return Err(RunCouncilError::CouncilTooLarge(
                LabelError::SpaceExhausted {
                    needed: council.len(),
                },
            ));
        }
        let chairman = input
            .chairman
            .unwrap_or_else(|| self.config.chairman.clone());

        info!("Starting council run with {} models", council.len());

        // Stage 1: collect individual responses
        let stage1 = self.stage_collect(&input.question, &council).await;

        // Labels are assigned by stage-1 position and fixed for the run
        let responders: Vec<Model> = stage1.iter().map(|e| e.model.clone()).collect();
        let labels = LabelMap::assign(&responders)?;

        // Stage 2: collect rankings of the anonymized responses
        let stage2 = self
            .stage_rank(&input.question, &stage1, &labels, &council)
            .await;

        let aggregate = aggregate_rankings(&stage2, &labels);

        // Stage 3: chairman synthesis
        let stage3 = self
            .stage_synthesize(&input.question, &stage1, &stage2, &chairman)
            .await;

        let metadata = self
            .assemble_metadata(&stage1, &stage2, &stage3, labels, aggregate)
            .await;

        Ok(CouncilOutcome {
            stage1,
            stage2,
            stage3,
            metadata,
        })
    }

    /// Stage 1: every council member answers the raw question
    ///
    /// Per-model failures stay in the list as error-bannered entries. On
    /// total outage the list collapses to a single synthetic `"system"`
    /// entry so stages 2-3 still have something to deliberate over.
    async fn stage_collect(&self, question: &Question, council: &[Model]) -> Vec<Stage1Entry> {
        info!("Stage 1: querying {} council models", council.len());
        let messages = vec![Message::user(question.content())];
        let results = fan_out(
            &self.gateway,
            council,
            &messages,
            self.config.query_timeout,
        )
        .await;

        let mut entries = Vec::with_capacity(results.len());
        let mut all_errors = Vec::new();

        for result in results {
            match result.reply {
                ModelReply::Content { text, usage } => {
                    info!("Model {} responded", result.model);
                    entries.push(Stage1Entry::answered(result.model, text, usage));
                }
                ModelReply::Error { message, usage } => {
                    warn!("Model {} failed: {}", result.model, message);
                    all_errors.push(format!("{}: {}", result.model, message));
                    entries.push(Stage1Entry::failed(result.model, message, usage));
                }
            }
        }

        if entries.is_empty() || entries.iter().all(Stage1Entry::is_error) {
            warn!("every council model failed; substituting diagnostic entry");
            let notice = PromptTemplate::outage_notice(&all_errors, MAX_ECHOED_ERRORS);
            entries = vec![Stage1Entry::outage(notice)];
        }

        entries
    }

    /// Stage 2: the council ranks the anonymized stage-1 responses
    ///
    /// Models that fail here are dropped entirely; a missing ranking is
    /// tolerable in a way a missing rankable response-set is not.
    async fn stage_rank(
        &self,
        question: &Question,
        stage1: &[Stage1Entry],
        labels: &LabelMap,
        council: &[Model],
    ) -> Vec<Stage2Entry> {
        info!("Stage 2: collecting rankings from {} models", council.len());

        let labeled: Vec<(String, String)> = labels
            .iter()
            .zip(stage1)
            .map(|((label, _), entry)| (label.to_string(), entry.response.clone()))
            .collect();

        let prompt = PromptTemplate::ranking_prompt(question, &labeled);
        let messages = vec![Message::user(prompt)];
        let results = fan_out(
            &self.gateway,
            council,
            &messages,
            self.config.query_timeout,
        )
        .await;

        results
            .into_iter()
            .filter_map(|result| match result.reply {
                ModelReply::Content { text, usage } => {
                    let parsed = parse_ranking(&text);
                    debug!(
                        "Model {} ranked {} labels",
                        result.model,
                        parsed.len()
                    );
                    Some(Stage2Entry {
                        model: result.model,
                        ranking: text,
                        parsed_ranking: parsed,
                        usage,
                    })
                }
                ModelReply::Error { message, .. } => {
                    warn!("Dropping ranking from {}: {}", result.model, message);
                    None
                }
            })
            .collect()
    }

    /// Stage 3: the chairman synthesizes both rounds into a final answer
    ///
    /// Never fails: a chairman error becomes an error-bearing result so the
    /// run still completes with a value.
    async fn stage_synthesize(
        &self,
        question: &Question,
        stage1: &[Stage1Entry],
        stage2: &[Stage2Entry],
        chairman: &Model,
    ) -> Stage3Result {
        info!("Stage 3: synthesis by {}", chairman);

        let responses: Vec<(String, String)> = stage1
            .iter()
            .map(|e| (e.model.to_string(), e.response.clone()))
            .collect();
        let rankings: Vec<(String, String)> = stage2
            .iter()
            .map(|e| (e.model.to_string(), e.ranking.clone()))
            .collect();

        let prompt = PromptTemplate::synthesis_prompt(question, &responses, &rankings);
        let messages = vec![Message::user(prompt)];

        match self
            .gateway
            .query(chairman, &messages, self.config.query_timeout)
            .await
        {
            Ok(completion) => {
                Stage3Result::synthesized(chairman.clone(), completion.content, completion.usage)
            }
            Err(e) => {
                error!("Chairman model {} failed: {}", chairman, e);
                Stage3Result::failed(chairman.clone(), e.to_string(), e.usage())
            }
        }
    }

    /// Sum usage across every call and price it per call
    async fn assemble_metadata(
        &self,
        stage1: &[Stage1Entry],
        stage2: &[Stage2Entry],
        stage3: &Stage3Result,
        labels: LabelMap,
        aggregate: Vec<council_domain::AggregateRank>,
    ) -> CouncilMetadata {
        let mut usage = TokenUsage::default();
        let mut total_cost = 0.0;
        let mut breakdown = Vec::new();

        for entry in stage1 {
            usage.add(&entry.usage);
            let cost = self.call_cost(&entry.model, &entry.usage).await;
            total_cost += cost;
            breakdown.push(CostRecord {
                stage: CouncilStage::Responses,
                model: entry.model.clone(),
                cost,
            });
        }

        for entry in stage2 {
            usage.add(&entry.usage);
            let cost = self.call_cost(&entry.model, &entry.usage).await;
            total_cost += cost;
            breakdown.push(CostRecord {
                stage: CouncilStage::Rankings,
                model: entry.model.clone(),
                cost,
            });
        }

        usage.add(&stage3.usage);
        let cost = self.call_cost(&stage3.model, &stage3.usage).await;
        total_cost += cost;
        breakdown.push(CostRecord {
            stage: CouncilStage::Synthesis,
            model: stage3.model.clone(),
            cost,
        });

        CouncilMetadata {
            label_to_model: labels,
            aggregate_rankings: aggregate,
            usage,
            cost: round_currency(total_cost),
            cost_breakdown: breakdown,
        }
    }

    async fn call_cost(&self, model: &Model, usage: &TokenUsage) -> f64 {
        let price = self.pricing.price(model).await;
        request_cost(price, usage.prompt_tokens, usage.completion_tokens)
    }
}
