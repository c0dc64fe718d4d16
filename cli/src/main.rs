//! CLI entrypoint for llm-council
//!
//! Wires the layers together with dependency injection: the OpenRouter
//! gateway and the price book are constructed here and handed to the use
//! cases.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use council_application::{
    CouncilConfig, GenerateTitleUseCase, RunCouncilInput, RunCouncilUseCase,
};
use council_domain::{CouncilOutcome, Model, Question};
use council_infrastructure::{ConfigLoader, OpenRouterGateway, PriceBook};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "llm-council", version, about = "Ask a council of LLMs and let a chairman synthesize the answer")]
struct Cli {
    /// The question to put to the council
    question: Option<String>,

    /// Council model identifier (repeatable); overrides the configured roster
    #[arg(short, long = "model")]
    model: Vec<String>,

    /// Chairman model override
    #[arg(long)]
    chairman: Option<String>,

    /// Path to a config file (highest priority)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ignore config files and use built-in defaults
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputMode::Full)]
    output: OutputMode,

    /// Only generate a short conversation title for the question
    #[arg(long)]
    title: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputMode {
    /// Every stage plus rankings and cost
    Full,
    /// Only the chairman's synthesis
    Synthesis,
    /// The raw outcome bundle as JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let question = match &cli.question {
        Some(q) => Question::try_new(q.clone()).context("question cannot be empty")?,
        None => bail!("A question is required."),
    };

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };
    let config = file_config.council_config();

    let api_key = std::env::var("OPENROUTER_API_KEY")
        .context("OPENROUTER_API_KEY environment variable is not set")?;

    // === Dependency injection ===
    let gateway = Arc::new(
        OpenRouterGateway::new(api_key).with_chat_url(file_config.openrouter.chat_url.clone()),
    );
    let pricing = Arc::new(PriceBook::with_endpoint(
        file_config.openrouter.models_url.clone(),
        file_config.pricing_ttl(),
    ));

    if cli.title {
        let use_case = GenerateTitleUseCase::new(Arc::clone(&gateway), config.title_model.clone());
        println!("{}", use_case.execute(&question).await);
        return Ok(());
    }

    info!("Starting llm-council");

    let mut input = RunCouncilInput::new(question);
    if !cli.model.is_empty() {
        input = input.with_council(cli.model.iter().map(Model::new).collect());
    }
    if let Some(chairman) = &cli.chairman {
        input = input.with_chairman(Model::new(chairman.clone()));
    }

    let use_case = RunCouncilUseCase::new(gateway, pricing, config);
    let outcome = use_case.execute(input).await?;

    match cli.output {
        OutputMode::Full => print_full(&outcome),
        OutputMode::Synthesis => println!("{}", outcome.stage3.response),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    Ok(())
}

fn print_full(outcome: &CouncilOutcome) {
    println!("=== Stage 1: Individual responses ===");
    for entry in &outcome.stage1 {
        println!("\n--- {} ---", entry.model);
        println!("{}", entry.response);
    }

    if !outcome.metadata.aggregate_rankings.is_empty() {
        println!("\n=== Stage 2: Aggregate ranking (lower is better) ===");
        for rank in &outcome.metadata.aggregate_rankings {
            println!(
                "{:8.2}  {} ({} mentions)",
                rank.average_rank, rank.model, rank.rankings_count
            );
        }
    }

    println!("\n=== Stage 3: Chairman synthesis ({}) ===", outcome.stage3.model);
    println!("{}", outcome.stage3.response);

    let usage = &outcome.metadata.usage;
    println!(
        "\nTokens: {} prompt + {} completion = {} total | Cost: ${:.6}",
        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens, outcome.metadata.cost
    );
}
