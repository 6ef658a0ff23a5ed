//! Langmet binary.
//!
//! Command-line front end for the metrics and drift engine: computes a
//! combined metrics snapshot from an exported JSON event batch, or scores
//! drift between two samples (or across one windowed observation series).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use langmet_core::{
    config::{Args, ServiceConfig},
    detect_categorical_drift, detect_numeric_drift, detect_numeric_drift_windowed,
    EventBatch, MemoryEventStore, MetricsService, WindowedObservation,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter directives (e.g. "langmet_core=debug")
    #[clap(long, global = true)]
    log_filter: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a combined metrics snapshot from an event batch file
    Report(ReportCmd),
    /// Score drift between a baseline and a current sample
    Drift(DriftCmd),
}

#[derive(Parser)]
struct ReportCmd {
    #[command(flatten)]
    config: Args,

    /// Path to a JSON file holding {completion_events, rag_events, citation_events}
    #[clap(short, long)]
    events: PathBuf,

    /// Range start (RFC 3339); defaults to end minus the configured lookback
    #[clap(long)]
    start: Option<DateTime<Utc>>,

    /// Range end (RFC 3339); defaults to now
    #[clap(long)]
    end: Option<DateTime<Utc>>,
}

#[derive(Parser)]
struct DriftCmd {
    #[command(flatten)]
    config: Args,

    /// JSON array of baseline values (numbers) or labels (strings)
    #[clap(long, conflicts_with = "observations")]
    baseline: Option<PathBuf>,

    /// JSON array of current values or labels; required with --baseline
    #[clap(long, requires = "baseline")]
    current: Option<PathBuf>,

    /// JSON array of {created_at, value} observations to split into windows
    #[clap(long, required_unless_present = "baseline")]
    observations: Option<PathBuf>,

    /// Reference time for the windowed split (RFC 3339); defaults to now
    #[clap(long)]
    reference_time: Option<DateTime<Utc>>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Numeric and label samples share one file format: a bare JSON array.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Sample {
    Numeric(Vec<f64>),
    Labels(Vec<String>),
}

async fn run_report(cmd: ReportCmd) -> anyhow::Result<()> {
    let config = ServiceConfig::load(&cmd.config)?;
    let batch: EventBatch = read_json(&cmd.events)?;
    info!(
        completions = batch.completion_events.len(),
        rag = batch.rag_events.len(),
        citations = batch.citation_events.len(),
        "loaded event batch"
    );

    let store = Arc::new(MemoryEventStore::from_batch(batch));
    let service = MetricsService::new(store, config);
    let snapshot = service.snapshot(cmd.start, cmd.end).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_drift(cmd: DriftCmd) -> anyhow::Result<()> {
    let config = ServiceConfig::load(&cmd.config)?;

    let result = if let Some(observations_path) = &cmd.observations {
        let observations: Vec<WindowedObservation> = read_json(observations_path)?;
        let reference = cmd.reference_time.unwrap_or_else(Utc::now);
        detect_numeric_drift_windowed(&observations, reference, &config.window_options())?
    } else {
        // clap guarantees both sample paths are present here.
        let baseline_path = cmd.baseline.as_deref().context("missing --baseline")?;
        let current_path = cmd.current.as_deref().context("missing --current")?;
        let baseline: Sample = read_json(baseline_path)?;
        let current: Sample = read_json(current_path)?;
        match (baseline, current) {
            (Sample::Numeric(baseline), Sample::Numeric(current)) => {
                detect_numeric_drift(&baseline, &current, &config.numeric_options())?
            }
            (Sample::Labels(baseline), Sample::Labels(current)) => {
                detect_categorical_drift(&baseline, &current, &config.categorical_options())
            }
            _ => anyhow::bail!("baseline and current samples must be of the same kind"),
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .parse_lossy(cli.log_filter.as_deref().unwrap_or("langmet_core=info")),
        )
        .with_target(true)
        .init();

    match cli.command {
        Commands::Report(cmd) => run_report(cmd).await,
        Commands::Drift(cmd) => run_drift(cmd),
    }
}
