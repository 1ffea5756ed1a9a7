//! Process command - extract the tables of a single report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tracing::{debug, info};

use shipx_core::{DocumentRenderer, ExtractionOutcome, ReportPipeline, Stage, TableWriter};

use super::load_config;
use crate::output::OutputFormat;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input report, PDF or pre-rendered text (default: from configuration)
    input: Option<PathBuf>,

    /// Directory for the output (default: next to the input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format (default: from configuration)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print the complete result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let input = args
        .input
        .unwrap_or_else(|| PathBuf::from(&config.output.default_input));
    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_config(&config.output.format)?,
    };

    let mut pipeline = ReportPipeline::new(&config)?;
    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
        pipeline = pipeline.with_output_dir(dir);
    }

    info!("Processing file: {}", input.display());

    let pb = spinner()?;
    let result = run_with_progress(pipeline, input, format.writer(), &pb).await;
    pb.finish_and_clear();
    let outcome = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Spinner showing the current pipeline stage.
pub fn spinner() -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Run the pipeline on a blocking worker, showing each stage on `pb`.
pub async fn run_with_progress(
    pipeline: ReportPipeline,
    input: PathBuf,
    writer: Box<dyn TableWriter>,
    pb: &ProgressBar,
) -> anyhow::Result<ExtractionOutcome> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let worker = tokio::task::spawn_blocking(move || {
        let progress = move |stage: &Stage<'_>| {
            let _ = tx.send(stage.to_string());
        };
        pipeline.run(&input, &DocumentRenderer, writer.as_ref(), &progress)
    });

    while let Some(message) = rx.recv().await {
        pb.set_message(message);
    }

    Ok(worker.await??)
}

fn print_outcome(outcome: &ExtractionOutcome) {
    println!(
        "{} Tables created: {}",
        style("✓").green(),
        outcome.output_path.display()
    );

    for table in &outcome.tables.tables {
        println!("  {}: {} rows", table.name, table.len());
    }

    let stats = &outcome.stats;
    println!(
        "{} {} packages, {} summary rows ({} lines and {} rows skipped)",
        style("ℹ").blue(),
        stats.package_records,
        stats.summary_rows,
        stats.skipped_lines,
        stats.skipped_rows
    );

    for warning in &outcome.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
}
