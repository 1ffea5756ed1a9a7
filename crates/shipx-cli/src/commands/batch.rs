//! Batch command - extract several reports matched by a glob.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use shipx_core::{ExtractionOutcome, ReportPipeline};

use super::load_config;
use super::process::run_with_progress;
use crate::output::OutputFormat;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of input reports
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from configuration)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also write summary.csv with one row per input
    #[arg(long)]
    summary: bool,

    /// Keep going after a failed input
    #[arg(long)]
    continue_on_error: bool,
}

struct FileResult {
    path: PathBuf,
    outcome: Result<ExtractionOutcome, String>,
}

/// One row of summary.csv.
#[derive(Serialize)]
struct SummaryRecord<'a> {
    filename: &'a str,
    status: &'static str,
    output: String,
    date_range: &'a str,
    packages: Option<usize>,
    warnings: Option<usize>,
    error: &'a str,
}

pub async fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_config(&config.output.format)?,
    };

    let files = report_files(&args.input)?;
    println!("{} Found {} files", style("ℹ").blue(), files.len());

    let mut pipeline = ReportPipeline::new(&config)?;
    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
        pipeline = pipeline.with_output_dir(dir);
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")?);

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let outcome = run_with_progress(pipeline.clone(), path.clone(), format.writer(), &pb)
            .await
            .map_err(|e| format!("{:#}", e));
        if let Err(error) = &outcome {
            if !args.continue_on_error {
                pb.finish_and_clear();
                anyhow::bail!("Processing {} failed: {}", path.display(), error);
            }
        }
        results.push(FileResult { path, outcome });
        pb.inc(1);
    }
    pb.finish_and_clear();

    print_results(&results);

    if args.summary {
        let summary_path = args
            .output_dir
            .as_deref()
            .unwrap_or(Path::new("."))
            .join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!("{} Summary written to {}", style("✓").green(), summary_path.display());
    }

    Ok(())
}

/// Inputs matching `pattern` that a renderer can read.
fn report_files(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = glob(pattern)?
        .filter_map(Result::ok)
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf") || ext.eq_ignore_ascii_case("txt"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", pattern);
    }
    Ok(files)
}

fn print_results(results: &[FileResult]) {
    let mut failed = Vec::new();
    for result in results {
        match &result.outcome {
            Ok(outcome) => println!(
                "{} {} -> {}",
                style("✓").green(),
                result.path.display(),
                outcome.output_path.display()
            ),
            Err(error) => failed.push((&result.path, error)),
        }
    }

    println!(
        "{} {} successful, {} failed",
        style("ℹ").blue(),
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!("{}", style("Failed files:").red());
        for (path, error) in failed {
            println!("  - {}: {}", path.display(), error);
        }
    }
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        let record = match &result.outcome {
            Ok(outcome) => SummaryRecord {
                filename,
                status: "success",
                output: outcome.output_path.display().to_string(),
                date_range: outcome.report.date_range.as_deref().unwrap_or(""),
                packages: Some(outcome.stats.package_records),
                warnings: Some(outcome.warnings.len()),
                error: "",
            },
            Err(error) => SummaryRecord {
                filename,
                status: "error",
                output: String::new(),
                date_range: "",
                packages: None,
                warnings: None,
                error,
            },
        };
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}
