//! End-to-end extraction pipeline.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::error::Result;
use crate::extract::layout::{ReportLayout, SectionLayout};
use crate::extract::naming::{format_date_range, output_path, report_info, ReportInfo};
use crate::extract::{
    build_vocabulary, parse_summary, split_sections, LineEntryParser, RecordAggregator,
    ServiceVocabulary,
};
use crate::models::config::ShipxConfig;
use crate::models::records::{PackageRecord, TableSet};
use crate::output::TableWriter;
use crate::render::{RenderedDocument, TextRenderer};

/// A pipeline stage, reported to a [`ProgressSink`] as it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage<'a> {
    Rendering(&'a Path),
    SamplingVocabulary,
    Section(&'a str),
    Summary(&'a str),
    Writing(&'a Path),
}

impl fmt::Display for Stage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Rendering(path) => write!(f, "Rendering {}", path.display()),
            Stage::SamplingVocabulary => write!(f, "Sampling service labels"),
            Stage::Section(name) => write!(f, "Extracting {}", name),
            Stage::Summary(name) => write!(f, "Parsing {}", name),
            Stage::Writing(path) => write!(f, "Writing {}", path.display()),
        }
    }
}

/// Receives one notification per pipeline stage.
pub trait ProgressSink {
    fn stage(&self, stage: &Stage<'_>);
}

/// Discards progress notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn stage(&self, _stage: &Stage<'_>) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&Stage<'_>),
{
    fn stage(&self, stage: &Stage<'_>) {
        self(stage)
    }
}

/// A condition that did not stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionWarning {
    /// A section produced no records.
    SectionEmpty { section: String },
    /// A summary block was not found.
    SummaryMissing { summary: String },
    /// The header has no date range.
    DateRangeMissing,
    /// The header date range could not be reformatted.
    DateRangeUnrecognized { raw: String },
}

impl fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionEmpty { section } => write!(f, "section {} has no records", section),
            Self::SummaryMissing { summary } => write!(f, "summary block {} not found", summary),
            Self::DateRangeMissing => write!(f, "no date range in the report header"),
            Self::DateRangeUnrecognized { raw } => {
                write!(f, "date range {:?} not recognized, used as is", raw)
            }
        }
    }
}

/// Counters of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub pages: usize,
    pub service_labels: usize,
    pub section_regions: usize,
    pub package_records: usize,
    pub summary_rows: usize,
    /// Non-blank section lines that produced no record.
    pub skipped_lines: usize,
    /// Summary lines that produced no row.
    pub skipped_rows: usize,
}

/// Result of extracting one rendered document.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub report: ReportInfo,
    pub vocabulary: ServiceVocabulary,
    pub tables: TableSet,
    pub stats: ExtractionStats,
    pub warnings: Vec<ExtractionWarning>,
}

/// Result of a complete run, including where the artifact was written.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    pub output_path: PathBuf,
    pub report: ReportInfo,
    pub tables: TableSet,
    pub stats: ExtractionStats,
    pub warnings: Vec<ExtractionWarning>,
}

/// Extraction pipeline for one report layout.
///
/// The layout is compiled once; the pipeline holds no per-run state and can be
/// reused for any number of documents.
#[derive(Debug, Clone)]
pub struct ReportPipeline {
    layout: ReportLayout,
    output_dir: Option<PathBuf>,
}

impl ReportPipeline {
    /// Compile the configured layout.
    pub fn new(config: &ShipxConfig) -> Result<Self> {
        let layout = ReportLayout::compile(&config.layout, &config.sampling)?;
        Ok(Self {
            layout,
            output_dir: None,
        })
    }

    /// Write artifacts into `dir` instead of next to the input.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    /// Extract all tables from a rendered document.
    pub fn extract(&self, document: &RenderedDocument) -> Extraction {
        self.extract_with_progress(document, &NoProgress)
    }

    /// Extract all tables, reporting each stage.
    pub fn extract_with_progress(
        &self,
        document: &RenderedDocument,
        progress: &dyn ProgressSink,
    ) -> Extraction {
        let mut stats = ExtractionStats {
            pages: document.page_count(),
            ..ExtractionStats::default()
        };
        let mut warnings = Vec::new();

        let report = report_info(document.first_page(), &self.layout.header);
        match &report.date_range {
            None => warnings.push(ExtractionWarning::DateRangeMissing),
            Some(raw) if format_date_range(raw, &self.layout.header) == *raw => {
                warnings.push(ExtractionWarning::DateRangeUnrecognized { raw: raw.clone() });
            }
            Some(_) => {}
        }
        debug!("Report {:?}, date range {:?}", report.title, report.date_range);

        progress.stage(&Stage::SamplingVocabulary);
        let vocabulary = build_vocabulary(
            document.sample_lines(self.layout.sampling.max_pages),
            &self.layout,
        );
        stats.service_labels = vocabulary.len();

        let text = document.full_text();
        let mut aggregator = RecordAggregator::new();

        for section in &self.layout.sections {
            progress.stage(&Stage::Section(&section.name));
            let records = self.parse_section(&text, section, &vocabulary, &mut stats);
            if records.is_empty() {
                debug!("No records found for {}", section.name);
                warnings.push(ExtractionWarning::SectionEmpty {
                    section: section.name.clone(),
                });
            }
            stats.package_records += records.len();
            aggregator.add_packages(&section.name, records);
        }

        for summary in &self.layout.summaries {
            progress.stage(&Stage::Summary(&summary.name));
            let parsed = parse_summary(&text, summary, &self.layout.summary_rows);
            if !parsed.found {
                debug!("Summary block {} not found", summary.name);
                warnings.push(ExtractionWarning::SummaryMissing {
                    summary: summary.name.clone(),
                });
            }
            debug!(
                "{}: {} rows, {} skipped",
                summary.name,
                parsed.rows.len(),
                parsed.skipped
            );
            stats.summary_rows += parsed.rows.len();
            stats.skipped_rows += parsed.skipped;
            aggregator.add_summary(&summary.name, parsed.rows);
        }

        info!(
            "Extracted {} package records and {} summary rows ({} lines skipped)",
            stats.package_records, stats.summary_rows, stats.skipped_lines
        );

        Extraction {
            report,
            vocabulary,
            tables: aggregator.finish(),
            stats,
            warnings,
        }
    }

    /// Render `input`, extract its tables and write them with `writer`.
    pub fn run(
        &self,
        input: &Path,
        renderer: &dyn TextRenderer,
        writer: &dyn TableWriter,
        progress: &dyn ProgressSink,
    ) -> Result<ExtractionOutcome> {
        info!("Processing {}", input.display());
        progress.stage(&Stage::Rendering(input));
        let document = renderer.render(input)?;
        debug!("Rendered {} pages", document.page_count());

        let extraction = self.extract_with_progress(&document, progress);

        let output_path = self.output_path(input, &extraction.report, writer.extension());
        progress.stage(&Stage::Writing(&output_path));
        writer.write(&extraction.tables, &extraction.report, &output_path)?;
        info!("Wrote {}", output_path.display());

        Ok(ExtractionOutcome {
            output_path,
            report: extraction.report,
            tables: extraction.tables,
            stats: extraction.stats,
            warnings: extraction.warnings,
        })
    }

    /// Artifact path for `input`, honoring the output directory.
    pub fn output_path(&self, input: &Path, report: &ReportInfo, extension: &str) -> PathBuf {
        let path = output_path(
            input,
            report.date_range.as_deref(),
            extension,
            &self.layout.header,
        );
        match (&self.output_dir, path.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => path,
        }
    }

    fn parse_section(
        &self,
        text: &str,
        section: &SectionLayout,
        vocabulary: &ServiceVocabulary,
        stats: &mut ExtractionStats,
    ) -> Vec<PackageRecord> {
        let parser = LineEntryParser::new(&self.layout, vocabulary, &section.tracking);
        let regions = split_sections(text, section);
        stats.section_regions += regions.len();

        let mut records = Vec::new();
        for line in regions.iter().flat_map(|r| r.lines()) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parser.parse(line) {
                Ok(record) => records.push(record),
                Err(rejection) => {
                    trace!("Skipping {} line {:?}: {}", section.name, line, rejection);
                    stats.skipped_lines += 1;
                }
            }
        }

        debug!(
            "{}: {} regions, {} records",
            section.name,
            regions.len(),
            records.len()
        );
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn pipeline() -> ReportPipeline {
        ReportPipeline::new(&ShipxConfig::default()).unwrap()
    }

    #[test]
    fn test_stage_messages() {
        assert_eq!(
            Stage::Section("Mobile Drop Off").to_string(),
            "Extracting Mobile Drop Off"
        );
        assert_eq!(
            Stage::Writing(Path::new("out.json")).to_string(),
            "Writing out.json"
        );
    }

    #[test]
    fn test_empty_document_yields_empty_tables() {
        let pipeline = pipeline();
        let document = RenderedDocument::new(vec!["nothing here".to_string()]);

        let extraction = pipeline.extract(&document);

        let names: Vec<&str> = extraction.tables.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Drop Off Packages",
                "Enhanced Drop Off Packages",
                "Mobile Drop Off",
                "Summary",
                "Kiosk Summary"
            ]
        );
        assert!(extraction.tables.tables.iter().all(|t| t.is_empty()));
        assert!(extraction.warnings.contains(&ExtractionWarning::DateRangeMissing));
        assert!(extraction.warnings.contains(&ExtractionWarning::SectionEmpty {
            section: "Mobile Drop Off".to_string()
        }));
    }

    #[test]
    fn test_progress_reports_every_stage() {
        let pipeline = pipeline();
        let document = RenderedDocument::new(vec![String::new()]);
        let seen = Mutex::new(Vec::new());

        pipeline.extract_with_progress(&document, &|stage: &Stage<'_>| {
            seen.lock().unwrap().push(stage.to_string());
        });

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], "Sampling service labels");
        assert_eq!(seen[5], "Parsing Kiosk Summary");
    }

    #[test]
    fn test_output_dir_override() {
        let pipeline = pipeline().with_output_dir("/tmp/out");
        let report = ReportInfo {
            title: "Report".to_string(),
            date_range: Some("01 Jan 2024 - 05 Jan 2024".to_string()),
        };

        assert_eq!(
            pipeline.output_path(Path::new("in/report.pdf"), &report, "json"),
            PathBuf::from("/tmp/out/report 01-01-2024 to 05-01-2024.json")
        );
    }
}
