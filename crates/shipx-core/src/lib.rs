//! Core library for drop-off activity report extraction.
//!
//! This crate provides:
//! - Source rendering to page-ordered text (PDF and pre-rendered text)
//! - Section splitting and package line parsing
//! - Service vocabulary sampling
//! - Tabular summary reconstruction
//! - Report header lookup and artifact naming

pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod render;

pub use error::{ConfigError, RenderError, Result, ShipxError};
pub use extract::{ReportInfo, ReportLayout, ServiceVocabulary};
pub use models::{PackageRecord, ShipxConfig, SummaryRow, Table, TableRows, TableSet};
pub use output::TableWriter;
pub use pipeline::{
    Extraction, ExtractionOutcome, ExtractionStats, ExtractionWarning, NoProgress, ProgressSink,
    ReportPipeline, Stage,
};
#[cfg(feature = "pdf")]
pub use render::PdfRenderer;
pub use render::{DocumentRenderer, RenderedDocument, TextFileRenderer, TextRenderer};
