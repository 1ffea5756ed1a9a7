//! Report text extraction.
//!
//! The building blocks run leaves first: tracking ids are recognized per token,
//! a service vocabulary is sampled from the leading pages, section regions are
//! carved out of the full text and parsed line by line, and summary blocks are
//! reconstructed into rows. [`crate::pipeline::ReportPipeline`] wires them
//! together.

pub mod aggregate;
pub mod layout;
pub mod line;
pub mod naming;
pub mod patterns;
pub mod section;
pub mod summary;
pub mod tokens;
pub mod tracking;
pub mod vocabulary;

pub use aggregate::RecordAggregator;
pub use layout::{ReportLayout, SectionLayout, SummaryLayout, TrackingPattern};
pub use line::LineEntryParser;
pub use naming::{format_date_range, output_path, report_info, ReportInfo};
pub use section::split_sections;
pub use summary::{parse_summary, SummaryRows};
pub use tracking::find_tracking;
pub use vocabulary::{build_vocabulary, ServiceVocabulary};
