//! Output artifact writers.

use std::path::Path;

use crate::error::Result;
use crate::extract::naming::ReportInfo;
use crate::models::records::TableSet;

/// Trait for writers persisting the tables of one run.
///
/// Implementations decide the artifact layout; empty tables are expected to be
/// left out of the artifact.
pub trait TableWriter: Send + Sync {
    /// Extension of the artifact path, without the leading dot.
    ///
    /// An empty extension names a directory.
    fn extension(&self) -> &str;

    /// Write all tables to `path`.
    fn write(&self, tables: &TableSet, report: &ReportInfo, path: &Path) -> Result<()>;
}
