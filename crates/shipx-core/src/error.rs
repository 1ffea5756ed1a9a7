//! Error types for the shipx-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the shipx library.
///
/// Messages leave out their source; print the chain with `{:#}` (anyhow) or by
/// walking `source()`.
///
/// Only these errors abort a run. Per-line and per-row problems are reported
/// through [`LineRejection`] and [`RowRejection`] and never escape the
/// extraction stage.
#[derive(Error, Debug)]
pub enum ShipxError {
    /// The source document could not be located or read.
    #[error("input unavailable: {}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text renderer could not produce linear text.
    #[error("text rendering failed")]
    TextRendering(#[from] RenderError),

    /// Configuration error.
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Writing the output artifact failed.
    #[error("output error: {0}")]
    Output(String),

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Errors produced while rendering a document to text.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The document has no pages.
    #[error("document has no pages")]
    NoPages,

    /// No renderer handles this kind of file.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised while loading or compiling configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configured pattern is not a valid regex.
    #[error("invalid pattern for {name}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A section refers to a tracking family that is not defined.
    #[error("section {section} refers to unknown tracking family {family}")]
    UnknownTrackingFamily { section: String, family: String },

    /// A value is out of its accepted range.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Failed to read or write the configuration file.
    #[error("failed to access configuration file")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for this schema.
    #[error("failed to parse configuration")]
    Json(#[from] serde_json::Error),
}

/// Why a section line did not produce a package record.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    #[error("line has fewer than {0} tokens")]
    TooFewTokens(usize),

    #[error("no time marker")]
    NoTimeMarker,

    #[error("no tracking id")]
    NoTrackingId,
}

/// Why a reconstructed summary line did not produce a row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    /// The line does not match the summary column layout.
    #[error("line does not match the summary columns")]
    ColumnMismatch,

    /// The description is empty or is the totals footer.
    #[error("missing row description")]
    MissingDescription,

    /// A numeric column could not be parsed.
    #[error("column {column} is not a count: {value}")]
    InvalidCount { column: &'static str, value: String },
}

/// Result type for the shipx library.
pub type Result<T> = std::result::Result<T, ShipxError>;
