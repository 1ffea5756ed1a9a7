//! Configuration structures for the extraction pipeline.
//!
//! Every pattern and layout constant the extractor relies on lives here so an
//! alternate report layout can be described without touching parsing code.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Main configuration for the shipx pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipxConfig {
    /// Report layout (boundaries, token vocabularies, column shapes).
    pub layout: LayoutConfig,

    /// Service vocabulary sampling.
    pub sampling: SamplingConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// Layout of one report family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Tokens that close the time-of-day field.
    pub time_markers: Vec<String>,

    /// Pattern a line must contain to be sampled for service labels.
    pub time_of_day_pattern: String,

    /// Known tracking-id families, by name.
    pub tracking_families: Vec<TrackingFamily>,

    /// Service labels must start with one of these.
    pub service_prefixes: Vec<String>,

    /// Maximum number of pickup-date tokens after the time marker.
    pub max_date_tokens: usize,

    /// Minimum token count for a section line.
    pub min_line_tokens: usize,

    /// Trailing tokens that qualify the preceding weight token.
    pub weight_markers: Vec<String>,

    /// Mass units a weight token may carry.
    pub mass_units: Vec<String>,

    /// Marker for a weight that does not apply.
    pub not_applicable: String,

    /// Package sections, in output order.
    pub sections: Vec<SectionConfig>,

    /// Tabular summary blocks, in output order.
    pub summaries: Vec<SummaryConfig>,

    /// Shape of the summary rows.
    pub summary_rows: SummaryRowConfig,

    /// Report header (title and date range) lookup.
    pub header: HeaderConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            time_markers: strings(&["AM", "PM"]),
            time_of_day_pattern: r"\d{1,2}:\d{2} (AM|PM)".to_string(),
            tracking_families: vec![
                TrackingFamily {
                    name: "ups".to_string(),
                    pattern: r"1Z[A-Z0-9]{16}".to_string(),
                    prefix: "1Z".to_string(),
                    sampled: true,
                },
                TrackingFamily {
                    name: "hr".to_string(),
                    pattern: r"HR[A-Z0-9]{6,8}-\d{4}-\d+".to_string(),
                    prefix: "HR".to_string(),
                    sampled: false,
                },
            ],
            service_prefixes: strings(&[
                "Ground",
                "Next",
                "2nd",
                "3rd",
                "3 Day",
                "Standard",
                "Worldwide",
                "Express",
                "Economy",
                "Expedited",
            ]),
            max_date_tokens: 3,
            min_line_tokens: 4,
            weight_markers: strings(&["ManWt", "Com"]),
            mass_units: strings(&["lb", "kg"]),
            not_applicable: "N/A".to_string(),
            sections: vec![
                SectionConfig {
                    key: "drop_off".to_string(),
                    name: "Drop Off Packages".to_string(),
                    start: r"(?:Drop Off Packages\s+4x6 Pre-printed Shipping Label|Waybill \(Air/Ground Shipping Doc\)|Return Service \(UPS Only\))\s+Drop Off Date\s+Time Pickup Date Customer Service".to_string(),
                    end: r"Waybill \(Air/Ground|Return Service \(UPS Only\)|Enhanced Drop Off|Mobile Drop Off|Amazon\s+Drop Off|Page \d+ of \d+".to_string(),
                    runs_to_end_of_text: false,
                    tracking: strings(&["ups"]),
                },
                SectionConfig {
                    key: "enhanced".to_string(),
                    name: "Enhanced Drop Off Packages".to_string(),
                    start: r"Enhanced Drop Off Packages".to_string(),
                    end: r"Enhanced Drop Off Packages|Mobile Drop Off|Summary|Page \d+ of \d+".to_string(),
                    runs_to_end_of_text: false,
                    tracking: strings(&["ups", "hr"]),
                },
                SectionConfig {
                    key: "mobile".to_string(),
                    name: "Mobile Drop Off".to_string(),
                    start: r"Mobile Drop Off".to_string(),
                    end: r"Summary|Kiosk Summary".to_string(),
                    runs_to_end_of_text: true,
                    tracking: strings(&["ups"]),
                },
            ],
            summaries: vec![
                SummaryConfig {
                    name: "Summary".to_string(),
                    header: r"Summary\s+Unknown service.*?Type\s+International\s+Ground\s+Air\s+.*?Total Packages\s+Weight\s+".to_string(),
                    end: r"Kiosk Summary|Page \d+ of \d+".to_string(),
                },
                SummaryConfig {
                    name: "Kiosk Summary".to_string(),
                    header: r"Kiosk Summary.*?Type\s+International\s+Ground\s+Air\s+.*?Total Packages\s+Weight\s+".to_string(),
                    end: r"Page \d+ of \d+".to_string(),
                },
            ],
            summary_rows: SummaryRowConfig::default(),
            header: HeaderConfig::default(),
        }
    }
}

/// A tracking-id format family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingFamily {
    /// Name sections refer to.
    pub name: String,
    /// Pattern matched at the start of a token.
    pub pattern: String,
    /// Literal prefix every id of this family starts with.
    pub prefix: String,
    /// Whether lines carrying this family are sampled for service labels.
    #[serde(default)]
    pub sampled: bool,
}

/// A package section of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Stable key.
    pub key: String,
    /// Output table name.
    pub name: String,
    /// Pattern opening a region.
    pub start: String,
    /// Pattern closing a region (not consumed).
    pub end: String,
    /// A region with no end marker extends to the end of the text.
    #[serde(default)]
    pub runs_to_end_of_text: bool,
    /// Tracking families, in priority order.
    pub tracking: Vec<String>,
}

/// A tabular summary block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Output table name.
    pub name: String,
    /// Pattern matching everything up to the first data line.
    pub header: String,
    /// Pattern closing the block (not consumed).
    pub end: String,
}

/// Shape of summary rows and their line-wrap repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryRowConfig {
    /// Lines starting with this are the totals footer.
    pub total_footer: String,
    /// Lines matching any of these are metadata, not data.
    pub skip_patterns: Vec<String>,
    /// Integer continuations at or above this are not weights.
    pub continuation_threshold: f64,
    /// Unit appended to a merged weight continuation.
    pub continuation_unit: String,
    /// Row layout: description, five counts, optional weight.
    pub row_pattern: String,
}

impl Default for SummaryRowConfig {
    fn default() -> Self {
        Self {
            total_footer: "Total:".to_string(),
            skip_patterns: strings(&[r"^\d+\.\d+\.\d+\.\d+$", r"^\(\w{2}-\w{2}\)"]),
            continuation_threshold: 100_000.0,
            continuation_unit: "lb".to_string(),
            row_pattern: r"^(.*?)\s+(\d+)\s+([\d,]+)\s+(\d+)\s+(\d+)\s+([\d,]+)\s*([\d.,]+(?:lb|kg)?)?"
                .to_string(),
        }
    }
}

/// Where the report title and date range are found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Number of leading lines of the first page to scan.
    pub scan_lines: usize,
    /// Date range expression.
    pub date_range_pattern: String,
    /// Title used when the header line has no text before the range.
    pub fallback_title: String,
    /// `chrono` format of each date in the range.
    pub input_date_format: String,
    /// `chrono` format of each date in the artifact name.
    pub output_date_format: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scan_lines: 10,
            date_range_pattern: r"(\d+ \w+ \d+ - \d+ \w+ \d+)".to_string(),
            fallback_title: "Report".to_string(),
            input_date_format: "%d %B %Y".to_string(),
            output_date_format: "%d-%m-%Y".to_string(),
        }
    }
}

/// Service vocabulary sampling bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Pages sampled from the start of the document.
    pub max_pages: usize,
    /// Shortest accepted label.
    pub min_label_len: usize,
    /// Longest accepted label.
    pub max_label_len: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_pages: 30,
            min_label_len: 4,
            max_label_len: 50,
        }
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Input used when none is given on the command line.
    pub default_input: String,
    /// Default output format name (`json` or `csv`).
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_input: "ActiveReports Document.pdf".to_string(),
            format: "json".to_string(),
        }
    }
}

impl ShipxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}
