//! Compiled report layout.
//!
//! [`ReportLayout`] is the immutable, validated form of [`LayoutConfig`]. It is
//! built once per pipeline and borrowed by every extraction component.

use regex::{Regex, RegexBuilder};

use crate::error::ConfigError;
use crate::models::config::{LayoutConfig, SamplingConfig, SectionConfig, SummaryConfig};

/// A compiled tracking-id family.
#[derive(Debug, Clone)]
pub struct TrackingPattern {
    pub name: String,
    pub prefix: String,
    regex: Regex,
}

impl TrackingPattern {
    /// Whether the token starts with an id of this family.
    pub fn matches(&self, token: &str) -> bool {
        self.regex.is_match(token)
    }
}

/// A compiled package section.
#[derive(Debug, Clone)]
pub struct SectionLayout {
    pub key: String,
    pub name: String,
    pub start: Regex,
    pub end: Regex,
    pub runs_to_end_of_text: bool,
    /// Tracking families, in priority order.
    pub tracking: Vec<TrackingPattern>,
}

/// A compiled summary block.
#[derive(Debug, Clone)]
pub struct SummaryLayout {
    pub name: String,
    pub header: Regex,
    pub end: Regex,
}

/// Compiled summary row shape.
#[derive(Debug, Clone)]
pub struct SummaryRowLayout {
    pub total_footer: String,
    pub skip: Vec<Regex>,
    pub continuation_threshold: f64,
    pub continuation_unit: String,
    pub row: Regex,
}

/// Compiled header lookup.
#[derive(Debug, Clone)]
pub struct HeaderLayout {
    pub scan_lines: usize,
    pub date_range: Regex,
    pub fallback_title: String,
    pub input_date_format: String,
    pub output_date_format: String,
}

/// Validated layout shared read-only by all components of a run.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub time_markers: Vec<String>,
    pub time_of_day: Regex,
    /// Every known family, in configuration order.
    pub tracking: Vec<TrackingPattern>,
    /// Families whose lines are sampled for service labels.
    pub sampled_tracking: Vec<TrackingPattern>,
    pub service_prefixes: Vec<String>,
    pub max_date_tokens: usize,
    pub min_line_tokens: usize,
    pub weight_markers: Vec<String>,
    pub mass_units: Vec<String>,
    pub not_applicable: String,
    pub sections: Vec<SectionLayout>,
    pub summaries: Vec<SummaryLayout>,
    pub summary_rows: SummaryRowLayout,
    pub header: HeaderLayout,
    pub sampling: SamplingConfig,
    /// Trailing weight or tracking fragments stripped from sampled labels.
    label_cleanup: Option<Regex>,
}

impl ReportLayout {
    /// Compile and validate a layout.
    pub fn compile(config: &LayoutConfig, sampling: &SamplingConfig) -> Result<Self, ConfigError> {
        if config.max_date_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "layout.max_date_tokens".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if sampling.min_label_len > sampling.max_label_len {
            return Err(ConfigError::InvalidValue {
                field: "sampling.min_label_len".to_string(),
                reason: "must not exceed sampling.max_label_len".to_string(),
            });
        }

        let tracking = config
            .tracking_families
            .iter()
            .map(|family| {
                Ok(TrackingPattern {
                    name: family.name.clone(),
                    prefix: family.prefix.clone(),
                    regex: compile(
                        &format!("tracking family {}", family.name),
                        &format!("^(?:{})", family.pattern),
                    )?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let sampled_tracking = config
            .tracking_families
            .iter()
            .zip(&tracking)
            .filter(|(family, _)| family.sampled)
            .map(|(_, pattern)| pattern.clone())
            .collect();

        let sections = config
            .sections
            .iter()
            .map(|section| compile_section(section, &tracking))
            .collect::<Result<Vec<_>, _>>()?;

        let summaries = config
            .summaries
            .iter()
            .map(compile_summary)
            .collect::<Result<Vec<_>, _>>()?;

        let rows = &config.summary_rows;
        let summary_rows = SummaryRowLayout {
            total_footer: rows.total_footer.clone(),
            skip: rows
                .skip_patterns
                .iter()
                .map(|p| compile("summary skip pattern", p))
                .collect::<Result<Vec<_>, _>>()?,
            continuation_threshold: rows.continuation_threshold,
            continuation_unit: rows.continuation_unit.clone(),
            row: compile("summary row", &rows.row_pattern)?,
        };

        let header = HeaderLayout {
            scan_lines: config.header.scan_lines,
            date_range: compile("header date range", &config.header.date_range_pattern)?,
            fallback_title: config.header.fallback_title.clone(),
            input_date_format: config.header.input_date_format.clone(),
            output_date_format: config.header.output_date_format.clone(),
        };

        let label_cleanup = label_cleanup_pattern(config)
            .map(|p| compile("service label cleanup", &p))
            .transpose()?;

        Ok(Self {
            time_markers: config.time_markers.clone(),
            time_of_day: compile("time of day", &config.time_of_day_pattern)?,
            tracking,
            sampled_tracking,
            service_prefixes: config.service_prefixes.clone(),
            max_date_tokens: config.max_date_tokens,
            min_line_tokens: config.min_line_tokens,
            weight_markers: config.weight_markers.clone(),
            mass_units: config.mass_units.clone(),
            not_applicable: config.not_applicable.clone(),
            sections,
            summaries,
            summary_rows,
            header,
            sampling: sampling.clone(),
            label_cleanup,
        })
    }

    /// Literal prefixes of every known tracking family.
    pub fn tracking_prefixes(&self) -> impl Iterator<Item = &str> {
        self.tracking.iter().map(|t| t.prefix.as_str())
    }

    /// Strip a trailing weight or tracking fragment from a sampled label.
    pub fn clean_label(&self, label: &str) -> String {
        match &self.label_cleanup {
            Some(re) => re.replace(label, "").trim().to_string(),
            None => label.trim().to_string(),
        }
    }

    /// Whether the token carries a known tracking prefix.
    pub fn has_tracking_prefix(&self, token: &str) -> bool {
        self.tracking_prefixes().any(|p| token.starts_with(p))
    }
}

fn compile_section(
    section: &SectionConfig,
    families: &[TrackingPattern],
) -> Result<SectionLayout, ConfigError> {
    let tracking = section
        .tracking
        .iter()
        .map(|name| {
            families
                .iter()
                .find(|f| &f.name == name)
                .cloned()
                .ok_or_else(|| ConfigError::UnknownTrackingFamily {
                    section: section.key.clone(),
                    family: name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SectionLayout {
        key: section.key.clone(),
        name: section.name.clone(),
        start: compile_block(&format!("section {} start", section.key), &section.start)?,
        end: compile_block(&format!("section {} end", section.key), &section.end)?,
        runs_to_end_of_text: section.runs_to_end_of_text,
        tracking,
    })
}

fn compile_summary(summary: &SummaryConfig) -> Result<SummaryLayout, ConfigError> {
    Ok(SummaryLayout {
        name: summary.name.clone(),
        header: compile_block(&format!("summary {} header", summary.name), &summary.header)?,
        end: compile_block(&format!("summary {} end", summary.name), &summary.end)?,
    })
}

/// Trailing "<n>lb"-style weights or tracking-prefixed tokens.
fn label_cleanup_pattern(config: &LayoutConfig) -> Option<String> {
    let units = config
        .mass_units
        .iter()
        .map(|u| regex::escape(u))
        .collect::<Vec<_>>()
        .join("|");
    let mut alternatives = Vec::new();
    if !units.is_empty() {
        alternatives.push(format!(r"\s*\d+\.?\d*(?:{units})$"));
    }
    for family in config.tracking_families.iter().filter(|f| f.sampled) {
        alternatives.push(format!(r"\s*{}[A-Z0-9]+$", regex::escape(&family.prefix)));
    }
    (!alternatives.is_empty()).then(|| alternatives.join("|"))
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        name: name.to_string(),
        source,
    })
}

/// Block patterns span lines, so `.` must match newlines.
fn compile_block(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .dot_matches_new_line(true)
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            name: name.to_string(),
            source,
        })
}
