//! Tabular summary reconstruction.
//!
//! Summary blocks are rendered one row per line, except that a row's weight
//! sometimes wraps onto the following line on its own. Rows are repaired first
//! ([`reconstruct_lines`]) and then matched against the column layout
//! ([`parse_summary_row`]).

use tracing::trace;

use crate::error::RowRejection;
use crate::models::records::SummaryRow;

use super::layout::{SummaryLayout, SummaryRowLayout};
use super::patterns::NUMERIC_ONLY;
use super::section::first_region;

/// Rows of one summary block, plus the number of lines that produced no row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRows {
    /// Whether the block was present at all.
    pub found: bool,
    pub rows: Vec<SummaryRow>,
    pub skipped: usize,
}

/// Locate a summary block in `text` and parse its rows.
///
/// A missing block is not an error; it yields no rows.
pub fn parse_summary(text: &str, summary: &SummaryLayout, layout: &SummaryRowLayout) -> SummaryRows {
    let Some(block) = first_region(text, &summary.header, &summary.end) else {
        return SummaryRows::default();
    };

    let mut result = SummaryRows {
        found: true,
        ..SummaryRows::default()
    };
    for line in reconstruct_lines(block, layout) {
        match parse_summary_row(&line, layout) {
            Ok(row) => result.rows.push(row),
            Err(rejection) => {
                trace!("Skipping {} row {:?}: {}", summary.name, line, rejection);
                result.skipped += 1;
            }
        }
    }
    result
}

/// Repair wrapped rows of a summary block.
///
/// Blank lines, totals footers and metadata lines are dropped. A line followed
/// by a purely numeric line absorbs it as its weight when the number has a
/// decimal point or is below the continuation threshold; otherwise the numeric
/// line is kept as a line of its own.
pub fn reconstruct_lines(block: &str, layout: &SummaryRowLayout) -> Vec<String> {
    let lines: Vec<&str> = block.trim().lines().map(str::trim).collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.is_empty()
            || line.starts_with(layout.total_footer.as_str())
            || layout.skip.iter().any(|re| re.is_match(line))
        {
            i += 1;
            continue;
        }

        match lines.get(i + 1) {
            Some(next) if is_weight_continuation(next, layout.continuation_threshold) => {
                out.push(format!("{line} {next}{}", layout.continuation_unit));
                i += 2;
            }
            _ => {
                out.push(line.to_string());
                i += 1;
            }
        }
    }

    out
}

/// Whether a line is a wrapped weight value.
pub fn is_weight_continuation(line: &str, threshold: f64) -> bool {
    if !NUMERIC_ONLY.is_match(line) {
        return false;
    }
    if line.contains('.') {
        return true;
    }
    line.replace(',', "")
        .parse::<f64>()
        .is_ok_and(|value| value < threshold)
}

/// Match one reconstructed line against the summary columns.
pub fn parse_summary_row(line: &str, layout: &SummaryRowLayout) -> Result<SummaryRow, RowRejection> {
    let caps = layout.row.captures(line).ok_or(RowRejection::ColumnMismatch)?;

    let description = caps.get(1).map_or("", |m| m.as_str()).trim();
    if description.is_empty() || description == layout.total_footer {
        return Err(RowRejection::MissingDescription);
    }

    let count = |idx: usize, column: &'static str| -> Result<u64, RowRejection> {
        let raw = caps.get(idx).map_or("", |m| m.as_str());
        let digits = raw.replace(',', "");
        // A cell of separators only counts as zero.
        if digits.is_empty() {
            return Ok(0);
        }
        digits
            .parse()
            .map_err(|_| RowRejection::InvalidCount {
                column,
                value: raw.to_string(),
            })
    };

    Ok(SummaryRow {
        description: description.to_string(),
        international: count(2, "International")?,
        ground: count(3, "Ground")?,
        air: count(4, "Air")?,
        unspecified: count(5, "Unknown service, not specified")?,
        total_packages: count(6, "Total Packages")?,
        weight: caps.get(7).map_or("", |m| m.as_str()).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::layout::ReportLayout;
    use crate::models::config::{LayoutConfig, SamplingConfig};
    use pretty_assertions::assert_eq;

    fn layout() -> ReportLayout {
        ReportLayout::compile(&LayoutConfig::default(), &SamplingConfig::default()).unwrap()
    }

    #[test]
    fn test_merges_small_integer_continuation() {
        let layout = layout();

        assert_eq!(
            reconstruct_lines("Domestic\n1500", &layout.summary_rows),
            ["Domestic 1500lb"]
        );
    }

    #[test]
    fn test_large_integer_is_not_a_continuation() {
        let layout = layout();

        assert_eq!(
            reconstruct_lines("Domestic\n250000", &layout.summary_rows),
            ["Domestic", "250000"]
        );
    }

    #[test]
    fn test_decimal_is_always_a_continuation() {
        let layout = layout();

        assert_eq!(
            reconstruct_lines("Drop Off 1 2 3 4 10\n250000.5", &layout.summary_rows),
            ["Drop Off 1 2 3 4 10 250000.5lb"]
        );
    }

    #[test]
    fn test_skips_footer_and_metadata_lines() {
        let layout = layout();
        let block = "Total: 9 9 9 9 36\n10.0.0.12\n(US-EN) kiosk\n\nDrop Off 1 2 3 4 10";

        assert_eq!(
            reconstruct_lines(block, &layout.summary_rows),
            ["Drop Off 1 2 3 4 10"]
        );
    }

    #[test]
    fn test_is_weight_continuation() {
        assert!(is_weight_continuation("12.5", 100_000.0));
        assert!(is_weight_continuation("99,999", 100_000.0));
        assert!(!is_weight_continuation("100000", 100_000.0));
        assert!(!is_weight_continuation("12 lb", 100_000.0));
        assert!(!is_weight_continuation(",", 100_000.0));
    }

    #[test]
    fn test_parse_row_with_weight() {
        let layout = layout();

        let row = parse_summary_row("Drop Off 2 1,234 5 0 1,241 12.5lb", &layout.summary_rows).unwrap();

        assert_eq!(
            row,
            SummaryRow {
                description: "Drop Off".to_string(),
                international: 2,
                ground: 1234,
                air: 5,
                unspecified: 0,
                total_packages: 1241,
                weight: "12.5lb".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_row_without_weight() {
        let layout = layout();

        let row = parse_summary_row("Return Service 0 7 0 1 8", &layout.summary_rows).unwrap();

        assert_eq!(row.description, "Return Service");
        assert_eq!(row.total_packages, 8);
        assert_eq!(row.weight, "");
    }

    #[test]
    fn test_parse_row_separator_only_count_is_zero() {
        let layout = layout();

        let row = parse_summary_row("Drop Off 2 , 5 0 7 1.5lb", &layout.summary_rows).unwrap();

        assert_eq!(row.ground, 0);
        assert_eq!(row.total_packages, 7);
        assert_eq!(row.weight, "1.5lb");
    }

    #[test]
    fn test_parse_row_count_overflow_is_rejected() {
        let layout = layout();

        assert_eq!(
            parse_summary_row("Drop Off 2 99999999999999999999999 5 0 7", &layout.summary_rows),
            Err(RowRejection::InvalidCount {
                column: "Ground",
                value: "99999999999999999999999".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_row_rejections() {
        let layout = layout();

        assert_eq!(
            parse_summary_row("Domestic 1500lb", &layout.summary_rows),
            Err(RowRejection::ColumnMismatch)
        );
        assert_eq!(
            parse_summary_row("Total: 1 2 3 4 10", &layout.summary_rows),
            Err(RowRejection::MissingDescription)
        );
    }

    #[test]
    fn test_parse_summary_block() {
        let layout = layout();
        let text = "Summary\nUnknown service, not\nType International Ground Air specified Total Packages Weight\n\
                    Drop Off 2 1,234 5 0 1,241\n\
                    12.5\n\
                    Mobile 0 3 0 0 3 1.0lb\n\
                    Total: 2 1,237 5 0 1,244\n\
                    Kiosk Summary\n";

        let parsed = parse_summary(text, &layout.summaries[0], &layout.summary_rows);

        assert!(parsed.found);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].weight, "12.5lb");
        assert_eq!(parsed.rows[1].description, "Mobile");
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_missing_block_is_empty() {
        let layout = layout();

        let parsed = parse_summary("no summary here", &layout.summaries[1], &layout.summary_rows);

        assert_eq!(parsed, SummaryRows::default());
    }
}
