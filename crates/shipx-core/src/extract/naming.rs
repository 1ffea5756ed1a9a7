//! Report title, date range and output artifact naming.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::layout::HeaderLayout;

/// Title and reporting period found on the first page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInfo {
    /// Header text before the date range.
    pub title: String,

    /// Raw date range, e.g. `01 Jan 2024 - 05 Jan 2024`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
}

/// Find the report title and date range in the leading lines of a page.
pub fn report_info(first_page: &str, header: &HeaderLayout) -> ReportInfo {
    for line in first_page.lines().take(header.scan_lines) {
        if let Some(m) = header.date_range.find(line) {
            let title = line[..m.start()].trim();
            let title = if title.is_empty() {
                header.fallback_title.clone()
            } else {
                title.to_string()
            };
            let range = header
                .date_range
                .captures(line)
                .and_then(|c| c.get(1))
                .map_or(m.as_str(), |g| g.as_str());
            return ReportInfo {
                title,
                date_range: Some(range.to_string()),
            };
        }
    }

    ReportInfo {
        title: header.fallback_title.clone(),
        date_range: None,
    }
}

/// Reformat `DD Mon YYYY - DD Mon YYYY` as `DD-MM-YYYY to DD-MM-YYYY`.
///
/// Strings of any other shape, or with dates that do not parse, are returned
/// unchanged.
pub fn format_date_range(range: &str, header: &HeaderLayout) -> String {
    let parts: Vec<&str> = range.split(" - ").collect();
    let [from, to] = parts.as_slice() else {
        return range.to_string();
    };

    let reformat = |date: &str| {
        NaiveDate::parse_from_str(date.trim(), &header.input_date_format)
            .map(|d| d.format(&header.output_date_format).to_string())
    };

    match (reformat(from), reformat(to)) {
        (Ok(from), Ok(to)) => format!("{from} to {to}"),
        _ => range.to_string(),
    }
}

/// Path of the output artifact for `input`.
///
/// With a date range the formatted range is appended to the file stem:
/// `report.pdf` becomes `report 01-01-2024 to 05-01-2024.<extension>`.
pub fn output_path(
    input: &Path,
    date_range: Option<&str>,
    extension: &str,
    header: &HeaderLayout,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match date_range {
        Some(range) => {
            let name = format!("{stem} {}", format_date_range(range, header));
            collapse_spaces(&name)
        }
        None => stem,
    };

    let file_name = if extension.is_empty() {
        name
    } else {
        format!("{name}.{extension}")
    };
    input.with_file_name(file_name)
}

fn collapse_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for c in s.chars() {
        if c == ' ' && prev_space {
            continue;
        }
        prev_space = c == ' ';
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::layout::ReportLayout;
    use crate::models::config::{LayoutConfig, SamplingConfig};

    fn header() -> HeaderLayout {
        ReportLayout::compile(&LayoutConfig::default(), &SamplingConfig::default())
            .unwrap()
            .header
    }

    #[test]
    fn test_format_date_range() {
        let header = header();

        assert_eq!(
            format_date_range("01 Jan 2024 - 05 Jan 2024", &header),
            "01-01-2024 to 05-01-2024"
        );
        assert_eq!(
            format_date_range("28 February 2023 - 03 March 2023", &header),
            "28-02-2023 to 03-03-2023"
        );
    }

    #[test]
    fn test_format_date_range_unchanged_on_mismatch() {
        let header = header();

        assert_eq!(format_date_range("January 2024", &header), "January 2024");
        assert_eq!(format_date_range("1 Foo 2024 - 2 Bar 2024", &header), "1 Foo 2024 - 2 Bar 2024");
        assert_eq!(format_date_range("a - b - c", &header), "a - b - c");
    }

    #[test]
    fn test_report_info() {
        let header = header();
        let page = "The UPS Store #1234\nDrop Off Activity 01 Jan 2024 - 05 Jan 2024\nPage 1 of 3";

        assert_eq!(
            report_info(page, &header),
            ReportInfo {
                title: "Drop Off Activity".to_string(),
                date_range: Some("01 Jan 2024 - 05 Jan 2024".to_string()),
            }
        );
    }

    #[test]
    fn test_report_info_fallbacks() {
        let header = header();

        let info = report_info("01 Jan 2024 - 05 Jan 2024", &header);
        assert_eq!(info.title, "Report");
        assert!(info.date_range.is_some());

        let info = report_info("No dates on this page", &header);
        assert_eq!(info, ReportInfo { title: "Report".to_string(), date_range: None });
    }

    #[test]
    fn test_report_info_only_scans_leading_lines() {
        let header = header();
        let mut page = "filler\n".repeat(10);
        page.push_str("Activity 01 Jan 2024 - 05 Jan 2024");

        assert_eq!(report_info(&page, &header).date_range, None);
    }

    #[test]
    fn test_output_path() {
        let header = header();
        let input = Path::new("reports/ActiveReports Document.pdf");

        assert_eq!(
            output_path(input, Some("01 Jan 2024 - 05 Jan 2024"), "json", &header),
            PathBuf::from("reports/ActiveReports Document 01-01-2024 to 05-01-2024.json")
        );
        assert_eq!(
            output_path(input, None, "json", &header),
            PathBuf::from("reports/ActiveReports Document.json")
        );
        assert_eq!(
            output_path(input, None, "", &header),
            PathBuf::from("reports/ActiveReports Document")
        );
    }
}
