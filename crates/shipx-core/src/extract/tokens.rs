//! Positional heuristics over a whitespace-split line.
//!
//! A package line reads, left to right:
//!
//! ```text
//! <time ... AM|PM> <pickup date, up to N tokens> <customer> <service> <tracking id> <weight> [ManWt|Com]
//! ```
//!
//! The date run and the weight suffix have no delimiters of their own, so their
//! extent is decided here and nowhere else. A report layout change that moves
//! these fields only needs these functions adjusted.

use super::layout::ReportLayout;
use super::patterns::{DATE_COMPLETE, DATE_NAME, DATE_NUMERIC, DATE_YEAR};

/// Index of the first token that closes the time field.
pub fn time_marker_index(tokens: &[&str], markers: &[String]) -> Option<usize> {
    tokens
        .iter()
        .position(|token| markers.iter().any(|m| m == token))
}

/// Whether a token can be part of a pickup date.
pub fn is_date_part(token: &str) -> bool {
    DATE_NUMERIC.is_match(token) || DATE_NAME.is_match(token)
}

/// Length of the pickup-date run starting at `start`.
///
/// At most `layout.max_date_tokens` tokens. The run stops at the first token
/// carrying a tracking prefix or not shaped like a date part, and ends right
/// after a complete date: a separated numeric date, or a year following other
/// date parts.
pub fn pickup_date_len(tokens: &[&str], start: usize, layout: &ReportLayout) -> usize {
    let mut len = 0;
    for token in tokens.iter().skip(start).take(layout.max_date_tokens) {
        if layout.has_tracking_prefix(token) || !is_date_part(token) {
            break;
        }
        len += 1;
        if DATE_COMPLETE.is_match(token) || (len > 1 && DATE_YEAR.is_match(token)) {
            break;
        }
    }
    len
}

/// Length of the date run assumed while sampling service labels.
///
/// Looser than [`pickup_date_len`]: every token up to the cap counts unless it
/// carries a tracking prefix. Sampled labels must still start with a known
/// service prefix, which discards spans that lost their customer name.
pub fn sampled_date_len(tokens: &[&str], start: usize, layout: &ReportLayout) -> usize {
    tokens
        .iter()
        .skip(start)
        .take(layout.max_date_tokens)
        .take_while(|token| !layout.has_tracking_prefix(token))
        .count()
}

/// Weight field of a line.
///
/// A trailing unit marker (`ManWt`, `Com`) is kept together with the preceding
/// weight token when that token carries a mass unit or is the not-applicable
/// marker. A marker with anything else before it means the weight is not
/// applicable. Otherwise the last token is the weight.
pub fn weight(tokens: &[&str], layout: &ReportLayout) -> String {
    let Some((last, rest)) = tokens.split_last() else {
        return String::new();
    };

    if !layout.weight_markers.iter().any(|m| m == last) {
        return (*last).to_string();
    }

    match rest.last() {
        Some(prev)
            if layout.mass_units.iter().any(|unit| prev.contains(unit.as_str()))
                || *prev == layout.not_applicable =>
        {
            format!("{prev} {last}")
        }
        _ => layout.not_applicable.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{LayoutConfig, SamplingConfig};

    fn layout() -> ReportLayout {
        ReportLayout::compile(&LayoutConfig::default(), &SamplingConfig::default()).unwrap()
    }

    fn split(line: &str) -> Vec<&str> {
        line.split_whitespace().collect()
    }

    #[test]
    fn test_time_marker_index() {
        let markers = vec!["AM".to_string(), "PM".to_string()];

        assert_eq!(time_marker_index(&split("10:15 AM 01/05/2024"), &markers), Some(1));
        assert_eq!(time_marker_index(&split("01/05/2024 3:02 PM x"), &markers), Some(2));
        assert_eq!(time_marker_index(&split("no marker here"), &markers), None);
    }

    #[test]
    fn test_is_date_part() {
        for token in ["01/05/2024", "2024-01-05", "Jan", "January", "06,", "2024", "Mon.", "Sept"] {
            assert!(is_date_part(token), "{token}");
        }
        for token in ["Acme", "Ground", "1Z999AA10123456784", "2.5lb", "Corp."] {
            assert!(!is_date_part(token), "{token}");
        }
    }

    #[test]
    fn test_pickup_date_stops_at_customer() {
        let layout = layout();
        let tokens = split("10:15 AM 01/05/2024 Acme Corp Ground 1Z999AA10123456784 2.5lb");

        assert_eq!(pickup_date_len(&tokens, 2, &layout), 1);
    }

    #[test]
    fn test_pickup_date_spoken_form() {
        let layout = layout();
        let tokens = split("9:00 AM Jan 06, 2024 Ground 1Z999AA10123456784 1lb");

        assert_eq!(pickup_date_len(&tokens, 2, &layout), 3);
    }

    #[test]
    fn test_pickup_date_ends_when_complete() {
        let layout = layout();
        let cases = [
            ("10:15 AM 01/05/2024 3 Day Select 1Z999AA10123456784 2.5lb", 1),
            ("10:15 AM 01/05/2024 May Chen Ground 1Z999AA10123456784 2.5lb", 1),
            ("10:15 AM 2024-01-05 Sun Ltd Ground 1Z999AA10123456784 2.5lb", 1),
            ("10:15 AM 05 Jan 2024 June Park Ground 1Z999AA10123456784 2.5lb", 3),
            ("10:15 AM Jan 2024 12 Main Ground 1Z999AA10123456784 2.5lb", 2),
        ];

        for (line, expected) in cases {
            assert_eq!(pickup_date_len(&split(line), 2, &layout), expected, "{line}");
        }
    }

    #[test]
    fn test_pickup_date_stops_at_tracking_prefix() {
        let layout = layout();
        let tokens = split("9:00 AM 01/05/2024 1Z999AA10123456784 1lb");

        assert_eq!(pickup_date_len(&tokens, 2, &layout), 1);
        assert_eq!(pickup_date_len(&tokens, 3, &layout), 0);
    }

    #[test]
    fn test_sampled_date_run_is_capped() {
        let layout = layout();
        let tokens = split("9:00 AM 01/05/2024 Acme Corp Ground 1Z999AA10123456784 1lb");

        assert_eq!(sampled_date_len(&tokens, 2, &layout), 3);
        assert_eq!(sampled_date_len(&tokens, 5, &layout), 1);
    }

    #[test]
    fn test_weight_plain() {
        assert_eq!(weight(&split("a b 2.5lb"), &layout()), "2.5lb");
    }

    #[test]
    fn test_weight_with_marker() {
        let layout = layout();

        assert_eq!(weight(&split("a 12.0lb ManWt"), &layout), "12.0lb ManWt");
        assert_eq!(weight(&split("a 3kg Com"), &layout), "3kg Com");
        assert_eq!(weight(&split("a N/A Com"), &layout), "N/A Com");
        assert_eq!(weight(&split("a 1Z999AA10123456784 ManWt"), &layout), "N/A");
        assert_eq!(weight(&split("ManWt"), &layout), "N/A");
    }
}
