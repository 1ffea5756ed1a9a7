//! Section boundary detection.

use regex::Regex;
use tracing::trace;

use super::layout::SectionLayout;

/// Split `text` into the regions of one section, in document order.
///
/// A region starts after a `start` match and ends right before the next `end`
/// match. The end marker is left in place, so it may open the next region.
pub fn split_sections<'t>(text: &'t str, section: &SectionLayout) -> Vec<&'t str> {
    split_regions(text, &section.start, &section.end, section.runs_to_end_of_text)
}

/// Find the first region between `start` and `end`.
pub fn first_region<'t>(text: &'t str, start: &Regex, end: &Regex) -> Option<&'t str> {
    let open = start.find(text)?;
    let close = end.find_at(text, open.end())?;
    Some(&text[open.end()..close.start()])
}

fn split_regions<'t>(text: &'t str, start: &Regex, end: &Regex, to_eof: bool) -> Vec<&'t str> {
    let mut regions = Vec::new();
    let mut pos = 0;

    while pos <= text.len() {
        let Some(open) = start.find_at(text, pos) else {
            break;
        };

        let close = match end.find_at(text, open.end()) {
            Some(close) => close.start(),
            None if to_eof => text.len(),
            // No later start can find an end marker either.
            None => break,
        };

        trace!("Region {}..{}", open.start(), close);
        regions.push(&text[open.end()..close]);

        // An empty start match at the same place would never advance.
        pos = if close > pos {
            close
        } else {
            pos + text[pos..].chars().next().map_or(1, char::len_utf8)
        };
        if close == text.len() {
            break;
        }
    }

    regions
}
