//! Service label discovery.
//!
//! Service names are not fixed by the report format, so they are learned from
//! a sample of package lines before any line is parsed.

use std::collections::BTreeSet;

use tracing::debug;

use super::layout::ReportLayout;
use super::tokens::{sampled_date_len, time_marker_index};
use super::tracking::find_tracking;

/// Service labels of one run, most specific first.
///
/// Labels are sorted by descending length, so a label is always tried before
/// any shorter label that is a suffix of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceVocabulary {
    labels: Vec<String>,
}

impl ServiceVocabulary {
    /// Build a vocabulary from arbitrary labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = labels
            .into_iter()
            .map(Into::into)
            .filter(|l: &String| !l.is_empty())
            .collect();
        let mut labels: Vec<String> = unique.into_iter().collect();
        // BTreeSet order breaks ties alphabetically; the sort is stable.
        labels.sort_by(|a, b| b.len().cmp(&a.len()));
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Split a customer+service field into `(customer, service)`.
    ///
    /// The first label that is a suffix of the field is the service and the
    /// trimmed remainder is the customer. Without a match the whole field is
    /// the customer.
    pub fn split<'a>(&self, field: &'a str) -> (&'a str, &'a str) {
        if field.is_empty() {
            return ("", "");
        }

        for label in &self.labels {
            if let Some(customer) = field.strip_suffix(label.as_str()) {
                let service = &field[customer.len()..];
                return (customer.trim(), service);
            }
        }

        (field, "")
    }
}

/// Learn service labels from sampled lines.
pub fn build_vocabulary<'a, I>(lines: I, layout: &ReportLayout) -> ServiceVocabulary
where
    I: IntoIterator<Item = &'a str>,
{
    let mut candidates = BTreeSet::new();
    let mut sampled = 0usize;

    for line in lines {
        if !layout.time_of_day.is_match(line) {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((tracking_idx, _)) = find_tracking(&tokens, &layout.sampled_tracking) else {
            continue;
        };
        sampled += 1;

        if let Some(label) = candidate_label(&tokens, tracking_idx, layout) {
            candidates.insert(label);
        }
    }

    let vocabulary = ServiceVocabulary::new(
        candidates
            .iter()
            .filter(|label| {
                (layout.sampling.min_label_len..=layout.sampling.max_label_len)
                    .contains(&label.len())
            })
            .map(|label| layout.clean_label(label)),
    );

    debug!(
        "Sampled {} package lines, {} candidate labels, {} service labels",
        sampled,
        candidates.len(),
        vocabulary.len()
    );

    vocabulary
}

/// The customer+service span of a sampled line, if it starts with a known
/// service prefix.
fn candidate_label(tokens: &[&str], tracking_idx: usize, layout: &ReportLayout) -> Option<String> {
    let time_idx = time_marker_index(tokens, &layout.time_markers)?;
    // A marker in first position has no time value before it.
    if time_idx == 0 {
        return None;
    }

    let start = time_idx + 1;
    let start = start + sampled_date_len(tokens, start, layout);
    if tracking_idx <= start {
        return None;
    }

    let field = tokens[start..tracking_idx].join(" ");
    layout
        .service_prefixes
        .iter()
        .any(|prefix| field.starts_with(prefix.as_str()))
        .then_some(field)
}
