//! Package line parsing.

use crate::error::LineRejection;
use crate::models::records::PackageRecord;

use super::layout::{ReportLayout, TrackingPattern};
use super::tokens::{pickup_date_len, time_marker_index, weight};
use super::tracking::find_tracking;
use super::vocabulary::ServiceVocabulary;

/// Parses the lines of one section.
pub struct LineEntryParser<'a> {
    layout: &'a ReportLayout,
    vocabulary: &'a ServiceVocabulary,
    tracking: &'a [TrackingPattern],
}

impl<'a> LineEntryParser<'a> {
    /// Create a parser for a section recognizing the given tracking families.
    pub fn new(
        layout: &'a ReportLayout,
        vocabulary: &'a ServiceVocabulary,
        tracking: &'a [TrackingPattern],
    ) -> Self {
        Self {
            layout,
            vocabulary,
            tracking,
        }
    }

    /// Parse one line into a package record.
    pub fn parse(&self, line: &str) -> Result<PackageRecord, LineRejection> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < self.layout.min_line_tokens {
            return Err(LineRejection::TooFewTokens(self.layout.min_line_tokens));
        }

        let time_idx =
            time_marker_index(&tokens, &self.layout.time_markers).ok_or(LineRejection::NoTimeMarker)?;
        let (tracking_idx, tracking) =
            find_tracking(&tokens, self.tracking).ok_or(LineRejection::NoTrackingId)?;

        let date_start = time_idx + 1;
        let date_end = date_start + pickup_date_len(&tokens, date_start, self.layout);

        let field = if tracking_idx > date_end {
            tokens[date_end..tracking_idx].join(" ")
        } else {
            String::new()
        };
        let (customer, service) = self.vocabulary.split(&field);

        Ok(PackageRecord {
            time: tokens[..=time_idx].join(" "),
            pickup_date: tokens[date_start..date_end].join(" "),
            customer: customer.to_string(),
            service: service.to_string(),
            tracking: tracking.to_string(),
            weight: weight(&tokens, self.layout),
        })
    }
}
