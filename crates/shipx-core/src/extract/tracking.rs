//! Tracking-id lookup.

use super::layout::TrackingPattern;

/// Find the tracking id among `tokens`.
///
/// Patterns are tried in priority order; within a pattern, tokens in line
/// order. Returns the token index and the token.
pub fn find_tracking<'a>(
    tokens: &[&'a str],
    patterns: &[TrackingPattern],
) -> Option<(usize, &'a str)> {
    patterns.iter().find_map(|pattern| {
        tokens
            .iter()
            .position(|token| pattern.matches(token))
            .map(|idx| (idx, tokens[idx]))
    })
}
