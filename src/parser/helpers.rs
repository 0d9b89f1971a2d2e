//! Helper functions for decoding encoded stream fields
//!
//! Stream fields are `;`-separated sample groups whose sub-values are
//! `,`-separated, e.g. `"12,34;56,78"`.

use crate::error::{Result, TrackError};

/// Split an encoded field into its non-empty sample groups
///
/// Absent fields and trailing separators yield no groups.
pub fn split_segments(encoded: Option<&str>) -> impl Iterator<Item = &str> {
    encoded
        .unwrap_or_default()
        .split(';')
        .filter(|segment| !segment.is_empty())
}

/// Select the `index`-th `,`-separated sub-value of a sample group
pub fn sub_value<'a>(field: &'static str, segment: &'a str, index: usize) -> Result<&'a str> {
    segment
        .split(',')
        .nth(index)
        .ok_or_else(|| TrackError::MissingValue {
            field,
            segment: segment.to_string(),
            index,
        })
}

/// Parse one token as a signed 64-bit integer
pub fn parse_value(field: &'static str, token: &str) -> Result<i64> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|_| TrackError::InvalidNumber {
            field,
            token: token.to_string(),
        })
}

/// Running sum turning a delta-encoded series into absolute values
pub fn cumulative_sum(deltas: &[i64]) -> Vec<i64> {
    deltas
        .iter()
        .scan(0i64, |total, &delta| {
            *total = total.saturating_add(delta);
            Some(*total)
        })
        .collect()
}
