//! Compute free gaps from busy intervals.
//!
//! Drops busy intervals outside the date range, sorts and merges the rest into
//! disjoint busy blocks, then inverts those blocks into the free gaps of the
//! date range. Daily-window tiling happens afterwards in [`crate::tile`].

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::interval::Interval;

/// Keep the busy intervals that intersect `[date_start, date_end]`.
///
/// An interval is dropped only when it ends strictly before `date_start` or
/// starts strictly after `date_end`; intervals touching a boundary are kept.
/// Intervals are not clipped.
pub fn filter_busy(
    busy: &[Interval],
    date_start: DateTime<Utc>,
    date_end: DateTime<Utc>,
) -> Vec<Interval> {
    busy.iter()
        .filter(|i| i.end() >= date_start && i.start() <= date_end)
        .copied()
        .collect()
}

/// Merge overlapping or touching busy intervals.
///
/// Returns a sorted, pairwise-disjoint list covering the same time as the input.
/// Runs in O(n log n) for the sort plus a single linear sweep.
pub fn merge_busy_periods(mut intervals: Vec<Interval>) -> Vec<Interval> {
    // Sort by start time, then by end time for determinism on shared starts.
    intervals.sort_unstable_by_key(|i| (i.start(), i.end()));

    intervals
        .into_iter()
        .fold(Vec::new(), |mut merged: Vec<Interval>, next| {
            match merged.last_mut() {
                Some(current) if current.reaches(&next) => *current = current.hull(&next),
                _ => merged.push(next),
            }
            merged
        })
}

/// Invert merged busy blocks into the free gaps of `[date_start, date_end]`.
///
/// `merged` must be sorted and disjoint, as produced by [`merge_busy_periods`].
/// Only gaps with positive length are returned.
pub fn invert_busy_periods(
    merged: &[Interval],
    date_start: DateTime<Utc>,
    date_end: DateTime<Utc>,
) -> Vec<Interval> {
    let (first, last) = match (merged.first(), merged.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Interval::positive(date_start, date_end).into_iter().collect(),
    };

    let leading = (first.start() > date_start).then_some((date_start, first.start()));
    let between = merged.windows(2).map(|pair| (pair[0].end(), pair[1].start()));
    let trailing = (date_end > last.end()).then_some((last.end(), date_end));

    leading
        .into_iter()
        .chain(between)
        .chain(trailing)
        .filter_map(|(start, end)| Interval::positive(start, end))
        .collect()
}

/// Run filter, merge and invert over a busy set.
///
/// Returns `(merged_busy, free_gaps)`, both sorted by start time.
pub fn busy_and_free(
    busy: &[Interval],
    date_start: DateTime<Utc>,
    date_end: DateTime<Utc>,
) -> (Vec<Interval>, Vec<Interval>) {
    let filtered = filter_busy(busy, date_start, date_end);
    debug!(input = busy.len(), kept = filtered.len(), "filtered busy intervals");

    let merged = merge_busy_periods(filtered);
    debug!(blocks = merged.len(), "merged busy intervals");

    let gaps = invert_busy_periods(&merged, date_start, date_end);
    debug!(gaps = gaps.len(), "inverted busy blocks into free gaps");

    (merged, gaps)
}
