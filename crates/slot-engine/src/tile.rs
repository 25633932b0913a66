//! Clip free gaps against the repeating daily window.
//!
//! A free gap can span several days. Each calendar day it touches yields at most
//! one candidate slot, `[max(gap.start, day_start), min(gap.end, day_end)]`,
//! which is kept only if it is at least the requested meeting length.

use chrono::{DateTime, Duration, Utc};

use crate::dst::at_wall_clock;
use crate::interval::{FreeSlot, Interval};
use crate::window::SearchWindow;

/// Number of day windows a gap can touch: `ceil(len / 24h) + 1`.
fn max_days(gap: &Interval) -> i64 {
    let day = Duration::hours(24).num_seconds();
    let len = gap.duration().num_seconds();
    (len + day - 1) / day + 1
}

/// Split one free gap into per-day slots inside the daily window.
///
/// Slots shorter than the window's minimum duration are dropped, not truncated.
/// Every returned slot lies inside `gap`.
pub fn tile_gap(gap: &Interval, window: &SearchWindow) -> Vec<FreeSlot> {
    let tz = window.timezone();
    let mut slots = Vec::new();
    let mut cursor: DateTime<Utc> = gap.start();

    for _ in 0..max_days(gap) {
        if cursor >= gap.end() {
            break;
        }

        let date = cursor.with_timezone(&tz).date_naive();
        let day_start = at_wall_clock(date, window.daily_start(), tz);
        let day_end = at_wall_clock(date, window.daily_end(), tz);

        let (day_start, day_end) = match (day_start, day_end) {
            (Some(start), Some(end)) => (start, end),
            // Window boundary falls in a DST gap on this date: skip the day.
            _ => {
                cursor += Duration::hours(24);
                continue;
            }
        };

        let start = gap.start().max(day_start);
        let end = gap.end().min(day_end);
        if end - start >= window.min_duration() {
            slots.push(FreeSlot::from_bounds(start, end));
        }

        cursor = window
            .day_step()
            .advance(day_start, window.daily_start(), tz);
    }

    slots
}

/// Tile every gap, preserving gap order.
pub fn tile_gaps(gaps: &[Interval], window: &SearchWindow) -> Vec<FreeSlot> {
    gaps.iter().flat_map(|gap| tile_gap(gap, window)).collect()
}
