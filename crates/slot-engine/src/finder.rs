//! The free-slot pipeline: filter, merge, invert, then tile against the daily window.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::freebusy::busy_and_free;
use crate::interval::{FreeSlot, Interval};
use crate::tile::tile_gaps;
use crate::window::SearchWindow;

/// Find every meeting slot in `window` during which nobody in `busy` is busy.
///
/// `busy` may be unsorted and overlapping, typically the flattened calendars of
/// every participant. Slots are returned in chronological order; a free gap
/// spanning several days produces one slot per day, each clipped to the daily
/// window and at least `window.min_duration()` long.
#[instrument(level = "debug", skip_all, fields(busy = busy.len()))]
pub fn compute_free_slots(busy: &[Interval], window: &SearchWindow) -> Vec<FreeSlot> {
    let (_, gaps) = busy_and_free(busy, window.date_start(), window.date_end());
    let slots = tile_gaps(&gaps, window);
    debug!(slots = slots.len(), "tiled free gaps into slots");
    slots
}

/// Validate a search window and compute its free slots in one call.
///
/// # Errors
/// Returns `SlotError::InvalidWindow` when the window is malformed. Nothing is
/// computed in that case.
pub fn find_free_slots(
    busy: &[Interval],
    date_start: DateTime<Utc>,
    date_end: DateTime<Utc>,
    daily_start: NaiveTime,
    daily_end: NaiveTime,
    min_duration: Duration,
    timezone: Tz,
) -> Result<Vec<FreeSlot>> {
    let window = SearchWindow::new(
        date_start,
        date_end,
        daily_start,
        daily_end,
        min_duration,
        timezone,
    )?;
    Ok(compute_free_slots(busy, &window))
}

/// Find the first slot of the window, if any.
pub fn find_first_free_slot(busy: &[Interval], window: &SearchWindow) -> Option<FreeSlot> {
    compute_free_slots(busy, window).into_iter().next()
}
