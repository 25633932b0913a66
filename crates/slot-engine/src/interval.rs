//! Busy intervals and the free slots computed from them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A closed time span `[start, end]` with `start <= end`.
///
/// Fields are private so an interval can only be built through [`Interval::new`],
/// which rejects reversed spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, rejecting `start > end`.
    ///
    /// Zero-length intervals (`start == end`) are accepted: a calendar event with
    /// no duration still blocks the instant it sits on.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(SlotError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Build an interval only when it has positive length.
    pub(crate) fn positive(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// The smallest interval covering both `self` and `other`, assuming they touch.
    pub(crate) fn hull(&self, other: &Interval) -> Interval {
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// True when `other` starts no later than this interval ends.
    ///
    /// Touching intervals (`self.end == other.start`) count as overlapping, so
    /// back-to-back events coalesce into one busy block.
    pub(crate) fn reaches(&self, other: &Interval) -> bool {
        self.end >= other.start
    }
}

/// A free meeting slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    pub(crate) fn from_bounds(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

impl From<Interval> for FreeSlot {
    fn from(interval: Interval) -> Self {
        FreeSlot::from_bounds(interval.start, interval.end)
    }
}
