//! The search window of a free-slot query.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::dst::DayStep;
use crate::error::{Result, SlotError};

/// Longest meeting that can be requested.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Date range, repeating daily clock range, and minimum meeting length.
///
/// Only constructible through [`SearchWindow::new`], so every window the
/// pipeline sees already satisfies:
///
/// - `date_start <= date_end`
/// - `daily_start <= daily_end` (no overnight daily windows)
/// - `0 < min_duration <= 24h`
#[derive(Debug, Clone, PartialEq)]
pub struct SearchWindow {
    date_start: DateTime<Utc>,
    date_end: DateTime<Utc>,
    daily_start: NaiveTime,
    daily_end: NaiveTime,
    min_duration: Duration,
    timezone: Tz,
    day_step: DayStep,
}

impl SearchWindow {
    /// Validate and build a search window.
    ///
    /// `timezone` anchors the daily clock range; every day's window is
    /// `daily_start..daily_end` wall-clock time in that zone.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidWindow` if any of the invariants above fail.
    pub fn new(
        date_start: DateTime<Utc>,
        date_end: DateTime<Utc>,
        daily_start: NaiveTime,
        daily_end: NaiveTime,
        min_duration: Duration,
        timezone: Tz,
    ) -> Result<Self> {
        if date_start > date_end {
            return Err(SlotError::InvalidWindow(
                "date must start before end".to_string(),
            ));
        }
        if daily_start > daily_end {
            return Err(SlotError::InvalidWindow(
                "time must start before end".to_string(),
            ));
        }
        if min_duration <= Duration::zero() {
            return Err(SlotError::InvalidWindow(
                "duration must be positive".to_string(),
            ));
        }
        if min_duration > Duration::minutes(MAX_DURATION_MINUTES) {
            return Err(SlotError::InvalidWindow(
                "duration cannot last more than 24 hours".to_string(),
            ));
        }

        Ok(Self {
            date_start,
            date_end,
            daily_start,
            daily_end,
            min_duration,
            timezone,
            day_step: DayStep::default(),
        })
    }

    /// Replace the day-advance policy used while tiling.
    pub fn with_day_step(mut self, day_step: DayStep) -> Self {
        self.day_step = day_step;
        self
    }

    pub fn date_start(&self) -> DateTime<Utc> {
        self.date_start
    }

    pub fn date_end(&self) -> DateTime<Utc> {
        self.date_end
    }

    pub fn daily_start(&self) -> NaiveTime {
        self.daily_start
    }

    pub fn daily_end(&self) -> NaiveTime {
        self.daily_end
    }

    pub fn min_duration(&self) -> Duration {
        self.min_duration
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn day_step(&self) -> DayStep {
        self.day_step
    }
}
