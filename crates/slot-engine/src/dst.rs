//! Day-advance policy for daily-window tiling, and wall-clock resolution.
//!
//! Tiling walks a free gap one day at a time. Whether "the next day" means
//! 24 hours of absolute time or the next calendar date at the same wall-clock
//! time only matters across a DST transition, so the choice is explicit here.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// How the tiler steps from one day's window to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayStep {
    /// Add exactly 24 hours to the current day's window start, falling back to
    /// the next calendar date when that would revisit the same local date.
    #[default]
    FixedDuration,
    /// Move to the next calendar date at the daily-window start time.
    CalendarDay,
}

impl DayStep {
    /// Compute the anchor for the day after the one whose window opened at
    /// `day_start`.
    pub fn advance(self, day_start: DateTime<Utc>, daily_start: NaiveTime, tz: Tz) -> DateTime<Utc> {
        match self {
            DayStep::FixedDuration => {
                let next = day_start + Duration::hours(24);
                // Across a fall-back, +24h can land on the same local date again.
                if local_date(next, tz) > local_date(day_start, tz) {
                    next
                } else {
                    DayStep::CalendarDay.advance(day_start, daily_start, tz)
                }
            }
            DayStep::CalendarDay => {
                let next_date = local_date(day_start, tz) + Duration::days(1);
                // A nonexistent wall-clock start still lands on the next date,
                // where the tiler skips the day.
                at_wall_clock(next_date, daily_start, tz)
                    .unwrap_or(day_start + Duration::hours(24))
            }
        }
    }
}

/// Resolve a local date and wall-clock time in `tz` to a UTC instant.
///
/// Returns `None` when the time falls in a spring-forward gap. Ambiguous
/// fall-back times resolve to the earlier instant.
pub fn at_wall_clock(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}
