//! JSON binding for common-slot queries.
//!
//! Mirrors the web request format of the scheduling backend: dates as
//! `YY-MM-DD`, daily times as `HH:MM`, the meeting length in whole minutes, and
//! busy events as ISO 8601 instants. The response is `{"slots": [...]}` with
//! instants rendered in the query timezone.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::availability::{gather_busy, EventStream, InMemorySource};
use crate::dst::{at_wall_clock, DayStep};
use crate::error::{Result, SlotError};
use crate::finder::compute_free_slots;
use crate::interval::{FreeSlot, Interval};
use crate::window::{SearchWindow, MAX_DURATION_MINUTES};

/// Timezone the backend was deployed in; used when a caller names none.
pub const DEFAULT_TIMEZONE: &str = "Asia/Singapore";

const DATE_LAYOUT: &str = "%y-%m-%d";
const TIME_LAYOUT: &str = "%H:%M";

/// The last day of the range runs until 23:59 local time.
const END_OF_DAY_MINUTES: i64 = 23 * 60 + 59;

/// A busy event as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    pub start: String,
    pub end: String,
}

impl EventInput {
    /// Parse both instants and build a validated interval.
    pub fn to_interval(&self) -> Result<Interval> {
        Interval::new(parse_datetime(&self.start)?, parse_datetime(&self.end)?)
    }
}

/// Calendars keyed by owner, resolved through `userids` and `projectid`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Calendars {
    #[serde(default)]
    pub users: HashMap<String, Vec<EventInput>>,
    #[serde(default)]
    pub projects: HashMap<String, Vec<EventInput>>,
}

/// A common-slot query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    #[serde(default, rename = "projectid", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, rename = "userids")]
    pub user_ids: Vec<String>,
    pub date_start: String,
    pub date_end: String,
    pub time_start: String,
    pub time_end: String,
    /// Meeting length in minutes.
    pub duration: i64,
    /// Busy events not tied to any listed participant.
    #[serde(default)]
    pub events: Vec<EventInput>,
    #[serde(default)]
    pub calendars: Calendars,
}

/// A slot as returned over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotOutput {
    pub start: String,
    pub end: String,
    pub duration_minutes: i64,
}

impl SlotOutput {
    /// Render a slot with its instants in `tz`.
    pub fn from_slot(slot: &FreeSlot, tz: Tz) -> Self {
        Self {
            start: slot.start.with_timezone(&tz).to_rfc3339(),
            end: slot.end.with_timezone(&tz).to_rfc3339(),
            duration_minutes: slot.duration_minutes,
        }
    }
}

/// Response body of a common-slot query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotResponse {
    pub slots: Vec<SlotOutput>,
}

impl SlotQuery {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SlotError::InvalidQuery(e.to_string()))
    }

    /// Build the validated search window in `tz`.
    ///
    /// `dateStart` is midnight of its day; `dateEnd` is 23:59 of its day.
    pub fn search_window(&self, tz: Tz) -> Result<SearchWindow> {
        let date_start = parse_date(&self.date_start, tz)?;
        let date_end = parse_date(&self.date_end, tz)? + Duration::minutes(END_OF_DAY_MINUTES);
        let daily_start = parse_time(&self.time_start)?;
        let daily_end = parse_time(&self.time_end)?;

        SearchWindow::new(
            date_start,
            date_end,
            daily_start,
            daily_end,
            meeting_length(self.duration),
            tz,
        )
    }

    /// Every busy interval the query names: loose `events` plus the calendars
    /// of `userids` and `projectid`.
    pub fn busy_intervals(&self) -> Result<Vec<Interval>> {
        let mut busy = self
            .events
            .iter()
            .map(EventInput::to_interval)
            .collect::<Result<Vec<_>>>()?;

        if self.user_ids.is_empty() && self.project_id.is_none() {
            return Ok(busy);
        }

        let source = self.in_memory_source()?;
        busy.extend(gather_busy(
            &source,
            &self.user_ids,
            self.project_id.as_deref(),
        )?);
        Ok(busy)
    }

    /// Validate the window, gather busy intervals, and compute the slots.
    pub fn run(&self, tz: Tz, day_step: DayStep) -> Result<SlotResponse> {
        let window = self.search_window(tz)?.with_day_step(day_step);
        let busy = self.busy_intervals()?;
        let slots = compute_free_slots(&busy, &window);

        Ok(SlotResponse {
            slots: slots.iter().map(|s| SlotOutput::from_slot(s, tz)).collect(),
        })
    }

    fn in_memory_source(&self) -> Result<InMemorySource> {
        let mut source = InMemorySource::new();
        for (user_id, events) in &self.calendars.users {
            source = source.with_user(EventStream::new(user_id.clone(), to_intervals(events)?));
        }
        for (project_id, events) in &self.calendars.projects {
            source =
                source.with_project(EventStream::new(project_id.clone(), to_intervals(events)?));
        }
        Ok(source)
    }
}

/// Convert the requested minutes into a `Duration` without overflowing.
///
/// Values outside `0..=MAX_DURATION_MINUTES + 1` are clamped to the nearest
/// out-of-range bound, so `SearchWindow::new` still rejects them with the
/// matching message.
fn meeting_length(minutes: i64) -> Duration {
    Duration::minutes(minutes.clamp(0, MAX_DURATION_MINUTES + 1))
}

fn to_intervals(events: &[EventInput]) -> Result<Vec<Interval>> {
    events.iter().map(EventInput::to_interval).collect()
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Parse a `YY-MM-DD` date into the instant of local midnight in `tz`.
pub fn parse_date(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, DATE_LAYOUT)
        .map_err(|e| SlotError::InvalidDate(format!("'{}': {}", s, e)))?;
    at_wall_clock(date, NaiveTime::MIN, tz)
        .ok_or_else(|| SlotError::InvalidDate(format!("'{}': midnight does not exist in {}", s, tz)))
}

/// Parse an `HH:MM` wall-clock time.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_LAYOUT)
        .map_err(|e| SlotError::InvalidTime(format!("'{}': {}", s, e)))
}

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 with an offset or `Z` (including JavaScript's
/// `toISOString()` millisecond form) and naive `YYYY-MM-DDTHH:MM:SS`, which is
/// read as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| SlotError::InvalidDateTime(format!("'{}': {}", s, e)))
}
