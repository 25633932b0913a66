//! # slot-engine
//!
//! Find common free meeting slots across many participants' calendars.
//!
//! Given every busy interval of the invited users and project, a date range, a
//! repeating daily clock range (e.g. 09:00–18:00) and a meeting length, the
//! engine returns each span in which nobody is busy, clipped to the daily range
//! and at least the meeting length long.
//!
//! ```rust
//! use chrono::{Duration, NaiveTime, TimeZone, Utc};
//! use slot_engine::{compute_free_slots, Interval, SearchWindow};
//!
//! let busy = vec![Interval::new(
//!     Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap(),
//! )
//! .unwrap()];
//! let window = SearchWindow::new(
//!     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap(),
//!     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
//!     Duration::minutes(30),
//!     chrono_tz::UTC,
//! )
//! .unwrap();
//!
//! let slots = compute_free_slots(&busy, &window);
//! assert_eq!(slots.len(), 1);
//! assert_eq!(slots[0].duration_minutes, 7 * 60);
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — `Interval` (busy span) and `FreeSlot` (result)
//! - [`window`] — validated `SearchWindow`
//! - [`freebusy`] — filter, merge and invert busy intervals into free gaps
//! - [`tile`] — clip free gaps to the daily window and minimum duration
//! - [`finder`] — the full pipeline
//! - [`dst`] — day-advance policy and wall-clock resolution
//! - [`availability`] — gather busy intervals from users' and projects' calendars
//! - [`query`] — JSON request/response binding
//! - [`error`] — Error types

pub mod availability;
pub mod dst;
pub mod error;
pub mod finder;
pub mod freebusy;
pub mod interval;
pub mod query;
pub mod tile;
pub mod window;

pub use availability::{gather_busy, CalendarSource, EventStream, InMemorySource};
pub use dst::DayStep;
pub use error::SlotError;
pub use finder::{compute_free_slots, find_first_free_slot, find_free_slots};
pub use interval::{FreeSlot, Interval};
pub use query::{SlotQuery, SlotResponse};
pub use window::SearchWindow;
