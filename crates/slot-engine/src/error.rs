//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SlotError {
    #[error("Invalid search window: {0}")]
    InvalidWindow(String),

    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid datetime: {0}")]
    InvalidDateTime(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Unknown project: {0}")]
    UnknownProject(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
