//! Gathering busy intervals from participants' calendars.
//!
//! The finder only sees a flat list of intervals. Resolving which calendars
//! belong to a meeting (each invited user's personal events plus the project's
//! shared events) happens here, behind the [`CalendarSource`] trait, so any
//! store can plug in.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, SlotError};
use crate::interval::Interval;

/// Lookup of calendar events by owner.
pub trait CalendarSource {
    /// Every event on the personal calendar of `user_id`.
    fn user_events(&self, user_id: &str) -> Result<Vec<Interval>>;

    /// Every event on the shared calendar of `project_id`.
    fn project_events(&self, project_id: &str) -> Result<Vec<Interval>>;
}

/// A named event stream from a single calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct EventStream {
    /// Owner of the stream: a user or project identifier.
    pub stream_id: String,
    pub events: Vec<Interval>,
}

impl EventStream {
    pub fn new(stream_id: impl Into<String>, events: Vec<Interval>) -> Self {
        Self {
            stream_id: stream_id.into(),
            events,
        }
    }
}

/// A [`CalendarSource`] backed by in-memory streams.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    users: HashMap<String, Vec<Interval>>,
    projects: HashMap<String, Vec<Interval>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user's calendar, appending to any events already present.
    pub fn with_user(mut self, stream: EventStream) -> Self {
        self.users
            .entry(stream.stream_id)
            .or_default()
            .extend(stream.events);
        self
    }

    /// Register a project's calendar, appending to any events already present.
    pub fn with_project(mut self, stream: EventStream) -> Self {
        self.projects
            .entry(stream.stream_id)
            .or_default()
            .extend(stream.events);
        self
    }
}

impl CalendarSource for InMemorySource {
    fn user_events(&self, user_id: &str) -> Result<Vec<Interval>> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| SlotError::UnknownUser(user_id.to_string()))
    }

    fn project_events(&self, project_id: &str) -> Result<Vec<Interval>> {
        self.projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| SlotError::UnknownProject(project_id.to_string()))
    }
}

/// Flatten the calendars of `user_ids` and, if given, `project_id` into one busy set.
///
/// Events shared between calendars appear once per calendar; merging later
/// collapses the duplicates.
///
/// # Errors
/// Propagates the first lookup failure from `source`.
pub fn gather_busy<S: CalendarSource + ?Sized>(
    source: &S,
    user_ids: &[String],
    project_id: Option<&str>,
) -> Result<Vec<Interval>> {
    let mut busy = Vec::new();

    for user_id in user_ids {
        busy.extend(source.user_events(user_id)?);
    }
    if let Some(project_id) = project_id {
        busy.extend(source.project_events(project_id)?);
    }

    debug!(
        users = user_ids.len(),
        project = project_id.is_some(),
        events = busy.len(),
        "gathered busy intervals"
    );
    Ok(busy)
}
