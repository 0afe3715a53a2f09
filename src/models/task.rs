//! Study task model.
//!
//! A task is a body of effort (hours) that must be spread over calendar
//! days between its start date and its due date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A unit of study work to be planned.
///
/// Tasks are owned by the caller's store; the planner only ever borrows
/// a snapshot and never mutates it.
///
/// # Effort
/// `remaining_hours()` is derived from `estimated_hours - done_hours` on
/// every call, so it cannot go stale between planning runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyTask {
    /// Display label (not guaranteed unique).
    pub name: String,
    /// Earliest day eligible for allocation. `None` = from schedule start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Day by which all remaining effort must be consumed (inclusive).
    pub due_date: NaiveDate,
    /// Total effort required (hours).
    pub estimated_hours: f64,
    /// Effort already completed (hours).
    #[serde(default)]
    pub done_hours: f64,
    /// Urgency class, 1 = highest.
    pub priority: u32,
    /// Archived tasks stay in the store but are never planned.
    #[serde(default)]
    pub archived: bool,
}

impl StudyTask {
    /// Default priority for new tasks (middle of the 1..=3 range).
    pub const DEFAULT_PRIORITY: u32 = 2;

    /// Creates a task with the given name, due date and estimate.
    pub fn new(name: impl Into<String>, due_date: NaiveDate, estimated_hours: f64) -> Self {
        Self {
            name: name.into(),
            start_date: None,
            due_date,
            estimated_hours,
            done_hours: 0.0,
            priority: Self::DEFAULT_PRIORITY,
            archived: false,
        }
    }

    /// Sets the priority (1 = highest).
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the earliest eligible day.
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets hours already completed.
    pub fn with_done_hours(mut self, done_hours: f64) -> Self {
        self.done_hours = done_hours;
        self
    }

    /// Effort still to be planned: `max(0, estimated - done)`.
    pub fn remaining_hours(&self) -> f64 {
        (self.estimated_hours - self.done_hours).max(0.0)
    }

    /// Whether the task takes part in planning.
    pub fn is_active(&self) -> bool {
        !self.archived && self.remaining_hours() > 0.0
    }

    /// First day the task may receive hours, given the schedule start.
    ///
    /// Never earlier than `schedule_start`.
    pub fn effective_start(&self, schedule_start: NaiveDate) -> NaiveDate {
        self.start_date
            .map_or(schedule_start, |start| start.max(schedule_start))
    }

    /// Adds completed hours, clamped to the estimate.
    pub fn log_progress(&mut self, hours: f64) {
        self.done_hours = (self.done_hours + hours).min(self.estimated_hours);
    }
}
