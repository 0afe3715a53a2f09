//! Built-in ordering rules.
//!
//! - **Due-date**: EDD
//! - **Priority**: PRIORITY
//! - **Effort**: LEAST_REMAINING
//!
//! # Score Convention
//! All rules return lower scores for tasks that should be processed first.

use chrono::Datelike;

use super::{OrderingRule, RuleScore};
use crate::models::StudyTask;

/// Earliest Due Date.
///
/// Tasks due sooner claim capacity first. The score is the due date's
/// day number in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy)]
pub struct Edd;

impl OrderingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, task: &StudyTask) -> RuleScore {
        task.due_date.num_days_from_ce() as f64
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Task priority.
///
/// Priority 1 is the most urgent, so the raw value is already a score.
#[derive(Debug, Clone, Copy)]
pub struct Priority;

impl OrderingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, task: &StudyTask) -> RuleScore {
        task.priority as f64
    }

    fn description(&self) -> &'static str {
        "Task Priority (1 = highest)"
    }
}

/// Least Remaining effort.
///
/// Smaller tasks first; finishes more tasks when capacity is scarce.
#[derive(Debug, Clone, Copy)]
pub struct LeastRemaining;

impl OrderingRule for LeastRemaining {
    fn name(&self) -> &'static str {
        "LEAST_REMAINING"
    }

    fn evaluate(&self, task: &StudyTask) -> RuleScore {
        task.remaining_hours()
    }

    fn description(&self) -> &'static str {
        "Least Remaining Hours"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_task(name: &str, due_day: u32, hours: f64, priority: u32) -> StudyTask {
        let due = NaiveDate::from_ymd_opt(2024, 3, due_day).unwrap();
        StudyTask::new(name, due, hours).with_priority(priority)
    }

    #[test]
    fn test_edd() {
        let early = make_task("early", 5, 1.0, 3);
        let late = make_task("late", 20, 1.0, 1);
        assert!(Edd.evaluate(&early) < Edd.evaluate(&late));
        assert_eq!(Edd.evaluate(&late) - Edd.evaluate(&early), 15.0);
    }

    #[test]
    fn test_priority() {
        let urgent = make_task("urgent", 5, 1.0, 1);
        let relaxed = make_task("relaxed", 5, 1.0, 3);
        assert!(Priority.evaluate(&urgent) < Priority.evaluate(&relaxed));
    }

    #[test]
    fn test_least_remaining_uses_done_hours() {
        let big = make_task("big", 5, 10.0, 1).with_done_hours(9.0);
        let small = make_task("small", 5, 2.0, 1);
        assert!(LeastRemaining.evaluate(&big) < LeastRemaining.evaluate(&small));
    }

    #[test]
    fn test_rule_metadata() {
        assert_eq!(Edd.name(), "EDD");
        assert_eq!(Edd.description(), "Earliest Due Date");
        assert_eq!(Priority.name(), "PRIORITY");
        assert_eq!(LeastRemaining.name(), "LEAST_REMAINING");
    }
}
