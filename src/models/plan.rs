//! Plan (solution) model.
//!
//! A plan maps calendar days to the study blocks placed on them. Tasks
//! that could not be fully placed before their due date are reported
//! as [`Shortfall`]s alongside the plan.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Hours placed on one day for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Position of the task in the planner's input slice.
    pub task_index: usize,
    /// Task display name (denormalized for rendering).
    pub task_name: String,
    /// Allocated hours, rounded to 2 decimal places.
    pub hours: f64,
}

impl Allocation {
    /// Creates a new allocation.
    pub fn new(task_index: usize, task_name: impl Into<String>, hours: f64) -> Self {
        Self {
            task_index,
            task_name: task_name.into(),
            hours,
        }
    }
}

/// Day-by-day study plan.
///
/// Days iterate in chronological order. Within a day, allocations keep
/// the order in which tasks were processed. A day is present only if it
/// holds at least one allocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    days: BTreeMap<NaiveDate, Vec<Allocation>>,
}

impl Plan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an allocation to `day`.
    ///
    /// Days enter the plan only through here, so none is ever empty.
    pub fn push(&mut self, day: NaiveDate, allocation: Allocation) {
        self.days.entry(day).or_default().push(allocation);
    }

    /// Allocations on a day (empty slice if none).
    pub fn allocations_on(&self, day: NaiveDate) -> &[Allocation] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates `(day, allocations)` in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[Allocation])> {
        self.days.iter().map(|(day, items)| (*day, items.as_slice()))
    }

    /// Scheduled days in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    /// Total hours placed on a day.
    pub fn hours_on(&self, day: NaiveDate) -> f64 {
        self.allocations_on(day).iter().map(|a| a.hours).sum()
    }

    /// Total hours placed for the task at `task_index`.
    pub fn hours_for_task(&self, task_index: usize) -> f64 {
        self.days
            .values()
            .flatten()
            .filter(|a| a.task_index == task_index)
            .map(|a| a.hours)
            .sum()
    }

    /// Total hours across the whole plan.
    pub fn total_hours(&self) -> f64 {
        self.days.values().flatten().map(|a| a.hours).sum()
    }

    /// Number of scheduled days.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// First scheduled day.
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    /// Last scheduled day.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }
}

/// A task that could not be fully placed before its due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    /// Position of the task in the planner's input slice.
    pub task_index: usize,
    /// Task display name.
    pub task_name: String,
    /// Unplaced hours, rounded to 2 decimal places.
    pub short_hours: f64,
    /// The task's due date.
    pub due_date: NaiveDate,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Not enough time for {}: short by {:.2} hours before {}.",
            self.task_name, self.short_hours, self.due_date
        )
    }
}

/// Result of one planning call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanOutcome {
    /// Day-by-day allocations.
    pub plan: Plan,
    /// One entry per task that ran out of days.
    pub warnings: Vec<Shortfall>,
}

impl PlanOutcome {
    /// Whether every active task was fully placed.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Shortfall reported for the task at `task_index`, if any.
    pub fn shortfall_for(&self, task_index: usize) -> Option<&Shortfall> {
        self.warnings.iter().find(|w| w.task_index == task_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_plan_queries() {
        let mut plan = Plan::new();
        plan.push(day(5), Allocation::new(0, "A", 3.0));
        plan.push(day(4), Allocation::new(1, "B", 1.5));
        plan.push(day(4), Allocation::new(0, "A", 1.0));

        assert_eq!(plan.day_count(), 2);
        assert_eq!(plan.first_day(), Some(day(4)));
        assert_eq!(plan.last_day(), Some(day(5)));
        assert!((plan.hours_on(day(4)) - 2.5).abs() < 1e-10);
        assert!((plan.hours_for_task(0) - 4.0).abs() < 1e-10);
        assert!((plan.total_hours() - 5.5).abs() < 1e-10);

        // Insertion order within a day is kept
        let names: Vec<_> = plan
            .allocations_on(day(4))
            .iter()
            .map(|a| a.task_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A"]);

        // Chronological iteration
        let days: Vec<_> = plan.days().collect();
        assert_eq!(days, vec![day(4), day(5)]);
    }

    #[test]
    fn test_allocations_on_missing_day() {
        let plan = Plan::new();
        assert!(plan.allocations_on(day(1)).is_empty());
        assert_eq!(plan.hours_on(day(1)), 0.0);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_only_pushed_days_present() {
        let mut plan = Plan::new();
        plan.push(day(6), Allocation::new(0, "A", 1.0));
        plan.push(day(4), Allocation::new(1, "B", 2.0));
        assert_eq!(plan.days().collect::<Vec<_>>(), vec![day(4), day(6)]);
        assert!(plan.iter().all(|(_, items)| !items.is_empty()));
        assert_eq!(plan.day_count(), 2);
    }

    #[test]
    fn test_shortfall_display() {
        let w = Shortfall {
            task_index: 0,
            task_name: "Thesis".into(),
            short_hours: 4.0,
            due_date: day(5),
        };
        assert_eq!(
            w.to_string(),
            "Not enough time for Thesis: short by 4.00 hours before 2024-03-05."
        );
    }

    #[test]
    fn test_outcome_shortfall_lookup() {
        let outcome = PlanOutcome {
            plan: Plan::new(),
            warnings: vec![Shortfall {
                task_index: 2,
                task_name: "C".into(),
                short_hours: 1.0,
                due_date: day(5),
            }],
        };
        assert!(!outcome.is_complete());
        assert!(outcome.shortfall_for(2).is_some());
        assert!(outcome.shortfall_for(0).is_none());
    }
}
