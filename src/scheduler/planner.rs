//! Greedy day-by-day allocation planner.
//!
//! # Algorithm
//!
//! 1. Keep active tasks (not archived, remaining hours > 0).
//! 2. Build a capacity table for `[schedule_start, latest due date]`.
//! 3. Order tasks with the rule engine (default: EDD, then priority).
//! 4. For each task, walk days from its effective start to its due date,
//!    taking `min(day capacity, remaining)` on every day that has room.
//! 5. Report whatever is left at the due date as a shortfall.
//!
//! There is no backtracking: hours claimed by an earlier task are never
//! handed back to a later one.
//!
//! # Complexity
//! O(n log n + n * d) where n = tasks, d = days in the window.

use chrono::NaiveDate;
use log::debug;

use crate::config::PlannerConfig;
use crate::dates::days_inclusive;
use crate::dispatching::RuleEngine;
use crate::models::{Allocation, CapacityPolicy, DayCapacity, PlanOutcome, Shortfall, StudyTask};

/// Remaining hours or capacity at or below this are treated as zero.
const HOURS_EPSILON: f64 = 1e-9;

/// Rounds hours to 2 decimal places.
#[inline]
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Greedy study-time planner.
///
/// Pure: every call builds a fresh capacity table from its inputs and
/// keeps nothing between calls.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use study_planner::models::{CapacityPolicy, StudyTask};
/// use study_planner::scheduler::StudyPlanner;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let due = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
/// let tasks = vec![StudyTask::new("Essay", due, 5.0)];
///
/// let planner = StudyPlanner::new(CapacityPolicy::flat(3.0));
/// let outcome = planner.plan(&tasks, start);
///
/// assert_eq!(outcome.plan.hours_on(start), 3.0);
/// assert_eq!(outcome.plan.hours_on(start.succ_opt().unwrap()), 2.0);
/// assert!(outcome.warnings.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct StudyPlanner {
    capacity: CapacityPolicy,
    rule_engine: RuleEngine,
}

impl StudyPlanner {
    /// Creates a planner with the default ordering (EDD, then priority).
    pub fn new(capacity: CapacityPolicy) -> Self {
        Self {
            capacity,
            rule_engine: RuleEngine::study_default(),
        }
    }

    /// Creates a planner from configuration.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Replaces the ordering rules.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// The capacity policy in use.
    pub fn capacity(&self) -> &CapacityPolicy {
        &self.capacity
    }

    /// Plans `tasks` starting on `schedule_start`.
    ///
    /// Allocations and shortfalls refer to tasks by their index in `tasks`.
    pub fn plan(&self, tasks: &[StudyTask], schedule_start: NaiveDate) -> PlanOutcome {
        let mut outcome = PlanOutcome::default();

        let active: Vec<usize> = tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.is_active())
            .map(|(index, _)| index)
            .collect();

        let Some(last_due) = active.iter().map(|&i| tasks[i].due_date).max() else {
            debug!("No active tasks among {}; nothing to plan", tasks.len());
            return outcome;
        };

        let mut capacity = DayCapacity::build(&self.capacity, schedule_start, last_due);
        debug!(
            "Planning {} active task(s) over {} day(s) from {schedule_start} to {last_due}",
            active.len(),
            capacity.len()
        );

        for index in self.rule_engine.sort_selected(tasks, active) {
            let task = &tasks[index];
            let mut left = task.remaining_hours();

            for day in days_inclusive(task.effective_start(schedule_start), task.due_date) {
                if left <= HOURS_EPSILON {
                    break;
                }
                if capacity.remaining(day) <= HOURS_EPSILON {
                    continue;
                }
                let taken = capacity.take(day, left);
                outcome
                    .plan
                    .push(day, Allocation::new(index, &task.name, round_hours(taken)));
                left -= taken;
            }

            if left > HOURS_EPSILON {
                debug!(
                    "Task #{index} '{}' short by {:.2}h before {}",
                    task.name, left, task.due_date
                );
                outcome.warnings.push(Shortfall {
                    task_index: index,
                    task_name: task.name.clone(),
                    short_hours: round_hours(left),
                    due_date: task.due_date,
                });
            } else {
                debug!("Task #{index} '{}' fully placed", task.name);
            }
        }

        outcome
    }

    /// Plans with the schedule start taken from `config`, or `today`.
    pub fn plan_with_config(
        &self,
        tasks: &[StudyTask],
        config: &PlannerConfig,
        today: NaiveDate,
    ) -> PlanOutcome {
        self.plan(tasks, config.schedule_start_or(today))
    }
}

impl Default for StudyPlanner {
    fn default() -> Self {
        Self::new(CapacityPolicy::default())
    }
}
