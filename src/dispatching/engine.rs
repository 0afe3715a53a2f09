//! Rule engine for multi-criteria task ordering.
//!
//! Applies rules in sequence: the next rule is consulted only when the
//! previous ones tie. Sorting is stable, so tasks that tie on every rule
//! keep their input order unless a final tie-breaker says otherwise.

use std::sync::Arc;

use super::rules::{Edd, Priority};
use super::{OrderingRule, RuleScore};
use crate::models::StudyTask;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order (stable sort).
    #[default]
    InputOrder,
    /// Lexicographic by task name.
    ByName,
}

/// A composable rule engine for task ordering.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use study_planner::dispatching::RuleEngine;
/// use study_planner::models::StudyTask;
///
/// let due = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let tasks = vec![
///     StudyTask::new("later", due.succ_opt().unwrap(), 2.0).with_priority(1),
///     StudyTask::new("minor", due, 2.0).with_priority(3),
///     StudyTask::new("major", due, 2.0).with_priority(1),
/// ];
/// let order = RuleEngine::study_default().sort_indices(&tasks);
/// assert_eq!(order, vec![2, 1, 0]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn OrderingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine (keeps input order).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// Earliest due date first, then lower priority number first.
    pub fn study_default() -> Self {
        Self::new().with_rule(Edd).with_rule(Priority)
    }

    /// Appends a rule; later rules only break ties of earlier ones.
    pub fn with_rule<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts tasks into processing order.
    ///
    /// Returns indices into the given slice.
    pub fn sort_indices(&self, tasks: &[StudyTask]) -> Vec<usize> {
        self.sort_selected(tasks, (0..tasks.len()).collect())
    }

    /// Sorts a subset of `tasks`, given by index, into processing order.
    pub fn sort_selected(&self, tasks: &[StudyTask], mut indices: Vec<usize>) -> Vec<usize> {
        indices.sort_by(|&a, &b| self.compare(&tasks[a], &tasks[b]));
        indices
    }

    /// Scores a single task with every rule.
    pub fn evaluate(&self, task: &StudyTask) -> Vec<RuleScore> {
        self.rules.iter().map(|r| r.evaluate(task)).collect()
    }

    fn compare(&self, a: &StudyTask, b: &StudyTask) -> std::cmp::Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a);
            let score_b = rule.evaluate(b);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal);
            }
        }

        match &self.tie_breaker {
            TieBreaker::InputOrder => std::cmp::Ordering::Equal,
            TieBreaker::ByName => a.name.cmp(&b.name),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::study_default()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
