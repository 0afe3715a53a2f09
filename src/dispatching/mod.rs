//! Ordering rules and rule engine for the planner.
//!
//! The planner is greedy: whichever task is processed first gets first
//! pick of every day's capacity. The order is decided here by composable
//! rules, applied one after another until a tie is broken.
//!
//! # Usage
//!
//! ```
//! use study_planner::dispatching::RuleEngine;
//! use study_planner::dispatching::rules;
//!
//! // Earliest due date first, then more urgent priority first
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Edd)
//!     .with_rule(rules::Priority);
//! assert_eq!(engine.rule_names(), vec!["EDD", "PRIORITY"]);
//! ```

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::StudyTask;
use std::fmt::Debug;

/// Score returned by an ordering rule.
///
/// Lower scores = processed earlier.
pub type RuleScore = f64;

/// A rule that scores tasks for processing order.
///
/// # Score Convention
/// **Lower score = processed first.** A rule returns smaller values for
/// tasks that should claim capacity before others.
pub trait OrderingRule: Send + Sync + Debug {
    /// Rule name (e.g., "EDD").
    fn name(&self) -> &'static str;

    /// Scores a task. Lower = earlier.
    fn evaluate(&self, task: &StudyTask) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
