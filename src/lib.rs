//! Study-time planner.
//!
//! Spreads the remaining effort of study tasks over calendar days under
//! a daily hours budget, and reports the tasks that cannot be finished
//! before their due dates.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `StudyTask`, `CapacityPolicy`, `DayCapacity`,
//!   `Plan`, `Allocation`, `Shortfall`, `PlanOutcome`
//! - **`dispatching`**: Ordering rules (EDD, priority) and the rule engine
//! - **`scheduler`**: The greedy `StudyPlanner` and `PlanKpi` metrics
//! - **`validation`**: Input checks callers run before planning
//! - **`repository`**: Snapshot load/save with schema migration
//! - **`store`**: Add / progress / remove / archive / restore on a snapshot
//! - **`config`**: Capacity and schedule-start settings
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use study_planner::models::{CapacityPolicy, StudyTask};
//! use study_planner::scheduler::StudyPlanner;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let tasks = vec![StudyTask::new("Thesis", today.succ_opt().unwrap(), 10.0)];
//!
//! let outcome = StudyPlanner::new(CapacityPolicy::flat(3.0)).plan(&tasks, today);
//! assert_eq!(outcome.plan.total_hours(), 6.0);
//! assert_eq!(outcome.warnings[0].short_hours, 4.0);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Jackson (1955), earliest-due-date sequencing

pub mod config;
pub mod dates;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod repository;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{PlannerError, Result};
