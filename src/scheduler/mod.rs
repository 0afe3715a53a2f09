//! Greedy planner and plan metrics.
//!
//! # Algorithm
//!
//! `StudyPlanner` spreads each task's remaining hours over the days
//! before its due date, in due-date/priority order, never exceeding a
//! day's capacity. It is a single greedy pass, not an optimizer.
//!
//! # KPI
//!
//! `PlanKpi` summarizes allocated hours, shortfall, and daily utilization.

mod kpi;
mod planner;

pub use kpi::PlanKpi;
pub use planner::{round_hours, StudyPlanner};
