//! Plan quality metrics (KPIs).
//!
//! Summarizes a planning outcome against the capacity it was planned with.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Allocated hours | Sum of all placed hours |
//! | Shortfall hours | Sum of all unplaced hours |
//! | Fully-scheduled rate | Tasks without shortfall / tasks planned |
//! | Utilization | Placed hours / day capacity, per scheduled day |
//! | Busiest day | Day with the most placed hours |

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::models::{CapacityPolicy, PlanOutcome};

/// Plan performance indicators.
#[derive(Debug, Clone)]
pub struct PlanKpi {
    /// Hours placed across all days.
    pub allocated_hours: f64,
    /// Hours that did not fit before their due dates.
    pub shortfall_hours: f64,
    /// Days holding at least one allocation.
    pub scheduled_days: usize,
    /// Tasks that appear in the plan or in the warnings.
    pub planned_tasks: usize,
    /// Tasks with a shortfall.
    pub short_tasks: usize,
    /// Fraction of planned tasks placed in full (0.0..1.0).
    pub fully_scheduled_rate: f64,
    /// Per-day utilization (0.0..1.0, days with zero capacity report 0).
    pub utilization_by_day: BTreeMap<NaiveDate, f64>,
    /// Mean utilization over scheduled days.
    pub avg_utilization: f64,
    /// Day with the most placed hours (earliest on ties).
    pub busiest_day: Option<NaiveDate>,
}

impl PlanKpi {
    /// Computes KPIs from an outcome and the policy it was planned with.
    pub fn calculate(outcome: &PlanOutcome, policy: &CapacityPolicy) -> Self {
        let plan = &outcome.plan;

        let mut tasks: BTreeSet<usize> = BTreeSet::new();
        let mut utilization_by_day = BTreeMap::new();
        let mut busiest: Option<(NaiveDate, f64)> = None;

        for (day, items) in plan.iter() {
            tasks.extend(items.iter().map(|a| a.task_index));

            let used: f64 = items.iter().map(|a| a.hours).sum();
            let capacity = policy.hours_for(day);
            let utilization = if capacity > 0.0 {
                (used / capacity).min(1.0)
            } else {
                0.0
            };
            utilization_by_day.insert(day, utilization);

            if busiest.map_or(true, |(_, best)| used > best) {
                busiest = Some((day, used));
            }
        }

        let short_tasks: BTreeSet<usize> =
            outcome.warnings.iter().map(|w| w.task_index).collect();
        tasks.extend(short_tasks.iter().copied());

        let planned_tasks = tasks.len();
        let fully_scheduled_rate = if planned_tasks == 0 {
            1.0
        } else {
            (planned_tasks - short_tasks.len()) as f64 / planned_tasks as f64
        };

        let avg_utilization = if utilization_by_day.is_empty() {
            0.0
        } else {
            utilization_by_day.values().sum::<f64>() / utilization_by_day.len() as f64
        };

        Self {
            allocated_hours: plan.total_hours(),
            shortfall_hours: outcome.warnings.iter().map(|w| w.short_hours).sum(),
            scheduled_days: plan.day_count(),
            planned_tasks,
            short_tasks: short_tasks.len(),
            fully_scheduled_rate,
            utilization_by_day,
            avg_utilization,
            busiest_day: busiest.map(|(day, _)| day),
        }
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_shortfall_hours: f64, min_utilization: f64) -> bool {
        self.shortfall_hours <= max_shortfall_hours && self.avg_utilization >= min_utilization
    }
}
