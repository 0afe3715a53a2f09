//! Daily capacity models.
//!
//! A [`CapacityPolicy`] says how many study hours a calendar day offers.
//! A [`DayCapacity`] table materializes the policy over a date range and
//! tracks what is left as hours are allocated.
//!
//! # Weekends
//! Saturday and Sunday use the weekend value of a split policy.
//! A day with capacity 0 never receives hours.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{days_inclusive, is_weekend};

/// Hours available per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Same budget every day.
    Flat { hours_per_day: f64 },
    /// Separate budgets for Monday–Friday and Saturday–Sunday.
    Split { weekday_hours: f64, weekend_hours: f64 },
}

impl CapacityPolicy {
    /// Default daily budget (hours).
    pub const DEFAULT_HOURS: f64 = 3.0;

    /// Flat policy.
    pub fn flat(hours_per_day: f64) -> Self {
        Self::Flat { hours_per_day }
    }

    /// Weekday/weekend split policy.
    pub fn split(weekday_hours: f64, weekend_hours: f64) -> Self {
        Self::Split {
            weekday_hours,
            weekend_hours,
        }
    }

    /// Capacity for a given day.
    pub fn hours_for(&self, day: NaiveDate) -> f64 {
        match *self {
            Self::Flat { hours_per_day } => hours_per_day,
            Self::Split {
                weekday_hours,
                weekend_hours,
            } => {
                if is_weekend(day) {
                    weekend_hours
                } else {
                    weekday_hours
                }
            }
        }
    }
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self::flat(Self::DEFAULT_HOURS)
    }
}

/// Remaining capacity per day over a contiguous date range.
///
/// Days outside the range have no capacity at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayCapacity {
    remaining: BTreeMap<NaiveDate, f64>,
}

impl DayCapacity {
    /// Builds the table for every day in `[first, last]`.
    ///
    /// Empty when `first > last`.
    pub fn build(policy: &CapacityPolicy, first: NaiveDate, last: NaiveDate) -> Self {
        let remaining = days_inclusive(first, last)
            .map(|day| (day, policy.hours_for(day)))
            .collect();
        Self { remaining }
    }

    /// Hours still free on `day` (0 when outside the table).
    pub fn remaining(&self, day: NaiveDate) -> f64 {
        self.remaining.get(&day).copied().unwrap_or(0.0)
    }

    /// Consumes up to `hours` on `day`, returning the amount actually taken.
    ///
    /// Capacity never goes below zero.
    pub fn take(&mut self, day: NaiveDate, hours: f64) -> f64 {
        match self.remaining.get_mut(&day) {
            Some(left) if *left > 0.0 && hours > 0.0 => {
                let taken = left.min(hours);
                *left -= taken;
                taken
            }
            _ => 0.0,
        }
    }

    /// Whether `day` lies inside the table range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.remaining.contains_key(&day)
    }

    /// Number of days in the table.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Whether the table covers no days.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Sum of remaining capacity across all days.
    pub fn total_remaining(&self) -> f64 {
        self.remaining.values().sum()
    }
}
