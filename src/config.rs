//! Planner configuration.
//!
//! A small serde document naming the capacity policy and, optionally, a
//! fixed schedule start. Without a fixed start the caller's "today" is
//! used.
//!
//! ```json
//! { "capacity": { "kind": "split", "weekday_hours": 3.0, "weekend_hours": 1.0 } }
//! ```

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::CapacityPolicy;
use crate::validation::validate_capacity;

/// Capacity and window settings for a planning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Daily hours budget.
    #[serde(default)]
    pub capacity: CapacityPolicy,
    /// First day eligible for allocation. `None` = today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_start: Option<NaiveDate>,
}

impl PlannerConfig {
    /// Creates a config with the given capacity and no fixed start.
    pub fn new(capacity: CapacityPolicy) -> Self {
        Self {
            capacity,
            schedule_start: None,
        }
    }

    /// Pins the schedule start.
    pub fn with_schedule_start(mut self, start: NaiveDate) -> Self {
        self.schedule_start = Some(start);
        self
    }

    /// Schedule start, falling back to `today`.
    pub fn schedule_start_or(&self, today: NaiveDate) -> NaiveDate {
        self.schedule_start.unwrap_or(today)
    }

    /// Checks the capacity values.
    pub fn validate(&self) -> Result<()> {
        validate_capacity(&self.capacity)
    }

    /// Reads and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PlannerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.capacity, CapacityPolicy::flat(3.0));
        assert_eq!(config.schedule_start, None);
        assert_eq!(config.schedule_start_or(day(4)), day(4));
    }

    #[test]
    fn test_pinned_start() {
        let config = PlannerConfig::new(CapacityPolicy::flat(2.0)).with_schedule_start(day(1));
        assert_eq!(config.schedule_start_or(day(4)), day(1));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"capacity":{{"kind":"split","weekday_hours":3.0,"weekend_hours":0.0}},"schedule_start":"2024-03-04"}}"#
        )
        .unwrap();

        let config = PlannerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.capacity, CapacityPolicy::split(3.0, 0.0));
        assert_eq!(config.schedule_start, Some(day(4)));
    }

    #[test]
    fn test_from_file_rejects_negative_capacity() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"capacity":{{"kind":"flat","hours_per_day":-1.0}}}}"#).unwrap();

        let err = PlannerConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidCapacity { .. }));
    }

    #[test]
    fn test_from_missing_file() {
        let err = PlannerConfig::from_file("/nonexistent/planner.json").unwrap_err();
        assert!(matches!(err, PlannerError::Io { .. }));
    }
}
