//! Input validation for planning problems.
//!
//! The planner never validates: it trusts its caller. Callers (the task
//! list, the CLI) run these checks first. Detects:
//! - Empty task names
//! - Negative or non-finite hours
//! - Priority 0 (priorities start at 1)
//! - Start date after due date
//! - Negative or non-finite capacity

use crate::error::{PlannerError, Result};
use crate::models::{CapacityPolicy, StudyTask};

/// Validation result.
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Task name is empty or whitespace.
    EmptyName,
    /// Estimated or done hours are negative, NaN, or infinite.
    InvalidHours,
    /// Priority is 0.
    InvalidPriority,
    /// Start date falls after the due date.
    InvertedWindow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a task list.
///
/// Checks every task and collects all issues. Messages identify tasks
/// by position since names need not be unique.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[StudyTask]) -> ValidationResult {
    let mut errors = Vec::new();

    for (index, task) in tasks.iter().enumerate() {
        if task.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Task #{index} has an empty name"),
            ));
        }

        for (field, value) in [
            ("estimated_hours", task.estimated_hours),
            ("done_hours", task.done_hours),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidHours,
                    format!("Task #{index} ('{}') has invalid {field}: {value}", task.name),
                ));
            }
        }

        if task.priority == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPriority,
                format!("Task #{index} ('{}') has priority 0", task.name),
            ));
        }

        if let Some(start) = task.start_date {
            if start > task.due_date {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvertedWindow,
                    format!(
                        "Task #{index} ('{}') starts {start} after its due date {}",
                        task.name, task.due_date
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Like [`validate_tasks`], folded into a [`PlannerError`].
pub fn ensure_valid_tasks(tasks: &[StudyTask]) -> Result<()> {
    validate_tasks(tasks).map_err(PlannerError::Validation)
}

/// Rejects negative or non-finite capacity values.
pub fn validate_capacity(policy: &CapacityPolicy) -> Result<()> {
    let values = match *policy {
        CapacityPolicy::Flat { hours_per_day } => vec![("hours_per_day", hours_per_day)],
        CapacityPolicy::Split {
            weekday_hours,
            weekend_hours,
        } => vec![
            ("weekday_hours", weekday_hours),
            ("weekend_hours", weekend_hours),
        ],
    };

    for (field, value) in values {
        if !value.is_finite() || value < 0.0 {
            return Err(PlannerError::InvalidCapacity {
                reason: format!("{field} must be a non-negative number, got {value}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn sample_tasks() -> Vec<StudyTask> {
        vec![
            StudyTask::new("Essay", day(10), 5.0).with_priority(1),
            StudyTask::new("Lab", day(12), 3.0)
                .with_start_date(day(5))
                .with_done_hours(1.0),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_tasks(&sample_tasks()).is_ok());
        assert!(validate_tasks(&[]).is_ok());
    }

    #[test]
    fn test_empty_name() {
        let tasks = vec![StudyTask::new("   ", day(10), 1.0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyName);
    }

    #[test]
    fn test_invalid_hours() {
        let tasks = vec![
            StudyTask::new("neg", day(10), -1.0),
            StudyTask::new("nan", day(10), f64::NAN),
            StudyTask::new("done", day(10), 2.0).with_done_hours(-0.5),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidHours));
        assert!(errors[2].message.contains("done_hours"));
    }

    #[test]
    fn test_invalid_priority() {
        let tasks = vec![StudyTask::new("T", day(10), 1.0).with_priority(0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidPriority));
    }

    #[test]
    fn test_inverted_window() {
        let tasks = vec![StudyTask::new("T", day(10), 1.0).with_start_date(day(11))];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvertedWindow);
        assert!(errors[0].message.contains("2024-03-11"));
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![
            StudyTask::new("", day(10), 1.0),
            StudyTask::new("T", day(10), -3.0).with_priority(0),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_ensure_valid_tasks_wraps_errors() {
        let tasks = vec![StudyTask::new("", day(10), 1.0)];
        let err = ensure_valid_tasks(&tasks).unwrap_err();
        assert!(matches!(err, PlannerError::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn test_capacity() {
        assert!(validate_capacity(&CapacityPolicy::flat(3.0)).is_ok());
        assert!(validate_capacity(&CapacityPolicy::split(3.0, 0.0)).is_ok());
        assert!(validate_capacity(&CapacityPolicy::flat(-1.0)).is_err());
        assert!(validate_capacity(&CapacityPolicy::split(f64::INFINITY, 1.0)).is_err());

        let err = validate_capacity(&CapacityPolicy::split(3.0, -2.0)).unwrap_err();
        assert!(err.to_string().contains("weekend_hours"));
    }
}
