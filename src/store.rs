//! Task list operations.
//!
//! A [`TaskList`] owns one snapshot loaded from a repository. Edits are
//! made on the snapshot and written back with [`TaskList::save`]. Tasks
//! are addressed by position, as names need not be unique.

use log::info;

use crate::error::{PlannerError, Result};
use crate::models::StudyTask;
use crate::repository::TaskRepository;
use crate::validation::{ensure_valid_tasks, ValidationError, ValidationErrorKind};

/// An editable snapshot of the task store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<StudyTask>,
}

impl TaskList {
    /// Wraps an existing snapshot.
    pub fn new(tasks: Vec<StudyTask>) -> Self {
        Self { tasks }
    }

    /// Loads a snapshot from `repo`.
    pub fn load(repo: &dyn TaskRepository) -> Result<Self> {
        repo.load().map(Self::new)
    }

    /// Writes the snapshot back to `repo`.
    pub fn save(&self, repo: &dyn TaskRepository) -> Result<()> {
        repo.save(&self.tasks)
    }

    /// All tasks, archived included.
    pub fn tasks(&self) -> &[StudyTask] {
        &self.tasks
    }

    /// Number of tasks, archived included.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the list holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task at `index`.
    pub fn get(&self, index: usize) -> Result<&StudyTask> {
        self.tasks
            .get(index)
            .ok_or(PlannerError::TaskNotFound { index })
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut StudyTask> {
        self.tasks
            .get_mut(index)
            .ok_or(PlannerError::TaskNotFound { index })
    }

    /// Validates and appends a task, returning its index.
    ///
    /// The name is trimmed before validation. A new task must carry a
    /// positive estimate.
    pub fn add(&mut self, mut task: StudyTask) -> Result<usize> {
        task.name = task.name.trim().to_string();
        ensure_valid_tasks(std::slice::from_ref(&task))?;
        if task.estimated_hours <= 0.0 {
            return Err(PlannerError::Validation(vec![ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!(
                    "New task '{}' needs a positive estimate, got {}",
                    task.name, task.estimated_hours
                ),
            )]));
        }
        info!("Added task '{}' due {}", task.name, task.due_date);
        self.tasks.push(task);
        Ok(self.tasks.len() - 1)
    }

    /// Records completed hours; `done_hours` never exceeds the estimate.
    pub fn log_progress(&mut self, index: usize, hours: f64) -> Result<&StudyTask> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(PlannerError::Validation(vec![ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!("Progress must be a non-negative number of hours, got {hours}"),
            )]));
        }
        let task = self.get_mut(index)?;
        task.log_progress(hours);
        info!(
            "Logged {hours}h on '{}' ({:.1}h remaining)",
            task.name,
            task.remaining_hours()
        );
        Ok(task)
    }

    /// Deletes a task for good, returning it.
    pub fn remove(&mut self, index: usize) -> Result<StudyTask> {
        self.get(index)?;
        let task = self.tasks.remove(index);
        info!("Removed task '{}'", task.name);
        Ok(task)
    }

    /// Hides a task from planning without deleting it.
    pub fn archive(&mut self, index: usize) -> Result<()> {
        self.set_archived(index, true)
    }

    /// Brings an archived task back into planning.
    pub fn restore(&mut self, index: usize) -> Result<()> {
        self.set_archived(index, false)
    }

    fn set_archived(&mut self, index: usize, archived: bool) -> Result<()> {
        let task = self.get_mut(index)?;
        task.archived = archived;
        info!(
            "{} task '{}'",
            if archived { "Archived" } else { "Restored" },
            task.name
        );
        Ok(())
    }

    /// `(index, task)` pairs of non-archived tasks.
    pub fn active(&self) -> impl Iterator<Item = (usize, &StudyTask)> {
        self.tasks.iter().enumerate().filter(|(_, t)| !t.archived)
    }

    /// `(index, task)` pairs of archived tasks.
    pub fn archived(&self) -> impl Iterator<Item = (usize, &StudyTask)> {
        self.tasks.iter().enumerate().filter(|(_, t)| t.archived)
    }
}
