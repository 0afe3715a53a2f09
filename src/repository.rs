//! Task persistence.
//!
//! Repositories hand out owned snapshots and accept whole snapshots back;
//! nothing outside a repository holds a live reference into storage.
//!
//! # File format
//!
//! Version 2 (current) is a JSON document:
//!
//! ```json
//! { "version": 2, "tasks": [ { "name": "Essay", "due_date": "2024-03-10", ... } ] }
//! ```
//!
//! Version 1 is a bare JSON array of records that may lack `done_hours`
//! and always lacks `start_date` and `archived`. It is migrated on load
//! and rewritten as version 2 on the next save.
//!
//! # Corruption
//! A file that cannot be decoded is moved aside to
//! `<file>.broken_<YYYYMMDD_HHMMSS>.bak` and loading continues with an
//! empty list.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Local, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlannerError, Result};
use crate::models::StudyTask;

/// Schema version written by [`JsonFileRepository::save`].
pub const CURRENT_VERSION: u32 = 2;

/// Load/save access to the task store.
pub trait TaskRepository {
    /// Returns a snapshot of all stored tasks.
    fn load(&self) -> Result<Vec<StudyTask>>;

    /// Replaces the stored tasks with `tasks`.
    fn save(&self, tasks: &[StudyTask]) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskFile {
    version: u32,
    tasks: Vec<StudyTask>,
}

/// Record layout of version 1 files.
///
/// A stored `remaining_hours` is ignored; it is always derived.
#[derive(Debug, Deserialize)]
struct LegacyTaskV1 {
    name: String,
    due_date: NaiveDate,
    estimated_hours: f64,
    #[serde(default)]
    done_hours: Option<f64>,
    priority: u32,
}

impl From<LegacyTaskV1> for StudyTask {
    fn from(legacy: LegacyTaskV1) -> Self {
        StudyTask {
            name: legacy.name,
            start_date: None,
            due_date: legacy.due_date,
            estimated_hours: legacy.estimated_hours,
            done_hours: legacy.done_hours.unwrap_or(0.0),
            priority: legacy.priority,
            archived: false,
        }
    }
}

/// Why a stored document could not be turned into tasks.
enum DecodeError {
    /// Unreadable: back up and start fresh.
    Corrupt(String),
    /// Readable but from a newer schema: refuse to touch it.
    Unsupported(u32),
}

fn decode_document(raw: &str) -> std::result::Result<Vec<StudyTask>, DecodeError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| DecodeError::Corrupt(e.to_string()))?;

    if value.is_array() {
        let legacy: Vec<LegacyTaskV1> =
            serde_json::from_value(value).map_err(|e| DecodeError::Corrupt(e.to_string()))?;
        debug!("Migrating {} version 1 task record(s)", legacy.len());
        return Ok(legacy.into_iter().map(StudyTask::from).collect());
    }
    if !value.is_object() {
        return Err(DecodeError::Corrupt(format!(
            "expected an array or object, found {value}"
        )));
    }

    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| DecodeError::Corrupt("missing version".to_string()))?;
    let version = u32::try_from(version).unwrap_or(u32::MAX);
    if version > CURRENT_VERSION {
        return Err(DecodeError::Unsupported(version));
    }
    let file: TaskFile =
        serde_json::from_value(value).map_err(|e| DecodeError::Corrupt(e.to_string()))?;
    Ok(file.tasks)
}

/// JSON file task store.
///
/// Assumes a single writer.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Creates a repository backed by `path` (the file need not exist).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PlannerError {
        PlannerError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Name the corrupt file is moved to.
    fn backup_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".broken_{stamp}.bak"));
        PathBuf::from(name)
    }

    fn move_aside(&self) {
        let backup = self.backup_path();
        match fs::rename(&self.path, &backup) {
            Ok(()) => warn!(
                "Moved unreadable task file {} to {}",
                self.path.display(),
                backup.display()
            ),
            Err(e) => warn!(
                "Could not back up unreadable task file {}: {e}",
                self.path.display()
            ),
        }
    }
}

impl TaskRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<StudyTask>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No task file at {}; starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        match decode_document(&raw) {
            Ok(tasks) => {
                debug!("Loaded {} task(s) from {}", tasks.len(), self.path.display());
                Ok(tasks)
            }
            Err(DecodeError::Unsupported(version)) => {
                Err(PlannerError::UnsupportedVersion { version })
            }
            Err(DecodeError::Corrupt(reason)) => {
                warn!("Task file {} is unreadable: {reason}", self.path.display());
                self.move_aside();
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[StudyTask]) -> Result<()> {
        let file = TaskFile {
            version: CURRENT_VERSION,
            tasks: tasks.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        let mut staging = self.path.as_os_str().to_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, json).map_err(|e| self.io_error(e))?;
        fs::rename(&staging, &self.path).map_err(|e| self.io_error(e))?;
        debug!("Saved {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }
}

/// Process-local task store.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tasks: Mutex<Vec<StudyTask>>,
}

impl InMemoryRepository {
    /// Creates a store seeded with `tasks`.
    pub fn new(tasks: Vec<StudyTask>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }
}

impl TaskRepository for InMemoryRepository {
    fn load(&self) -> Result<Vec<StudyTask>> {
        let tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        Ok(tasks.clone())
    }

    fn save(&self, tasks: &[StudyTask]) -> Result<()> {
        let mut stored = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        *stored = tasks.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn sample_tasks() -> Vec<StudyTask> {
        let mut archived = StudyTask::new("Old", day(1), 2.0);
        archived.archived = true;
        vec![
            StudyTask::new("Essay", day(10), 5.0).with_priority(1),
            StudyTask::new("Lab", day(12), 3.0)
                .with_start_date(day(5))
                .with_done_hours(1.0),
            archived,
        ]
    }

    fn backups(dir: &TempDir) -> Vec<String> {
        fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains(".broken_") && name.ends_with(".bak"))
            .collect()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("tasks.json"));
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("tasks.json"));
        let tasks = sample_tasks();

        repo.save(&tasks).unwrap();
        assert_eq!(repo.load().unwrap(), tasks);

        let raw = fs::read_to_string(repo.path()).unwrap();
        assert!(raw.contains("\"version\": 2"));
        assert!(!dir.path().join("tasks.json.tmp").exists());
    }

    #[test]
    fn test_legacy_array_migrated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[
                {"name": "Essay", "due_date": "2024-03-10", "estimated_hours": 5.0, "priority": 1},
                {"name": "Lab", "due_date": "2024-03-12", "estimated_hours": 3, "done_hours": 1.5,
                 "priority": 2, "remaining_hours": 99.0}
            ]"#,
        )
        .unwrap();

        let repo = JsonFileRepository::new(&path);
        let tasks = repo.load().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].done_hours, 0.0);
        assert_eq!(tasks[0].start_date, None);
        assert!(!tasks[0].archived);
        assert_eq!(tasks[1].estimated_hours, 3.0);
        assert!((tasks[1].remaining_hours() - 1.5).abs() < 1e-10);

        // Next save upgrades the file
        repo.save(&tasks).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.trim_start().starts_with('{'));
        assert_eq!(repo.load().unwrap(), tasks);
    }

    #[test]
    fn test_corrupt_file_backed_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "[{\"name\": \"Essay\", ").unwrap();

        let repo = JsonFileRepository::new(&path);
        assert!(repo.load().unwrap().is_empty());
        assert!(!path.exists());

        let found = backups(&dir);
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with("tasks.json.broken_"));
        let backup = fs::read_to_string(dir.path().join(&found[0])).unwrap();
        assert_eq!(backup, "[{\"name\": \"Essay\", ");
    }

    #[test]
    fn test_schema_mismatch_treated_as_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, r#"[{"title": "no name or dates"}]"#).unwrap();

        let repo = JsonFileRepository::new(&path);
        assert!(repo.load().unwrap().is_empty());
        assert_eq!(backups(&dir).len(), 1);
    }

    #[test]
    fn test_newer_version_rejected_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, r#"{"version": 9, "tasks": []}"#).unwrap();

        let repo = JsonFileRepository::new(&path);
        let err = repo.load().unwrap_err();
        assert!(matches!(err, PlannerError::UnsupportedVersion { version: 9 }));
        assert!(path.exists());
        assert!(backups(&dir).is_empty());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nope").join("tasks.json"));
        let err = repo.save(&sample_tasks()).unwrap_err();
        assert!(matches!(err, PlannerError::Io { .. }));
    }

    #[test]
    fn test_in_memory_snapshots_are_independent() {
        let repo = InMemoryRepository::new(sample_tasks());
        let mut snapshot = repo.load().unwrap();
        snapshot[0].log_progress(5.0);

        assert_eq!(repo.load().unwrap()[0].done_hours, 0.0);
        repo.save(&snapshot).unwrap();
        assert_eq!(repo.load().unwrap()[0].done_hours, 5.0);
    }
}
