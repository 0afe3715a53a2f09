//! Command-line arguments and plain-text rendering for the binary.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};

use study_planner::config::PlannerConfig;
use study_planner::dates::parse_date;
use study_planner::models::{CapacityPolicy, PlanOutcome, StudyTask};
use study_planner::scheduler::StudyPlanner;
use study_planner::store::TaskList;
use study_planner::validation::ensure_valid_tasks;

/// Plan study time across tasks with due dates
///
/// Tasks are kept in a JSON file. `plan` spreads each task's remaining
/// hours over the days before its due date without exceeding the daily
/// budget, and lists tasks that cannot be finished in time.
#[derive(Parser, Debug)]
#[command(version, about, name = "study-planner")]
pub struct Args {
    /// Path to the task file
    #[arg(long, global = true, default_value = "tasks.json")]
    pub tasks: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task name
        name: String,
        /// Due date (YYYY-MM-DD), default one week from today
        #[arg(long, value_parser = parse_day)]
        due: Option<NaiveDate>,
        /// Earliest day to work on it (YYYY-MM-DD)
        #[arg(long, value_parser = parse_day)]
        start: Option<NaiveDate>,
        /// Estimated hours
        #[arg(long, default_value_t = 5.0)]
        hours: f64,
        /// Priority, 1 = high
        #[arg(long, default_value_t = StudyTask::DEFAULT_PRIORITY)]
        priority: u32,
    },
    /// List tasks
    #[command(alias = "ls")]
    List {
        /// Show archived tasks instead
        #[arg(long)]
        archived: bool,
    },
    /// Record hours completed on a task
    Progress {
        /// Task number as shown by `list`
        index: usize,
        /// Hours completed
        hours: f64,
    },
    /// Delete a task permanently
    Remove { index: usize },
    /// Hide a task from planning
    Archive { index: usize },
    /// Bring an archived task back
    Restore { index: usize },
    /// Generate the day-by-day plan
    Plan(PlanArgs),
}

/// Capacity and window options for `plan`.
#[derive(ClapArgs, Debug)]
pub struct PlanArgs {
    /// Hours per day, every day
    #[arg(long, conflicts_with_all = ["weekday_cap", "weekend_cap"])]
    pub cap: Option<f64>,
    /// Hours per weekday (with --weekend-cap)
    #[arg(long, requires = "weekend_cap")]
    pub weekday_cap: Option<f64>,
    /// Hours per Saturday/Sunday (with --weekday-cap)
    #[arg(long, requires = "weekday_cap")]
    pub weekend_cap: Option<f64>,
    /// First day to schedule (YYYY-MM-DD), default today
    #[arg(long, value_parser = parse_day)]
    pub start: Option<NaiveDate>,
    /// JSON config file with capacity and schedule start
    #[arg(long, conflicts_with_all = ["cap", "weekday_cap", "weekend_cap"])]
    pub config: Option<PathBuf>,
}

impl PlanArgs {
    /// Capacity given on the command line, if any.
    pub fn capacity(&self) -> Option<CapacityPolicy> {
        match (self.cap, self.weekday_cap, self.weekend_cap) {
            (Some(cap), _, _) => Some(CapacityPolicy::flat(cap)),
            (None, Some(weekday), Some(weekend)) => Some(CapacityPolicy::split(weekday, weekend)),
            _ => None,
        }
    }

    /// Builds the planning config from the config file, then applies flags.
    ///
    /// `--start` overrides the file's schedule start; capacity flags and
    /// `--config` are mutually exclusive.
    pub fn resolve_config(&self) -> anyhow::Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => PlannerConfig::from_file(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => PlannerConfig::default(),
        };
        if let Some(capacity) = self.capacity() {
            config.capacity = capacity;
        }
        if let Some(start) = self.start {
            config.schedule_start = Some(start);
        }
        config.validate().context("Capacity settings rejected")?;
        Ok(config)
    }
}

/// Validates `tasks` and plans them under the options in `args`.
///
/// Tasks are checked as loaded; hand-edited or migrated files never
/// passed through [`TaskList::add`].
pub fn plan_tasks(
    tasks: &[StudyTask],
    args: &PlanArgs,
    today: NaiveDate,
) -> anyhow::Result<PlanOutcome> {
    let config = args.resolve_config()?;
    ensure_valid_tasks(tasks).context("Task file holds invalid tasks")?;
    Ok(StudyPlanner::from_config(&config).plan_with_config(tasks, &config, today))
}

fn parse_day(input: &str) -> Result<NaiveDate, String> {
    parse_date(input).map_err(|e| e.to_string())
}

/// Renders tasks as numbered lines.
pub fn render_tasks<'a>(tasks: impl Iterator<Item = (usize, &'a StudyTask)>) -> String {
    let mut out = String::new();
    for (index, task) in tasks {
        let _ = write!(
            out,
            "#{index} {} (P{}) due {}: {:.1}h remaining",
            task.name,
            task.priority,
            task.due_date,
            task.remaining_hours()
        );
        if let Some(start) = task.start_date {
            let _ = write!(out, ", from {start}");
        }
        out.push('\n');
    }
    if out.is_empty() {
        out.push_str("No tasks yet. Add one!\n");
    }
    out
}

/// Renders warnings first, then one section per day.
pub fn render_outcome(outcome: &PlanOutcome) -> String {
    let mut out = String::new();
    for warning in &outcome.warnings {
        let _ = writeln!(out, "! {warning}");
    }
    if outcome.plan.is_empty() {
        out.push_str("Nothing to schedule (either no tasks or all done).\n");
        return out;
    }
    for (day, items) in outcome.plan.iter() {
        let _ = writeln!(out, "{day} ({})", day.format("%a"));
        for item in items {
            let _ = writeln!(out, "  - {}: {}h", item.task_name, item.hours);
        }
    }
    out
}

/// Renders one summary line for the list header.
pub fn render_summary(list: &TaskList) -> String {
    let remaining: f64 = list
        .active()
        .map(|(_, task)| task.remaining_hours())
        .sum();
    format!(
        "{} task(s), {} archived, {:.1}h remaining\n",
        list.len(),
        list.archived().count(),
        remaining
    )
}
