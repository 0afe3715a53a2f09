//! study-planner CLI
//!
//! Thin front end over the library: load a snapshot, apply one command,
//! save it back, or print a plan.

mod cli;

use anyhow::{Context, Result};
use chrono::{Days, Local};
use clap::Parser;
use log::info;

use cli::{plan_tasks, render_outcome, render_summary, render_tasks, Args, Commands};
use study_planner::models::StudyTask;
use study_planner::repository::JsonFileRepository;
use study_planner::store::TaskList;

fn main() -> Result<()> {
    env_logger::init();

    let Args { tasks, command } = Args::parse();
    let repo = JsonFileRepository::new(tasks);
    let mut list = TaskList::load(&repo)
        .with_context(|| format!("Failed to load tasks from {}", repo.path().display()))?;
    let today = Local::now().date_naive();

    info!("Loaded {} task(s) from {}", list.len(), repo.path().display());

    match command {
        Some(Commands::Add {
            name,
            due,
            start,
            hours,
            priority,
        }) => {
            let due = due.unwrap_or(today + Days::new(7));
            let mut task = StudyTask::new(name, due, hours).with_priority(priority);
            task.start_date = start;
            let index = list.add(task).context("Task not added")?;
            list.save(&repo).context("Failed to save tasks")?;
            println!("Added task #{index}.");
        }
        Some(Commands::List { archived }) => {
            print!("{}", render_summary(&list));
            if archived {
                print!("{}", render_tasks(list.archived()));
            } else {
                print!("{}", render_tasks(list.active()));
            }
        }
        Some(Commands::Progress { index, hours }) => {
            let task = list.log_progress(index, hours)?;
            println!("{}: {:.1}h remaining.", task.name, task.remaining_hours());
            list.save(&repo).context("Failed to save tasks")?;
        }
        Some(Commands::Remove { index }) => {
            let task = list.remove(index)?;
            list.save(&repo).context("Failed to save tasks")?;
            println!("Deleted {}.", task.name);
        }
        Some(Commands::Archive { index }) => {
            list.archive(index)?;
            list.save(&repo).context("Failed to save tasks")?;
            println!("Archived task #{index}.");
        }
        Some(Commands::Restore { index }) => {
            list.restore(index)?;
            list.save(&repo).context("Failed to save tasks")?;
            println!("Restored task #{index}.");
        }
        Some(Commands::Plan(args)) => {
            let outcome = plan_tasks(list.tasks(), &args, today)?;
            print!("{}", render_outcome(&outcome));
        }
        None => {
            print!("{}", render_summary(&list));
            print!("{}", render_tasks(list.active()));
        }
    }

    Ok(())
}
