//! ptz - Focus-area priorities with enforced work-in-progress limits
//!
//! Command-line front end: every command is one load, optional mutation and
//! save of the project's data file.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use ptz::dates::{self, parse_date};
use ptz::priority::{check, resolve_area, IssueSummary, NewTask, Patch, TaskUpdate};
use ptz::{
    render_check, render_dashboard, DashboardView, DataStore, ProjectConfig, PtzError, Result,
    TaskStatus,
};

#[derive(Parser)]
#[command(name = "ptz")]
#[command(version)]
#[command(about = "Rank focus areas and keep work in progress small", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    project: PathBuf,

    /// Data file to use instead of the configured one (relative to the project)
    #[arg(long, global = true, env = "PTZ_DATA")]
    data: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, env = "PTZ_TODAY", hide = true, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard
    Show {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Add a focus area at the lowest priority
    AddFocus {
        /// Focus area name
        name: String,
    },

    /// Remove a focus area and all of its tasks
    RemoveFocus {
        /// Focus area name or slug
        name: String,
    },

    /// Move a focus area to a new position
    ReorderFocus {
        /// Focus area name or slug
        name: String,

        /// New position, starting at 1
        #[arg(short, long)]
        position: usize,
    },

    /// Make a focus area this week's focus and move it to the top
    SetWeeklyFocus {
        /// Focus area name or slug
        name: String,
    },

    /// Add a task to a focus area
    AddTask {
        /// Focus area name or slug
        focus: String,

        /// Task name
        task: String,

        /// Initial status
        #[arg(short, long, value_enum, default_value = "pending")]
        status: StatusArg,

        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        due: Option<NaiveDate>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Change a task's status, name, due date or notes
    UpdateTask {
        /// Focus area name or slug
        focus: String,

        /// Task name or slug
        task: String,

        /// New status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// New due date (YYYY-MM-DD); an empty value clears it
        #[arg(long, value_parser = parse_due_patch)]
        due: Option<Patch<NaiveDate>>,

        /// New notes; an empty value clears them
        #[arg(long)]
        notes: Option<String>,

        /// New task name
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a task
    RemoveTask {
        /// Focus area name or slug
        focus: String,

        /// Task name or slug
        task: String,
    },

    /// Run integrity checks; exits non-zero when errors are found
    Check {
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Task status as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusArg {
    Pending,
    #[value(alias = "in_progress")]
    InProgress,
    Done,
    Blocked,
}

impl From<StatusArg> for TaskStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => TaskStatus::Pending,
            StatusArg::InProgress => TaskStatus::InProgress,
            StatusArg::Done => TaskStatus::Done,
            StatusArg::Blocked => TaskStatus::Blocked,
        }
    }
}

fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).map_err(|e| format!("expected a date like 2026-10-19: {e}"))
}

fn parse_due_patch(s: &str) -> std::result::Result<Patch<NaiveDate>, String> {
    if s.trim().is_empty() {
        Ok(Patch::Clear)
    } else {
        parse_date_arg(s).map(Patch::Set)
    }
}

fn notes_patch(notes: String) -> Patch<String> {
    if notes.is_empty() {
        Patch::Clear
    } else {
        Patch::Set(notes)
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let filter = if cli.verbose { "ptz=debug,info" } else { "ptz=warn" };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Resolve project path
    let project_path = cli.project.canonicalize().unwrap_or(cli.project.clone());
    if !project_path.is_dir() {
        return Err(PtzError::config(format!(
            "Project directory does not exist: {}",
            project_path.display()
        )));
    }

    let config = ProjectConfig::load(&project_path)?;
    let data_path = match &cli.data {
        Some(path) => ProjectConfig::resolve_path(&project_path, path),
        None => config.data_path(&project_path),
    };
    let store = DataStore::new(&data_path);
    let today = cli.today.unwrap_or_else(dates::today);
    let limits = &config.limits;

    debug!(
        data = %data_path.display(),
        %today,
        max_in_progress = limits.max_in_progress,
        red_zone_start = limits.red_zone_start,
        "resolved settings"
    );

    let ok = "OK".green().bold();

    match cli.command {
        Commands::Show { json } => {
            let data = store.load()?;
            if json {
                let view = DashboardView::build(&data, today, limits);
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!(
                    "{}",
                    render_dashboard(&data, today, limits, &config.dashboard)
                );
            }
        }

        Commands::AddFocus { name } => {
            let position = store.update(|data| data.add_focus_area(&name))?;
            println!("{ok} Added focus area: {name} (position {position})");
        }

        Commands::RemoveFocus { name } => {
            let removed = store.update(|data| data.remove_focus_area(&name))?;
            println!("{ok} Removed focus area: {}", removed.name);
        }

        Commands::ReorderFocus { name, position } => {
            let moved = store.update(|data| {
                data.reorder_focus_area(&name, position)
                    .map(|area| area.name.clone())
            })?;
            println!("{ok} Moved {moved} to position {position}");
        }

        Commands::SetWeeklyFocus { name } => {
            let area = store.update(|data| {
                data.set_weekly_focus(&name, today)
                    .map(|focus| focus.area.clone())
            })?;
            println!("{ok} Set weekly focus: {area}");
        }

        Commands::AddTask {
            focus,
            task,
            status,
            due,
            notes,
        } => {
            let new_task = NewTask {
                name: task,
                status: status.into(),
                due,
                notes,
            };
            let (task, area) = store.update(|data| {
                let task = data.add_task(&focus, new_task, today, limits)?.name.clone();
                let area = resolve_area(data, &focus).map_or_else(|| focus.clone(), |a| a.name.clone());
                Ok((task, area))
            })?;
            println!("{ok} Added task \"{task}\" to {area}");
        }

        Commands::UpdateTask {
            focus,
            task,
            status,
            due,
            notes,
            name,
        } => {
            let update = TaskUpdate {
                name,
                status: status.map(Into::into),
                due,
                notes: notes.map(notes_patch),
            };
            if update.is_empty() {
                eprintln!(
                    "{} No changes given; use --status, --due, --notes or --name",
                    "Warning:".yellow().bold()
                );
            }
            let updated = store.update(|data| {
                data.update_task(&focus, &task, update, today, limits)
                    .map(|t| t.name.clone())
            })?;
            println!("{ok} Updated: {updated}");
        }

        Commands::RemoveTask { focus, task } => {
            let removed = store.update(|data| data.remove_task(&focus, &task))?;
            println!("{ok} Removed: {}", removed.name);
        }

        Commands::Check { json } => {
            let data = store.load()?;
            let issues = check(&data, today, limits);
            if json {
                println!("{}", serde_json::to_string_pretty(&issues)?);
            } else {
                print!("{}", render_check(&issues));
            }

            let summary = IssueSummary::from_issues(&issues);
            if summary.has_errors() {
                return Err(PtzError::IntegrityFailed {
                    errors: summary.errors,
                });
            }
        }
    }

    Ok(())
}
