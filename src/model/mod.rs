//! Focus-area data model.
//!
//! ```text
//! Dataset
//!   ├── weekly_focus: Option<WeeklyFocus>   (by-name reference)
//!   ├── focus_areas: RankedList<FocusArea>  (order is priority)
//!   │     └── tasks: Vec<Task>
//!   └── time_off: Vec<TimeOff>              (informational)
//! ```

mod ranked;
mod slug;

pub use ranked::RankedList;
pub use slug::{generate_slug, slug_stem};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Task Status
// ============================================================================

/// Lifecycle status of a task.
///
/// Any status may follow any other; only entering `InProgress` is gated by
/// the constraint validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending,
    /// Actively being worked on; counts against the WIP limit
    InProgress,
    /// Finished
    Done,
    /// Waiting on something outside the task
    Blocked,
}

impl TaskStatus {
    /// Persisted spelling of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
        }
    }

    /// Check if this status is terminal.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected pending, in_progress, done or blocked)")]
pub struct ParseStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            "blocked" => Ok(TaskStatus::Blocked),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

// ============================================================================
// Task
// ============================================================================

/// A unit of work owned by exactly one focus area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier, unique within the owning area
    pub slug: String,
    /// Display name
    pub name: String,
    /// Current status
    pub status: TaskStatus,
    /// Date `status` last changed
    pub status_since: NaiveDate,
    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    /// Optional free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Task {
    /// Whether the task is past due on `today` and still open.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_done() && self.due.is_some_and(|due| due < today)
    }
}

// ============================================================================
// Focus Area
// ============================================================================

/// A named category of tasks whose rank sets its priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusArea {
    /// Stable identifier, unique across the dataset
    pub slug: String,
    /// Display name
    pub name: String,
    /// Owned tasks, in insertion order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl FocusArea {
    /// Tasks with the given status.
    pub fn tasks_with(&self, status: TaskStatus) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    /// Number of tasks not yet done.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.status.is_done()).count()
    }
}

// ============================================================================
// Weekly Focus & Time Off
// ============================================================================

/// The area designated as this week's top priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyFocus {
    /// Display name of the referenced focus area
    pub area: String,
    /// Monday of the week the focus was set
    pub week_of: NaiveDate,
}

/// A planned absence. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOff {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub description: String,
}

// ============================================================================
// Dataset
// ============================================================================

/// Root aggregate of everything ptz tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Current weekly focus, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_focus: Option<WeeklyFocus>,
    /// Focus areas in priority order
    #[serde(default)]
    pub focus_areas: RankedList<FocusArea>,
    /// Planned time off
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_off: Vec<TimeOff>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over every task with its owning area, area-then-task order.
    pub fn tasks(&self) -> impl Iterator<Item = (&FocusArea, &Task)> {
        self.focus_areas
            .iter()
            .flat_map(|area| area.tasks.iter().map(move |task| (area, task)))
    }

    /// Number of tasks with the given status across all areas.
    #[must_use]
    pub fn count_status(&self, status: TaskStatus) -> usize {
        self.tasks().filter(|(_, t)| t.status == status).count()
    }

    /// Number of tasks currently in progress.
    #[must_use]
    pub fn in_progress_count(&self) -> usize {
        self.count_status(TaskStatus::InProgress)
    }

    /// Time off whose end is on or after `today`.
    pub fn upcoming_time_off(&self, today: NaiveDate) -> impl Iterator<Item = &TimeOff> {
        self.time_off.iter().filter(move |t| t.end >= today)
    }
}
