//! Whole-dataset integrity checks.
//!
//! The checker is diagnostic: it runs against whatever is loaded, including
//! data edited by hand into an invalid state, and only reports. Issues come
//! out in a fixed order so reports are reproducible:
//!
//! 1. WIP overflow (at most one)
//! 2. In-progress tasks in the red zone
//! 3. Overdue tasks
//! 4. Stale tasks
//!
//! Within each scan, tasks are visited area by area in rank order.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Limits;
use crate::model::{Dataset, TaskStatus};

/// Severity of an integrity issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// Should be looked at; does not fail `ptz check`.
    Warn,
    /// A rule is broken; fails `ptz check`.
    Error,
}

impl fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Which scan produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    WipOverflow,
    RedZone,
    Overdue,
    Stale,
}

/// Slugs of the task an issue is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub area: String,
    pub task: String,
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub level: IssueLevel,
    pub kind: IssueKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskRef>,
}

impl Issue {
    fn new(level: IssueLevel, kind: IssueKind, message: String) -> Self {
        Self {
            level,
            kind,
            message,
            task: None,
        }
    }

    fn about(mut self, area: &str, task: &str) -> Self {
        self.task = Some(TaskRef {
            area: area.to_string(),
            task: task.to_string(),
        });
        self
    }

    /// Whether this issue fails the check.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Run every scan over `data` as of `today`.
#[must_use]
pub fn check(data: &Dataset, today: NaiveDate, limits: &Limits) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(check_wip(data, limits));
    issues.extend(check_red_zone(data, limits));
    issues.extend(check_overdue(data, today));
    issues.extend(check_stale(data, today, limits));
    issues
}

fn check_wip(data: &Dataset, limits: &Limits) -> Option<Issue> {
    let count = data.in_progress_count();
    (count > limits.max_in_progress).then(|| {
        Issue::new(
            IssueLevel::Error,
            IssueKind::WipOverflow,
            format!(
                "WIP limit exceeded: {count} in-progress tasks (max {})",
                limits.max_in_progress
            ),
        )
    })
}

fn check_red_zone(data: &Dataset, limits: &Limits) -> Vec<Issue> {
    data.focus_areas
        .iter_ranked()
        .filter(|(pos, _)| limits.in_red_zone(*pos))
        .flat_map(|(pos, area)| {
            area.tasks_with(TaskStatus::InProgress).map(move |task| {
                Issue::new(
                    IssueLevel::Error,
                    IssueKind::RedZone,
                    format!(
                        "In-progress task in red zone: \"{}\" in {} (position {pos})",
                        task.name, area.name
                    ),
                )
                .about(&area.slug, &task.slug)
            })
        })
        .collect()
}

fn check_overdue(data: &Dataset, today: NaiveDate) -> Vec<Issue> {
    data.tasks()
        .filter_map(|(area, task)| {
            let due = task.due.filter(|_| task.is_overdue(today))?;
            Some(
                Issue::new(
                    IssueLevel::Warn,
                    IssueKind::Overdue,
                    format!("Overdue: \"{}\" in {} (due: {due})", task.name, area.name),
                )
                .about(&area.slug, &task.slug),
            )
        })
        .collect()
}

fn check_stale(data: &Dataset, today: NaiveDate, limits: &Limits) -> Vec<Issue> {
    // A threshold reaching past the calendar leaves nothing stale.
    let Some(cutoff) = TimeDelta::try_days(limits.stale_after_days)
        .and_then(|threshold| today.checked_sub_signed(threshold))
    else {
        return Vec::new();
    };
    data.tasks()
        .filter(|(_, task)| !task.status.is_done() && task.status_since < cutoff)
        .map(|(area, task)| {
            Issue::new(
                IssueLevel::Warn,
                IssueKind::Stale,
                format!(
                    "Stale: \"{}\" in {} ({} since {})",
                    task.name, area.name, task.status, task.status_since
                ),
            )
            .about(&area.slug, &task.slug)
        })
        .collect()
}

/// Error and warning counts for a list of issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl IssueSummary {
    /// Count issues by level.
    #[must_use]
    pub fn from_issues(issues: &[Issue]) -> Self {
        let errors = issues.iter().filter(|i| i.is_error()).count();
        Self {
            errors,
            warnings: issues.len() - errors,
        }
    }

    /// Whether any issue fails the check.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
