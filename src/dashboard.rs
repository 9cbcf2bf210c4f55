//! Text and JSON views of a dataset.
//!
//! [`DashboardView`] is the serializable snapshot behind `ptz show`; the
//! text renderers format it (and integrity issues) for a terminal.

use std::fmt::Write;

use chrono::NaiveDate;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};

use crate::config::{DashboardConfig, Limits};
use crate::model::{Dataset, FocusArea, Task, TaskStatus, TimeOff, WeeklyFocus};
use crate::priority::{check, color_with_red_zone, Issue, IssueSummary, PriorityColor};

/// One focus area as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaView {
    pub position: usize,
    pub slug: String,
    pub name: String,
    pub color: PriorityColor,
    pub weekly_focus: bool,
    /// Tasks not yet done
    pub active: usize,
    pub tasks: Vec<Task>,
}

/// Task counts across every area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub in_progress: usize,
    pub max_in_progress: usize,
    pub pending: usize,
    pub blocked: usize,
    pub done: usize,
}

/// Everything `ptz show` reports, as of one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub today: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_focus: Option<WeeklyFocus>,
    pub areas: Vec<AreaView>,
    pub summary: StatusSummary,
    pub issues: Vec<Issue>,
    pub upcoming_time_off: Vec<TimeOff>,
}

impl DashboardView {
    #[must_use]
    pub fn build(data: &Dataset, today: NaiveDate, limits: &Limits) -> Self {
        let areas = data
            .focus_areas
            .iter_ranked()
            .map(|(position, area)| area_view(data, position, area, limits))
            .collect();

        Self {
            today,
            weekly_focus: data.weekly_focus.clone(),
            areas,
            summary: StatusSummary {
                in_progress: data.count_status(TaskStatus::InProgress),
                max_in_progress: limits.max_in_progress,
                pending: data.count_status(TaskStatus::Pending),
                blocked: data.count_status(TaskStatus::Blocked),
                done: data.count_status(TaskStatus::Done),
            },
            issues: check(data, today, limits),
            upcoming_time_off: data.upcoming_time_off(today).cloned().collect(),
        }
    }
}

fn area_view(data: &Dataset, position: usize, area: &FocusArea, limits: &Limits) -> AreaView {
    let weekly_focus = crate::priority::is_weekly_focus(data, area);
    AreaView {
        position,
        slug: area.slug.clone(),
        name: area.name.clone(),
        color: color_with_red_zone(position, weekly_focus, limits.red_zone_start),
        weekly_focus,
        active: area.active_count(),
        tasks: area.tasks.clone(),
    }
}

fn paint(text: String, color: PriorityColor) -> ColoredString {
    match color {
        PriorityColor::Gold => text.yellow().bold(),
        PriorityColor::Green => text.green(),
        PriorityColor::Yellow => text.yellow(),
        PriorityColor::Red => text.red(),
    }
}

fn level_prefix(issue: &Issue) -> ColoredString {
    let prefix = format!("[{}]", issue.level);
    if issue.is_error() {
        prefix.red().bold()
    } else {
        prefix.yellow()
    }
}

fn due_suffix(task: &Task, today: NaiveDate) -> String {
    match task.due {
        Some(due) if task.is_overdue(today) => format!(" [due: {due}] {}", "OVERDUE".red()),
        Some(due) => format!(" [due: {due}]"),
        None => String::new(),
    }
}

/// Render the dashboard for `ptz show`.
#[must_use]
pub fn render_dashboard(
    data: &Dataset,
    today: NaiveDate,
    limits: &Limits,
    config: &DashboardConfig,
) -> String {
    let view = DashboardView::build(data, today, limits);
    let mut out = String::new();

    let _ = writeln!(out, "{}\n", "=== PTZ Focus Areas ===".bold());

    if let Some(focus) = &view.weekly_focus {
        let _ = writeln!(
            out,
            "Weekly Focus: {} (week of {})\n",
            focus.area.yellow().bold(),
            focus.week_of
        );
    }

    if view.areas.is_empty() {
        let _ = writeln!(out, "No focus areas yet. Add one with: ptz add-focus <name>");
        return out;
    }

    for area in &view.areas {
        render_area(&mut out, area, today, config);
    }

    let summary = &view.summary;
    let _ = writeln!(
        out,
        "Summary: {}/{} in progress, {} pending, {} done",
        summary.in_progress, summary.max_in_progress, summary.pending, summary.done
    );

    if !view.issues.is_empty() {
        let _ = writeln!(out, "\nIssues:");
        for issue in &view.issues {
            let _ = writeln!(out, "  {} {}", level_prefix(issue), issue.message);
        }
    }

    if !view.upcoming_time_off.is_empty() {
        let _ = writeln!(out, "\nUpcoming time off:");
        for off in &view.upcoming_time_off {
            let _ = writeln!(out, "  {} to {}: {}", off.start, off.end, off.description);
        }
    }

    out
}

fn tasks_in(tasks: &[Task], status: TaskStatus) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(move |t| t.status == status)
}

fn render_area(out: &mut String, area: &AreaView, today: NaiveDate, config: &DashboardConfig) {
    let marker = if area.weekly_focus { " ★" } else { "" };
    let heading = paint(
        format!("#{} {}{marker}", area.position, area.name),
        area.color,
    );
    let _ = writeln!(out, "{heading} ({} active)", area.active);

    for task in tasks_in(&area.tasks, TaskStatus::InProgress) {
        let _ = writeln!(out, "  ▶ {}{}", task.name, due_suffix(task, today));
    }
    for task in tasks_in(&area.tasks, TaskStatus::Blocked) {
        let _ = writeln!(out, "  ⊘ {} (blocked)", task.name);
    }

    let pending: Vec<&Task> = tasks_in(&area.tasks, TaskStatus::Pending).collect();
    for task in pending.iter().take(config.pending_preview) {
        let _ = writeln!(out, "  ○ {}{}", task.name, due_suffix(task, today));
    }
    if pending.len() > config.pending_preview {
        let _ = writeln!(
            out,
            "  ... and {} more pending",
            pending.len() - config.pending_preview
        );
    }

    out.push('\n');
}

/// Render the report for `ptz check`: errors first, then warnings.
#[must_use]
pub fn render_check(issues: &[Issue]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n", "=== Integrity Check ===".bold());

    if issues.is_empty() {
        let _ = writeln!(out, "{}", "All checks passed!".green());
        return out;
    }

    let (errors, warnings): (Vec<&Issue>, Vec<&Issue>) = issues.iter().partition(|i| i.is_error());
    for issue in errors.iter().chain(&warnings) {
        let _ = writeln!(out, "{} {}", level_prefix(issue), issue.message);
    }

    let summary = IssueSummary::from_issues(issues);
    let _ = writeln!(
        out,
        "\nFound {} error(s), {} warning(s)",
        summary.errors, summary.warnings
    );
    out
}
