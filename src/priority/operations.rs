//! Mutation operations.
//!
//! Every operation either commits its whole change to the dataset and returns
//! `Ok`, or returns the rejection and leaves the dataset exactly as it was.
//! Identifiers resolve through [`super::resolve`]; status changes go through
//! [`validate_status_change`] before anything is written.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::constraints::validate_status_change;
use super::resolve::{area_name_taken, resolve_area_rank, resolve_task_index};
use crate::config::Limits;
use crate::dates::week_start;
use crate::error::{PtzError, Result};
use crate::model::{generate_slug, Dataset, FocusArea, Task, TaskStatus, WeeklyFocus};

/// A change to an optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Replace the value
    Set(T),
    /// Remove the value
    Clear,
}

impl<T> Patch<T> {
    fn apply(self, field: &mut Option<T>) {
        *field = match self {
            Patch::Set(value) => Some(value),
            Patch::Clear => None,
        };
    }
}

/// Fields for a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub status: TaskStatus,
    pub due: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewTask {
    /// A pending task with no due date or notes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: TaskStatus::Pending,
            due: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Requested changes to an existing task. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
    pub due: Option<Patch<NaiveDate>>,
    pub notes: Option<Patch<String>>,
}

impl TaskUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none() && self.due.is_none() && self.notes.is_none()
    }

    /// Build the updated task without touching `task`.
    fn applied_to(self, task: &Task, today: NaiveDate) -> Task {
        let mut next = task.clone();
        if let Some(status) = self.status.filter(|s| *s != task.status) {
            next.status = status;
            next.status_since = today;
        }
        if let Some(name) = self.name.filter(|n| !n.is_empty()) {
            next.name = name;
        }
        if let Some(due) = self.due {
            due.apply(&mut next.due);
        }
        if let Some(notes) = self.notes {
            notes.apply(&mut next.notes);
        }
        next
    }
}

impl Dataset {
    fn area_rank(&self, identifier: &str) -> Result<usize> {
        resolve_area_rank(self, identifier).ok_or_else(|| PtzError::area_not_found(identifier))
    }

    fn task_location(&self, area_identifier: &str, task_identifier: &str) -> Result<(usize, usize)> {
        let rank = self.area_rank(area_identifier)?;
        let area = self
            .focus_areas
            .get(rank)
            .ok_or_else(|| PtzError::area_not_found(area_identifier))?;
        let idx = resolve_task_index(area, task_identifier)
            .ok_or_else(|| PtzError::task_not_found(task_identifier))?;
        Ok((rank, idx))
    }

    fn area_at(&self, rank: usize) -> Result<&FocusArea> {
        self.focus_areas
            .get(rank)
            .ok_or_else(|| PtzError::area_not_found(rank.to_string()))
    }

    fn area_at_mut(&mut self, rank: usize) -> Result<&mut FocusArea> {
        self.focus_areas
            .get_mut(rank)
            .ok_or_else(|| PtzError::area_not_found(rank.to_string()))
    }

    // =========================================================================
    // Focus areas
    // =========================================================================

    /// Append a new, empty focus area at the lowest priority.
    ///
    /// Returns the new area's position.
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::DuplicateName`] if an area with the same name
    /// (ignoring case) exists.
    pub fn add_focus_area(&mut self, name: &str) -> Result<usize> {
        if area_name_taken(self, name) {
            return Err(PtzError::DuplicateName {
                name: name.to_string(),
            });
        }

        let slug = generate_slug(name, |candidate| {
            self.focus_areas.iter().any(|a| a.slug == candidate)
        });
        let position = self.focus_areas.push(FocusArea {
            slug,
            name: name.to_string(),
            tasks: Vec::new(),
        });
        debug!(area = name, position, "added focus area");
        Ok(position)
    }

    /// Remove a focus area and all of its tasks.
    ///
    /// Clears the weekly focus if it named this area.
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::NotFound`] if no area matches `identifier`.
    pub fn remove_focus_area(&mut self, identifier: &str) -> Result<FocusArea> {
        let rank = self.area_rank(identifier)?;
        let removed = self
            .focus_areas
            .remove(rank)
            .ok_or_else(|| PtzError::area_not_found(identifier))?;

        if self
            .weekly_focus
            .as_ref()
            .is_some_and(|focus| focus.area == removed.name)
        {
            warn!(area = %removed.name, "removed area was the weekly focus; clearing it");
            self.weekly_focus = None;
        }

        debug!(area = %removed.name, tasks = removed.tasks.len(), "removed focus area");
        Ok(removed)
    }

    /// Move a focus area to `new_position` (1-based).
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::NotFound`] for an unknown area and
    /// [`PtzError::InvalidPosition`] if `new_position` is outside `[1, count]`.
    pub fn reorder_focus_area(&mut self, identifier: &str, new_position: usize) -> Result<&FocusArea> {
        let rank = self.area_rank(identifier)?;
        self.focus_areas.move_to(rank, new_position)?;
        let area = self.area_at(new_position)?;
        debug!(area = %area.name, from = rank, to = new_position, "reordered focus area");
        Ok(area)
    }

    /// Make a focus area this week's focus and move it to position 1.
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::NotFound`] if no area matches `identifier`.
    pub fn set_weekly_focus(&mut self, identifier: &str, today: NaiveDate) -> Result<&WeeklyFocus> {
        let rank = self.area_rank(identifier)?;
        self.focus_areas.move_to(rank, 1)?;
        let name = self.area_at(1)?.name.clone();

        debug!(area = %name, "set weekly focus");
        Ok(self.weekly_focus.insert(WeeklyFocus {
            area: name,
            week_of: week_start(today),
        }))
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Add a task to the end of a focus area's task list.
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::NotFound`] for an unknown area, or the constraint
    /// validator's rejection when `task.status` is `in_progress`.
    pub fn add_task(
        &mut self,
        area_identifier: &str,
        task: NewTask,
        today: NaiveDate,
        limits: &Limits,
    ) -> Result<&Task> {
        let rank = self.area_rank(area_identifier)?;
        validate_status_change(self, self.area_at(rank)?, None, task.status, limits)?;

        let area = self.area_at_mut(rank)?;
        let slug = generate_slug(&task.name, |candidate| {
            area.tasks.iter().any(|t| t.slug == candidate)
        });
        debug!(area = %area.name, task = %task.name, status = %task.status, "added task");
        area.tasks.push(Task {
            slug,
            name: task.name,
            status: task.status,
            status_since: today,
            due: task.due,
            notes: task.notes.filter(|n| !n.is_empty()),
        });
        let added = area.tasks.len() - 1;
        Ok(&area.tasks[added])
    }

    /// Apply `update` to a task as one change.
    ///
    /// A status change refreshes `status_since` to `today`. If the status
    /// change is rejected, no field of the task changes.
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::NotFound`] for an unknown area or task, or the
    /// constraint validator's rejection of the new status.
    pub fn update_task(
        &mut self,
        area_identifier: &str,
        task_identifier: &str,
        update: TaskUpdate,
        today: NaiveDate,
        limits: &Limits,
    ) -> Result<&Task> {
        let (rank, idx) = self.task_location(area_identifier, task_identifier)?;
        let area = self.area_at(rank)?;
        let current = &area.tasks[idx];

        if let Some(status) = update.status {
            validate_status_change(self, area, Some(current.status), status, limits)?;
        }
        let next = update.applied_to(current, today);

        let area = self.area_at_mut(rank)?;
        debug!(area = %area.name, task = %next.name, status = %next.status, "updated task");
        area.tasks[idx] = next;
        Ok(&area.tasks[idx])
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::NotFound`] for an unknown area or task.
    pub fn remove_task(&mut self, area_identifier: &str, task_identifier: &str) -> Result<Task> {
        let (rank, idx) = self.task_location(area_identifier, task_identifier)?;
        let area = self.area_at_mut(rank)?;
        let removed = area.tasks.remove(idx);
        debug!(area = %area.name, task = %removed.name, "removed task");
        Ok(removed)
    }
}
