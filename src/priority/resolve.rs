//! Identifier resolution.
//!
//! An identifier matches a slug exactly first, searching the whole sequence;
//! failing that, the first entity whose display name equals it
//! case-insensitively wins. Area names are unique by construction, task
//! names are not, so callers that need a specific task should pass its slug.

use crate::model::{Dataset, FocusArea, Task};

fn name_matches(name: &str, identifier: &str) -> bool {
    name.to_lowercase() == identifier.to_lowercase()
}

/// Rank of the focus area `identifier` names.
#[must_use]
pub fn resolve_area_rank(data: &Dataset, identifier: &str) -> Option<usize> {
    data.focus_areas
        .rank_where(|area| area.slug == identifier)
        .or_else(|| {
            data.focus_areas
                .rank_where(|area| name_matches(&area.name, identifier))
        })
}

/// Focus area `identifier` names.
#[must_use]
pub fn resolve_area<'a>(data: &'a Dataset, identifier: &str) -> Option<&'a FocusArea> {
    resolve_area_rank(data, identifier).and_then(|rank| data.focus_areas.get(rank))
}

/// Index within `area.tasks` of the task `identifier` names.
#[must_use]
pub fn resolve_task_index(area: &FocusArea, identifier: &str) -> Option<usize> {
    area.tasks
        .iter()
        .position(|task| task.slug == identifier)
        .or_else(|| {
            area.tasks
                .iter()
                .position(|task| name_matches(&task.name, identifier))
        })
}

/// Task within `area` that `identifier` names.
#[must_use]
pub fn resolve_task<'a>(area: &'a FocusArea, identifier: &str) -> Option<&'a Task> {
    resolve_task_index(area, identifier).map(|idx| &area.tasks[idx])
}

/// Whether any focus area already uses `name`, ignoring case.
#[must_use]
pub fn area_name_taken(data: &Dataset, name: &str) -> bool {
    data.focus_areas
        .iter()
        .any(|area| name_matches(&area.name, name))
}
