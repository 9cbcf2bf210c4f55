//! Constraint validation for status changes.
//!
//! Only entering `in_progress` is ever restricted. Leaving it, and every
//! transition between the other statuses, is always allowed: the limits bound
//! concurrent active work, not how much work is tracked.

use tracing::debug;

use super::color::position;
use crate::config::Limits;
use crate::error::{PtzError, Result};
use crate::model::{Dataset, FocusArea, TaskStatus};

/// Decide whether a task in `area` may move from `current` to `new_status`.
///
/// `current` is `None` for a task that does not exist yet. The in-progress
/// count is recomputed from `data` on every call.
///
/// # Errors
///
/// - [`PtzError::RedZoneViolation`] if the area sits at or below the red zone
/// - [`PtzError::WipLimitExceeded`] if the WIP limit is already reached
/// - [`PtzError::NotFound`] if `area` is not part of `data`
pub fn validate_status_change(
    data: &Dataset,
    area: &FocusArea,
    current: Option<TaskStatus>,
    new_status: TaskStatus,
    limits: &Limits,
) -> Result<()> {
    if current == Some(new_status) || new_status != TaskStatus::InProgress {
        return Ok(());
    }

    let pos = position(data, area).ok_or_else(|| PtzError::area_not_found(&area.slug))?;
    if limits.in_red_zone(pos) {
        debug!(area = %area.name, position = pos, "rejecting in-progress in red zone");
        return Err(PtzError::RedZoneViolation {
            position: pos,
            red_zone_start: limits.red_zone_start,
        });
    }

    let in_progress = data.in_progress_count();
    if in_progress >= limits.max_in_progress {
        debug!(in_progress, max = limits.max_in_progress, "rejecting over WIP limit");
        return Err(PtzError::WipLimitExceeded {
            current: in_progress,
            max: limits.max_in_progress,
        });
    }

    Ok(())
}
