//! Positions and traffic-light colors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::RED_ZONE_START;
use crate::model::{Dataset, FocusArea};

/// Last position that is still green.
pub const GREEN_ZONE_END: usize = 3;

/// Priority color of a focus area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityColor {
    /// The weekly focus, regardless of position
    Gold,
    /// Positions 1-3
    Green,
    /// Between green and the red zone
    Yellow,
    /// The red zone; no work may be in progress here
    Red,
}

impl fmt::Display for PriorityColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityColor::Gold => write!(f, "gold"),
            PriorityColor::Green => write!(f, "green"),
            PriorityColor::Yellow => write!(f, "yellow"),
            PriorityColor::Red => write!(f, "red"),
        }
    }
}

/// 1-based position of `area`, matched by slug. `None` if it is not a member.
#[must_use]
pub fn position(data: &Dataset, area: &FocusArea) -> Option<usize> {
    data.focus_areas.rank_where(|a| a.slug == area.slug)
}

/// Whether `area` is the current weekly focus.
#[must_use]
pub fn is_weekly_focus(data: &Dataset, area: &FocusArea) -> bool {
    data.weekly_focus
        .as_ref()
        .is_some_and(|focus| focus.area == area.name)
}

/// Color for a position with the default red zone.
#[must_use]
pub fn color(position: usize, is_weekly_focus: bool) -> PriorityColor {
    color_with_red_zone(position, is_weekly_focus, RED_ZONE_START)
}

/// Color for a position given where the red zone starts.
#[must_use]
pub fn color_with_red_zone(
    position: usize,
    is_weekly_focus: bool,
    red_zone_start: usize,
) -> PriorityColor {
    if is_weekly_focus {
        PriorityColor::Gold
    } else if position >= red_zone_start {
        PriorityColor::Red
    } else if position <= GREEN_ZONE_END {
        PriorityColor::Green
    } else {
        PriorityColor::Yellow
    }
}
