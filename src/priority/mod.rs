//! The priority engine.
//!
//! Focus areas are ranked; rank decides color and whether work may start.
//!
//! - [`resolve`]: slug-then-name lookup of areas and tasks
//! - [`color`]: positions and the gold/green/yellow/red bands
//! - [`constraints`]: WIP limit and red-zone checks on entering `in_progress`
//! - [`operations`]: mutation operations on [`Dataset`](crate::model::Dataset)
//! - [`integrity`]: whole-dataset diagnostics

pub mod color;
pub mod constraints;
pub mod integrity;
pub mod operations;
pub mod resolve;

pub use color::{
    color, color_with_red_zone, is_weekly_focus, position, PriorityColor, GREEN_ZONE_END,
};
pub use constraints::validate_status_change;
pub use integrity::{check, Issue, IssueKind, IssueLevel, IssueSummary, TaskRef};
pub use operations::{NewTask, Patch, TaskUpdate};
pub use resolve::{area_name_taken, resolve_area, resolve_area_rank, resolve_task, resolve_task_index};
