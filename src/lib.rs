//! ptz - Focus-area priorities with enforced work-in-progress limits
//!
//! Focus areas are kept in a ranked list; rank decides an area's color and
//! whether work may be started in it. A small rule set keeps attention
//! narrow: at most three tasks in progress at once, and none in the red zone.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`model`] - Dataset, focus areas, tasks and the ranked list
//! - [`priority`] - Resolution, colors, constraint validation, mutations and integrity checks
//! - [`store`] - Atomic, locked JSON persistence
//! - [`dashboard`] - Text and JSON views for the CLI
//! - [`config`] - Configuration loading and validation
//! - [`dates`] - Calendar helpers
//! - [`error`] - Custom error types and handling
//! - [`testing`] - Testing infrastructure (dataset fixtures)
//!
//! # Example
//!
//! ```rust
//! use ptz::config::Limits;
//! use ptz::model::{Dataset, TaskStatus};
//! use ptz::priority::{check, NewTask};
//! use ptz::testing::fixture_today;
//!
//! let today = fixture_today();
//! let limits = Limits::default();
//! let mut data = Dataset::new();
//!
//! data.add_focus_area("Work")?;
//! data.add_task(
//!     "work",
//!     NewTask::new("Review PR").with_status(TaskStatus::InProgress),
//!     today,
//!     &limits,
//! )?;
//!
//! assert!(check(&data, today, &limits).is_empty());
//! # Ok::<(), ptz::PtzError>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod model;
pub mod priority;
pub mod store;
pub mod testing;

// Re-export commonly used types
pub use error::{EntityKind, IntoPtzError, PtzError, Result};

pub use config::{DashboardConfig, Limits, ProjectConfig};

pub use model::{Dataset, FocusArea, RankedList, Task, TaskStatus, TimeOff, WeeklyFocus};

pub use priority::{
    check, validate_status_change, Issue, IssueKind, IssueLevel, IssueSummary, NewTask, Patch,
    PriorityColor, TaskUpdate,
};

pub use dashboard::{render_check, render_dashboard, DashboardView};

pub use store::DataStore;
