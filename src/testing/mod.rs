//! Testing infrastructure for ptz.
//!
//! Fixtures build datasets in a known shape with deterministic slugs, so
//! tests can assert on exact positions, messages and slugs without going
//! through the mutation operations.
//!
//! # Example
//!
//! ```rust
//! use ptz::model::TaskStatus;
//! use ptz::testing::{fixture_today, DatasetBuilder};
//!
//! let data = DatasetBuilder::new()
//!     .area("Work")
//!     .task("Review PR", TaskStatus::InProgress)
//!     .area("Home")
//!     .weekly_focus("Work")
//!     .build();
//!
//! assert_eq!(data.focus_areas.len(), 2);
//! assert_eq!(data.weekly_focus.unwrap().week_of, fixture_today());
//! ```

pub mod fixtures;

pub use fixtures::*;
