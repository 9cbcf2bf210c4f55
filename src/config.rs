//! Configuration management for ptz.
//!
//! Configuration is read from the first of these that exists:
//!
//! 1. `<project>/.ptz/config.json`
//! 2. `{config_dir}/ptz/config.json` (platform config directory via `dirs`)
//!
//! Every field has a default, so an absent file or a partial one is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PtzError, Result};

/// Maximum number of in-progress tasks across all focus areas.
pub const MAX_IN_PROGRESS: usize = 3;

/// First position of the red zone, where no task may be in progress.
pub const RED_ZONE_START: usize = 6;

/// Days a non-done task may keep the same status before it is stale.
pub const STALE_AFTER_DAYS: i64 = 14;

/// Largest accepted stale threshold, about a century.
pub const MAX_STALE_AFTER_DAYS: i64 = 36_500;

/// Number of pending tasks listed per area on the dashboard.
pub const PENDING_PREVIEW: usize = 3;

/// Default data file name, relative to the project directory.
pub const DEFAULT_DATA_FILE: &str = "priorities.json";

// ============================================================================
// Limits
// ============================================================================

/// Thresholds enforced by the constraint validator and integrity checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// WIP limit
    #[serde(default = "default_max_in_progress")]
    pub max_in_progress: usize,
    /// First red-zone position
    #[serde(default = "default_red_zone_start")]
    pub red_zone_start: usize,
    /// Staleness threshold in days
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: i64,
}

fn default_max_in_progress() -> usize {
    MAX_IN_PROGRESS
}

fn default_red_zone_start() -> usize {
    RED_ZONE_START
}

fn default_stale_after_days() -> i64 {
    STALE_AFTER_DAYS
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_in_progress: MAX_IN_PROGRESS,
            red_zone_start: RED_ZONE_START,
            stale_after_days: STALE_AFTER_DAYS,
        }
    }
}

impl Limits {
    /// Create limits with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the WIP limit.
    #[must_use]
    pub fn with_max_in_progress(mut self, max: usize) -> Self {
        self.max_in_progress = max;
        self
    }

    /// Set the first red-zone position.
    #[must_use]
    pub fn with_red_zone_start(mut self, position: usize) -> Self {
        self.red_zone_start = position;
        self
    }

    /// Set the staleness threshold.
    #[must_use]
    pub fn with_stale_after_days(mut self, days: i64) -> Self {
        self.stale_after_days = days;
        self
    }

    /// Whether `position` falls in the red zone.
    #[must_use]
    pub fn in_red_zone(&self, position: usize) -> bool {
        position >= self.red_zone_start
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// Presentation settings for `ptz show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Pending tasks listed per area before collapsing into a count
    #[serde(default = "default_pending_preview")]
    pub pending_preview: usize,
}

fn default_pending_preview() -> usize {
    PENDING_PREVIEW
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            pending_preview: PENDING_PREVIEW,
        }
    }
}

// ============================================================================
// Project Configuration
// ============================================================================

/// Project-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Data file, relative to the project directory unless absolute
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Rule thresholds
    #[serde(default)]
    pub limits: Limits,

    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            limits: Limits::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration for a project directory.
    ///
    /// Returns defaults when neither the project nor the user config exists.
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::Config`] if a config file exists but cannot be
    /// read or parsed, and [`PtzError::InvalidConfig`] if it fails
    /// [`validate`](Self::validate).
    pub fn load(project_dir: &Path) -> Result<Self> {
        let candidates = std::iter::once(Self::project_path(project_dir))
            .chain(Self::user_path());

        for path in candidates {
            if path.exists() {
                tracing::debug!("Loading config from {}", path.display());
                return Self::load_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load and validate a specific config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PtzError::config_with_path(format!("Failed to read config: {e}"), path.to_path_buf())
        })?;
        let config: ProjectConfig = serde_json::from_str(&content).map_err(|e| {
            PtzError::config_with_path(format!("Failed to parse config: {e}"), path.to_path_buf())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the thresholds describe a usable rule set.
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_in_progress == 0 {
            return Err(PtzError::invalid_config(
                "limits.max_in_progress",
                "must be at least 1",
            ));
        }
        if self.limits.red_zone_start < 2 {
            return Err(PtzError::invalid_config(
                "limits.red_zone_start",
                "must be at least 2 so position 1 can hold work",
            ));
        }
        if self.limits.stale_after_days < 0 {
            return Err(PtzError::invalid_config(
                "limits.stale_after_days",
                "must not be negative",
            ));
        }
        if self.limits.stale_after_days > MAX_STALE_AFTER_DAYS {
            return Err(PtzError::invalid_config(
                "limits.stale_after_days",
                format!("must be at most {MAX_STALE_AFTER_DAYS}"),
            ));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(PtzError::invalid_config("data_file", "must not be empty"));
        }
        Ok(())
    }

    /// Resolve the data file against `project_dir`.
    #[must_use]
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        Self::resolve_path(project_dir, &self.data_file)
    }

    /// Resolve `path` against `project_dir` unless it is absolute.
    #[must_use]
    pub fn resolve_path(project_dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_dir.join(path)
        }
    }

    /// Get the project config path
    pub fn project_path(project_dir: &Path) -> PathBuf {
        project_dir.join(".ptz").join("config.json")
    }

    /// Get the user config path, if the platform has a config directory
    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ptz").join("config.json"))
    }
}
