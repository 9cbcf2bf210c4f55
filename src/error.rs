//! Error types for ptz.
//!
//! Rule rejections (unknown identifiers, name collisions, bad positions,
//! WIP and red-zone violations) are ordinary, user-facing outcomes and share
//! one enum with the storage and configuration failures raised around them.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What kind of entity an identifier failed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A focus area
    FocusArea,
    /// A task within a focus area
    Task,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::FocusArea => write!(f, "Focus area"),
            EntityKind::Task => write!(f, "Task"),
        }
    }
}

/// Main error type for ptz operations
#[derive(Error, Debug)]
pub enum PtzError {
    // =========================================================================
    // Rule Rejections
    // =========================================================================
    /// Identifier matched neither a slug nor a display name
    #[error("{kind} not found: {identifier}")]
    NotFound { kind: EntityKind, identifier: String },

    /// A focus area with the same name (case-insensitive) already exists
    #[error("Focus area already exists: {name}")]
    DuplicateName { name: String },

    /// Reorder target outside `[1, count]`
    #[error("Invalid position: {position} (must be 1-{count})")]
    InvalidPosition { position: usize, count: usize },

    /// Too many tasks already in progress
    #[error("WIP limit reached ({current}/{max}). Complete or pause a task first.")]
    WipLimitExceeded { current: usize, max: usize },

    /// Focus area sits in the red zone
    #[error(
        "Cannot set in-progress in red zone (position {position}, red zone starts at {red_zone_start}). Move the focus area up first."
    )]
    RedZoneViolation {
        position: usize,
        red_zone_start: usize,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// The data file could not be read or written
    #[error("Storage error: {message} ({})", .path.display())]
    Storage { message: String, path: PathBuf },

    /// The data file lock could not be acquired
    #[error("Failed to acquire lock on {}: {message}", .path.display())]
    Lock { message: String, path: PathBuf },

    /// The integrity check reported blocking issues
    #[error("Integrity check failed with {errors} error(s)")]
    IntegrityFailed { errors: usize },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PtzError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a not-found error for a focus area
    pub fn area_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::FocusArea,
            identifier: identifier.into(),
        }
    }

    /// Create a not-found error for a task
    pub fn task_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Task,
            identifier: identifier.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Storage {
            message: message.into(),
            path: path.into(),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Check if this error is a rule rejection rather than a failure
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::DuplicateName { .. }
                | Self::InvalidPosition { .. }
                | Self::WipLimitExceeded { .. }
                | Self::RedZoneViolation { .. }
        )
    }

    /// Check if this error comes from the constraint validator
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::WipLimitExceeded { .. } | Self::RedZoneViolation { .. }
        )
    }

    /// Check if an identifier failed to resolve
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 3,
            Self::DuplicateName { .. } | Self::InvalidPosition { .. } => 4,
            Self::WipLimitExceeded { .. } | Self::RedZoneViolation { .. } => 5,
            Self::Config { .. } | Self::InvalidConfig { .. } => 7,
            _ => 1,
        }
    }
}

/// Type alias for ptz results
pub type Result<T> = std::result::Result<T, PtzError>;

/// Extension trait for converting foreign errors into PtzError
pub trait IntoPtzError<T> {
    fn into_ptz_storage(self, path: &std::path::Path) -> Result<T>;
}

impl<T, E: Into<anyhow::Error>> IntoPtzError<T> for std::result::Result<T, E> {
    fn into_ptz_storage(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| PtzError::storage(e.into().to_string(), path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PtzError::WipLimitExceeded { current: 3, max: 3 };
        assert!(err.to_string().contains("WIP limit reached (3/3)"));

        let err = PtzError::InvalidPosition {
            position: 9,
            count: 4,
        };
        assert_eq!(err.to_string(), "Invalid position: 9 (must be 1-4)");
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            PtzError::area_not_found("Gardening").to_string(),
            "Focus area not found: Gardening"
        );
        assert_eq!(
            PtzError::task_not_found("mow").to_string(),
            "Task not found: mow"
        );
    }

    #[test]
    fn test_is_rejection() {
        assert!(PtzError::area_not_found("x").is_rejection());
        assert!(PtzError::DuplicateName { name: "x".into() }.is_rejection());
        assert!(PtzError::RedZoneViolation {
            position: 6,
            red_zone_start: 6
        }
        .is_rejection());
        assert!(!PtzError::config("bad").is_rejection());
        assert!(!PtzError::storage("boom", "/tmp/x.json").is_rejection());
    }

    #[test]
    fn test_is_constraint_violation() {
        assert!(PtzError::WipLimitExceeded { current: 3, max: 3 }.is_constraint_violation());
        assert!(!PtzError::task_not_found("x").is_constraint_violation());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PtzError::area_not_found("x").exit_code(), 3);
        assert_eq!(
            PtzError::InvalidPosition {
                position: 0,
                count: 1
            }
            .exit_code(),
            4
        );
        assert_eq!(PtzError::WipLimitExceeded { current: 3, max: 3 }.exit_code(), 5);
        assert_eq!(PtzError::config("test").exit_code(), 7);
        assert_eq!(PtzError::IntegrityFailed { errors: 2 }.exit_code(), 1);
    }

    #[test]
    fn test_config_with_path() {
        let path = PathBuf::from("/test/.ptz/config.json");
        let err = PtzError::config_with_path("failed to parse", path.clone());
        if let PtzError::Config {
            message,
            path: opt_path,
        } = err
        {
            assert_eq!(message, "failed to parse");
            assert_eq!(opt_path, Some(path));
        } else {
            panic!("Wrong error variant");
        }
    }

    #[test]
    fn test_into_ptz_error_trait() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let ptz_result = result.into_ptz_storage(std::path::Path::new("/tmp/priorities.json"));
        if let Err(PtzError::Storage { message, path }) = ptz_result {
            assert!(message.contains("file not found"));
            assert_eq!(path, std::path::PathBuf::from("/tmp/priorities.json"));
        } else {
            panic!("Wrong error variant after conversion");
        }
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let ptz_err: PtzError = io_err.into();
        assert!(matches!(ptz_err, PtzError::Io(_)));
        assert!(ptz_err.to_string().contains("access denied"));
    }
}
