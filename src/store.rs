//! Data file persistence with atomic writes.
//!
//! The dataset lives in one pretty-printed JSON document. Writers hold an
//! exclusive advisory lock on `<file>.lock` and replace the document by
//! writing `<file>.tmp` and renaming it over the original, so readers never
//! see a half-written file.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, info, warn};

use crate::error::{IntoPtzError, PtzError, Result};
use crate::model::Dataset;

/// Temporary file suffix for atomic writes.
const TMP_SUFFIX: &str = ".tmp";

/// Lock file suffix for concurrent access prevention.
const LOCK_SUFFIX: &str = ".lock";

/// Load and save a [`Dataset`] at a fixed path.
#[derive(Debug, Clone)]
pub struct DataStore {
    path: PathBuf,
}

impl DataStore {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path to the temporary data file.
    #[must_use]
    pub fn tmp_file_path(&self) -> PathBuf {
        Self::with_suffix(&self.path, TMP_SUFFIX)
    }

    /// Returns the path to the lock file.
    #[must_use]
    pub fn lock_file_path(&self) -> PathBuf {
        Self::with_suffix(&self.path, LOCK_SUFFIX)
    }

    fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    /// Whether the data file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the dataset. A missing file is an empty dataset.
    ///
    /// # Errors
    ///
    /// Returns [`PtzError::Storage`] if the file cannot be read or is not a
    /// valid dataset document. The file is left in place.
    pub fn load(&self) -> Result<Dataset> {
        let lock_path = self.lock_file_path();
        let _lock = if lock_path.exists() {
            let lock_file = File::open(&lock_path)?;
            FileExt::lock_shared(&lock_file).map_err(|e| self.lock_error(&e))?;
            Some(lock_file)
        } else {
            None
        };

        self.read_unlocked()
    }

    /// Save the dataset atomically.
    pub fn save(&self, data: &Dataset) -> Result<()> {
        let _lock = self.lock_exclusive()?;
        self.write_unlocked(data)
    }

    /// Load, apply `f`, and save, holding the write lock throughout.
    ///
    /// Nothing is written when `f` returns an error.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Dataset) -> Result<T>,
    {
        let _lock = self.lock_exclusive()?;
        let mut data = self.read_unlocked()?;
        let value = f(&mut data).inspect_err(|e| {
            if e.is_rejection() {
                debug!(
                    constraint = e.is_constraint_violation(),
                    "Rejected ({e}); {} left unchanged",
                    self.path.display()
                );
            }
        })?;
        self.write_unlocked(&data)?;
        Ok(value)
    }

    fn lock_error(&self, e: &std::io::Error) -> PtzError {
        PtzError::Lock {
            message: e.to_string(),
            path: self.lock_file_path(),
        }
    }

    fn lock_exclusive(&self) -> Result<File> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let lock_file = File::create(self.lock_file_path())?;
        if FileExt::try_lock_exclusive(&lock_file).is_err() {
            warn!("Data file {} is locked; waiting", self.path.display());
            FileExt::lock_exclusive(&lock_file).map_err(|e| self.lock_error(&e))?;
        }
        Ok(lock_file)
    }

    fn read_unlocked(&self) -> Result<Dataset> {
        let mut file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {}; starting empty", self.path.display());
                return Ok(Dataset::new());
            }
            Err(e) => return Err(PtzError::storage(format!("Failed to open: {e}"), &self.path)),
        };

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .into_ptz_storage(&self.path)?;

        let data: Dataset = serde_json::from_str(&contents)
            .map_err(|e| PtzError::storage(format!("Malformed data file: {e}"), &self.path))?;

        info!(
            "Loaded {} focus area(s) from {}",
            data.focus_areas.len(),
            self.path.display()
        );
        Ok(data)
    }

    fn write_unlocked(&self, data: &Dataset) -> Result<()> {
        let tmp_path = self.tmp_file_path();
        let json = serde_json::to_string_pretty(data)?;

        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.write_all(b"\n")?;
        tmp_file.sync_all()?;

        fs::rename(&tmp_path, &self.path)?;

        info!("Saved data to {}", self.path.display());
        Ok(())
    }
}
