//! Path management for campus-records
//!
//! Provides XDG-compliant path resolution for configuration, data, exports,
//! and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `CAMPUS_RECORDS_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/campus-records` or `~/.config/campus-records`
//! 3. Windows: `%APPDATA%\campus-records`

use std::path::PathBuf;

use crate::error::{CampusError, CampusResult};

/// Manages all paths used by campus-records
#[derive(Debug, Clone)]
pub struct CampusPaths {
    /// Base directory for all campus-records data
    base_dir: PathBuf,
}

impl CampusPaths {
    /// Create a new CampusPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> CampusResult<Self> {
        let base_dir = if let Ok(custom) = std::env::var("CAMPUS_RECORDS_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CampusPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the CSV snapshots
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the export directory
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to students.csv
    pub fn students_file(&self) -> PathBuf {
        self.data_dir().join("students.csv")
    }

    /// Get the path to courses.csv
    pub fn courses_file(&self) -> PathBuf {
        self.data_dir().join("courses.csv")
    }

    /// Get the path to enrollments.csv
    pub fn enrollments_file(&self) -> PathBuf {
        self.data_dir().join("enrollments.csv")
    }

    /// Get the path to grades.csv
    pub fn grades_file(&self) -> PathBuf {
        self.data_dir().join("grades.csv")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> CampusResult<()> {
        for dir in [
            self.base_dir.clone(),
            self.data_dir(),
            self.backup_dir(),
            self.export_dir(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                CampusError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }
}

/// Resolve the platform default base directory
fn resolve_default_path() -> CampusResult<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| CampusError::Config("APPDATA environment variable not set".into()))?;
        Ok(PathBuf::from(appdata).join("campus-records"))
    }

    #[cfg(not(windows))]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            if !xdg.is_empty() {
                return Ok(PathBuf::from(xdg).join("campus-records"));
            }
        }

        let home = std::env::var("HOME")
            .map_err(|_| CampusError::Config("HOME environment variable not set".into()))?;
        Ok(PathBuf::from(home).join(".config").join("campus-records"))
    }
}
