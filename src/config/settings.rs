//! User settings for campus-records
//!
//! Manages institution-level policy (the per-semester credit limit) and
//! housekeeping preferences such as backup retention. Settings are loaded
//! once at startup and passed into the engines explicitly; there is no
//! global configuration state.

use serde::{Deserialize, Serialize};

use super::paths::CampusPaths;
use crate::error::{CampusError, CampusResult};

/// Backup retention settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BackupRetention {
    /// Number of days a backup is kept before pruning
    pub days: u32,
}

impl Default for BackupRetention {
    fn default() -> Self {
        Self { days: 30 }
    }
}

/// User settings for campus-records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Maximum total course credits a student may carry in one semester
    #[serde(default = "default_max_credits")]
    pub max_credits_per_semester: u32,

    /// Backup retention policy
    #[serde(default)]
    pub backup_retention: BackupRetention,

    /// Whether a backup is taken automatically before imports
    #[serde(default = "default_auto_backup")]
    pub auto_backup_enabled: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_max_credits() -> u32 {
    18
}

fn default_auto_backup() -> bool {
    true
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            max_credits_per_semester: default_max_credits(),
            backup_retention: BackupRetention::default(),
            auto_backup_enabled: default_auto_backup(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if the file
    /// doesn't exist
    pub fn load_or_create(paths: &CampusPaths) -> CampusResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CampusError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| CampusError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CampusPaths) -> CampusResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CampusError::Json(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), json)
            .map_err(|e| CampusError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_credits_per_semester, 18);
        assert_eq!(settings.backup_retention.days, 30);
        assert!(settings.auto_backup_enabled);
    }

    #[test]
    fn test_load_or_create_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CampusPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.max_credits_per_semester, 18);
        // Not persisted until save is called
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CampusPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let mut settings = Settings::default();
        settings.max_credits_per_semester = 21;
        settings.save(&paths).unwrap();

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(reloaded.max_credits_per_semester, 21);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CampusPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        std::fs::write(paths.settings_file(), r#"{"max_credits_per_semester": 15}"#).unwrap();

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.max_credits_per_semester, 15);
        assert_eq!(settings.backup_retention.days, 30);
    }
}
