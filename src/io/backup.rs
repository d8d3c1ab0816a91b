//! Backup manager
//!
//! Takes timestamped directory backups of the CSV exports and prunes them
//! per the retention policy. Each backup is a self-contained directory named
//! `backup-YYYYMMDD-HHMMSS` holding the four CSV files.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::{BackupRetention, CampusPaths};
use crate::error::{CampusError, CampusResult};
use crate::storage::Storage;

use super::csv::export_all;

const BACKUP_PREFIX: &str = "backup-";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Metadata about one backup directory
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Directory name, e.g. `backup-20260807-153000`
    pub name: String,
    /// Full path to the backup directory
    pub path: PathBuf,
    /// When the backup was created, parsed from the name
    pub created_at: DateTime<Utc>,
    /// Total size of the directory contents in bytes
    pub size_bytes: u64,
}

/// Manages backup creation, listing, and retention
pub struct BackupManager {
    backup_dir: PathBuf,
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &CampusPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            retention,
        }
    }

    /// Take a backup of all data.
    ///
    /// Returns the path of the created backup directory.
    pub fn create_backup(&self, storage: &Storage) -> CampusResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| CampusError::Backup(format!("Failed to create backup directory: {}", e)))?;

        let name = format!(
            "{}{}",
            BACKUP_PREFIX,
            Utc::now().format(BACKUP_TIMESTAMP_FORMAT)
        );
        let backup_path = self.backup_dir.join(&name);

        export_all(storage, &backup_path)
            .map_err(|e| CampusError::Backup(format!("Failed to write backup: {}", e)))?;

        Ok(backup_path)
    }

    /// List all backups, newest first
    pub fn list_backups(&self) -> CampusResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        let entries = fs::read_dir(&self.backup_dir)
            .map_err(|e| CampusError::Backup(format!("Failed to read backup directory: {}", e)))?;

        for entry in entries {
            let entry = entry
                .map_err(|e| CampusError::Backup(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();
            if path.is_dir() {
                if let Some(info) = parse_backup_info(&path) {
                    backups.push(info);
                }
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    /// Delete backups older than the retention window.
    ///
    /// Returns the paths of the deleted backups.
    pub fn enforce_retention(&self) -> CampusResult<Vec<PathBuf>> {
        let cutoff = Utc::now() - chrono::Duration::days(self.retention.days as i64);
        let mut deleted = Vec::new();

        for backup in self.list_backups()? {
            if backup.created_at < cutoff {
                fs::remove_dir_all(&backup.path).map_err(|e| {
                    CampusError::Backup(format!("Failed to delete old backup: {}", e))
                })?;
                deleted.push(backup.path);
            }
        }

        Ok(deleted)
    }

    /// Take a backup, then prune expired ones
    pub fn create_backup_with_retention(
        &self,
        storage: &Storage,
    ) -> CampusResult<(PathBuf, Vec<PathBuf>)> {
        let created = self.create_backup(storage)?;
        let deleted = self.enforce_retention()?;
        Ok((created, deleted))
    }
}

/// Parse backup metadata out of a directory path
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let name = path.file_name()?.to_string_lossy().to_string();
    let stamp = name.strip_prefix(BACKUP_PREFIX)?;

    let created_at = NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT)
        .ok()?
        .and_utc();

    Some(BackupInfo {
        name,
        path: path.to_path_buf(),
        created_at,
        size_bytes: directory_size(path).unwrap_or(0),
    })
}

/// Total size of a directory's contents, walked recursively
pub fn directory_size(path: &Path) -> CampusResult<u64> {
    let mut total = 0;

    for entry in fs::read_dir(path)
        .map_err(|e| CampusError::Backup(format!("Failed to read {}: {}", path.display(), e)))?
    {
        let entry = entry
            .map_err(|e| CampusError::Backup(format!("Failed to read directory entry: {}", e)))?;
        let metadata = entry
            .metadata()
            .map_err(|e| CampusError::Backup(format!("Failed to read metadata: {}", e)))?;

        if metadata.is_dir() {
            total += directory_size(&entry.path())?;
        } else {
            total += metadata.len();
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, CourseCode, Semester, Student, StudentId};
    use tempfile::TempDir;

    fn setup() -> (TempDir, CampusPaths, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CampusPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new();
        storage
            .students
            .upsert(
                Student::new(
                    StudentId::new("STU001").unwrap(),
                    "REG2024001",
                    "Ada Lovelace",
                    "ada@example.edu",
                )
                .unwrap(),
            )
            .unwrap();
        storage
            .courses
            .upsert(
                Course::new(
                    CourseCode::new("CS101").unwrap(),
                    "Intro",
                    3,
                    "CS",
                    Semester::Fall,
                )
                .unwrap(),
            )
            .unwrap();

        (temp_dir, paths, storage)
    }

    #[test]
    fn test_create_backup_writes_csv_files() {
        let (_temp_dir, paths, storage) = setup();
        let manager = BackupManager::new(&paths, BackupRetention::default());

        let backup_path = manager.create_backup(&storage).unwrap();
        assert!(backup_path.join("students.csv").exists());
        assert!(backup_path.join("courses.csv").exists());
        assert!(backup_path.join("enrollments.csv").exists());
        assert!(backup_path.join("grades.csv").exists());
    }

    #[test]
    fn test_list_backups_parses_and_sizes() {
        let (_temp_dir, paths, storage) = setup();
        let manager = BackupManager::new(&paths, BackupRetention::default());

        manager.create_backup(&storage).unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert!(backups[0].name.starts_with(BACKUP_PREFIX));
        assert!(backups[0].size_bytes > 0);
    }

    #[test]
    fn test_list_ignores_unrelated_entries() {
        let (_temp_dir, paths, storage) = setup();
        let manager = BackupManager::new(&paths, BackupRetention::default());
        manager.create_backup(&storage).unwrap();

        fs::create_dir_all(paths.backup_dir().join("not-a-backup")).unwrap();
        fs::write(paths.backup_dir().join("stray.txt"), "x").unwrap();

        assert_eq!(manager.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn test_retention_prunes_old_backups() {
        let (_temp_dir, paths, storage) = setup();
        let manager = BackupManager::new(&paths, BackupRetention { days: 30 });

        manager.create_backup(&storage).unwrap();

        // Fabricate an expired backup by naming it far in the past
        let old_path = paths.backup_dir().join("backup-20200101-120000");
        fs::create_dir_all(&old_path).unwrap();
        fs::write(old_path.join("students.csv"), "ID\n").unwrap();

        let deleted = manager.enforce_retention().unwrap();
        assert_eq!(deleted.len(), 1);
        assert!(!old_path.exists());
        assert_eq!(manager.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn test_directory_size_recurses() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("a.txt"), "12345").unwrap();
        fs::write(temp_dir.path().join("nested/b.txt"), "12345").unwrap();

        assert_eq!(directory_size(temp_dir.path()).unwrap(), 10);
    }
}
