//! Data management CLI commands: import, export, backups, audit history

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::{CampusPaths, Settings};
use crate::error::{CampusError, CampusResult};
use crate::io::csv;
use crate::io::BackupManager;
use crate::services::{CourseService, StudentService};
use crate::storage::Storage;

/// Import, export, and backup commands
#[derive(Subcommand)]
pub enum DataCommands {
    /// Import students from a CSV file
    ImportStudents {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Import courses from a CSV file
    ImportCourses {
        /// Path to the CSV file
        file: PathBuf,
    },
    /// Export all data as CSV files
    Export {
        /// Target directory (defaults to the configured export directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Take a timestamped backup
    Backup,
    /// List available backups
    Backups,
    /// Delete backups past the retention window
    Prune,
    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        count: usize,
    },
}

/// Execute a data command
pub fn handle_data_command(
    storage: &Storage,
    paths: &CampusPaths,
    settings: &Settings,
    cmd: DataCommands,
) -> CampusResult<()> {
    match cmd {
        DataCommands::ImportStudents { file } => {
            let (students, report) = csv::read_students(&file)?;
            let service = StudentService::new(storage);

            let mut added = 0;
            let mut rejected = 0;
            for student in students {
                match service.add(student) {
                    Ok(_) => added += 1,
                    Err(e) => {
                        log::warn!("Rejected student: {}", e);
                        rejected += 1;
                    }
                }
            }
            println!(
                "Imported {} students ({} rows skipped, {} rejected)",
                added, report.skipped, rejected
            );
        }
        DataCommands::ImportCourses { file } => {
            let (courses, report) = csv::read_courses(&file)?;
            let service = CourseService::new(storage);

            let mut added = 0;
            let mut rejected = 0;
            for course in courses {
                match service.add(course) {
                    Ok(_) => added += 1,
                    Err(e) => {
                        log::warn!("Rejected course: {}", e);
                        rejected += 1;
                    }
                }
            }
            println!(
                "Imported {} courses ({} rows skipped, {} rejected)",
                added, report.skipped, rejected
            );
        }
        DataCommands::Export { dir } => {
            let dir = dir.unwrap_or_else(|| paths.export_dir());
            csv::export_all(storage, &dir)?;
            println!("Exported all data to {}", dir.display());
        }
        DataCommands::Backup => {
            let manager = BackupManager::new(paths, settings.backup_retention);
            let path = manager.create_backup(storage)?;
            println!("Created backup at {}", path.display());
        }
        DataCommands::Backups => {
            let manager = BackupManager::new(paths, settings.backup_retention);
            let backups = manager.list_backups()?;
            if backups.is_empty() {
                println!("No backups found.");
            } else {
                for backup in backups {
                    println!(
                        "{}  {}  {} bytes",
                        backup.created_at.format("%Y-%m-%d %H:%M:%S"),
                        backup.name,
                        backup.size_bytes
                    );
                }
            }
        }
        DataCommands::Prune => {
            let manager = BackupManager::new(paths, settings.backup_retention);
            let deleted = manager.enforce_retention()?;
            println!("Pruned {} expired backups", deleted.len());
        }
        DataCommands::Audit { count } => {
            let logger = storage
                .audit_logger()
                .ok_or_else(|| CampusError::Config("Audit logging is not enabled".into()))?;
            let entries = logger.read_recent(count)?;
            if entries.is_empty() {
                println!("Audit log is empty.");
            } else {
                for entry in entries {
                    println!(
                        "{}  {:<6}  {:<10}  {}{}",
                        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        entry.operation.to_string(),
                        entry.entity_type.to_string(),
                        entry.entity_id,
                        entry
                            .diff_summary
                            .map(|d| format!("  ({})", d))
                            .unwrap_or_default()
                    );
                }
            }
        }
    }

    Ok(())
}
