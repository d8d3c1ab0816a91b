//! Audit logger for the append-only audit log
//!
//! Provides the AuditLogger struct that writes audit entries to a log file.
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{CampusError, CampusResult};

use super::entry::AuditEntry;

/// Handles writing audit entries to the audit log file
///
/// The log file uses a line-delimited JSON format (JSONL) where each line
/// is a complete JSON object representing one audit entry.
pub struct AuditLogger {
    /// Path to the audit log file
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Log an audit entry
    ///
    /// Appends the entry as a JSON line to the audit log file.
    /// Each write is flushed immediately.
    pub fn log(&self, entry: &AuditEntry) -> CampusResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CampusError::Io(format!("Failed to open audit log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| CampusError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| CampusError::Io(format!("Failed to write audit entry: {}", e)))?;

        file.flush()
            .map_err(|e| CampusError::Io(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Read all audit entries from the log file
    ///
    /// Returns entries in chronological order (oldest first).
    pub fn read_all(&self) -> CampusResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| CampusError::Io(format!("Failed to open audit log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                CampusError::Io(format!("Failed to read audit log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: AuditEntry = serde_json::from_str(&line).map_err(|e| {
                CampusError::Json(format!(
                    "Failed to parse audit entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries from the log
    pub fn read_recent(&self, count: usize) -> CampusResult<Vec<AuditEntry>> {
        let all_entries = self.read_all()?;
        let skip = all_entries.len().saturating_sub(count);
        Ok(all_entries.into_iter().skip(skip).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::EntityType;
    use tempfile::TempDir;

    fn test_logger() -> (TempDir, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (temp_dir, logger)
    }

    fn entry(id: &str) -> AuditEntry {
        AuditEntry::created(
            EntityType::Student,
            id.to_string(),
            None,
            serde_json::json!({"id": id}),
        )
    }

    #[test]
    fn test_log_and_read_back() {
        let (_temp_dir, logger) = test_logger();
        logger.log(&entry("STU001")).unwrap();
        logger.log(&entry("STU002")).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_id, "STU001");
        assert_eq!(entries[1].entity_id, "STU002");
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let (_temp_dir, logger) = test_logger();
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_recent() {
        let (_temp_dir, logger) = test_logger();
        for i in 0..5 {
            logger.log(&entry(&format!("STU00{}", i))).unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].entity_id, "STU003");
        assert_eq!(recent[1].entity_id, "STU004");
    }
}
