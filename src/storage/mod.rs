//! Storage layer for campus-records
//!
//! Thread-safe in-memory stores for each entity type, with a coordinating
//! Storage struct. Each store exclusively owns its entity type: the student
//! directory owns students, the course catalog owns courses, the enrollment
//! ledger owns enrollments, and the grade book owns grades. Cross-entity
//! derived fields on the student record are caches maintained by the engines.

pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod students;

pub use courses::CourseCatalog;
pub use enrollments::EnrollmentLedger;
pub use grades::GradeBook;
pub use students::StudentDirectory;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{CampusError, CampusResult};

/// Main storage coordinator that provides access to all stores
pub struct Storage {
    pub students: StudentDirectory,
    pub courses: CourseCatalog,
    pub enrollments: EnrollmentLedger,
    pub grades: GradeBook,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create empty storage with no audit logging
    pub fn new() -> Self {
        Self {
            students: StudentDirectory::new(),
            courses: CourseCatalog::new(),
            enrollments: EnrollmentLedger::new(),
            grades: GradeBook::new(),
            audit: None,
        }
    }

    /// Create empty storage that records mutations to an audit log
    pub fn with_audit(logger: AuditLogger) -> Self {
        let mut storage = Self::new();
        storage.audit = Some(logger);
        storage
    }

    /// Get the audit logger, if enabled
    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        after: &T,
    ) -> CampusResult<()> {
        if let Some(logger) = &self.audit {
            let entry = AuditEntry::created(entity_type, entity_id, entity_name, to_value(after)?);
            logger.log(&entry)?;
        }
        Ok(())
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> CampusResult<()> {
        if let Some(logger) = &self.audit {
            let entry = AuditEntry::updated(
                entity_type,
                entity_id,
                entity_name,
                to_value(before)?,
                to_value(after)?,
                diff_summary,
            );
            logger.log(&entry)?;
        }
        Ok(())
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
    ) -> CampusResult<()> {
        if let Some(logger) = &self.audit {
            let entry = AuditEntry::deleted(entity_type, entity_id, entity_name, to_value(before)?);
            logger.log(&entry)?;
        }
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

fn to_value<T: Serialize>(value: &T) -> CampusResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| CampusError::Json(format!("Failed to serialize audit value: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_starts_empty() {
        let storage = Storage::new();
        assert_eq!(storage.students.count().unwrap(), 0);
        assert_eq!(storage.courses.count().unwrap(), 0);
        assert_eq!(storage.enrollments.count().unwrap(), 0);
        assert_eq!(storage.grades.count().unwrap(), 0);
        assert!(storage.audit_logger().is_none());
    }

    #[test]
    fn test_audit_hooks_write_entries() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let storage = Storage::with_audit(logger);

        storage
            .log_create(
                EntityType::Course,
                "CS101".into(),
                Some("Intro".into()),
                &serde_json::json!({"code": "CS101"}),
            )
            .unwrap();

        let entries = storage.audit_logger().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_id, "CS101");
    }

    #[test]
    fn test_audit_hooks_are_noops_without_logger() {
        let storage = Storage::new();
        storage
            .log_create(
                EntityType::Student,
                "STU001".into(),
                None,
                &serde_json::json!({}),
            )
            .unwrap();
    }
}
