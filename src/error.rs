//! Custom error types for campus-records
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for campus-records operations
#[derive(Error, Debug)]
pub enum CampusError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    ///
    /// Also covers the "student exists but is ineligible" case: the engines
    /// treat an ineligible student as absent for the requested operation.
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Enroll attempted on a pair that already has an enrollment record
    #[error("Student {student_id} is already enrolled in course {course_code}")]
    DuplicateEnrollment {
        student_id: String,
        course_code: String,
    },

    /// Enroll would push total credits past the per-semester maximum
    #[error(
        "Credit limit exceeded for student {student_id}: \
         {current} current + {attempted} attempted > {max} max"
    )]
    CreditLimitExceeded {
        student_id: String,
        current: u32,
        attempted: u32,
        max: u32,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Backup errors
    #[error("Backup error: {0}")]
    Backup(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CampusError {
    /// Create a "not found" error for students
    pub fn student_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Student",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for courses
    pub fn course_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Course",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for enrollments
    pub fn enrollment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Enrollment",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for grades
    pub fn grade_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Grade",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a duplicate error (entity or enrollment)
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::Duplicate { .. } | Self::DuplicateEnrollment { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a credit limit error
    pub fn is_credit_limit(&self) -> bool {
        matches!(self, Self::CreditLimitExceeded { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CampusError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CampusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for CampusError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for campus-records operations
pub type CampusResult<T> = Result<T, CampusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CampusError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = CampusError::student_not_found("STU001");
        assert_eq!(err.to_string(), "Student not found: STU001");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_enrollment_error() {
        let err = CampusError::DuplicateEnrollment {
            student_id: "STU001".into(),
            course_code: "CS101".into(),
        };
        assert_eq!(
            err.to_string(),
            "Student STU001 is already enrolled in course CS101"
        );
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_credit_limit_error() {
        let err = CampusError::CreditLimitExceeded {
            student_id: "STU001".into(),
            current: 16,
            attempted: 4,
            max: 18,
        };
        assert_eq!(
            err.to_string(),
            "Credit limit exceeded for student STU001: 16 current + 4 attempted > 18 max"
        );
        assert!(err.is_credit_limit());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let campus_err: CampusError = io_err.into();
        assert!(matches!(campus_err, CampusError::Io(_)));
    }
}
