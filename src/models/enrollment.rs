//! Enrollment model
//!
//! An enrollment is the relationship between one student and one course,
//! keyed by that pair. At most one record may exist per pair, whatever its
//! status; removing the record entirely is the only way back to "absent".

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CourseCode, StudentId};

/// Composite key identifying one student-course relationship
pub type EnrollmentKey = (StudentId, CourseCode);

/// Status of an enrollment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Student is currently enrolled
    #[default]
    Enrolled,
    /// Student has dropped the course
    Dropped,
    /// Course has been completed
    Completed,
    /// Student withdrew from the course
    Withdrawn,
}

impl EnrollmentStatus {
    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "enrolled" => Some(Self::Enrolled),
            "dropped" => Some(Self::Dropped),
            "completed" => Some(Self::Completed),
            "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enrolled => write!(f, "Enrolled"),
            Self::Dropped => write!(f, "Dropped"),
            Self::Completed => write!(f, "Completed"),
            Self::Withdrawn => write!(f, "Withdrawn"),
        }
    }
}

/// A student-course enrollment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrolled student, immutable after creation
    student_id: StudentId,

    /// Course enrolled in, immutable after creation
    course_code: CourseCode,

    /// When the enrollment was created
    pub enrollment_date: DateTime<Utc>,

    /// Current status of the enrollment
    pub status: EnrollmentStatus,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Create a new enrollment in the Enrolled state
    pub fn new(student_id: StudentId, course_code: CourseCode) -> Self {
        let now = Utc::now();
        Self {
            student_id,
            course_code,
            enrollment_date: now,
            status: EnrollmentStatus::Enrolled,
            updated_at: now,
        }
    }

    /// Get the enrolled student's identifier
    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    /// Get the enrolled course's code
    pub fn course_code(&self) -> &CourseCode {
        &self.course_code
    }

    /// The composite key for this record
    pub fn key(&self) -> EnrollmentKey {
        (self.student_id.clone(), self.course_code.clone())
    }

    /// Transition the enrollment to a new status
    pub fn set_status(&mut self, status: EnrollmentStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} ({}, since {})",
            self.student_id,
            self.course_code,
            self.status,
            self.enrollment_date.format("%Y-%m-%d")
        )
    }
}
