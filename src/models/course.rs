//! Course model
//!
//! Represents a course offering: code, title, credit value, department,
//! semester, and optional instructor assignment.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::CourseCode;
use crate::error::{CampusError, CampusResult};

/// Minimum credits a course may carry
pub const MIN_CREDITS: u32 = 1;
/// Maximum credits a course may carry
pub const MAX_CREDITS: u32 = 6;

/// Academic semester in which a course is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    #[default]
    Spring,
    Summer,
    Fall,
}

impl Semester {
    /// The next semester in the academic cycle
    pub fn next(&self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Fall,
            Self::Fall => Self::Spring,
        }
    }

    /// The previous semester in the academic cycle
    pub fn previous(&self) -> Self {
        match self {
            Self::Spring => Self::Fall,
            Self::Summer => Self::Spring,
            Self::Fall => Self::Summer,
        }
    }

    /// Whether this is a regular academic semester (not summer)
    pub fn is_regular(&self) -> bool {
        !matches!(self, Self::Summer)
    }

    /// Parse a semester from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "fall" => Some(Self::Fall),
            _ => None,
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spring => write!(f, "Spring"),
            Self::Summer => write!(f, "Summer"),
            Self::Fall => write!(f, "Fall"),
        }
    }
}

/// Validate that a credit value is within the allowed range
fn validate_credits(credits: u32) -> CampusResult<()> {
    if (MIN_CREDITS..=MAX_CREDITS).contains(&credits) {
        Ok(())
    } else {
        Err(CampusError::Validation(format!(
            "Credits must be between {} and {}: {}",
            MIN_CREDITS, MAX_CREDITS, credits
        )))
    }
}

/// A course offering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code, immutable after creation
    code: CourseCode,

    /// Course title
    pub title: String,

    /// Credit value, always within [MIN_CREDITS, MAX_CREDITS]
    credits: u32,

    /// Offering department
    pub department: String,

    /// Semester in which the course runs
    pub semester: Semester,

    /// Assigned instructor, if any
    pub instructor: Option<String>,

    /// Whether the course is open for enrollment
    pub is_active: bool,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Create a new active course, validating all required fields
    pub fn new(
        code: CourseCode,
        title: &str,
        credits: u32,
        department: &str,
        semester: Semester,
    ) -> CampusResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CampusError::Validation(
                "Course title cannot be empty".into(),
            ));
        }
        let department = department.trim();
        if department.is_empty() {
            return Err(CampusError::Validation("Department cannot be empty".into()));
        }
        validate_credits(credits)?;

        let now = Utc::now();
        Ok(Self {
            code,
            title: title.to_string(),
            credits,
            department: department.to_string(),
            semester,
            instructor: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get the immutable course code
    pub fn code(&self) -> &CourseCode {
        &self.code
    }

    /// Get the credit value
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Change the credit value, keeping the [1, 6] invariant
    pub fn set_credits(&mut self, credits: u32) -> CampusResult<()> {
        validate_credits(credits)?;
        self.credits = credits;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Assign an instructor to this course
    pub fn set_instructor(&mut self, instructor: Option<String>) {
        self.instructor = instructor;
        self.updated_at = Utc::now();
    }

    /// Close the course to enrollment
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Reopen the course to enrollment
    pub fn reactivate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} credits, {} {})",
            self.code, self.title, self.credits, self.semester, self.department
        )
    }
}
