//! Student model
//!
//! Represents a student record: identity, contact details, academic status,
//! and the derived credit/GPA caches maintained by the enrollment and grade
//! engines. The enrollment and grade collections are authoritative; the
//! fields here are caches kept in sync by the owning engines.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CourseCode, StudentId};
use super::person::{validate_email, validate_full_name, PersonRole};
use crate::error::{CampusError, CampusResult};

/// Academic status of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    /// Currently attending
    #[default]
    Active,
    /// Deactivated, may return
    Inactive,
    /// Completed their program
    Graduated,
    /// Temporarily barred
    Suspended,
    /// Left the institution
    Withdrawn,
}

impl StudentStatus {
    /// Whether this status allows enrolling in new courses
    pub fn allows_enrollment(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Whether this status allows recording or changing grades
    pub fn allows_grade_changes(&self) -> bool {
        matches!(self, Self::Active | Self::Inactive)
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "graduated" => Some(Self::Graduated),
            "suspended" => Some(Self::Suspended),
            "withdrawn" => Some(Self::Withdrawn),
            _ => None,
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
            Self::Graduated => write!(f, "Graduated"),
            Self::Suspended => write!(f, "Suspended"),
            Self::Withdrawn => write!(f, "Withdrawn"),
        }
    }
}

/// Validate a registration number: `REG` plus seven digits
fn validate_reg_no(reg_no: &str) -> CampusResult<()> {
    let valid = reg_no.len() == 10
        && reg_no.starts_with("REG")
        && reg_no[3..].chars().all(|c| c.is_ascii_digit());

    if valid {
        Ok(())
    } else {
        Err(CampusError::Validation(format!(
            "Invalid registration number: {}",
            reg_no
        )))
    }
}

/// A student record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// Unique identifier, immutable after creation
    id: StudentId,

    /// Registration number, unique across students
    reg_no: String,

    /// Student's full name
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Academic status
    pub status: StudentStatus,

    /// When the student first enrolled at the institution
    pub enrollment_date: DateTime<Utc>,

    /// Codes of currently enrolled courses.
    /// Cache of the enrollment ledger, maintained by the enrollment engine.
    #[serde(default)]
    pub enrolled_courses: BTreeSet<CourseCode>,

    /// Cumulative GPA on a 4.0 scale.
    /// Cache of the grade book, maintained by the grade engine.
    pub gpa: f64,

    /// Sum of credits of currently enrolled courses.
    /// Cache of the enrollment ledger, maintained by the enrollment engine.
    pub total_credits: u32,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Create a new active student, validating all required fields
    pub fn new(id: StudentId, reg_no: &str, full_name: &str, email: &str) -> CampusResult<Self> {
        let reg_no = reg_no.trim().to_uppercase();
        validate_reg_no(&reg_no)?;
        validate_full_name(full_name)?;
        validate_email(email)?;

        let now = Utc::now();
        Ok(Self {
            id,
            reg_no,
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            status: StudentStatus::Active,
            enrollment_date: now,
            enrolled_courses: BTreeSet::new(),
            gpa: 0.0,
            total_credits: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get the immutable student identifier
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    /// Get the registration number
    pub fn reg_no(&self) -> &str {
        &self.reg_no
    }

    /// The capability tag for this record
    pub fn role(&self) -> PersonRole {
        PersonRole::Student
    }

    /// Whether this student may currently enroll in courses
    pub fn is_eligible_for_enrollment(&self) -> bool {
        self.role().eligible_for_enrollment() && self.status.allows_enrollment()
    }

    /// Change the student's status
    pub fn set_status(&mut self, status: StudentStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Add a course to the enrolled set
    pub fn add_enrolled_course(&mut self, code: CourseCode) {
        self.enrolled_courses.insert(code);
        self.updated_at = Utc::now();
    }

    /// Remove a course from the enrolled set
    pub fn remove_enrolled_course(&mut self, code: &CourseCode) {
        self.enrolled_courses.remove(code);
        self.updated_at = Utc::now();
    }

    /// Update the cached GPA, validating the 4.0 scale
    pub fn set_gpa(&mut self, gpa: f64) -> CampusResult<()> {
        if !(0.0..=4.0).contains(&gpa) {
            return Err(CampusError::Validation(format!(
                "GPA must be between 0.0 and 4.0: {}",
                gpa
            )));
        }
        self.gpa = gpa;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Update the cached credit total
    pub fn set_total_credits(&mut self, credits: u32) {
        self.total_credits = credits;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}) - {}",
            self.full_name, self.id, self.reg_no, self.status
        )
    }
}
