//! Shared person shape
//!
//! The original campus model had a Person base class with Student and
//! Instructor subtypes. Here the common behavior is a capability tag:
//! [`PersonRole`] says what a person is, and enrollment eligibility is a
//! plain function of that tag plus the student's status. Instructors appear
//! on course records by name; they have no directory of their own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CampusError, CampusResult};

/// What kind of person a record represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonRole {
    Student,
    Instructor,
}

impl PersonRole {
    /// Only students can enroll in courses; instructors never can
    pub fn eligible_for_enrollment(&self) -> bool {
        matches!(self, Self::Student)
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Student => write!(f, "Student"),
            Self::Instructor => write!(f, "Instructor"),
        }
    }
}

/// Validate an email address: local part, `@`, domain with a dot
pub(crate) fn validate_email(email: &str) -> CampusResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CampusError::Validation(format!(
            "Invalid email address: {}",
            email
        )))
    }
}

/// Validate a person's full name: letters, spaces, hyphens, periods
pub(crate) fn validate_full_name(name: &str) -> CampusResult<()> {
    let trimmed = name.trim();
    let valid = trimmed.len() >= 2
        && trimmed
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '.');

    if valid {
        Ok(())
    } else {
        Err(CampusError::Validation(format!("Invalid name: {}", name)))
    }
}
