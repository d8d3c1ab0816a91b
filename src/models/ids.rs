//! Strongly-typed key wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up student IDs and
//! course codes at compile time. Keys are validated and normalized to
//! uppercase at construction, so a held key is always well-formed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CampusError, CampusResult};

/// Macro to generate validated string-key newtype wrappers
macro_rules! define_key {
    ($name:ident, $label:literal, $validate:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a key from a raw string, validating and normalizing it
            pub fn new(raw: &str) -> CampusResult<Self> {
                let normalized = raw.trim().to_uppercase();
                if !$validate(&normalized) {
                    return Err(CampusError::Validation(format!(
                        concat!("Invalid ", $label, ": {}"),
                        raw
                    )));
                }
                Ok(Self(normalized))
            }

            /// Get the key as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = CampusError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Valid student IDs look like `STU042`: the fixed prefix plus three digits
fn is_valid_student_id(s: &str) -> bool {
    s.len() == 6 && s.starts_with("STU") && s[3..].chars().all(|c| c.is_ascii_digit())
}

/// Valid course codes look like `CS101` or `MATH201`: 2-4 letters plus three digits
fn is_valid_course_code(s: &str) -> bool {
    let letters: Vec<char> = s.chars().take_while(|c| c.is_ascii_uppercase()).collect();
    let digits = &s[letters.len()..];
    (2..=4).contains(&letters.len())
        && digits.len() == 3
        && digits.chars().all(|c| c.is_ascii_digit())
}

define_key!(StudentId, "student ID", is_valid_student_id);
define_key!(CourseCode, "course code", is_valid_course_code);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id_valid() {
        let id = StudentId::new("STU001").unwrap();
        assert_eq!(id.as_str(), "STU001");
    }

    #[test]
    fn test_student_id_normalizes_case() {
        let id = StudentId::new("stu042").unwrap();
        assert_eq!(id.as_str(), "STU042");
    }

    #[test]
    fn test_student_id_rejects_malformed() {
        assert!(StudentId::new("STU1").is_err());
        assert!(StudentId::new("STUXYZ").is_err());
        assert!(StudentId::new("ABC001").is_err());
        assert!(StudentId::new("").is_err());
    }

    #[test]
    fn test_course_code_valid() {
        assert_eq!(CourseCode::new("CS101").unwrap().as_str(), "CS101");
        assert_eq!(CourseCode::new("math201").unwrap().as_str(), "MATH201");
    }

    #[test]
    fn test_course_code_rejects_malformed() {
        assert!(CourseCode::new("C101").is_err()); // too few letters
        assert!(CourseCode::new("PHYSI101").is_err()); // too many letters
        assert!(CourseCode::new("CS10").is_err()); // too few digits
        assert!(CourseCode::new("CS1011").is_err()); // too many digits
        assert!(CourseCode::new("101CS").is_err());
    }

    #[test]
    fn test_key_parse_round_trip() {
        let id: StudentId = "STU123".parse().unwrap();
        assert_eq!(id.to_string(), "STU123");
    }

    #[test]
    fn test_key_serialization() {
        let code = CourseCode::new("CS101").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"CS101\"");
        let back: CourseCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
