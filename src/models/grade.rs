//! Grade model
//!
//! A grade records the marks a student earned in one course, keyed by the
//! same (student, course) pair as the enrollment it belongs to. The letter
//! grade and grade points are derived from the marks and can never disagree
//! with them: the only way to change marks re-derives both.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enrollment::EnrollmentKey;
use super::ids::{CourseCode, StudentId};
use crate::error::{CampusError, CampusResult};

/// Letter grade with its grade-point value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Map marks to a letter grade using the fixed bands:
    /// A is 90 and above, B is 80 and above, C is 70 and above,
    /// D is 60 and above, F is everything below.
    pub fn from_marks(marks: f64) -> Self {
        if marks >= 90.0 {
            Self::A
        } else if marks >= 80.0 {
            Self::B
        } else if marks >= 70.0 {
            Self::C
        } else if marks >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    /// Grade-point value on the 4.0 scale
    pub fn grade_points(&self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::B => 3.0,
            Self::C => 2.0,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Whether this grade earns credit
    pub fn is_passing(&self) -> bool {
        !matches!(self, Self::F)
    }

    /// Whether this grade is at honors level
    pub fn is_honor_level(&self) -> bool {
        self.grade_points() >= 3.5
    }

    /// Qualitative description of the grade
    pub fn description(&self) -> &'static str {
        match self {
            Self::A => "Excellent",
            Self::B => "Good",
            Self::C => "Satisfactory",
            Self::D => "Poor",
            Self::F => "Fail",
        }
    }

    /// Parse a letter grade from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            "F" => Some(Self::F),
            _ => None,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::F => write!(f, "F"),
        }
    }
}

/// Validate that marks are on the 0-100 scale
pub(crate) fn validate_marks(marks: f64) -> CampusResult<()> {
    if (0.0..=100.0).contains(&marks) && marks.is_finite() {
        Ok(())
    } else {
        Err(CampusError::Validation(format!(
            "Marks must be between 0 and 100: {}",
            marks
        )))
    }
}

/// A recorded grade for one student in one course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    /// Graded student, immutable after creation
    student_id: StudentId,

    /// Graded course, immutable after creation
    course_code: CourseCode,

    /// Marks on the 0-100 scale
    marks: f64,

    /// Letter grade derived from the marks
    letter_grade: LetterGrade,

    /// Grade points derived from the letter grade
    grade_points: f64,

    /// When the grade was first recorded
    pub recorded_date: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Grade {
    /// Record a new grade, validating marks and deriving letter/points
    pub fn new(student_id: StudentId, course_code: CourseCode, marks: f64) -> CampusResult<Self> {
        validate_marks(marks)?;

        let letter_grade = LetterGrade::from_marks(marks);
        let now = Utc::now();
        Ok(Self {
            student_id,
            course_code,
            marks,
            letter_grade,
            grade_points: letter_grade.grade_points(),
            recorded_date: now,
            updated_at: now,
        })
    }

    /// Get the graded student's identifier
    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    /// Get the graded course's code
    pub fn course_code(&self) -> &CourseCode {
        &self.course_code
    }

    /// The composite key for this record
    pub fn key(&self) -> EnrollmentKey {
        (self.student_id.clone(), self.course_code.clone())
    }

    /// Get the marks
    pub fn marks(&self) -> f64 {
        self.marks
    }

    /// Get the derived letter grade
    pub fn letter_grade(&self) -> LetterGrade {
        self.letter_grade
    }

    /// Get the derived grade points
    pub fn grade_points(&self) -> f64 {
        self.grade_points
    }

    /// Overwrite the marks, re-deriving letter grade and points together
    pub fn set_marks(&mut self, marks: f64) -> CampusResult<()> {
        validate_marks(marks)?;
        self.marks = marks;
        self.letter_grade = LetterGrade::from_marks(marks);
        self.grade_points = self.letter_grade.grade_points();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether this grade earns credit
    pub fn is_passing(&self) -> bool {
        self.letter_grade.is_passing()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {}: {:.1} ({}, {:.1} points)",
            self.student_id, self.course_code, self.marks, self.letter_grade, self.grade_points
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_grade(marks: f64) -> CampusResult<Grade> {
        Grade::new(
            StudentId::new("STU001").unwrap(),
            CourseCode::new("CS101").unwrap(),
            marks,
        )
    }

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(LetterGrade::from_marks(100.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_marks(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_marks(89.9), LetterGrade::B);
        assert_eq!(LetterGrade::from_marks(80.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_marks(79.9), LetterGrade::C);
        assert_eq!(LetterGrade::from_marks(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_marks(60.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_marks(59.9), LetterGrade::F);
        assert_eq!(LetterGrade::from_marks(0.0), LetterGrade::F);
    }

    #[test]
    fn test_grade_points_mapping() {
        assert_eq!(LetterGrade::A.grade_points(), 4.0);
        assert_eq!(LetterGrade::B.grade_points(), 3.0);
        assert_eq!(LetterGrade::C.grade_points(), 2.0);
        assert_eq!(LetterGrade::D.grade_points(), 1.0);
        assert_eq!(LetterGrade::F.grade_points(), 0.0);
    }

    #[test]
    fn test_passing_and_honors() {
        assert!(LetterGrade::D.is_passing());
        assert!(!LetterGrade::F.is_passing());
        assert!(LetterGrade::A.is_honor_level());
        assert!(!LetterGrade::B.is_honor_level());
    }

    #[test]
    fn test_marks_out_of_range_rejected() {
        assert!(new_grade(105.0).is_err());
        assert!(new_grade(-1.0).is_err());
        assert!(new_grade(f64::NAN).is_err());
    }

    #[test]
    fn test_marks_and_letter_stay_in_sync() {
        let mut grade = new_grade(85.0).unwrap();
        assert_eq!(grade.letter_grade(), LetterGrade::B);
        assert_eq!(grade.grade_points(), 3.0);

        grade.set_marks(95.0).unwrap();
        assert_eq!(grade.marks(), 95.0);
        assert_eq!(grade.letter_grade(), LetterGrade::A);
        assert_eq!(grade.grade_points(), 4.0);

        // A failed update leaves the record untouched
        assert!(grade.set_marks(120.0).is_err());
        assert_eq!(grade.marks(), 95.0);
        assert_eq!(grade.letter_grade(), LetterGrade::A);
    }
}
