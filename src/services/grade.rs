//! Grade engine
//!
//! Records marks against enrollments, derives letter grades and grade
//! points, and keeps each student's cumulative GPA cache up to date. The
//! grade book is the source of truth; the GPA on the student record is a
//! best-effort cache whose refresh failures are logged, never propagated.

use std::collections::BTreeMap;

use log::warn;

use crate::audit::EntityType;
use crate::error::{CampusError, CampusResult};
use crate::models::grade::validate_marks;
use crate::models::{CourseCode, Grade, LetterGrade, StudentId};
use crate::storage::Storage;

/// Service for grade management
pub struct GradeService<'a> {
    storage: &'a Storage,
}

/// Aggregate statistics over the whole grade book
#[derive(Debug, Clone)]
pub struct GradeStatistics {
    /// Total number of recorded grades
    pub total: usize,
    /// Mean marks across all grades
    pub average_marks: f64,
    /// Count per letter grade
    pub distribution: BTreeMap<LetterGrade, usize>,
    /// Percentage of grades that are passing
    pub pass_rate: f64,
}

impl<'a> GradeService<'a> {
    /// Create a new grade service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new grade for an enrolled student.
    ///
    /// Create-only: if a grade already exists for the pair the call fails
    /// and corrections must go through `update_grade`. A successful record
    /// triggers a best-effort GPA recompute for the student.
    pub fn record_grade(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
        marks: f64,
    ) -> CampusResult<Grade> {
        validate_marks(marks)?;

        if !self.storage.students.exists(student_id)? {
            return Err(CampusError::student_not_found(student_id.to_string()));
        }

        if !self.storage.courses.exists(course_code)? {
            return Err(CampusError::course_not_found(course_code.to_string()));
        }

        if !self.storage.enrollments.exists(student_id, course_code)? {
            return Err(CampusError::enrollment_not_found(pair_key(
                student_id,
                course_code,
            )));
        }

        let grade = Grade::new(student_id.clone(), course_code.clone(), marks)?;
        self.storage.grades.insert(grade.clone())?;

        self.refresh_gpa_best_effort(student_id);

        self.storage.log_create(
            EntityType::Grade,
            pair_key(student_id, course_code),
            None,
            &grade,
        )?;

        Ok(grade)
    }

    /// Correct an existing grade.
    ///
    /// Overwrites marks, letter grade, and points together, then triggers
    /// the same best-effort GPA recompute as `record_grade`.
    pub fn update_grade(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
        new_marks: f64,
    ) -> CampusResult<Grade> {
        validate_marks(new_marks)?;

        let mut grade = self
            .storage
            .grades
            .get(student_id, course_code)?
            .ok_or_else(|| CampusError::grade_not_found(pair_key(student_id, course_code)))?;

        let before = grade.clone();
        grade.set_marks(new_marks)?;
        self.storage.grades.upsert(grade.clone())?;

        self.refresh_gpa_best_effort(student_id);

        self.storage.log_update(
            EntityType::Grade,
            pair_key(student_id, course_code),
            None,
            &before,
            &grade,
            Some(format!("marks: {} -> {}", before.marks(), new_marks)),
        )?;

        Ok(grade)
    }

    /// Get a student's grades, sorted by course code
    pub fn get_student_grades(&self, student_id: &StudentId) -> CampusResult<Vec<Grade>> {
        if !self.storage.students.exists(student_id)? {
            return Err(CampusError::student_not_found(student_id.to_string()));
        }
        self.storage.grades.for_student(student_id)
    }

    /// Get a course's grades, sorted by student ID
    pub fn get_course_grades(&self, course_code: &CourseCode) -> CampusResult<Vec<Grade>> {
        if !self.storage.courses.exists(course_code)? {
            return Err(CampusError::course_not_found(course_code.to_string()));
        }
        self.storage.grades.for_course(course_code)
    }

    /// Get all grade records
    pub fn get_all(&self) -> CampusResult<Vec<Grade>> {
        self.storage.grades.get_all()
    }

    /// Compute a student's cumulative GPA as the credit-weighted mean of
    /// grade points over all recorded grades.
    ///
    /// Grades whose course no longer exists in the catalog are skipped, not
    /// zero-weighted. Returns 0.0 for a student with no (weighable) grades.
    pub fn calculate_gpa(&self, student_id: &StudentId) -> CampusResult<f64> {
        let grades = self.get_student_grades(student_id)?;

        let mut quality_points = 0.0;
        let mut total_credits = 0u32;

        for grade in &grades {
            if let Some(course) = self.storage.courses.get(grade.course_code())? {
                quality_points += grade.grade_points() * course.credits() as f64;
                total_credits += course.credits();
            }
        }

        if total_credits == 0 {
            Ok(0.0)
        } else {
            Ok(quality_points / total_credits as f64)
        }
    }

    /// Arithmetic mean of marks across all grades for a course.
    ///
    /// 0.0 if the course has no grades recorded.
    pub fn calculate_course_average(&self, course_code: &CourseCode) -> CampusResult<f64> {
        let grades = self.get_course_grades(course_code)?;

        if grades.is_empty() {
            return Ok(0.0);
        }

        let sum: f64 = grades.iter().map(|g| g.marks()).sum();
        Ok(sum / grades.len() as f64)
    }

    /// Check if a grade is recorded for a pair
    pub fn has_grade(&self, student_id: &StudentId, course_code: &CourseCode) -> CampusResult<bool> {
        self.storage.grades.exists(student_id, course_code)
    }

    /// Delete a grade and refresh the student's GPA cache
    pub fn delete_grade(&self, student_id: &StudentId, course_code: &CourseCode) -> CampusResult<()> {
        let removed = self
            .storage
            .grades
            .remove(student_id, course_code)?
            .ok_or_else(|| CampusError::grade_not_found(pair_key(student_id, course_code)))?;

        self.refresh_gpa_best_effort(student_id);

        self.storage.log_delete(
            EntityType::Grade,
            pair_key(student_id, course_code),
            None,
            &removed,
        )?;

        Ok(())
    }

    /// Count grades per letter for one course
    pub fn course_grade_distribution(
        &self,
        course_code: &CourseCode,
    ) -> CampusResult<BTreeMap<LetterGrade, usize>> {
        let grades = self.get_course_grades(course_code)?;

        let mut distribution = BTreeMap::new();
        for grade in &grades {
            *distribution.entry(grade.letter_grade()).or_insert(0) += 1;
        }
        Ok(distribution)
    }

    /// Aggregate statistics over the whole grade book
    pub fn statistics(&self) -> CampusResult<GradeStatistics> {
        let all = self.storage.grades.get_all()?;

        if all.is_empty() {
            return Ok(GradeStatistics {
                total: 0,
                average_marks: 0.0,
                distribution: BTreeMap::new(),
                pass_rate: 0.0,
            });
        }

        let sum: f64 = all.iter().map(|g| g.marks()).sum();
        let passing = all.iter().filter(|g| g.is_passing()).count();

        let mut distribution = BTreeMap::new();
        for grade in &all {
            *distribution.entry(grade.letter_grade()).or_insert(0) += 1;
        }

        Ok(GradeStatistics {
            total: all.len(),
            average_marks: sum / all.len() as f64,
            distribution,
            pass_rate: passing as f64 * 100.0 / all.len() as f64,
        })
    }

    /// Recompute and persist the student's GPA cache.
    ///
    /// Grade mutations are the source of truth; a failure here is logged
    /// and swallowed so it never fails the grade operation itself.
    fn refresh_gpa_best_effort(&self, student_id: &StudentId) {
        if let Err(e) = self.refresh_gpa(student_id) {
            warn!("Could not update GPA for student {}: {}", student_id, e);
        }
    }

    fn refresh_gpa(&self, student_id: &StudentId) -> CampusResult<()> {
        let gpa = self.calculate_gpa(student_id)?;

        let mut student = self
            .storage
            .students
            .get(student_id)?
            .ok_or_else(|| CampusError::student_not_found(student_id.to_string()))?;

        student.set_gpa(gpa)?;
        self.storage.students.upsert(student)
    }
}

/// Composite key rendering used in diagnostics and the audit log
fn pair_key(student_id: &StudentId, course_code: &CourseCode) -> String {
    format!("{}_{}", student_id, course_code)
}
