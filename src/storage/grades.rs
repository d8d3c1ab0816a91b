//! Grade book store
//!
//! Thread-safe in-memory store of grade records, keyed by the same
//! (student, course) pair as the enrollment each grade belongs to. One grade
//! per enrollment; corrections overwrite via upsert.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CampusError, CampusResult};
use crate::models::{CourseCode, EnrollmentKey, Grade, StudentId};

/// In-memory grade book
#[derive(Default)]
pub struct GradeBook {
    data: RwLock<HashMap<EnrollmentKey, Grade>>,
}

impl GradeBook {
    /// Create an empty grade book
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CampusResult<RwLockReadGuard<'_, HashMap<EnrollmentKey, Grade>>> {
        self.data
            .read()
            .map_err(|e| CampusError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> CampusResult<RwLockWriteGuard<'_, HashMap<EnrollmentKey, Grade>>> {
        self.data
            .write()
            .map_err(|e| CampusError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Get the grade for a pair
    pub fn get(&self, student_id: &StudentId, course_code: &CourseCode) -> CampusResult<Option<Grade>> {
        let key = (student_id.clone(), course_code.clone());
        Ok(self.read()?.get(&key).cloned())
    }

    /// Insert a new grade.
    ///
    /// Fails with Duplicate if a grade is already recorded for the pair;
    /// corrections go through upsert.
    pub fn insert(&self, grade: Grade) -> CampusResult<()> {
        let mut data = self.write()?;
        let key = grade.key();
        if data.contains_key(&key) {
            return Err(CampusError::Duplicate {
                entity_type: "Grade",
                identifier: format!("{}_{}", key.0, key.1),
            });
        }
        data.insert(key, grade);
        Ok(())
    }

    /// Insert or replace a grade (used for corrections and import)
    pub fn upsert(&self, grade: Grade) -> CampusResult<()> {
        self.write()?.insert(grade.key(), grade);
        Ok(())
    }

    /// Remove the grade for a pair, returning it if present
    pub fn remove(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> CampusResult<Option<Grade>> {
        let key = (student_id.clone(), course_code.clone());
        Ok(self.write()?.remove(&key))
    }

    /// Check if a grade exists for a pair
    pub fn exists(&self, student_id: &StudentId, course_code: &CourseCode) -> CampusResult<bool> {
        let key = (student_id.clone(), course_code.clone());
        Ok(self.read()?.contains_key(&key))
    }

    /// Get a student's grades, sorted by course code
    pub fn for_student(&self, student_id: &StudentId) -> CampusResult<Vec<Grade>> {
        let mut grades: Vec<_> = self
            .read()?
            .values()
            .filter(|g| g.student_id() == student_id)
            .cloned()
            .collect();
        grades.sort_by(|a, b| a.course_code().cmp(b.course_code()));
        Ok(grades)
    }

    /// Get a course's grades, sorted by student ID
    pub fn for_course(&self, course_code: &CourseCode) -> CampusResult<Vec<Grade>> {
        let mut grades: Vec<_> = self
            .read()?
            .values()
            .filter(|g| g.course_code() == course_code)
            .cloned()
            .collect();
        grades.sort_by(|a, b| a.student_id().cmp(b.student_id()));
        Ok(grades)
    }

    /// Get all grade records, sorted by (student, course)
    pub fn get_all(&self) -> CampusResult<Vec<Grade>> {
        let mut grades: Vec<_> = self.read()?.values().cloned().collect();
        grades.sort_by_key(|g| g.key());
        Ok(grades)
    }

    /// Count grade records
    pub fn count(&self) -> CampusResult<usize> {
        Ok(self.read()?.len())
    }
}
