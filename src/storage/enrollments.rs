//! Enrollment ledger store
//!
//! Thread-safe in-memory store of enrollment records, keyed by the
//! (student, course) pair. The ledger is the authoritative record of who is
//! enrolled in what; the per-student course set is a cache maintained by the
//! enrollment engine.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CampusError, CampusResult};
use crate::models::{CourseCode, Enrollment, EnrollmentKey, StudentId};

/// In-memory enrollment ledger
#[derive(Default)]
pub struct EnrollmentLedger {
    data: RwLock<HashMap<EnrollmentKey, Enrollment>>,
}

impl EnrollmentLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CampusResult<RwLockReadGuard<'_, HashMap<EnrollmentKey, Enrollment>>> {
        self.data
            .read()
            .map_err(|e| CampusError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> CampusResult<RwLockWriteGuard<'_, HashMap<EnrollmentKey, Enrollment>>> {
        self.data
            .write()
            .map_err(|e| CampusError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Get the enrollment record for a pair
    pub fn get(&self, student_id: &StudentId, course_code: &CourseCode) -> CampusResult<Option<Enrollment>> {
        let key = (student_id.clone(), course_code.clone());
        Ok(self.read()?.get(&key).cloned())
    }

    /// Insert a new enrollment record.
    ///
    /// Fails with DuplicateEnrollment if any record already exists for the
    /// pair, regardless of its status.
    pub fn insert(&self, enrollment: Enrollment) -> CampusResult<()> {
        let mut data = self.write()?;
        let key = enrollment.key();
        if data.contains_key(&key) {
            return Err(CampusError::DuplicateEnrollment {
                student_id: key.0.to_string(),
                course_code: key.1.to_string(),
            });
        }
        data.insert(key, enrollment);
        Ok(())
    }

    /// Insert or replace an enrollment record (used for status updates and import)
    pub fn upsert(&self, enrollment: Enrollment) -> CampusResult<()> {
        self.write()?.insert(enrollment.key(), enrollment);
        Ok(())
    }

    /// Remove the record for a pair, returning it if present
    pub fn remove(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> CampusResult<Option<Enrollment>> {
        let key = (student_id.clone(), course_code.clone());
        Ok(self.write()?.remove(&key))
    }

    /// Check if any record exists for a pair
    pub fn exists(&self, student_id: &StudentId, course_code: &CourseCode) -> CampusResult<bool> {
        let key = (student_id.clone(), course_code.clone());
        Ok(self.read()?.contains_key(&key))
    }

    /// Get a student's enrollments, sorted by course code
    pub fn for_student(&self, student_id: &StudentId) -> CampusResult<Vec<Enrollment>> {
        let mut enrollments: Vec<_> = self
            .read()?
            .values()
            .filter(|e| e.student_id() == student_id)
            .cloned()
            .collect();
        enrollments.sort_by(|a, b| a.course_code().cmp(b.course_code()));
        Ok(enrollments)
    }

    /// Get a course's enrollments, sorted by student ID
    pub fn for_course(&self, course_code: &CourseCode) -> CampusResult<Vec<Enrollment>> {
        let mut enrollments: Vec<_> = self
            .read()?
            .values()
            .filter(|e| e.course_code() == course_code)
            .cloned()
            .collect();
        enrollments.sort_by(|a, b| a.student_id().cmp(b.student_id()));
        Ok(enrollments)
    }

    /// Get all enrollment records, sorted by (student, course)
    pub fn get_all(&self) -> CampusResult<Vec<Enrollment>> {
        let mut enrollments: Vec<_> = self.read()?.values().cloned().collect();
        enrollments.sort_by_key(|e| e.key());
        Ok(enrollments)
    }

    /// Count enrollment records
    pub fn count(&self) -> CampusResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment(student: &str, course: &str) -> Enrollment {
        Enrollment::new(
            StudentId::new(student).unwrap(),
            CourseCode::new(course).unwrap(),
        )
    }

    #[test]
    fn test_insert_rejects_duplicate_pair() {
        let ledger = EnrollmentLedger::new();
        ledger.insert(enrollment("STU001", "CS101")).unwrap();

        let result = ledger.insert(enrollment("STU001", "CS101"));
        assert!(matches!(
            result,
            Err(CampusError::DuplicateEnrollment { .. })
        ));
        assert_eq!(ledger.count().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_check_ignores_status() {
        let ledger = EnrollmentLedger::new();
        let mut dropped = enrollment("STU001", "CS101");
        dropped.set_status(crate::models::EnrollmentStatus::Dropped);
        ledger.insert(dropped).unwrap();

        // A dropped record still blocks a fresh insert for the same pair
        assert!(ledger.insert(enrollment("STU001", "CS101")).is_err());
    }

    #[test]
    fn test_remove_returns_record() {
        let ledger = EnrollmentLedger::new();
        ledger.insert(enrollment("STU001", "CS101")).unwrap();

        let sid = StudentId::new("STU001").unwrap();
        let code = CourseCode::new("CS101").unwrap();
        let removed = ledger.remove(&sid, &code).unwrap();
        assert!(removed.is_some());
        assert!(!ledger.exists(&sid, &code).unwrap());

        // Removing again finds nothing
        assert!(ledger.remove(&sid, &code).unwrap().is_none());
    }

    #[test]
    fn test_for_student_sorted_by_course() {
        let ledger = EnrollmentLedger::new();
        ledger.insert(enrollment("STU001", "MATH201")).unwrap();
        ledger.insert(enrollment("STU001", "CS101")).unwrap();
        ledger.insert(enrollment("STU002", "CS101")).unwrap();

        let sid = StudentId::new("STU001").unwrap();
        let mine = ledger.for_student(&sid).unwrap();
        let codes: Vec<_> = mine.iter().map(|e| e.course_code().as_str()).collect();
        assert_eq!(codes, vec!["CS101", "MATH201"]);
    }

    #[test]
    fn test_for_course_sorted_by_student() {
        let ledger = EnrollmentLedger::new();
        ledger.insert(enrollment("STU002", "CS101")).unwrap();
        ledger.insert(enrollment("STU001", "CS101")).unwrap();

        let code = CourseCode::new("CS101").unwrap();
        let roster = ledger.for_course(&code).unwrap();
        let ids: Vec<_> = roster.iter().map(|e| e.student_id().as_str()).collect();
        assert_eq!(ids, vec!["STU001", "STU002"]);
    }
}
