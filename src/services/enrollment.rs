//! Enrollment engine
//!
//! Validates and records student-course relationships. This is the core rule
//! engine: it enforces eligibility, the duplicate-enrollment policy, and the
//! per-semester credit limit, and it keeps the student record's
//! enrolled-course and credit caches in sync with the authoritative ledger.
//!
//! State machine per (student, course) pair: absent -> enrolled ->
//! {dropped, completed, withdrawn}. The only way back to absent is
//! `unenroll`, which deletes the record entirely.

use std::collections::HashMap;

use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::{CampusError, CampusResult};
use crate::models::{CourseCode, Enrollment, EnrollmentStatus, Student, StudentId};
use crate::storage::Storage;

/// Service for enrollment management
pub struct EnrollmentService<'a> {
    storage: &'a Storage,
    max_credits: u32,
}

/// Aggregate counts over the enrollment ledger
#[derive(Debug, Clone)]
pub struct EnrollmentStatistics {
    /// Total number of enrollment records
    pub total: usize,
    /// Records per status
    pub by_status: HashMap<EnrollmentStatus, usize>,
    /// Records per course
    pub by_course: HashMap<CourseCode, usize>,
}

impl<'a> EnrollmentService<'a> {
    /// Create a new enrollment service with the configured credit limit
    pub fn new(storage: &'a Storage, settings: &Settings) -> Self {
        Self {
            storage,
            max_credits: settings.max_credits_per_semester,
        }
    }

    /// The per-semester credit limit this engine enforces
    pub fn max_credits(&self) -> u32 {
        self.max_credits
    }

    /// Enroll a student in a course.
    ///
    /// Checks, in order: student exists and is eligible, course exists, no
    /// record already exists for the pair (whatever its status), and the
    /// credit limit. Credits are re-derived from the ledger and catalog on
    /// every call rather than trusted from the student's cached total.
    ///
    /// All checks happen before any mutation. The one compensating action in
    /// the system: if persisting the student-cache update fails after the
    /// enrollment record was inserted, the record is removed again.
    pub fn enroll(&self, student_id: &StudentId, course_code: &CourseCode) -> CampusResult<Enrollment> {
        let mut student = self
            .storage
            .students
            .get(student_id)?
            .ok_or_else(|| CampusError::student_not_found(student_id.to_string()))?;

        if !student.is_eligible_for_enrollment() {
            return Err(CampusError::NotFound {
                entity_type: "Student",
                identifier: format!("{} (not eligible for enrollment)", student_id),
            });
        }

        let course = self
            .storage
            .courses
            .get(course_code)?
            .ok_or_else(|| CampusError::course_not_found(course_code.to_string()))?;

        if self.storage.enrollments.exists(student_id, course_code)? {
            return Err(CampusError::DuplicateEnrollment {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }

        let current_credits = self.credit_count(student_id)?;
        if current_credits + course.credits() > self.max_credits {
            return Err(CampusError::CreditLimitExceeded {
                student_id: student_id.to_string(),
                current: current_credits,
                attempted: course.credits(),
                max: self.max_credits,
            });
        }

        let enrollment = Enrollment::new(student_id.clone(), course_code.clone());
        self.storage.enrollments.insert(enrollment.clone())?;

        student.add_enrolled_course(course_code.clone());
        student.set_total_credits(current_credits + course.credits());

        if let Err(e) = self.persist_student(student) {
            // Roll back the enrollment record so the failed call leaves no trace
            let _ = self.storage.enrollments.remove(student_id, course_code);
            return Err(e);
        }

        self.storage.log_create(
            EntityType::Enrollment,
            pair_key(student_id, course_code),
            None,
            &enrollment,
        )?;

        Ok(enrollment)
    }

    /// Remove a student's enrollment in a course.
    ///
    /// Deletes the record entirely and updates the student's caches. There
    /// is no compensating rollback on the cache update; the window is
    /// accepted rather than hidden.
    pub fn unenroll(&self, student_id: &StudentId, course_code: &CourseCode) -> CampusResult<()> {
        let removed = self
            .storage
            .enrollments
            .remove(student_id, course_code)?
            .ok_or_else(|| CampusError::enrollment_not_found(pair_key(student_id, course_code)))?;

        let mut student = self
            .storage
            .students
            .get(student_id)?
            .ok_or_else(|| CampusError::student_not_found(student_id.to_string()))?;

        let course = self
            .storage
            .courses
            .get(course_code)?
            .ok_or_else(|| CampusError::course_not_found(course_code.to_string()))?;

        student.remove_enrolled_course(course_code);
        let remaining = student.total_credits.saturating_sub(course.credits());
        student.set_total_credits(remaining);
        self.persist_student(student)?;

        self.storage.log_delete(
            EntityType::Enrollment,
            pair_key(student_id, course_code),
            None,
            &removed,
        )?;

        Ok(())
    }

    /// Get a student's enrollments, sorted by course code
    pub fn get_student_enrollments(&self, student_id: &StudentId) -> CampusResult<Vec<Enrollment>> {
        if !self.storage.students.exists(student_id)? {
            return Err(CampusError::student_not_found(student_id.to_string()));
        }
        self.storage.enrollments.for_student(student_id)
    }

    /// Get a course's enrollments, sorted by student ID
    pub fn get_course_enrollments(&self, course_code: &CourseCode) -> CampusResult<Vec<Enrollment>> {
        if !self.storage.courses.exists(course_code)? {
            return Err(CampusError::course_not_found(course_code.to_string()));
        }
        self.storage.enrollments.for_course(course_code)
    }

    /// Get all enrollment records
    pub fn get_all(&self) -> CampusResult<Vec<Enrollment>> {
        self.storage.enrollments.get_all()
    }

    /// Check whether any record exists for a pair
    pub fn is_enrolled(&self, student_id: &StudentId, course_code: &CourseCode) -> CampusResult<bool> {
        self.storage.enrollments.exists(student_id, course_code)
    }

    /// Sum the credits of a student's current enrollments.
    ///
    /// Re-resolves each course from the catalog; a course deleted after
    /// enrollment contributes 0 rather than erroring.
    pub fn credit_count(&self, student_id: &StudentId) -> CampusResult<u32> {
        let enrollments = self.storage.enrollments.for_student(student_id)?;

        let mut total = 0;
        for enrollment in &enrollments {
            if let Some(course) = self.storage.courses.get(enrollment.course_code())? {
                total += course.credits();
            }
        }
        Ok(total)
    }

    /// Transition an enrollment to a new status
    pub fn update_status(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
        status: EnrollmentStatus,
    ) -> CampusResult<Enrollment> {
        let mut enrollment = self
            .storage
            .enrollments
            .get(student_id, course_code)?
            .ok_or_else(|| CampusError::enrollment_not_found(pair_key(student_id, course_code)))?;

        let before = enrollment.clone();
        enrollment.set_status(status);
        self.storage.enrollments.upsert(enrollment.clone())?;

        self.storage.log_update(
            EntityType::Enrollment,
            pair_key(student_id, course_code),
            None,
            &before,
            &enrollment,
            Some(format!("status: {} -> {}", before.status, status)),
        )?;

        Ok(enrollment)
    }

    /// Aggregate counts over the whole ledger
    pub fn statistics(&self) -> CampusResult<EnrollmentStatistics> {
        let all = self.storage.enrollments.get_all()?;

        let mut by_status: HashMap<EnrollmentStatus, usize> = HashMap::new();
        let mut by_course: HashMap<CourseCode, usize> = HashMap::new();
        for enrollment in &all {
            *by_status.entry(enrollment.status).or_insert(0) += 1;
            *by_course.entry(enrollment.course_code().clone()).or_insert(0) += 1;
        }

        Ok(EnrollmentStatistics {
            total: all.len(),
            by_status,
            by_course,
        })
    }

    /// Persist a student-cache update, failing NotFound if the student
    /// vanished in the meantime
    fn persist_student(&self, student: Student) -> CampusResult<()> {
        if !self.storage.students.exists(student.id())? {
            return Err(CampusError::student_not_found(student.id().to_string()));
        }
        self.storage.students.upsert(student)
    }
}

/// Composite key rendering used in diagnostics and the audit log
fn pair_key(student_id: &StudentId, course_code: &CourseCode) -> String {
    format!("{}_{}", student_id, course_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Semester, Student, StudentStatus};

    fn setup() -> (Storage, Settings) {
        let storage = Storage::new();
        let settings = Settings::default();

        let student = Student::new(
            StudentId::new("STU001").unwrap(),
            "REG2024001",
            "Ada Lovelace",
            "ada@example.edu",
        )
        .unwrap();
        storage.students.upsert(student).unwrap();

        for (code, title, credits) in [
            ("CS101", "Intro to Programming", 3),
            ("MATH201", "Calculus II", 4),
            ("PHYS301", "Quantum Mechanics", 6),
        ] {
            let course = Course::new(
                CourseCode::new(code).unwrap(),
                title,
                credits,
                "Science",
                Semester::Fall,
            )
            .unwrap();
            storage.courses.upsert(course).unwrap();
        }

        (storage, settings)
    }

    fn sid(s: &str) -> StudentId {
        StudentId::new(s).unwrap()
    }

    fn code(c: &str) -> CourseCode {
        CourseCode::new(c).unwrap()
    }

    #[test]
    fn test_enroll_updates_student_caches() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        let enrollment = service.enroll(&sid("STU001"), &code("CS101")).unwrap();
        assert_eq!(enrollment.status, EnrollmentStatus::Enrolled);

        let student = storage.students.get(&sid("STU001")).unwrap().unwrap();
        assert_eq!(student.total_credits, 3);
        assert!(student.enrolled_courses.contains(&code("CS101")));
        assert!(service.is_enrolled(&sid("STU001"), &code("CS101")).unwrap());
    }

    #[test]
    fn test_enroll_missing_student_fails() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        let result = service.enroll(&sid("STU999"), &code("CS101"));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_enroll_ineligible_student_fails_as_not_found() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        let mut student = storage.students.get(&sid("STU001")).unwrap().unwrap();
        student.set_status(StudentStatus::Suspended);
        storage.students.upsert(student).unwrap();

        let result = service.enroll(&sid("STU001"), &code("CS101"));
        assert!(result.unwrap_err().is_not_found());
        assert_eq!(storage.enrollments.count().unwrap(), 0);
    }

    #[test]
    fn test_enroll_missing_course_fails() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        let result = service.enroll(&sid("STU001"), &code("CS999"));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_enrollment_rejected_with_no_state_change() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        service.enroll(&sid("STU001"), &code("CS101")).unwrap();
        let result = service.enroll(&sid("STU001"), &code("CS101"));
        assert!(matches!(
            result,
            Err(CampusError::DuplicateEnrollment { .. })
        ));

        // No state change on the failing call
        let student = storage.students.get(&sid("STU001")).unwrap().unwrap();
        assert_eq!(student.total_credits, 3);
        assert_eq!(storage.enrollments.count().unwrap(), 1);
    }

    #[test]
    fn test_dropped_record_still_blocks_reenrollment() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        service.enroll(&sid("STU001"), &code("CS101")).unwrap();
        service
            .update_status(&sid("STU001"), &code("CS101"), EnrollmentStatus::Dropped)
            .unwrap();

        let result = service.enroll(&sid("STU001"), &code("CS101"));
        assert!(matches!(
            result,
            Err(CampusError::DuplicateEnrollment { .. })
        ));
    }

    #[test]
    fn test_credit_limit_enforced() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        // 3 + 4 + 6 = 13 credits, fine
        service.enroll(&sid("STU001"), &code("CS101")).unwrap();
        service.enroll(&sid("STU001"), &code("MATH201")).unwrap();
        service.enroll(&sid("STU001"), &code("PHYS301")).unwrap();

        // One more 6-credit course would hit 19 > 18
        let extra = Course::new(code("CHEM401"), "Physical Chemistry", 6, "Science", Semester::Fall)
            .unwrap();
        storage.courses.upsert(extra).unwrap();

        let result = service.enroll(&sid("STU001"), &code("CHEM401"));
        match result {
            Err(CampusError::CreditLimitExceeded {
                current,
                attempted,
                max,
                ..
            }) => {
                assert_eq!(current, 13);
                assert_eq!(attempted, 6);
                assert_eq!(max, 18);
            }
            other => panic!("expected CreditLimitExceeded, got {:?}", other),
        }

        // Caches untouched by the failing call
        let student = storage.students.get(&sid("STU001")).unwrap().unwrap();
        assert_eq!(student.total_credits, 13);
        assert!(!student.enrolled_courses.contains(&code("CHEM401")));
    }

    #[test]
    fn test_credits_rederived_not_trusted_from_cache() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        service.enroll(&sid("STU001"), &code("CS101")).unwrap();

        // Corrupt the cached total; the engine must not trust it
        let mut student = storage.students.get(&sid("STU001")).unwrap().unwrap();
        student.set_total_credits(17);
        storage.students.upsert(student).unwrap();

        // Real total is 3, so a 4-credit course still fits
        service.enroll(&sid("STU001"), &code("MATH201")).unwrap();
        let student = storage.students.get(&sid("STU001")).unwrap().unwrap();
        assert_eq!(student.total_credits, 7);
    }

    #[test]
    fn test_unenroll_removes_record_and_decrements() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        service.enroll(&sid("STU001"), &code("CS101")).unwrap();
        service.enroll(&sid("STU001"), &code("MATH201")).unwrap();

        service.unenroll(&sid("STU001"), &code("CS101")).unwrap();

        let student = storage.students.get(&sid("STU001")).unwrap().unwrap();
        assert_eq!(student.total_credits, 4);
        assert!(!student.enrolled_courses.contains(&code("CS101")));
        assert!(!service.is_enrolled(&sid("STU001"), &code("CS101")).unwrap());
    }

    #[test]
    fn test_unenroll_missing_pair_mutates_nothing() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        service.enroll(&sid("STU001"), &code("CS101")).unwrap();
        let result = service.unenroll(&sid("STU001"), &code("MATH201"));
        assert!(result.unwrap_err().is_not_found());

        let student = storage.students.get(&sid("STU001")).unwrap().unwrap();
        assert_eq!(student.total_credits, 3);
        assert_eq!(storage.enrollments.count().unwrap(), 1);
    }

    #[test]
    fn test_credit_count_skips_deleted_courses() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        service.enroll(&sid("STU001"), &code("CS101")).unwrap();
        service.enroll(&sid("STU001"), &code("MATH201")).unwrap();

        storage.courses.remove(&code("CS101")).unwrap();

        // Deleted course contributes 0, silently
        assert_eq!(service.credit_count(&sid("STU001")).unwrap(), 4);
    }

    #[test]
    fn test_total_credits_matches_enrolled_courses_after_each_operation() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        let check_invariant = |storage: &Storage| {
            let student = storage.students.get(&sid("STU001")).unwrap().unwrap();
            let expected: u32 = student
                .enrolled_courses
                .iter()
                .filter_map(|c| storage.courses.get(c).unwrap())
                .map(|c| c.credits())
                .sum();
            assert_eq!(student.total_credits, expected);
        };

        service.enroll(&sid("STU001"), &code("CS101")).unwrap();
        check_invariant(&storage);
        service.enroll(&sid("STU001"), &code("MATH201")).unwrap();
        check_invariant(&storage);
        service.unenroll(&sid("STU001"), &code("CS101")).unwrap();
        check_invariant(&storage);
    }

    #[test]
    fn test_rosters_and_statistics() {
        let (storage, settings) = setup();
        let service = EnrollmentService::new(&storage, &settings);

        let other = Student::new(sid("STU002"), "REG2024002", "Alan Turing", "alan@example.edu")
            .unwrap();
        storage.students.upsert(other).unwrap();

        service.enroll(&sid("STU001"), &code("CS101")).unwrap();
        service.enroll(&sid("STU002"), &code("CS101")).unwrap();
        service.enroll(&sid("STU001"), &code("MATH201")).unwrap();
        service
            .update_status(&sid("STU001"), &code("MATH201"), EnrollmentStatus::Completed)
            .unwrap();

        let roster = service.get_course_enrollments(&code("CS101")).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].student_id().as_str(), "STU001");

        let stats = service.statistics().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.get(&EnrollmentStatus::Enrolled), Some(&2));
        assert_eq!(stats.by_status.get(&EnrollmentStatus::Completed), Some(&1));
        assert_eq!(stats.by_course.get(&code("CS101")), Some(&2));
    }
}
