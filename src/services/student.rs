//! Student service
//!
//! Provides business logic for the student directory: CRUD operations,
//! searches, and the enrollment-eligibility checks other engines rely on.

use std::collections::HashMap;

use crate::audit::EntityType;
use crate::error::{CampusError, CampusResult};
use crate::models::{CourseCode, Student, StudentId, StudentStatus};
use crate::storage::Storage;

/// Service for student directory management
pub struct StudentService<'a> {
    storage: &'a Storage,
}

impl<'a> StudentService<'a> {
    /// Create a new student service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new student record
    ///
    /// Fails with Duplicate if the ID or registration number is taken.
    pub fn add(&self, student: Student) -> CampusResult<Student> {
        if self.storage.students.exists(student.id())? {
            return Err(CampusError::Duplicate {
                entity_type: "Student",
                identifier: student.id().to_string(),
            });
        }

        if self.storage.students.reg_no_exists(student.reg_no(), None)? {
            return Err(CampusError::Duplicate {
                entity_type: "Student",
                identifier: student.reg_no().to_string(),
            });
        }

        self.storage.students.upsert(student.clone())?;

        self.storage.log_create(
            EntityType::Student,
            student.id().to_string(),
            Some(student.full_name.clone()),
            &student,
        )?;

        Ok(student)
    }

    /// Get a student by ID
    pub fn get(&self, id: &StudentId) -> CampusResult<Option<Student>> {
        self.storage.students.get(id)
    }

    /// Get all students, sorted by ID
    pub fn get_all(&self) -> CampusResult<Vec<Student>> {
        self.storage.students.get_all()
    }

    /// Get students with a given status, sorted by name
    pub fn get_by_status(&self, status: StudentStatus) -> CampusResult<Vec<Student>> {
        self.storage.students.by_status(status)
    }

    /// Replace a student record
    ///
    /// Fails with NotFound if the student does not exist; mutable fields are
    /// re-validated before the record is persisted.
    pub fn update(&self, student: Student) -> CampusResult<Student> {
        crate::models::person::validate_full_name(&student.full_name)?;
        crate::models::person::validate_email(&student.email)?;

        let before = self
            .storage
            .students
            .get(student.id())?
            .ok_or_else(|| CampusError::student_not_found(student.id().to_string()))?;

        self.storage.students.upsert(student.clone())?;

        self.storage.log_update(
            EntityType::Student,
            student.id().to_string(),
            Some(student.full_name.clone()),
            &before,
            &student,
            None,
        )?;

        Ok(student)
    }

    /// Deactivate a student (flips status, keeps the record)
    pub fn deactivate(&self, id: &StudentId) -> CampusResult<Student> {
        let mut student = self
            .storage
            .students
            .get(id)?
            .ok_or_else(|| CampusError::student_not_found(id.to_string()))?;

        let before = student.clone();
        student.set_status(StudentStatus::Inactive);
        self.storage.students.upsert(student.clone())?;

        self.storage.log_update(
            EntityType::Student,
            id.to_string(),
            Some(student.full_name.clone()),
            &before,
            &student,
            Some(format!("status: {} -> {}", before.status, student.status)),
        )?;

        Ok(student)
    }

    /// Physically delete a student record
    ///
    /// Distinct from deactivation; fails with NotFound if absent.
    pub fn delete(&self, id: &StudentId) -> CampusResult<()> {
        let removed = self
            .storage
            .students
            .remove(id)?
            .ok_or_else(|| CampusError::student_not_found(id.to_string()))?;

        self.storage.log_delete(
            EntityType::Student,
            id.to_string(),
            Some(removed.full_name.clone()),
            &removed,
        )?;

        Ok(())
    }

    /// Search students whose name contains the given fragment
    pub fn search_by_name(&self, name_part: &str) -> CampusResult<Vec<Student>> {
        self.storage.students.search_by_name(name_part)
    }

    /// Search students whose email contains the given fragment
    pub fn search_by_email(&self, email_part: &str) -> CampusResult<Vec<Student>> {
        self.storage.students.search_by_email(email_part)
    }

    /// Search students matching an arbitrary predicate
    pub fn search<F>(&self, predicate: F) -> CampusResult<Vec<Student>>
    where
        F: Fn(&Student) -> bool,
    {
        self.storage.students.filter(predicate)
    }

    /// Quick eligibility check: could this student enroll in this course?
    ///
    /// Checks status, the enrolled-course cache, and the cached credit total
    /// against the limit. The enrollment engine re-derives everything from
    /// the authoritative stores before actually enrolling.
    pub fn can_enroll(
        &self,
        id: &StudentId,
        course_code: &CourseCode,
        max_credits: u32,
    ) -> CampusResult<bool> {
        let student = match self.storage.students.get(id)? {
            Some(s) => s,
            None => return Ok(false),
        };

        if !student.is_eligible_for_enrollment() {
            return Ok(false);
        }

        if student.enrolled_courses.contains(course_code) {
            return Ok(false);
        }

        Ok(student.total_credits < max_credits)
    }

    /// Get a student's cached credit total (0 if the student is absent)
    pub fn current_credits(&self, id: &StudentId) -> CampusResult<u32> {
        Ok(self
            .storage
            .students
            .get(id)?
            .map(|s| s.total_credits)
            .unwrap_or(0))
    }

    /// Overwrite a student's cached GPA
    pub fn update_gpa(&self, id: &StudentId, gpa: f64) -> CampusResult<Student> {
        let mut student = self
            .storage
            .students
            .get(id)?
            .ok_or_else(|| CampusError::student_not_found(id.to_string()))?;

        student.set_gpa(gpa)?;
        self.storage.students.upsert(student.clone())?;
        Ok(student)
    }

    /// Count students per status
    pub fn statistics(&self) -> CampusResult<HashMap<StudentStatus, usize>> {
        let mut counts = HashMap::new();
        for student in self.storage.students.get_all()? {
            *counts.entry(student.status).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
