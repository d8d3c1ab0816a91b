//! Student directory store
//!
//! Thread-safe in-memory store of student records, keyed by student ID.
//! List and search results are sorted by a stable secondary key (name,
//! case-insensitive), never in map-iteration order, so CLI output and tests
//! stay deterministic.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CampusError, CampusResult};
use crate::models::{Student, StudentId, StudentStatus};

/// In-memory student directory
#[derive(Default)]
pub struct StudentDirectory {
    data: RwLock<HashMap<StudentId, Student>>,
}

/// Sort students by full name (case-insensitive), then by ID for stability
fn sort_by_name(students: &mut [Student]) {
    students.sort_by(|a, b| {
        a.full_name
            .to_lowercase()
            .cmp(&b.full_name.to_lowercase())
            .then_with(|| a.id().cmp(b.id()))
    });
}

impl StudentDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CampusResult<RwLockReadGuard<'_, HashMap<StudentId, Student>>> {
        self.data
            .read()
            .map_err(|e| CampusError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> CampusResult<RwLockWriteGuard<'_, HashMap<StudentId, Student>>> {
        self.data
            .write()
            .map_err(|e| CampusError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Get a student by ID
    pub fn get(&self, id: &StudentId) -> CampusResult<Option<Student>> {
        Ok(self.read()?.get(id).cloned())
    }

    /// Get all students, sorted by ID
    pub fn get_all(&self) -> CampusResult<Vec<Student>> {
        let mut students: Vec<_> = self.read()?.values().cloned().collect();
        students.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(students)
    }

    /// Insert or replace a student record
    pub fn upsert(&self, student: Student) -> CampusResult<()> {
        self.write()?.insert(student.id().clone(), student);
        Ok(())
    }

    /// Remove a student record, returning it if present
    pub fn remove(&self, id: &StudentId) -> CampusResult<Option<Student>> {
        Ok(self.write()?.remove(id))
    }

    /// Check if a student exists
    pub fn exists(&self, id: &StudentId) -> CampusResult<bool> {
        Ok(self.read()?.contains_key(id))
    }

    /// Check if a registration number is already taken
    pub fn reg_no_exists(&self, reg_no: &str, exclude: Option<&StudentId>) -> CampusResult<bool> {
        let reg_no = reg_no.to_uppercase();
        Ok(self
            .read()?
            .values()
            .any(|s| s.reg_no() == reg_no && Some(s.id()) != exclude))
    }

    /// Get students with a given status, sorted by name
    pub fn by_status(&self, status: StudentStatus) -> CampusResult<Vec<Student>> {
        self.filter(|s| s.status == status)
    }

    /// Search students whose name contains the given fragment, sorted by name
    pub fn search_by_name(&self, name_part: &str) -> CampusResult<Vec<Student>> {
        let needle = name_part.trim().to_lowercase();
        self.filter(|s| s.full_name.to_lowercase().contains(&needle))
    }

    /// Search students whose email contains the given fragment, sorted by name
    pub fn search_by_email(&self, email_part: &str) -> CampusResult<Vec<Student>> {
        let needle = email_part.trim().to_lowercase();
        self.filter(|s| s.email.to_lowercase().contains(&needle))
    }

    /// Search students matching an arbitrary predicate, sorted by name
    pub fn filter<F>(&self, predicate: F) -> CampusResult<Vec<Student>>
    where
        F: Fn(&Student) -> bool,
    {
        let mut students: Vec<_> = self
            .read()?
            .values()
            .filter(|s| predicate(s))
            .cloned()
            .collect();
        sort_by_name(&mut students);
        Ok(students)
    }

    /// Count student records
    pub fn count(&self) -> CampusResult<usize> {
        Ok(self.read()?.len())
    }
}
