//! Course catalog store
//!
//! Thread-safe in-memory store of course records, keyed by course code.
//! List and search results are sorted by code (already uppercase-normalized)
//! for deterministic output.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CampusError, CampusResult};
use crate::models::{Course, CourseCode, Semester};

/// In-memory course catalog
#[derive(Default)]
pub struct CourseCatalog {
    data: RwLock<HashMap<CourseCode, Course>>,
}

impl CourseCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> CampusResult<RwLockReadGuard<'_, HashMap<CourseCode, Course>>> {
        self.data
            .read()
            .map_err(|e| CampusError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> CampusResult<RwLockWriteGuard<'_, HashMap<CourseCode, Course>>> {
        self.data
            .write()
            .map_err(|e| CampusError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Get a course by code
    pub fn get(&self, code: &CourseCode) -> CampusResult<Option<Course>> {
        Ok(self.read()?.get(code).cloned())
    }

    /// Get all courses, sorted by code
    pub fn get_all(&self) -> CampusResult<Vec<Course>> {
        self.filter(|_| true)
    }

    /// Get all active courses, sorted by code
    pub fn get_active(&self) -> CampusResult<Vec<Course>> {
        self.filter(|c| c.is_active)
    }

    /// Insert or replace a course record
    pub fn upsert(&self, course: Course) -> CampusResult<()> {
        self.write()?.insert(course.code().clone(), course);
        Ok(())
    }

    /// Remove a course record, returning it if present
    pub fn remove(&self, code: &CourseCode) -> CampusResult<Option<Course>> {
        Ok(self.write()?.remove(code))
    }

    /// Check if a course exists
    pub fn exists(&self, code: &CourseCode) -> CampusResult<bool> {
        Ok(self.read()?.contains_key(code))
    }

    /// Get courses in a department (case-insensitive), sorted by code
    pub fn by_department(&self, department: &str) -> CampusResult<Vec<Course>> {
        let needle = department.trim().to_lowercase();
        self.filter(|c| c.department.to_lowercase() == needle)
    }

    /// Get courses offered in a semester, sorted by code
    pub fn by_semester(&self, semester: Semester) -> CampusResult<Vec<Course>> {
        self.filter(|c| c.semester == semester)
    }

    /// Get courses whose instructor name contains the given fragment
    pub fn by_instructor(&self, instructor: &str) -> CampusResult<Vec<Course>> {
        let needle = instructor.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        self.filter(|c| {
            c.instructor
                .as_deref()
                .is_some_and(|i| i.to_lowercase().contains(&needle))
        })
    }

    /// Get courses with a given credit value, sorted by code
    pub fn by_credits(&self, credits: u32) -> CampusResult<Vec<Course>> {
        self.filter(|c| c.credits() == credits)
    }

    /// Search courses matching an arbitrary predicate, sorted by code
    pub fn filter<F>(&self, predicate: F) -> CampusResult<Vec<Course>>
    where
        F: Fn(&Course) -> bool,
    {
        let mut courses: Vec<_> = self
            .read()?
            .values()
            .filter(|c| predicate(c))
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(courses)
    }

    /// Count course records
    pub fn count(&self) -> CampusResult<usize> {
        Ok(self.read()?.len())
    }
}
