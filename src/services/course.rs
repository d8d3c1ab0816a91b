//! Course service
//!
//! Provides business logic for the course catalog: CRUD operations,
//! searches, and instructor assignment.

use crate::audit::EntityType;
use crate::error::{CampusError, CampusResult};
use crate::models::{Course, CourseCode, Semester};
use crate::storage::Storage;

/// Service for course catalog management
pub struct CourseService<'a> {
    storage: &'a Storage,
}

impl<'a> CourseService<'a> {
    /// Create a new course service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new course
    ///
    /// Fails with Duplicate if the code is taken.
    pub fn add(&self, course: Course) -> CampusResult<Course> {
        if self.storage.courses.exists(course.code())? {
            return Err(CampusError::Duplicate {
                entity_type: "Course",
                identifier: course.code().to_string(),
            });
        }

        self.storage.courses.upsert(course.clone())?;

        self.storage.log_create(
            EntityType::Course,
            course.code().to_string(),
            Some(course.title.clone()),
            &course,
        )?;

        Ok(course)
    }

    /// Get a course by code
    pub fn get(&self, code: &CourseCode) -> CampusResult<Option<Course>> {
        self.storage.courses.get(code)
    }

    /// Get all courses, sorted by code
    pub fn get_all(&self) -> CampusResult<Vec<Course>> {
        self.storage.courses.get_all()
    }

    /// Get all active courses, sorted by code
    pub fn get_active(&self) -> CampusResult<Vec<Course>> {
        self.storage.courses.get_active()
    }

    /// Replace a course record
    ///
    /// Fails with NotFound if the course does not exist.
    pub fn update(&self, course: Course) -> CampusResult<Course> {
        let before = self
            .storage
            .courses
            .get(course.code())?
            .ok_or_else(|| CampusError::course_not_found(course.code().to_string()))?;

        self.storage.courses.upsert(course.clone())?;

        self.storage.log_update(
            EntityType::Course,
            course.code().to_string(),
            Some(course.title.clone()),
            &before,
            &course,
            None,
        )?;

        Ok(course)
    }

    /// Close a course to enrollment (keeps the record)
    pub fn deactivate(&self, code: &CourseCode) -> CampusResult<Course> {
        let mut course = self
            .storage
            .courses
            .get(code)?
            .ok_or_else(|| CampusError::course_not_found(code.to_string()))?;

        let before = course.clone();
        course.deactivate();
        self.storage.courses.upsert(course.clone())?;

        self.storage.log_update(
            EntityType::Course,
            code.to_string(),
            Some(course.title.clone()),
            &before,
            &course,
            Some("is_active: true -> false".to_string()),
        )?;

        Ok(course)
    }

    /// Physically delete a course record
    pub fn delete(&self, code: &CourseCode) -> CampusResult<()> {
        let removed = self
            .storage
            .courses
            .remove(code)?
            .ok_or_else(|| CampusError::course_not_found(code.to_string()))?;

        self.storage.log_delete(
            EntityType::Course,
            code.to_string(),
            Some(removed.title.clone()),
            &removed,
        )?;

        Ok(())
    }

    /// Get courses in a department
    pub fn get_by_department(&self, department: &str) -> CampusResult<Vec<Course>> {
        self.storage.courses.by_department(department)
    }

    /// Get courses offered in a semester
    pub fn get_by_semester(&self, semester: Semester) -> CampusResult<Vec<Course>> {
        self.storage.courses.by_semester(semester)
    }

    /// Get courses taught by an instructor (substring match)
    pub fn get_by_instructor(&self, instructor: &str) -> CampusResult<Vec<Course>> {
        self.storage.courses.by_instructor(instructor)
    }

    /// Get courses with a given credit value
    pub fn get_by_credits(&self, credits: u32) -> CampusResult<Vec<Course>> {
        self.storage.courses.by_credits(credits)
    }

    /// Search courses matching an arbitrary predicate
    pub fn search<F>(&self, predicate: F) -> CampusResult<Vec<Course>>
    where
        F: Fn(&Course) -> bool,
    {
        self.storage.courses.filter(predicate)
    }

    /// Assign an instructor to a course
    pub fn assign_instructor(&self, code: &CourseCode, instructor: &str) -> CampusResult<Course> {
        let mut course = self
            .storage
            .courses
            .get(code)?
            .ok_or_else(|| CampusError::course_not_found(code.to_string()))?;

        let instructor = instructor.trim();
        if instructor.is_empty() {
            return Err(CampusError::Validation(
                "Instructor name cannot be empty".into(),
            ));
        }

        let before = course.clone();
        course.set_instructor(Some(instructor.to_string()));
        self.storage.courses.upsert(course.clone())?;

        self.storage.log_update(
            EntityType::Course,
            code.to_string(),
            Some(course.title.clone()),
            &before,
            &course,
            Some(format!("instructor: -> {}", instructor)),
        )?;

        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> Storage {
        Storage::new()
    }

    fn course(code: &str, title: &str, credits: u32, dept: &str, semester: Semester) -> Course {
        Course::new(CourseCode::new(code).unwrap(), title, credits, dept, semester).unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let storage = storage();
        let service = CourseService::new(&storage);

        let added = service
            .add(course("CS101", "Intro", 3, "CS", Semester::Fall))
            .unwrap();
        let found = service.get(added.code()).unwrap().unwrap();
        assert_eq!(found.title, "Intro");
    }

    #[test]
    fn test_add_duplicate_code_fails() {
        let storage = storage();
        let service = CourseService::new(&storage);

        service
            .add(course("CS101", "Intro", 3, "CS", Semester::Fall))
            .unwrap();
        let result = service.add(course("CS101", "Other", 4, "CS", Semester::Spring));
        assert!(matches!(result, Err(CampusError::Duplicate { .. })));
    }

    #[test]
    fn test_deactivate_and_delete() {
        let storage = storage();
        let service = CourseService::new(&storage);
        let code = CourseCode::new("CS101").unwrap();

        service
            .add(course("CS101", "Intro", 3, "CS", Semester::Fall))
            .unwrap();

        let deactivated = service.deactivate(&code).unwrap();
        assert!(!deactivated.is_active);
        assert!(service.get(&code).unwrap().is_some());

        service.delete(&code).unwrap();
        assert!(service.get(&code).unwrap().is_none());
        assert!(service.delete(&code).unwrap_err().is_not_found());
    }

    #[test]
    fn test_assign_instructor() {
        let storage = storage();
        let service = CourseService::new(&storage);
        let code = CourseCode::new("CS101").unwrap();

        service
            .add(course("CS101", "Intro", 3, "CS", Semester::Fall))
            .unwrap();

        let updated = service.assign_instructor(&code, "Grace Hopper").unwrap();
        assert_eq!(updated.instructor.as_deref(), Some("Grace Hopper"));

        assert!(service.assign_instructor(&code, "  ").is_err());

        let found = service.get_by_instructor("grace").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_search_by_semester_and_predicate() {
        let storage = storage();
        let service = CourseService::new(&storage);

        service
            .add(course("CS101", "Intro", 3, "CS", Semester::Fall))
            .unwrap();
        service
            .add(course("CS201", "Data Structures", 4, "CS", Semester::Spring))
            .unwrap();

        assert_eq!(service.get_by_semester(Semester::Fall).unwrap().len(), 1);
        assert_eq!(service.search(|c| c.credits() >= 4).unwrap().len(), 1);
    }
}
