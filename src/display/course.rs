//! Course display formatting

use crate::models::Course;

/// Format a list of courses as a table
pub fn format_course_list(courses: &[Course]) -> String {
    if courses.is_empty() {
        return "No courses found.".to_string();
    }

    let title_width = courses
        .iter()
        .map(|c| c.title.len())
        .max()
        .unwrap_or(5)
        .max(5);
    let dept_width = courses
        .iter()
        .map(|c| c.department.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<title_width$}  {:>7}  {:<dept_width$}  {:<8}  {:<20}  {}\n",
        "Code",
        "Title",
        "Credits",
        "Dept",
        "Semester",
        "Instructor",
        "Active",
        title_width = title_width,
        dept_width = dept_width,
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<title_width$}  {:->7}  {:-<dept_width$}  {:-<8}  {:-<20}  {:-<6}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        title_width = title_width,
        dept_width = dept_width,
    ));

    for course in courses {
        output.push_str(&format!(
            "{:<8}  {:<title_width$}  {:>7}  {:<dept_width$}  {:<8}  {:<20}  {}\n",
            course.code().as_str(),
            course.title,
            course.credits(),
            course.department,
            course.semester.to_string(),
            course.instructor.as_deref().unwrap_or("-"),
            if course.is_active { "yes" } else { "no" },
            title_width = title_width,
            dept_width = dept_width,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseCode, Semester};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_course_list(&[]), "No courses found.");
    }

    #[test]
    fn test_list_contains_course_fields() {
        let mut course = Course::new(
            CourseCode::new("CS101").unwrap(),
            "Intro to Programming",
            3,
            "Computer Science",
            Semester::Fall,
        )
        .unwrap();
        course.set_instructor(Some("Grace Hopper".into()));

        let output = format_course_list(&[course]);
        assert!(output.contains("CS101"));
        assert!(output.contains("Grace Hopper"));
        assert!(output.contains("yes"));
    }
}
