//! Enrollment and grade display formatting

use crate::models::{Enrollment, Grade};

/// Format a list of enrollments as a table
pub fn format_enrollment_list(enrollments: &[Enrollment]) -> String {
    if enrollments.is_empty() {
        return "No enrollments found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<8}  {:<10}  {}\n",
        "Student", "Course", "Status", "Enrolled"
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<8}  {:-<10}  {:-<10}\n",
        "", "", "", ""
    ));

    for enrollment in enrollments {
        output.push_str(&format!(
            "{:<8}  {:<8}  {:<10}  {}\n",
            enrollment.student_id().as_str(),
            enrollment.course_code().as_str(),
            enrollment.status.to_string(),
            enrollment.enrollment_date.format("%Y-%m-%d"),
        ));
    }

    output
}

/// Format a list of grades as a table
pub fn format_grade_list(grades: &[Grade]) -> String {
    if grades.is_empty() {
        return "No grades recorded.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8}  {:<8}  {:>6}  {:>5}  {:>6}  {}\n",
        "Student", "Course", "Marks", "Grade", "Points", "Recorded"
    ));
    output.push_str(&format!(
        "{:-<8}  {:-<8}  {:->6}  {:->5}  {:->6}  {:-<10}\n",
        "", "", "", "", "", ""
    ));

    for grade in grades {
        output.push_str(&format!(
            "{:<8}  {:<8}  {:>6.1}  {:>5}  {:>6.1}  {}\n",
            grade.student_id().as_str(),
            grade.course_code().as_str(),
            grade.marks(),
            grade.letter_grade().to_string(),
            grade.grade_points(),
            grade.recorded_date.format("%Y-%m-%d"),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseCode, StudentId};

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_enrollment_list(&[]), "No enrollments found.");
        assert_eq!(format_grade_list(&[]), "No grades recorded.");
    }

    #[test]
    fn test_grade_table_contains_derived_fields() {
        let grade = Grade::new(
            StudentId::new("STU001").unwrap(),
            CourseCode::new("CS101").unwrap(),
            85.0,
        )
        .unwrap();

        let output = format_grade_list(&[grade]);
        assert!(output.contains("85.0"));
        assert!(output.contains("B"));
        assert!(output.contains("3.0"));
    }

    #[test]
    fn test_enrollment_table() {
        let enrollment = Enrollment::new(
            StudentId::new("STU001").unwrap(),
            CourseCode::new("CS101").unwrap(),
        );

        let output = format_enrollment_list(&[enrollment]);
        assert!(output.contains("STU001"));
        assert!(output.contains("Enrolled"));
    }
}
