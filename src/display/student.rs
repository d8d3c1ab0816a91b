//! Student display formatting
//!
//! Formats students for terminal output in table and detail views.

use crate::models::Student;

/// Format a list of students as a table
pub fn format_student_list(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students found.".to_string();
    }

    let name_width = students
        .iter()
        .map(|s| s.full_name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6}  {:<10}  {:<name_width$}  {:<10}  {:>5}  {:>7}\n",
        "ID",
        "RegNo",
        "Name",
        "Status",
        "GPA",
        "Credits",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<6}  {:-<10}  {:-<name_width$}  {:-<10}  {:->5}  {:->7}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for student in students {
        output.push_str(&format!(
            "{:<6}  {:<10}  {:<name_width$}  {:<10}  {:>5.2}  {:>7}\n",
            student.id().as_str(),
            student.reg_no(),
            student.full_name,
            student.status.to_string(),
            student.gpa,
            student.total_credits,
            name_width = name_width,
        ));
    }

    output
}

/// Format a single student's details
pub fn format_student_detail(student: &Student) -> String {
    let mut output = String::new();
    output.push_str(&format!("ID:              {}\n", student.id()));
    output.push_str(&format!("Registration No: {}\n", student.reg_no()));
    output.push_str(&format!("Name:            {}\n", student.full_name));
    output.push_str(&format!("Email:           {}\n", student.email));
    output.push_str(&format!("Status:          {}\n", student.status));
    output.push_str(&format!(
        "Enrolled Since:  {}\n",
        student.enrollment_date.format("%Y-%m-%d")
    ));
    output.push_str(&format!("GPA:             {:.2}\n", student.gpa));
    output.push_str(&format!("Total Credits:   {}\n", student.total_credits));

    if student.enrolled_courses.is_empty() {
        output.push_str("Courses:         (none)\n");
    } else {
        let codes: Vec<_> = student
            .enrolled_courses
            .iter()
            .map(|c| c.as_str())
            .collect();
        output.push_str(&format!("Courses:         {}\n", codes.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentId;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_student_list(&[]), "No students found.");
    }

    #[test]
    fn test_list_contains_all_students() {
        let students = vec![
            Student::new(
                StudentId::new("STU001").unwrap(),
                "REG2024001",
                "Ada Lovelace",
                "ada@example.edu",
            )
            .unwrap(),
            Student::new(
                StudentId::new("STU002").unwrap(),
                "REG2024002",
                "Alan Turing",
                "alan@example.edu",
            )
            .unwrap(),
        ];

        let output = format_student_list(&students);
        assert!(output.contains("Ada Lovelace"));
        assert!(output.contains("STU002"));
        assert!(output.contains("RegNo"));
    }

    #[test]
    fn test_detail_view() {
        let student = Student::new(
            StudentId::new("STU001").unwrap(),
            "REG2024001",
            "Ada Lovelace",
            "ada@example.edu",
        )
        .unwrap();

        let output = format_student_detail(&student);
        assert!(output.contains("ada@example.edu"));
        assert!(output.contains("(none)"));
    }
}
