//! Terminal output formatting
//!
//! Plain-text tables and detail views for CLI output. Transcripts render
//! themselves via their Display impl and need no formatter here.

pub mod course;
pub mod records;
pub mod student;

pub use course::format_course_list;
pub use records::{format_enrollment_list, format_grade_list};
pub use student::{format_student_detail, format_student_list};
