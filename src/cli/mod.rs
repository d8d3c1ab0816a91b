//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod course;
pub mod data;
pub mod enrollment;
pub mod grade;
pub mod student;
pub mod transcript;

pub use course::{handle_course_command, CourseCommands};
pub use data::{handle_data_command, DataCommands};
pub use enrollment::{handle_enrollment_command, EnrollmentCommands};
pub use grade::{handle_grade_command, GradeCommands};
pub use student::{handle_student_command, StudentCommands};
pub use transcript::{handle_transcript_command, TranscriptCommands};
