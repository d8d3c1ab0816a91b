//! Business logic layer
//!
//! Each service wraps the storage layer with the rules of its component:
//! the student directory and course catalog contracts, the enrollment
//! engine's state machine and credit limit, the grade engine's band mapping
//! and GPA cascade, and the read-only transcript builder.

pub mod course;
pub mod enrollment;
pub mod grade;
pub mod student;
pub mod transcript;

pub use course::CourseService;
pub use enrollment::{EnrollmentService, EnrollmentStatistics};
pub use grade::{GradeService, GradeStatistics};
pub use student::StudentService;
pub use transcript::{
    AcademicStanding, SemesterSection, Transcript, TranscriptEntry, TranscriptService,
    TranscriptSummary,
};
