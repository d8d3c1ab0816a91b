//! Enrollment CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_enrollment_list;
use crate::error::{CampusError, CampusResult};
use crate::models::{CourseCode, EnrollmentStatus, StudentId};
use crate::services::EnrollmentService;
use crate::storage::Storage;

/// Enrollment commands
#[derive(Subcommand)]
pub enum EnrollmentCommands {
    /// Enroll a student in a course
    Add {
        /// Student ID
        student: String,
        /// Course code
        course: String,
    },
    /// Remove a student's enrollment entirely
    Remove {
        /// Student ID
        student: String,
        /// Course code
        course: String,
    },
    /// List enrollments, optionally for one student or course
    List {
        /// Student ID
        #[arg(short, long)]
        student: Option<String>,
        /// Course code
        #[arg(short, long)]
        course: Option<String>,
    },
    /// Change an enrollment's status
    Status {
        /// Student ID
        student: String,
        /// Course code
        course: String,
        /// New status (enrolled, dropped, completed, withdrawn)
        status: String,
    },
    /// Show a student's current credit load
    Credits {
        /// Student ID
        student: String,
    },
}

/// Execute an enrollment command
pub fn handle_enrollment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EnrollmentCommands,
) -> CampusResult<()> {
    let service = EnrollmentService::new(storage, settings);

    match cmd {
        EnrollmentCommands::Add { student, course } => {
            let enrollment =
                service.enroll(&StudentId::new(&student)?, &CourseCode::new(&course)?)?;
            println!(
                "Enrolled {} in {}",
                enrollment.student_id(),
                enrollment.course_code()
            );
        }
        EnrollmentCommands::Remove { student, course } => {
            let student = StudentId::new(&student)?;
            let course = CourseCode::new(&course)?;
            service.unenroll(&student, &course)?;
            println!("Removed enrollment of {} in {}", student, course);
        }
        EnrollmentCommands::List { student, course } => {
            let enrollments = if let Some(student) = student {
                service.get_student_enrollments(&StudentId::new(&student)?)?
            } else if let Some(course) = course {
                service.get_course_enrollments(&CourseCode::new(&course)?)?
            } else {
                service.get_all()?
            };
            print!("{}", format_enrollment_list(&enrollments));
        }
        EnrollmentCommands::Status {
            student,
            course,
            status,
        } => {
            let status = EnrollmentStatus::parse(&status)
                .ok_or_else(|| CampusError::Validation(format!("Unknown status: {}", status)))?;
            let enrollment = service.update_status(
                &StudentId::new(&student)?,
                &CourseCode::new(&course)?,
                status,
            )?;
            println!(
                "Enrollment of {} in {} is now {}",
                enrollment.student_id(),
                enrollment.course_code(),
                enrollment.status
            );
        }
        EnrollmentCommands::Credits { student } => {
            let student = StudentId::new(&student)?;
            let credits = service.credit_count(&student)?;
            println!(
                "{} is carrying {} of {} credits",
                student,
                credits,
                service.max_credits()
            );
        }
    }

    Ok(())
}
