//! Grade CLI commands

use clap::Subcommand;

use crate::display::format_grade_list;
use crate::error::CampusResult;
use crate::models::{CourseCode, StudentId};
use crate::services::GradeService;
use crate::storage::Storage;

/// Grade commands
#[derive(Subcommand)]
pub enum GradeCommands {
    /// Record a new grade for an enrolled student
    Record {
        /// Student ID
        student: String,
        /// Course code
        course: String,
        /// Marks (0-100)
        marks: f64,
    },
    /// Correct an existing grade
    Update {
        /// Student ID
        student: String,
        /// Course code
        course: String,
        /// New marks (0-100)
        marks: f64,
    },
    /// List grades, optionally for one student or course
    List {
        /// Student ID
        #[arg(short, long)]
        student: Option<String>,
        /// Course code
        #[arg(short, long)]
        course: Option<String>,
    },
    /// Show a student's cumulative GPA
    Gpa {
        /// Student ID
        student: String,
    },
    /// Show a course's average marks and grade distribution
    Average {
        /// Course code
        course: String,
    },
    /// Delete a grade
    Delete {
        /// Student ID
        student: String,
        /// Course code
        course: String,
    },
}

/// Execute a grade command
pub fn handle_grade_command(storage: &Storage, cmd: GradeCommands) -> CampusResult<()> {
    let service = GradeService::new(storage);

    match cmd {
        GradeCommands::Record {
            student,
            course,
            marks,
        } => {
            let grade =
                service.record_grade(&StudentId::new(&student)?, &CourseCode::new(&course)?, marks)?;
            println!(
                "Recorded {} for {} in {} ({} points)",
                grade.letter_grade(),
                grade.student_id(),
                grade.course_code(),
                grade.grade_points()
            );
        }
        GradeCommands::Update {
            student,
            course,
            marks,
        } => {
            let grade =
                service.update_grade(&StudentId::new(&student)?, &CourseCode::new(&course)?, marks)?;
            println!(
                "Updated grade for {} in {}: now {} ({:.1} marks)",
                grade.student_id(),
                grade.course_code(),
                grade.letter_grade(),
                grade.marks()
            );
        }
        GradeCommands::List { student, course } => {
            let grades = if let Some(student) = student {
                service.get_student_grades(&StudentId::new(&student)?)?
            } else if let Some(course) = course {
                service.get_course_grades(&CourseCode::new(&course)?)?
            } else {
                service.get_all()?
            };
            print!("{}", format_grade_list(&grades));
        }
        GradeCommands::Gpa { student } => {
            let student = StudentId::new(&student)?;
            let gpa = service.calculate_gpa(&student)?;
            println!("Cumulative GPA for {}: {:.2}", student, gpa);
        }
        GradeCommands::Average { course } => {
            let course = CourseCode::new(&course)?;
            let average = service.calculate_course_average(&course)?;
            println!("Average marks for {}: {:.1}", course, average);

            let distribution = service.course_grade_distribution(&course)?;
            if !distribution.is_empty() {
                println!("Distribution:");
                for (letter, count) in &distribution {
                    println!("  {}: {}", letter, count);
                }
            }
        }
        GradeCommands::Delete { student, course } => {
            let student = StudentId::new(&student)?;
            let course = CourseCode::new(&course)?;
            service.delete_grade(&student, &course)?;
            println!("Deleted grade for {} in {}", student, course);
        }
    }

    Ok(())
}
