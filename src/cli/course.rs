//! Course CLI commands

use clap::Subcommand;

use crate::display::format_course_list;
use crate::error::{CampusError, CampusResult};
use crate::models::{Course, CourseCode, Semester};
use crate::services::CourseService;
use crate::storage::Storage;

/// Course catalog commands
#[derive(Subcommand)]
pub enum CourseCommands {
    /// Add a new course
    Add {
        /// Course code (e.g., CS101)
        code: String,
        /// Course title
        title: String,
        /// Credit value (1-6)
        credits: u32,
        /// Offering department
        department: String,
        /// Semester (spring, summer, fall)
        #[arg(short, long, default_value = "spring")]
        semester: String,
        /// Instructor name
        #[arg(short, long)]
        instructor: Option<String>,
    },
    /// List courses
    List {
        /// Only show active courses
        #[arg(long)]
        active: bool,
        /// Filter by department
        #[arg(short, long)]
        department: Option<String>,
        /// Filter by semester
        #[arg(short, long)]
        semester: Option<String>,
        /// Filter by credit value
        #[arg(short, long)]
        credits: Option<u32>,
        /// Filter by instructor name fragment
        #[arg(short, long)]
        instructor: Option<String>,
    },
    /// Assign an instructor to a course
    Assign {
        /// Course code
        code: String,
        /// Instructor name
        instructor: String,
    },
    /// Close a course to enrollment (keeps the record)
    Deactivate {
        /// Course code
        code: String,
    },
    /// Permanently delete a course record
    Delete {
        /// Course code
        code: String,
    },
}

fn parse_semester(s: &str) -> CampusResult<Semester> {
    Semester::parse(s).ok_or_else(|| CampusError::Validation(format!("Unknown semester: {}", s)))
}

/// Execute a course command
pub fn handle_course_command(storage: &Storage, cmd: CourseCommands) -> CampusResult<()> {
    let service = CourseService::new(storage);

    match cmd {
        CourseCommands::Add {
            code,
            title,
            credits,
            department,
            semester,
            instructor,
        } => {
            let mut course = Course::new(
                CourseCode::new(&code)?,
                &title,
                credits,
                &department,
                parse_semester(&semester)?,
            )?;
            if let Some(instructor) = instructor {
                course.set_instructor(Some(instructor));
            }
            let added = service.add(course)?;
            println!("Added course {} ({})", added.code(), added.title);
        }
        CourseCommands::List {
            active,
            department,
            semester,
            credits,
            instructor,
        } => {
            let courses = if let Some(department) = department {
                service.get_by_department(&department)?
            } else if let Some(semester) = semester {
                service.get_by_semester(parse_semester(&semester)?)?
            } else if let Some(credits) = credits {
                service.get_by_credits(credits)?
            } else if let Some(instructor) = instructor {
                service.get_by_instructor(&instructor)?
            } else if active {
                service.get_active()?
            } else {
                service.get_all()?
            };
            print!("{}", format_course_list(&courses));
        }
        CourseCommands::Assign { code, instructor } => {
            let course = service.assign_instructor(&CourseCode::new(&code)?, &instructor)?;
            println!(
                "Assigned {} to {}",
                course.instructor.as_deref().unwrap_or("-"),
                course.code()
            );
        }
        CourseCommands::Deactivate { code } => {
            let course = service.deactivate(&CourseCode::new(&code)?)?;
            println!("Deactivated course {}", course.code());
        }
        CourseCommands::Delete { code } => {
            let code = CourseCode::new(&code)?;
            service.delete(&code)?;
            println!("Deleted course {}", code);
        }
    }

    Ok(())
}
