//! Student CLI commands

use clap::Subcommand;

use crate::display::{format_student_detail, format_student_list};
use crate::error::CampusResult;
use crate::models::{Student, StudentId, StudentStatus};
use crate::services::StudentService;
use crate::storage::Storage;

/// Student management commands
#[derive(Subcommand)]
pub enum StudentCommands {
    /// Add a new student
    Add {
        /// Student ID (e.g., STU001)
        id: String,
        /// Registration number (e.g., REG2024001)
        reg_no: String,
        /// Full name
        name: String,
        /// Email address
        email: String,
    },
    /// List students
    List {
        /// Filter by status (active, inactive, graduated, suspended, withdrawn)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show one student's details
    Show {
        /// Student ID
        id: String,
    },
    /// Search students by name or email fragment
    Search {
        /// Name fragment
        #[arg(short, long)]
        name: Option<String>,
        /// Email fragment
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Update a student's name or email
    Update {
        /// Student ID
        id: String,
        /// New full name
        #[arg(short, long)]
        name: Option<String>,
        /// New email address
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Deactivate a student (keeps the record)
    Deactivate {
        /// Student ID
        id: String,
    },
    /// Permanently delete a student record
    Delete {
        /// Student ID
        id: String,
    },
}

/// Execute a student command
pub fn handle_student_command(storage: &Storage, cmd: StudentCommands) -> CampusResult<()> {
    let service = StudentService::new(storage);

    match cmd {
        StudentCommands::Add {
            id,
            reg_no,
            name,
            email,
        } => {
            let student = Student::new(StudentId::new(&id)?, &reg_no, &name, &email)?;
            let added = service.add(student)?;
            println!("Added student {} ({})", added.id(), added.full_name);
        }
        StudentCommands::List { status } => {
            let students = match status {
                Some(s) => {
                    let status = StudentStatus::parse(&s).ok_or_else(|| {
                        crate::error::CampusError::Validation(format!("Unknown status: {}", s))
                    })?;
                    service.get_by_status(status)?
                }
                None => service.get_all()?,
            };
            print!("{}", format_student_list(&students));
        }
        StudentCommands::Show { id } => {
            let id = StudentId::new(&id)?;
            match service.get(&id)? {
                Some(student) => print!("{}", format_student_detail(&student)),
                None => println!("Student not found: {}", id),
            }
        }
        StudentCommands::Search { name, email } => {
            let students = if let Some(name) = name {
                service.search_by_name(&name)?
            } else if let Some(email) = email {
                service.search_by_email(&email)?
            } else {
                service.get_all()?
            };
            print!("{}", format_student_list(&students));
        }
        StudentCommands::Update { id, name, email } => {
            let id = StudentId::new(&id)?;
            let mut student = service
                .get(&id)?
                .ok_or_else(|| crate::error::CampusError::student_not_found(id.to_string()))?;
            if let Some(name) = name {
                student.full_name = name;
            }
            if let Some(email) = email {
                student.email = email;
            }
            let updated = service.update(student)?;
            println!("Updated student {}", updated.id());
        }
        StudentCommands::Deactivate { id } => {
            let student = service.deactivate(&StudentId::new(&id)?)?;
            println!("Deactivated student {}", student.id());
        }
        StudentCommands::Delete { id } => {
            let id = StudentId::new(&id)?;
            service.delete(&id)?;
            println!("Deleted student {}", id);
        }
    }

    Ok(())
}
