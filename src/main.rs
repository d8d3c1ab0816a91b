use anyhow::Result;
use clap::{Parser, Subcommand};

use campus_records::audit::AuditLogger;
use campus_records::cli::{
    handle_course_command, handle_data_command, handle_enrollment_command, handle_grade_command,
    handle_student_command, handle_transcript_command, CourseCommands, DataCommands,
    EnrollmentCommands, GradeCommands, StudentCommands, TranscriptCommands,
};
use campus_records::config::{CampusPaths, Settings};
use campus_records::io::{load_snapshot, save_snapshot};
use campus_records::storage::Storage;

#[derive(Parser)]
#[command(
    name = "campus",
    version,
    about = "Terminal-based academic records manager",
    long_about = "campus-records manages students, courses, enrollments, and grades \
                  from the command line: credit-limit enforcement, letter-grade \
                  derivation, GPA tracking, transcripts, CSV import/export, and \
                  timestamped backups."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Student management commands
    #[command(subcommand)]
    Student(StudentCommands),

    /// Course catalog commands
    #[command(subcommand)]
    Course(CourseCommands),

    /// Enrollment commands
    #[command(subcommand, alias = "enroll")]
    Enrollment(EnrollmentCommands),

    /// Grade commands
    #[command(subcommand)]
    Grade(GradeCommands),

    /// Transcript commands
    #[command(subcommand)]
    Transcript(TranscriptCommands),

    /// Import, export, backup, and audit commands
    #[command(subcommand)]
    Data(DataCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let paths = CampusPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::with_audit(AuditLogger::new(paths.audit_log()));
    load_snapshot(&storage, &paths)?;

    match cli.command {
        Commands::Student(cmd) => handle_student_command(&storage, cmd)?,
        Commands::Course(cmd) => handle_course_command(&storage, cmd)?,
        Commands::Enrollment(cmd) => handle_enrollment_command(&storage, &settings, cmd)?,
        Commands::Grade(cmd) => handle_grade_command(&storage, cmd)?,
        Commands::Transcript(cmd) => handle_transcript_command(&storage, cmd)?,
        Commands::Data(cmd) => handle_data_command(&storage, &paths, &settings, cmd)?,
        Commands::Config => {
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Backups:         {}", paths.backup_dir().display());
            println!("Exports:         {}", paths.export_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!("Credit limit:    {}", settings.max_credits_per_semester);
            println!("Retention days:  {}", settings.backup_retention.days);
        }
    }

    save_snapshot(&storage, &paths)?;

    Ok(())
}
