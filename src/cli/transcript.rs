//! Transcript CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::error::CampusResult;
use crate::models::StudentId;
use crate::services::TranscriptService;
use crate::storage::Storage;

/// Transcript commands
#[derive(Subcommand)]
pub enum TranscriptCommands {
    /// Print a student's transcript
    Show {
        /// Student ID
        student: String,
    },
    /// Write a student's transcript to a file
    Export {
        /// Student ID
        student: String,
        /// Output file path
        path: PathBuf,
    },
}

/// Execute a transcript command
pub fn handle_transcript_command(storage: &Storage, cmd: TranscriptCommands) -> CampusResult<()> {
    let service = TranscriptService::new(storage);

    match cmd {
        TranscriptCommands::Show { student } => {
            let transcript = service.generate(&StudentId::new(&student)?)?;
            print!("{}", transcript);
        }
        TranscriptCommands::Export { student, path } => {
            let student = StudentId::new(&student)?;
            service.export_to_file(&student, &path)?;
            println!("Exported transcript for {} to {}", student, path.display());
        }
    }

    Ok(())
}
