//! Import/export and backup adapters
//!
//! These adapters feed validated entities into the in-memory stores and
//! serialize them back out. The core engines never touch the filesystem;
//! everything file-shaped lives here.

pub mod backup;
pub mod csv;

pub use backup::{directory_size, BackupInfo, BackupManager};
pub use csv::{load_snapshot, save_snapshot, ImportReport};
