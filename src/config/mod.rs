//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::CampusPaths;
pub use settings::{BackupRetention, Settings};
