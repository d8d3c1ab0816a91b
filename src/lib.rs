//! campus-records - Terminal-based academic records manager
//!
//! This library provides the core functionality for managing students,
//! courses, enrollments, and grades: the business rules around credit
//! limits, duplicate enrollments, and marks-to-grade mapping, plus CSV
//! import/export and timestamped backups.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (students, courses, enrollments, grades)
//! - `storage`: Thread-safe in-memory stores, one per entity type
//! - `services`: Business logic layer (the enrollment and grade engines)
//! - `audit`: Audit logging system
//! - `io`: CSV import/export and backup adapters
//! - `cli`: Command-line interface handlers
//! - `display`: Terminal output formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use campus_records::config::{CampusPaths, Settings};
//! use campus_records::storage::Storage;
//!
//! let paths = CampusPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new();
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod io;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CampusError, CampusResult};
