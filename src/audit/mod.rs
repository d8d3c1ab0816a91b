//! Audit logging for entity mutations
//!
//! Every create, update, and delete on a student, course, enrollment, or
//! grade can be recorded to an append-only JSONL log for later review.

pub mod entry;
pub mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
