//! Audit entry data structures
//!
//! Defines the structure of audit log entries including operation types,
//! entity types, and the entry format itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Student,
    Course,
    Enrollment,
    Grade,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Student => write!(f, "Student"),
            EntityType::Course => write!(f, "Course"),
            EntityType::Enrollment => write!(f, "Enrollment"),
            EntityType::Grade => write!(f, "Grade"),
        }
    }
}

/// A single audit log entry
///
/// Records one operation on an entity with optional before/after values
/// for tracking changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// Key of the affected entity (student ID, course code, or pair key)
    pub entity_id: String,

    /// Human-readable description of the entity (e.g., student name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// JSON representation of the entity before the operation (for updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// JSON representation of the entity after the operation (for creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable diff summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Create an entry for an entity creation
    pub fn created(
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        after: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: Some(after),
            diff_summary: None,
        }
    }

    /// Create an entry for an entity update
    pub fn updated(
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: serde_json::Value,
        after: serde_json::Value,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            entity_id,
            entity_name,
            before: Some(before),
            after: Some(after),
            diff_summary,
        }
    }

    /// Create an entry for an entity deletion
    pub fn deleted(
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type,
            entity_id,
            entity_name,
            before: Some(before),
            after: None,
            diff_summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_created_entry_shape() {
        let entry = AuditEntry::created(
            EntityType::Student,
            "STU001".into(),
            Some("Ada Lovelace".into()),
            serde_json::json!({"id": "STU001"}),
        );
        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_entry_serialization_skips_absent_fields() {
        let entry = AuditEntry::deleted(
            EntityType::Grade,
            "STU001_CS101".into(),
            None,
            serde_json::json!({}),
        );
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"after\""));
        assert!(!json.contains("\"entity_name\""));
    }
}
