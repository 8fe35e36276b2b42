//! Student records produced by roster ingestion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One roster row after projection onto the canonical fields.
///
/// Readers only build a `Student` once the name and hall ticket number are
/// known to be non-empty, so downstream code never sees a half-filled row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Student's display name.
    pub name: String,
    /// Examination identifier, the natural key across records.
    pub hall_ticket_number: String,
    /// Academic branch used by the anti-adjacency rule.
    pub branch: String,
    /// Contact number as written in the roster.
    pub contact_number: String,
}

impl Student {
    /// Create a new student record.
    pub fn new(
        name: impl Into<String>,
        hall_ticket_number: impl Into<String>,
        branch: impl Into<String>,
        contact_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hall_ticket_number: hall_ticket_number.into(),
            branch: branch.into(),
            contact_number: contact_number.into(),
        }
    }

    /// Build a student from raw projected cells.
    ///
    /// Cells are trimmed. Returns `None` when the name or the hall ticket
    /// number is empty, which is how readers drop incomplete rows.
    pub fn from_cells(name: &str, hall_ticket_number: &str, branch: &str, contact_number: &str) -> Option<Self> {
        let name = name.trim();
        let hall_ticket_number = hall_ticket_number.trim();
        if name.is_empty() || hall_ticket_number.is_empty() {
            return None;
        }
        Some(Self::new(name, hall_ticket_number, branch.trim(), contact_number.trim()))
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.hall_ticket_number, self.branch)
    }
}
