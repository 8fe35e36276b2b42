//! Header resolution: map free-form column names onto canonical fields.
//!
//! Roster files arrive from many offices and nobody agrees on column names.
//! Headers are normalized (lowercase, alphanumerics only) and matched against
//! a keyword list per field by substring containment. Keywords are tried in
//! priority order and, for each keyword, headers in column order; the first
//! hit wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::IngestError;

/// The four data roles every roster must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    /// Student name.
    Name,
    /// Hall ticket / roll number.
    HallTicketNumber,
    /// Branch or department.
    Branch,
    /// Phone number.
    ContactNumber,
}

impl CanonicalField {
    /// All fields, in resolution order.
    pub const ALL: [CanonicalField; 4] = [
        Self::Name,
        Self::HallTicketNumber,
        Self::Branch,
        Self::ContactNumber,
    ];

    /// Keywords in priority order.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name", "studentname", "fullname", "nameofstudent"],
            Self::HallTicketNumber => &[
                "hallticketnumber",
                "hallticket",
                "ticketnumber",
                "htno",
                "rollno",
                "roll number",
            ],
            Self::Branch => &["branch", "department", "stream", "dept"],
            Self::ContactNumber => &["contactnumber", "phone", "phonenumber", "mobile", "contact no"],
        }
    }

    /// Header spellings quoted back to the user when resolution fails.
    pub fn examples(self) -> &'static str {
        match self {
            Self::Name => "\"Name\", \"Student Name\", \"Full Name\"",
            Self::HallTicketNumber => "\"Hall Ticket Number\", \"HT No\", \"Roll No\"",
            Self::Branch => "\"Branch\", \"Department\", \"Stream\"",
            Self::ContactNumber => "\"Contact Number\", \"Phone\", \"Mobile\"",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::HallTicketNumber => write!(f, "hall ticket number"),
            Self::Branch => write!(f, "branch"),
            Self::ContactNumber => write!(f, "contact number"),
        }
    }
}

/// Normalize a header for matching.
///
/// Lowercases and keeps only ASCII letters and digits.
///
/// ```rust
/// use seating_kernel::ingest::header::normalize;
///
/// assert_eq!(normalize("Hall-Ticket No."), "hallticketno");
/// assert_eq!(normalize(" Student  Name "), "studentname");
/// ```
pub fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Find the first header matching any keyword, by keyword priority.
///
/// Returns the column index of the matching header.
pub fn resolve<S: AsRef<str>>(headers: &[S], keywords: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize(h.as_ref())).collect();
    keywords.iter().find_map(|keyword| {
        let keyword = normalize(keyword);
        normalized.iter().position(|header| header.contains(&keyword))
    })
}

/// Column positions of the canonical fields within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Column holding the name.
    pub name: usize,
    /// Column holding the hall ticket number.
    pub hall_ticket_number: usize,
    /// Column holding the branch.
    pub branch: usize,
    /// Column holding the contact number.
    pub contact_number: usize,
}

impl ColumnMap {
    /// Resolve all four fields or report the first missing one.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Result<Self, IngestError> {
        let find = |field: CanonicalField| {
            resolve(headers, field.keywords()).ok_or(IngestError::MissingColumn {
                field,
                examples: field.examples(),
            })
        };

        Ok(Self {
            name: find(CanonicalField::Name)?,
            hall_ticket_number: find(CanonicalField::HallTicketNumber)?,
            branch: find(CanonicalField::Branch)?,
            contact_number: find(CanonicalField::ContactNumber)?,
        })
    }

    /// Whether every field resolved to its own column.
    pub fn is_distinct(&self) -> bool {
        let cols = [self.name, self.hall_ticket_number, self.branch, self.contact_number];
        cols.iter()
            .enumerate()
            .all(|(i, c)| !cols[i + 1..].contains(c))
    }

    /// Column index for `field`.
    pub fn column(&self, field: CanonicalField) -> usize {
        match field {
            CanonicalField::Name => self.name,
            CanonicalField::HallTicketNumber => self.hall_ticket_number,
            CanonicalField::Branch => self.branch,
            CanonicalField::ContactNumber => self.contact_number,
        }
    }
}
