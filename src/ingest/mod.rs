//! Roster ingestion: decode uploaded files and merge them into one roster.
//!
//! ## Architecture
//!
//! ```text
//! RosterFile ─┬─ Delimited ─────────────────────────→ delimited::read ─┐
//!             ├─ Document ── TextExtractor ─────────→ tabular::read ───┼→ roster
//!             └─ Unknown ─── tabular::read, else delimited::read ──────┘
//! ```
//!
//! Both readers resolve their columns through [`header`]. The first failing
//! file aborts the whole batch.

pub mod source;
pub mod header;
pub mod delimited;
pub mod tabular;
pub mod extract;
pub mod merge;

pub use source::{RosterFile, RosterFormat, decode_text, content_digest};
pub use header::{CanonicalField, ColumnMap, normalize, resolve};
pub use extract::{TextExtractor, PlainTextExtractor};
#[cfg(feature = "pdf")]
pub use extract::PdfTextExtractor;
pub use merge::RosterMerger;

/// Error raised by a single reader on a single file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    /// A canonical field has no matching header.
    #[error("Could not find a {field} column. Use a header such as {examples}")]
    MissingColumn {
        /// Field that failed to resolve.
        field: CanonicalField,
        /// Acceptable header spellings.
        examples: &'static str,
    },
    /// All fields resolved to the same cell, so columns were not separable.
    #[error("Could not separate columns in header {header:?}")]
    MergedColumns {
        /// The offending header line.
        header: String,
    },
    /// The delimited parser reported a structural error.
    #[error("Malformed row at line {line}: {reason}")]
    Malformed {
        /// 1-based line of the offending record.
        line: u64,
        /// Parser message.
        reason: String,
    },
    /// No student rows survived parsing and filtering.
    #[error("No student rows found")]
    NoStudents,
    /// Document text could not be extracted.
    #[error("Could not extract text: {0}")]
    Extraction(String),
}

/// Error aborting a whole ingestion batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// A file was recognized but could not be read.
    #[error("{file}: {source}")]
    File {
        /// Name of the failing file.
        file: String,
        /// Reader error.
        source: IngestError,
    },
    /// Neither reader could make sense of a file with an unrecognized type.
    #[error("{file}: unsupported file type {media_type:?}; upload a CSV or PDF roster")]
    UnsupportedFileType {
        /// Name of the failing file.
        file: String,
        /// Declared media type.
        media_type: String,
    },
    /// Every file was read but the merged roster is empty.
    #[error("No students found in the uploaded files")]
    EmptyRoster,
}

impl RosterError {
    /// Attach a file name to a reader error.
    pub fn in_file(file: &RosterFile, source: IngestError) -> Self {
        Self::File {
            file: file.name.clone(),
            source,
        }
    }

    /// Whether this is an empty-result error (a file or the whole batch
    /// produced no students).
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            Self::EmptyRoster
                | Self::File {
                    source: IngestError::NoStudents,
                    ..
                }
        )
    }
}
