//! Roster merger: pick a reader per file and concatenate the results.

use tracing::{debug, info, warn};

use crate::types::Student;
use super::extract::TextExtractor;
use super::source::{RosterFile, RosterFormat};
use super::{delimited, tabular, IngestError, RosterError};

/// Merges uploaded roster files into a single roster.
///
/// Files are processed sequentially in input order; students keep file order
/// and then row order. The first failing file aborts the batch and nothing
/// from earlier files is returned.
pub struct RosterMerger<'a, E: TextExtractor + ?Sized> {
    extractor: &'a E,
}

impl<'a, E: TextExtractor + ?Sized> RosterMerger<'a, E> {
    /// Create a merger using `extractor` for page-based documents.
    pub fn new(extractor: &'a E) -> Self {
        Self { extractor }
    }

    /// Read every file and concatenate the students.
    pub async fn merge(&self, files: &[RosterFile]) -> Result<Vec<Student>, RosterError> {
        let mut roster = Vec::new();

        for file in files {
            let students = self.read_file(file).await?;
            info!(
                file = %file.name,
                format = %file.format(),
                students = students.len(),
                digest = %file.digest(),
                "Roster file accepted"
            );
            roster.extend(students);
        }

        if roster.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        Ok(roster)
    }

    /// Read a single file with the reader its media type calls for.
    pub async fn read_file(&self, file: &RosterFile) -> Result<Vec<Student>, RosterError> {
        match file.format() {
            RosterFormat::Delimited => {
                delimited::read(&file.text()).map_err(|e| RosterError::in_file(file, e))
            }
            RosterFormat::Document => {
                let text = self
                    .extractor
                    .extract_text(&file.bytes)
                    .await
                    .map_err(|e| RosterError::in_file(file, e))?;
                tabular::read(&text).map_err(|e| RosterError::in_file(file, e))
            }
            RosterFormat::Unknown => Self::sniff(file),
        }
    }

    /// Try the tabular reader, then the delimited one.
    fn sniff(file: &RosterFile) -> Result<Vec<Student>, RosterError> {
        let text = file.text();

        let tabular_err: IngestError = match tabular::read(&text) {
            Ok(students) => return Ok(students),
            Err(e) => e,
        };
        debug!(file = %file.name, error = %tabular_err, "Tabular reader rejected file, trying delimited");

        match delimited::read(&text) {
            Ok(students) => Ok(students),
            Err(delimited_err) => {
                warn!(
                    file = %file.name,
                    media_type = %file.media_type,
                    tabular_error = %tabular_err,
                    delimited_error = %delimited_err,
                    "No reader accepted file"
                );
                Err(RosterError::UnsupportedFileType {
                    file: file.name.clone(),
                    media_type: file.media_type.clone(),
                })
            }
        }
    }
}
