//! Delimited-text reader for CSV exports.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::types::Student;
use super::header::ColumnMap;
use super::IngestError;

/// Parse comma-delimited text with a header row into students.
///
/// Blank and whitespace-only lines are skipped. A row whose field count
/// differs from the header, or any other structural error reported by the
/// CSV parser, rejects the whole file with the line number it starts on in
/// the uploaded text. Rows missing a name or hall ticket number are dropped;
/// if none survive the file is rejected as empty.
pub fn read(text: &str) -> Result<Vec<Student>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(malformed)?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::NoStudents);
    }
    let columns = ColumnMap::resolve(&headers.iter().collect::<Vec<_>>())?;

    let mut students = Vec::new();
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(IngestError::Malformed {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                reason: format!(
                    "found record with {} fields, but the header has {}",
                    record.len(),
                    headers.len()
                ),
            });
        }
        if let Some(student) = project(&record, &columns) {
            students.push(student);
        }
    }

    if students.is_empty() {
        return Err(IngestError::NoStudents);
    }
    Ok(students)
}

fn project(record: &StringRecord, columns: &ColumnMap) -> Option<Student> {
    let cell = |idx: usize| record.get(idx).unwrap_or_default();
    Student::from_cells(
        cell(columns.name),
        cell(columns.hall_ticket_number),
        cell(columns.branch),
        cell(columns.contact_number),
    )
}

fn malformed(err: csv::Error) -> IngestError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    IngestError::Malformed {
        line,
        reason: err.to_string(),
    }
}
