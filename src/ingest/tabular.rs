//! Tabular-text reader for text extracted from paginated documents.
//!
//! Extracted PDF text keeps table columns aligned with spaces. A run of two
//! or more whitespace characters is taken as a column boundary, while single
//! spaces stay inside a cell ("Student Name", "Asha Rao").

use regex_lite::Regex;
use std::sync::OnceLock;

use crate::types::Student;
use super::header::ColumnMap;
use super::IngestError;

const COLUMN_GAP: &str = r"\s{2,}";

fn column_gap() -> &'static Regex {
    static SPLITTER: OnceLock<Regex> = OnceLock::new();
    SPLITTER.get_or_init(|| Regex::new(COLUMN_GAP).expect("column gap pattern compiles"))
}

/// Parse whitespace-aligned tabular text into students.
///
/// The first non-blank line is the header. Data lines that split into fewer
/// cells than the header are discarded (page footers, wrapped titles).
/// Fails when there is no data line at all, when the header does not
/// resolve, or when no student survives. A header whose fields all land in
/// one cell (typically comma-separated text) is rejected too, since every
/// row would otherwise project the whole line into each field.
pub fn read(text: &str) -> Result<Vec<Student>, IngestError> {
    let splitter = column_gap();

    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let header_line = lines.next().ok_or(IngestError::NoStudents)?;
    let mut data = lines.peekable();
    if data.peek().is_none() {
        return Err(IngestError::NoStudents);
    }

    let headers = split(splitter, header_line);
    let columns = ColumnMap::resolve(&headers)?;
    if !columns.is_distinct() {
        return Err(IngestError::MergedColumns {
            header: header_line.to_string(),
        });
    }

    let students: Vec<Student> = data
        .map(|line| split(splitter, line))
        .filter(|cells| cells.len() >= headers.len())
        .filter_map(|cells| {
            Student::from_cells(
                cells[columns.name],
                cells[columns.hall_ticket_number],
                cells[columns.branch],
                cells[columns.contact_number],
            )
        })
        .collect();

    if students.is_empty() {
        return Err(IngestError::NoStudents);
    }
    Ok(students)
}

fn split<'a>(splitter: &Regex, line: &'a str) -> Vec<&'a str> {
    splitter.split(line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "
        S.No    Hall Ticket No    Student Name     Branch    Mobile Number

        1       21A01             Asha Rao         CSE       9848012345
        2       21A02             Ravi Kumar       ECE       9848012346
        Page 1 of 1
    ";

    #[test]
    fn test_reads_aligned_columns() {
        let students = read(PAGE).unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0], Student::new("Asha Rao", "21A01", "CSE", "9848012345"));
        assert_eq!(students[1].name, "Ravi Kumar");
    }

    #[test]
    fn test_discards_short_lines() {
        // "Page 1 of 1" splits into one cell and is dropped.
        assert!(read(PAGE).unwrap().iter().all(|s| !s.name.contains("Page")));
    }

    #[test]
    fn test_tabs_count_as_gap() {
        let text = "Name\t\tRoll No\t\tBranch\t\tPhone\nAsha\t\t21A01\t\tCSE\t\t1\n";
        assert_eq!(read(text).unwrap()[0].hall_ticket_number, "21A01");
    }

    #[test]
    fn test_header_only_fails() {
        let text = "Name    Roll No    Branch    Phone\n\n";
        assert!(matches!(read(text), Err(IngestError::NoStudents)));
    }

    #[test]
    fn test_empty_text_fails() {
        assert!(matches!(read("   \n  "), Err(IngestError::NoStudents)));
    }

    #[test]
    fn test_no_surviving_rows_fails() {
        let text = "Name    Roll No    Branch    Phone\nsomething unrelated\n";
        assert!(matches!(read(text), Err(IngestError::NoStudents)));
    }

    #[test]
    fn test_csv_text_is_rejected() {
        // A comma-separated header is a single cell here.
        let text = "Name,Roll No,Branch,Phone\nAsha,21A01,CSE,1\n";
        assert!(matches!(read(text), Err(IngestError::MergedColumns { .. })));
    }

    #[test]
    fn test_column_gap_is_shared() {
        assert!(std::ptr::eq(column_gap(), column_gap()));
        let cells: Vec<_> = column_gap().split("Asha Rao   21A01\t\tCSE").collect();
        assert_eq!(cells, ["Asha Rao", "21A01", "CSE"]);
    }

    #[test]
    fn test_missing_field() {
        let text = "Name    Roll No    Branch\nAsha    21A01    CSE\n";
        assert!(matches!(read(text), Err(IngestError::MissingColumn { .. })));
    }
}
