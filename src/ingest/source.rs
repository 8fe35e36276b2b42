//! Uploaded roster files and their text decoding.
//!
//! ## Decoding
//!
//! ```text
//! decode_text(bytes) = normalize_newlines(strip_bom(UTF-8-lossy(bytes)))
//! ```
//!
//! Where:
//! - `strip_bom`: a leading U+FEFF is dropped (spreadsheet exports add it)
//! - `normalize_newlines`: CRLF → LF, CR → LF
//!
//! Invalid UTF-8 sequences become U+FFFD instead of failing the file; the
//! header resolver then decides whether the content is usable.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Reader family selected from a declared media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RosterFormat {
    /// Comma-delimited text with a header row.
    Delimited,
    /// Page-based document whose text must be extracted first.
    Document,
    /// Unrecognized tag; readers are tried in turn.
    Unknown,
}

impl RosterFormat {
    /// Classify a media type such as `text/csv; charset=utf-8`.
    pub fn from_media_type(media_type: &str) -> Self {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "text/csv"
            | "application/csv"
            | "text/comma-separated-values"
            | "application/vnd.ms-excel" => Self::Delimited,
            "application/pdf" | "application/x-pdf" => Self::Document,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for RosterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delimited => write!(f, "delimited"),
            Self::Document => write!(f, "document"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// One uploaded roster file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterFile {
    /// Name used in error messages and logs.
    pub name: String,
    /// Declared media type hint.
    pub media_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl RosterFile {
    /// Create a new roster file.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Convenience constructor for CSV text.
    pub fn csv(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, "text/csv", text.as_bytes())
    }

    /// Reader family for the declared media type.
    pub fn format(&self) -> RosterFormat {
        RosterFormat::from_media_type(&self.media_type)
    }

    /// Content decoded to normalized text.
    pub fn text(&self) -> String {
        decode_text(&self.bytes)
    }

    /// SHA-256 of the raw bytes as lowercase hex.
    pub fn digest(&self) -> String {
        content_digest(&self.bytes)
    }
}

/// Decode raw bytes to normalized text.
///
/// # Example
///
/// ```rust
/// use seating_kernel::ingest::source::decode_text;
///
/// let text = decode_text(b"\xEF\xBB\xBFName,Roll No\r\nAsha,1\r\n");
/// assert_eq!(text, "Name,Roll No\nAsha,1\n");
/// ```
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// SHA-256 of `bytes` as a 64-character lowercase hex string.
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
