//! Seat assignments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::student::Student;

/// Position of a student on a bench.
///
/// Serializes as `"7"` for a single-seat bench and `"7L"` / `"7R"` for the two
/// sides of a two-seat bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BenchLabel {
    /// The only seat of a one-student bench.
    Single(u32),
    /// Left seat of a two-student bench.
    Left(u32),
    /// Right seat of a two-student bench.
    Right(u32),
}

impl BenchLabel {
    /// 1-based bench index within the room.
    pub fn bench(&self) -> u32 {
        match *self {
            Self::Single(n) | Self::Left(n) | Self::Right(n) => n,
        }
    }
}

impl fmt::Display for BenchLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(n) => write!(f, "{n}"),
            Self::Left(n) => write!(f, "{n}L"),
            Self::Right(n) => write!(f, "{n}R"),
        }
    }
}

impl FromStr for BenchLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |digits: &str| {
            digits
                .parse::<u32>()
                .map_err(|_| format!("invalid bench number: {s:?}"))
        };
        if let Some(n) = s.strip_suffix('L') {
            parse(n).map(Self::Left)
        } else if let Some(n) = s.strip_suffix('R') {
            parse(n).map(Self::Right)
        } else {
            parse(s).map(Self::Single)
        }
    }
}

impl From<BenchLabel> for String {
    fn from(label: BenchLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for BenchLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A student placed on a specific seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingAssignment {
    /// The seated student.
    #[serde(flatten)]
    pub student: Student,
    /// Block name.
    pub block: String,
    /// Floor number.
    pub floor: String,
    /// Room number.
    pub classroom: String,
    /// Seat within the room.
    pub bench_number: BenchLabel,
}

impl SeatingAssignment {
    /// Identity of the physical seat, unique within a plan.
    pub fn seat_key(&self) -> (&str, &str, &str, BenchLabel) {
        (&self.block, &self.floor, &self.classroom, self.bench_number)
    }
}
