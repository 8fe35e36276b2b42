//! Venue layout: blocks, floors, rooms and benches.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::policy::AllocationPolicy;

/// Error type for layout validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The layout contains no rooms at all.
    #[error("Layout has no rooms")]
    NoRooms,
    /// A room was configured with zero benches.
    #[error("Room {room} on floor {floor} of block {block} has no benches")]
    NoBenches {
        /// Block name.
        block: String,
        /// Floor number.
        floor: String,
        /// Room number.
        room: String,
    },
    /// The exam window ends before it starts.
    #[error("Exam end date {end} is before start date {start}")]
    DateRange {
        /// Configured start date.
        start: NaiveDate,
        /// Configured end date.
        end: NaiveDate,
    },
}

/// Number of students a bench holds.
///
/// Only one- and two-seat benches exist; anything else is rejected when the
/// layout is deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BenchWidth {
    /// One student per bench.
    Single,
    /// Two students per bench, left and right.
    Double,
}

impl BenchWidth {
    /// Seats on one bench.
    pub fn seats(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }
}

impl TryFrom<u8> for BenchWidth {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Single),
            2 => Ok(Self::Double),
            other => Err(format!("studentsPerBench must be 1 or 2, got {other}")),
        }
    }
}

impl From<BenchWidth> for u8 {
    fn from(width: BenchWidth) -> Self {
        width.seats() as u8
    }
}

impl fmt::Display for BenchWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.seats())
    }
}

/// A classroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room identifier, also used as the classroom key in the summary.
    #[serde(deserialize_with = "label")]
    pub number: String,
    /// Configured bench count.
    pub benches: u32,
    /// Seats per bench.
    pub students_per_bench: BenchWidth,
}

impl Room {
    /// Create a new room.
    pub fn new(number: impl Into<String>, benches: u32, students_per_bench: BenchWidth) -> Self {
        Self {
            number: number.into(),
            benches,
            students_per_bench,
        }
    }

    /// Benches actually used, after applying the per-room ceiling.
    pub fn effective_benches(&self, policy: &AllocationPolicy) -> u32 {
        self.benches.min(policy.max_benches_per_room)
    }

    /// Seats available in this room under `policy`.
    pub fn capacity(&self, policy: &AllocationPolicy) -> usize {
        self.effective_benches(policy) as usize * self.students_per_bench.seats() as usize
    }
}

/// A floor of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    /// Floor identifier.
    #[serde(deserialize_with = "label")]
    pub number: String,
    /// Rooms in allocation order.
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Floor {
    /// Create a new floor.
    pub fn new(number: impl Into<String>, rooms: Vec<Room>) -> Self {
        Self {
            number: number.into(),
            rooms,
        }
    }
}

/// A building block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block name.
    pub name: String,
    /// Floors in allocation order.
    #[serde(default)]
    pub floors: Vec<Floor>,
}

impl Block {
    /// Create a new block.
    pub fn new(name: impl Into<String>, floors: Vec<Floor>) -> Self {
        Self {
            name: name.into(),
            floors,
        }
    }
}

/// Full venue description plus the exam window it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Blocks in allocation order.
    pub blocks: Vec<Block>,
    /// First exam day.
    pub start_date: NaiveDate,
    /// Last exam day.
    pub end_date: NaiveDate,
    /// Free-text exam session timings, echoed back unchanged.
    #[serde(default)]
    pub exam_timings: Vec<String>,
}

impl LayoutConfig {
    /// Iterate over every room with its block and floor, in traversal order.
    pub fn rooms(&self) -> impl Iterator<Item = (&Block, &Floor, &Room)> {
        self.blocks.iter().flat_map(|block| {
            block
                .floors
                .iter()
                .flat_map(move |floor| floor.rooms.iter().map(move |room| (block, floor, room)))
        })
    }

    /// Total seats across the layout under `policy`.
    pub fn capacity(&self, policy: &AllocationPolicy) -> usize {
        self.rooms()
            .map(|(_, _, room)| room.capacity(policy))
            .fold(0, usize::saturating_add)
    }

    /// Check the layout before any allocation is attempted.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.end_date < self.start_date {
            return Err(LayoutError::DateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        let mut room_count = 0usize;
        for (block, floor, room) in self.rooms() {
            if room.benches == 0 {
                return Err(LayoutError::NoBenches {
                    block: block.name.clone(),
                    floor: floor.number.clone(),
                    room: room.number.clone(),
                });
            }
            room_count += 1;
        }

        if room_count == 0 {
            return Err(LayoutError::NoRooms);
        }
        Ok(())
    }
}

/// Accept either a JSON string or an integer for floor and room numbers.
fn label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(i64),
    }

    Ok(match Label::deserialize(deserializer)? {
        Label::Text(s) => s,
        Label::Number(n) => n.to_string(),
    })
}
