//! Core types for the seating kernel.

pub mod student;
pub mod layout;
pub mod assignment;
pub mod plan;

pub use student::Student;
pub use layout::{Block, BenchWidth, Floor, LayoutConfig, LayoutError, Room};
pub use assignment::{BenchLabel, SeatingAssignment};
pub use plan::{ExamConfig, SeatingPlan};
