//! Chronicle Core Domain
//!
//! Pure domain types for the chronicle clock simulation.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    ClockDiscipline, ClockSnapshot, EventKind, MessageEnvelope, ProcessEvent, ProcessId,
};
pub use values::{LogicalTime, Timestamp};
