use chronicle_core::{ClockDiscipline, ProcessId};
use thiserror::Error;

/// Errors raised by clock transitions
///
/// None of these are reachable from a correctly wired simulation: every
/// process of a run shares one discipline and one process count.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("Cannot merge a {actual} snapshot into a {expected} clock")]
    DisciplineMismatch {
        expected: ClockDiscipline,
        actual: ClockDiscipline,
    },

    #[error("Vector snapshot has {actual} components, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Process {owner} is outside a run of {process_count} processes")]
    OwnerOutOfRange {
        owner: ProcessId,
        process_count: usize,
    },
}

pub type ClockResult<T> = std::result::Result<T, ClockError>;
