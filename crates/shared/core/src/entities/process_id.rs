use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a simulated process, an index in `[0, N)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProcessId(pub usize);

impl ProcessId {
    /// Index of this process in per-process collections (mailboxes, vector clocks)
    pub fn index(&self) -> usize {
        self.0
    }

    /// All ids of a run with `count` processes, in order
    pub fn all(count: usize) -> impl Iterator<Item = ProcessId> {
        (0..count).map(ProcessId)
    }
}

impl From<usize> for ProcessId {
    fn from(index: usize) -> Self {
        ProcessId(index)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
