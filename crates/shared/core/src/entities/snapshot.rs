//! Immutable clock snapshots
//!
//! A snapshot is a value copy of a process's clock state. It is what travels
//! inside a [`MessageEnvelope`](super::MessageEnvelope) and what every
//! [`ProcessEvent`](super::ProcessEvent) records, so later mutation of the
//! live clock never reaches it.

use serde::{Deserialize, Serialize};

use super::ClockDiscipline;
use crate::values::LogicalTime;

/// Copy of a clock's state at one instant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockSnapshot {
    /// Physical discipline carries no logical state
    Physical,
    /// Lamport counter value
    Lamport(LogicalTime),
    /// One counter per process, indexed by process id
    Vector(Vec<LogicalTime>),
}

impl ClockSnapshot {
    /// Discipline this snapshot was taken under
    pub fn discipline(&self) -> ClockDiscipline {
        match self {
            ClockSnapshot::Physical => ClockDiscipline::Physical,
            ClockSnapshot::Lamport(_) => ClockDiscipline::Lamport,
            ClockSnapshot::Vector(_) => ClockDiscipline::Vector,
        }
    }

    /// Lamport counter, if this is a Lamport snapshot
    pub fn lamport(&self) -> Option<LogicalTime> {
        match self {
            ClockSnapshot::Lamport(value) => Some(*value),
            _ => None,
        }
    }

    /// Vector components, if this is a vector snapshot
    pub fn vector(&self) -> Option<&[LogicalTime]> {
        match self {
            ClockSnapshot::Vector(values) => Some(values),
            _ => None,
        }
    }

    /// Clock suffix appended to an event line
    ///
    /// Empty for physical time, ` | Lamport: <n>` for Lamport and
    /// ` | Vector: [<n0>, <n1>, ...]` for vector clocks.
    pub fn clock_info(&self) -> String {
        match self {
            ClockSnapshot::Physical => String::new(),
            ClockSnapshot::Lamport(value) => format!(" | Lamport: {}", value),
            ClockSnapshot::Vector(values) => format!(" | Vector: {:?}", values),
        }
    }

    /// Returns true if the event stamped `self` is ordered before `other`
    ///
    /// - Lamport: `self < other`. This is implied by happens-before, not
    ///   equivalent to it.
    /// - Vector: every component `<=` and at least one `<`.
    /// - Physical, or snapshots of different disciplines: never.
    pub fn happens_before(&self, other: &ClockSnapshot) -> bool {
        match (self, other) {
            (ClockSnapshot::Lamport(a), ClockSnapshot::Lamport(b)) => a < b,
            (ClockSnapshot::Vector(a), ClockSnapshot::Vector(b)) if a.len() == b.len() => {
                let mut strictly_less = false;
                for (x, y) in a.iter().zip(b) {
                    if x > y {
                        return false;
                    }
                    if x < y {
                        strictly_less = true;
                    }
                }
                strictly_less
            }
            _ => false,
        }
    }

    /// Returns true if neither event is ordered before the other
    ///
    /// Only vector snapshots can tell concurrency apart from ordering; Lamport
    /// and physical snapshots always return false.
    pub fn is_concurrent_with(&self, other: &ClockSnapshot) -> bool {
        match (self, other) {
            (ClockSnapshot::Vector(a), ClockSnapshot::Vector(b)) if a.len() == b.len() => {
                a != b && !self.happens_before(other) && !other.happens_before(self)
            }
            _ => false,
        }
    }
}
