use serde::{Deserialize, Serialize};
use std::fmt;

/// Clock discipline used by every process of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockDiscipline {
    /// Wall-clock time only, no logical counter
    Physical,
    /// Scalar logical clock
    Lamport,
    /// One logical counter per process
    Vector,
}

impl ClockDiscipline {
    /// The disciplines in the order the simulation demonstrates them
    pub const ALL: [ClockDiscipline; 3] = [
        ClockDiscipline::Physical,
        ClockDiscipline::Lamport,
        ClockDiscipline::Vector,
    ];

    /// Heading used when a run of this discipline starts
    pub fn title(&self) -> &'static str {
        match self {
            ClockDiscipline::Physical => "PHYSICAL CLOCK",
            ClockDiscipline::Lamport => "LAMPORT LOGICAL CLOCK",
            ClockDiscipline::Vector => "VECTOR CLOCKS",
        }
    }

    /// Returns true if the discipline keeps logical state between events
    pub fn is_logical(&self) -> bool {
        !matches!(self, ClockDiscipline::Physical)
    }
}

impl fmt::Display for ClockDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClockDiscipline::Physical => "Physical",
            ClockDiscipline::Lamport => "Lamport",
            ClockDiscipline::Vector => "Vector",
        };
        f.write_str(name)
    }
}
