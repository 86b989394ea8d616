use chronicle_core::{ClockDiscipline, ClockSnapshot};
use chronicle_ports::{ClockError, ClockResult, LogicalClock};

/// Physical discipline: no logical state at all
///
/// Events are ordered only by the wall-clock stamp taken when they are
/// logged, which is what the Lamport and vector disciplines improve on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicalClock;

impl PhysicalClock {
    pub fn new() -> Self {
        Self
    }
}

impl LogicalClock for PhysicalClock {
    fn discipline(&self) -> ClockDiscipline {
        ClockDiscipline::Physical
    }

    fn advance_on_local_event(&mut self) {}

    fn merge_on_receive(&mut self, remote: &ClockSnapshot) -> ClockResult<()> {
        match remote {
            ClockSnapshot::Physical => Ok(()),
            other => Err(ClockError::DisciplineMismatch {
                expected: ClockDiscipline::Physical,
                actual: other.discipline(),
            }),
        }
    }

    fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot::Physical
    }
}
