use chronicle_core::{ClockDiscipline, ClockSnapshot, LogicalTime};
use chronicle_ports::{ClockError, ClockResult, LogicalClock};

/// Lamport logical clock
///
/// A single counter that never decreases:
/// - local event: `counter += 1`
/// - receive: `counter = max(counter, received) + 1`
///
/// For a send with value `s` and its receive with value `r`, `r > s`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LamportClock {
    counter: LogicalTime,
}

impl LamportClock {
    /// Create a new clock starting at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter value
    pub fn current(&self) -> LogicalTime {
        self.counter
    }
}

impl LogicalClock for LamportClock {
    fn discipline(&self) -> ClockDiscipline {
        ClockDiscipline::Lamport
    }

    fn advance_on_local_event(&mut self) {
        self.counter += 1;
    }

    fn merge_on_receive(&mut self, remote: &ClockSnapshot) -> ClockResult<()> {
        let received = remote.lamport().ok_or(ClockError::DisciplineMismatch {
            expected: ClockDiscipline::Lamport,
            actual: remote.discipline(),
        })?;

        self.counter = self.counter.max(received) + 1;
        Ok(())
    }

    fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot::Lamport(self.counter)
    }
}
