use chronicle_core::{ClockDiscipline, ClockSnapshot, LogicalTime, ProcessId};
use chronicle_ports::{ClockError, ClockResult, LogicalClock};

/// Vector clock owned by one process
///
/// # Representation
///
/// One counter per process of the run:
/// - `counters[owner]` = number of events the owner has executed
/// - `counters[j]` = owner's latest knowledge of process j's count
///
/// ```text
/// P0: [3, 1, 0]  (P0 executed 3 events, last heard of P1 at 1)
/// P1: [2, 4, 0]  (P1 executed 4 events, last heard of P0 at 2)
/// ```
///
/// The owner only ever increments its own index; other indices change only
/// through merges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorClock {
    owner: ProcessId,
    counters: Vec<LogicalTime>,
}

impl VectorClock {
    /// Create a zeroed clock for `owner` in a run of `process_count` processes
    pub fn new(owner: ProcessId, process_count: usize) -> ClockResult<Self> {
        if owner.index() >= process_count {
            return Err(ClockError::OwnerOutOfRange {
                owner,
                process_count,
            });
        }

        Ok(Self {
            owner,
            counters: vec![0; process_count],
        })
    }

    pub fn owner(&self) -> ProcessId {
        self.owner
    }

    /// Component for one process
    pub fn get(&self, process: ProcessId) -> Option<LogicalTime> {
        self.counters.get(process.index()).copied()
    }

    /// All components, indexed by process id
    pub fn counters(&self) -> &[LogicalTime] {
        &self.counters
    }

    fn tick(&mut self) {
        // Index validated at construction
        self.counters[self.owner.index()] += 1;
    }
}

impl LogicalClock for VectorClock {
    fn discipline(&self) -> ClockDiscipline {
        ClockDiscipline::Vector
    }

    fn advance_on_local_event(&mut self) {
        self.tick();
    }

    fn merge_on_receive(&mut self, remote: &ClockSnapshot) -> ClockResult<()> {
        let received = remote.vector().ok_or(ClockError::DisciplineMismatch {
            expected: ClockDiscipline::Vector,
            actual: remote.discipline(),
        })?;

        if received.len() != self.counters.len() {
            return Err(ClockError::DimensionMismatch {
                expected: self.counters.len(),
                actual: received.len(),
            });
        }

        for (local, theirs) in self.counters.iter_mut().zip(received) {
            *local = (*local).max(*theirs);
        }
        self.tick();
        Ok(())
    }

    fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot::Vector(self.counters.clone())
    }
}
