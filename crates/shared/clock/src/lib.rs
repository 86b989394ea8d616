//! Chronicle Clock Infrastructure
//!
//! Clock disciplines and physical time sources for the simulation:
//!
//! ## Disciplines
//!
//! ```text
//! Event           Physical    Lamport                 Vector (process i)
//! ─────────────   ────────    ─────────────────────   ──────────────────────────
//! internal/send   no-op       c += 1                  v[i] += 1
//! receive(r)      no-op       c = max(c, r) + 1       v = max(v, r) pointwise; v[i] += 1
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use chronicle_clock::clock_for;
//! use chronicle_core::{ClockDiscipline, ProcessId};
//!
//! let mut clock = clock_for(ClockDiscipline::Vector, ProcessId(0), 3)?;
//! clock.advance_on_local_event();
//! let snapshot = clock.snapshot(); // travels inside the envelope
//! ```

mod lamport;
mod manual;
mod physical;
mod system;
mod vector;

pub use lamport::LamportClock;
pub use manual::ManualClock;
pub use physical::PhysicalClock;
pub use system::SystemClock;
pub use vector::VectorClock;

// Re-export the ports for convenience
pub use chronicle_ports::{Clock, ClockError, ClockResult, LogicalClock};

use chronicle_core::{ClockDiscipline, ProcessId};

/// Build the clock state for one process of a run
///
/// The discipline is chosen once here; every later transition is a single
/// dynamic dispatch.
pub fn clock_for(
    discipline: ClockDiscipline,
    owner: ProcessId,
    process_count: usize,
) -> ClockResult<Box<dyn LogicalClock>> {
    let clock: Box<dyn LogicalClock> = match discipline {
        ClockDiscipline::Physical => Box::new(PhysicalClock::new()),
        ClockDiscipline::Lamport => Box::new(LamportClock::new()),
        ClockDiscipline::Vector => Box::new(VectorClock::new(owner, process_count)?),
    };
    Ok(clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_core::ClockSnapshot;

    #[test]
    fn test_factory_selects_discipline() {
        for discipline in ClockDiscipline::ALL {
            let clock = clock_for(discipline, ProcessId(0), 3).unwrap();
            assert_eq!(clock.discipline(), discipline);
        }
    }

    #[test]
    fn test_factory_initial_snapshots() {
        let lamport = clock_for(ClockDiscipline::Lamport, ProcessId(2), 3).unwrap();
        let vector = clock_for(ClockDiscipline::Vector, ProcessId(2), 3).unwrap();

        assert_eq!(lamport.snapshot(), ClockSnapshot::Lamport(0));
        assert_eq!(vector.snapshot(), ClockSnapshot::Vector(vec![0, 0, 0]));
    }

    #[test]
    fn test_factory_validates_owner() {
        assert!(clock_for(ClockDiscipline::Vector, ProcessId(5), 3).is_err());
        // Only the vector clock is sized by the process count
        assert!(clock_for(ClockDiscipline::Lamport, ProcessId(5), 3).is_ok());
    }
}
