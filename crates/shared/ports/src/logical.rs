use chronicle_core::{ClockDiscipline, ClockSnapshot};

use crate::error::ClockResult;

/// Port for a process's clock state
///
/// Each discipline implements the same three transitions:
/// - a local event (internal or send) ticks the clock
/// - a receive merges the sender's snapshot and ticks
/// - a snapshot copies the state for an outgoing envelope
///
/// Implementations are owned by exactly one process and never shared.
pub trait LogicalClock: Send {
    /// Discipline this clock implements
    fn discipline(&self) -> ClockDiscipline;

    /// Apply the transition for an internal event or a send
    fn advance_on_local_event(&mut self);

    /// Merge a snapshot carried by a received message
    ///
    /// Fails without touching local state if the snapshot was taken under a
    /// different discipline or has a different shape.
    fn merge_on_receive(&mut self, remote: &ClockSnapshot) -> ClockResult<()>;

    /// Copy of the current state, detached from later mutation
    fn snapshot(&self) -> ClockSnapshot;

    /// Clock suffix for event lines
    fn render(&self) -> String {
        self.snapshot().clock_info()
    }
}
