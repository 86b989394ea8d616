use chronicle_core::{ClockDiscipline, ProcessEvent};

/// Port for observable simulation output
///
/// Processes call [`EventSink::record`] concurrently from their own tasks,
/// so implementations must be thread safe. Recording is infallible from the
/// simulation's point of view.
pub trait EventSink: Send + Sync {
    /// Called by the driver before the processes of a run are started
    ///
    /// `part` is 1-based and follows the order runs are executed in.
    fn begin_run(&self, part: usize, discipline: ClockDiscipline) {
        let _ = (part, discipline);
    }

    /// Record one process event
    fn record(&self, event: &ProcessEvent);
}
