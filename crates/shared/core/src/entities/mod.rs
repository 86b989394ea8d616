mod discipline;
mod envelope;
mod event;
mod process_id;
mod snapshot;

pub use discipline::ClockDiscipline;
pub use envelope::MessageEnvelope;
pub use event::{EventKind, ProcessEvent};
pub use process_id::ProcessId;
pub use snapshot::ClockSnapshot;
