use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ClockSnapshot, ProcessId};
use crate::values::Timestamp;

/// What a process did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Process began its rounds
    Started,
    /// Message handed to another process's mailbox
    Sent { to: ProcessId, content: String },
    /// Local computation with no communication
    Internal,
    /// Message taken from the process's own mailbox
    Received { from: ProcessId, content: String },
    /// Process completed (or abandoned) its rounds
    Finished,
}

impl EventKind {
    /// Returns true for events that tick the local clock
    pub fn is_local_tick(&self) -> bool {
        matches!(self, EventKind::Sent { .. } | EventKind::Internal)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Started => f.write_str("started."),
            EventKind::Sent { to, .. } => write!(f, "sent message to process {}.", to),
            EventKind::Internal => f.write_str("executed an internal event."),
            EventKind::Received { content, .. } => write!(f, "received: '{}'", content),
            EventKind::Finished => f.write_str("finished."),
        }
    }
}

/// One observable event, stamped with wall time and the clock after the event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEvent {
    /// Physical time the event was logged
    pub at: Timestamp,
    pub process: ProcessId,
    pub kind: EventKind,
    /// Clock state once the event's transition was applied
    pub clock: ClockSnapshot,
}

impl fmt::Display for ProcessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Physical: {}] [Process {}] {}{}",
            self.at.timestamp_millis(),
            self.process,
            self.kind,
            self.clock.clock_info()
        )
    }
}
