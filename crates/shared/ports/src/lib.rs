//! Chronicle Ports
//!
//! Port definitions (traits) for the chronicle clock simulation.
//! These define the boundaries between the clock model and the
//! collaborators that drive and observe it.

mod clock;
mod error;
mod logical;
mod sink;

pub use clock::Clock;
pub use error::{ClockError, ClockResult};
pub use logical::LogicalClock;
pub use sink::EventSink;
