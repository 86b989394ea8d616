//! Chronicle Runner - Concurrent Clock Simulation
//!
//! Runs a handful of processes that exchange messages while keeping time
//! under three clock disciplines, one run per discipline:
//!
//! - **Mailbox**: per-process FIFO inbox, any process may deliver to any other
//! - **Process**: one actor per process, owns its clock and its mailbox
//! - **Simulation**: builds a run, starts every process, waits for all of them
//! - **Sink**: where the observable event lines go
//!
//! ## Architecture
//!
//! ```text
//!                      ┌─────────────────────┐
//!                      │   ClockSimulation   │  Physical → Lamport → Vector
//!                      └──────────┬──────────┘
//!                                 │ spawn + join
//!            ┌────────────────────┼────────────────────┐
//!            ▼                    ▼                    ▼
//!     ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//!     │  Process 0  │      │  Process 1  │      │  Process 2  │
//!     │  clock      │      │  clock      │      │  clock      │
//!     └──┬───────▲──┘      └──┬───────▲──┘      └──┬───────▲──┘
//!        │deliver│try_take    │       │            │       │
//!        ▼       │            ▼       │            ▼       │
//!     ┌──────────┴────────────────────┴────────────────────┴──┐
//!     │           MailboxDirectory  [ inbox 0 | 1 | 2 ]        │
//!     └────────────────────────────────────────────────────────┘
//!                                 │ events
//!                                 ▼
//!                      ┌─────────────────────┐
//!                      │      EventSink      │
//!                      └─────────────────────┘
//! ```

pub mod error;
pub mod mailbox;
pub mod process;
pub mod shutdown;
pub mod simulation;
pub mod sink;

// Re-export main types
pub use error::{MailboxError, Result, SimulationError};
pub use mailbox::{Delivery, Mailbox, MailboxDirectory};
pub use process::{ProcessActor, ProcessReport, ProcessSettings};
pub use shutdown::{ShutdownHandle, ShutdownSignal};
pub use simulation::{ClockSimulation, RunReport, SimulationConfig, SimulationResults};
pub use sink::{ConsoleSink, MemorySink, SinkEntry};
