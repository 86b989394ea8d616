//! Event sinks - where process events end up
//!
//! - [`ConsoleSink`]: prints one line per event to stdout (the binary)
//! - [`MemorySink`]: keeps events in order for inspection (tests)

use chronicle_core::{ClockDiscipline, ProcessEvent, ProcessId};
use chronicle_ports::EventSink;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

/// Prints events to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for ConsoleSink {
    fn begin_run(&self, part: usize, discipline: ClockDiscipline) {
        let mut out = std::io::stdout().lock();
        if part > 1 {
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "--- PART {}: {} ---", part, discipline.title());
    }

    fn record(&self, event: &ProcessEvent) {
        // One locked write per line keeps concurrent processes from interleaving
        let _ = writeln!(std::io::stdout().lock(), "{}", event);
    }
}

/// Something a [`MemorySink`] saw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEntry {
    RunStarted {
        part: usize,
        discipline: ClockDiscipline,
    },
    Event(ProcessEvent),
}

/// Records everything in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<SinkEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SinkEntry>> {
        // Entries are pushed whole, so a poisoned lock still holds a valid log
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Everything recorded so far
    pub fn entries(&self) -> Vec<SinkEntry> {
        self.lock().clone()
    }

    /// All process events, in the order they were recorded
    pub fn events(&self) -> Vec<ProcessEvent> {
        self.lock()
            .iter()
            .filter_map(|entry| match entry {
                SinkEntry::Event(event) => Some(event.clone()),
                SinkEntry::RunStarted { .. } => None,
            })
            .collect()
    }

    /// Events of one process, in the order that process produced them
    pub fn events_of(&self, process: ProcessId) -> Vec<ProcessEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.process == process)
            .collect()
    }

    /// Rendered event lines
    pub fn lines(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl EventSink for MemorySink {
    fn begin_run(&self, part: usize, discipline: ClockDiscipline) {
        self.lock().push(SinkEntry::RunStarted { part, discipline });
    }

    fn record(&self, event: &ProcessEvent) {
        self.lock().push(SinkEntry::Event(event.clone()));
    }
}
