//! Process Actor - one simulated process of a run
//!
//! Each round of a process:
//! 1. sleeps a random delay (scheduling jitter only, no effect on clocks)
//! 2. flips a coin: send to a random other process, or run an internal event
//! 3. takes at most one message from its own mailbox and merges its clock
//!
//! After the last round it logs `finished.` and stops. Messages still queued
//! at that point are never read.

use chronicle_clock::SystemClock;
use chronicle_core::{
    ClockDiscipline, ClockSnapshot, EventKind, MessageEnvelope, ProcessEvent, ProcessId,
};
use chronicle_ports::{Clock, EventSink, LogicalClock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{MailboxError, Result};
use crate::mailbox::{Delivery, Mailbox, MailboxDirectory};
use crate::shutdown::ShutdownSignal;

/// Per-process round budget and timing
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSettings {
    /// Rounds each process executes before finishing
    pub rounds: u32,
    /// Shortest delay before a round
    pub min_delay: Duration,
    /// Random extra delay, drawn from `[0, max_jitter)`
    pub max_jitter: Duration,
    /// Chance that a round sends instead of running an internal event
    pub send_probability: f64,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            rounds: 4,
            min_delay: Duration::from_millis(500),
            max_jitter: Duration::from_millis(1000),
            send_probability: 0.5,
        }
    }
}

/// What a process did over its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub process: ProcessId,
    /// Rounds fully executed (less than the budget only when cancelled)
    pub rounds_completed: u32,
    pub sent: u32,
    pub internal: u32,
    pub received: u32,
    /// Sends that reached a process which had already finished
    pub undelivered: u32,
    /// Messages left in the mailbox at termination and discarded
    pub stranded: usize,
    pub cancelled: bool,
    pub final_clock: ClockSnapshot,
}

impl ProcessReport {
    /// Events that ticked the clock (sends, internal events and receives)
    pub fn clock_events(&self) -> u32 {
        self.sent + self.internal + self.received
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    sent: u32,
    undelivered: u32,
    internal: u32,
    received: u32,
}

/// A simulated process owning its clock and mailbox
pub struct ProcessActor {
    id: ProcessId,
    clock: Box<dyn LogicalClock>,
    inbox: Mailbox,
    directory: MailboxDirectory,
    sink: Arc<dyn EventSink>,
    physical: Arc<dyn Clock>,
    settings: ProcessSettings,
    rng: StdRng,
    tally: Tally,
}

impl ProcessActor {
    /// Create a process bound to its own mailbox and the run's directory
    ///
    /// Physical stamps come from the system clock and randomness from
    /// entropy unless overridden with the `with_*` builders.
    pub fn new(
        id: ProcessId,
        clock: Box<dyn LogicalClock>,
        inbox: Mailbox,
        directory: MailboxDirectory,
        sink: Arc<dyn EventSink>,
        settings: ProcessSettings,
    ) -> Self {
        debug_assert_eq!(inbox.owner(), id, "mailbox wired to the wrong process");

        Self {
            id,
            clock,
            inbox,
            directory,
            sink,
            physical: Arc::new(SystemClock::new()),
            settings,
            rng: StdRng::from_entropy(),
            tally: Tally::default(),
        }
    }

    /// Use a specific physical time source
    pub fn with_physical_clock(mut self, physical: Arc<dyn Clock>) -> Self {
        self.physical = physical;
        self
    }

    /// Make delays, coin flips and destinations reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn id(&self) -> ProcessId {
        self.id
    }

    pub fn discipline(&self) -> ClockDiscipline {
        self.clock.discipline()
    }

    /// Current clock state
    pub fn snapshot(&self) -> ClockSnapshot {
        self.clock.snapshot()
    }

    fn emit(&self, kind: EventKind) {
        let event = ProcessEvent {
            at: self.physical.now(),
            process: self.id,
            kind,
            clock: self.clock.snapshot(),
        };
        self.sink.record(&event);
    }

    /// Execute an internal event
    pub fn internal_event(&mut self) {
        self.clock.advance_on_local_event();
        self.tally.internal += 1;
        self.emit(EventKind::Internal);
    }

    /// Tick, then send a greeting stamped with the new clock to `to`
    pub fn send_to(&mut self, to: ProcessId, round: u32) -> Result<Delivery> {
        if to == self.id {
            return Err(MailboxError::SelfDelivery(to).into());
        }
        if to.index() >= self.directory.len() {
            return Err(MailboxError::UnknownProcess(to).into());
        }

        self.clock.advance_on_local_event();
        let envelope = MessageEnvelope::greeting(self.id, round, self.clock.snapshot());
        let content = envelope.content().to_string();

        let delivery = self.directory.deliver(to, envelope)?;
        self.tally.sent += 1;
        if delivery == Delivery::Stranded {
            self.tally.undelivered += 1;
        }
        self.emit(EventKind::Sent { to, content });
        Ok(delivery)
    }

    /// Take at most one message from the mailbox and merge its clock
    ///
    /// Returns the consumed envelope, or `None` if the mailbox was empty.
    pub fn try_receive(&mut self) -> Result<Option<MessageEnvelope>> {
        let Some(envelope) = self.inbox.try_take() else {
            return Ok(None);
        };

        self.clock.merge_on_receive(envelope.snapshot())?;
        self.tally.received += 1;
        self.emit(EventKind::Received {
            from: envelope.sender(),
            content: envelope.content().to_string(),
        });
        Ok(Some(envelope))
    }

    /// Uniformly pick one of the other processes
    pub fn pick_destination(&mut self) -> ProcessId {
        let others = self.directory.len().saturating_sub(1).max(1);
        let pick = self.rng.gen_range(0..others);
        // Skip over our own id
        if pick >= self.id.index() {
            ProcessId(pick + 1)
        } else {
            ProcessId(pick)
        }
    }

    /// One round without the delay: send or internal event, then one receive
    pub fn step(&mut self, round: u32) -> Result<()> {
        if self.rng.gen_bool(self.settings.send_probability.clamp(0.0, 1.0)) {
            let to = self.pick_destination();
            self.send_to(to, round)?;
        } else {
            self.internal_event();
        }

        self.try_receive()?;
        Ok(())
    }

    fn round_delay(&mut self) -> Duration {
        let jitter_ms = self.settings.max_jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.settings.min_delay;
        }
        self.settings.min_delay + Duration::from_millis(self.rng.gen_range(0..jitter_ms))
    }

    fn report(&self, rounds_completed: u32, stranded: usize, cancelled: bool) -> ProcessReport {
        ProcessReport {
            process: self.id,
            rounds_completed,
            sent: self.tally.sent,
            undelivered: self.tally.undelivered,
            internal: self.tally.internal,
            received: self.tally.received,
            stranded,
            cancelled,
            final_clock: self.clock.snapshot(),
        }
    }

    /// Run the full round budget
    ///
    /// A shutdown request ends the current delay immediately; no further
    /// rounds start and the process still logs `finished.`.
    pub async fn run(mut self, mut shutdown: ShutdownSignal) -> Result<ProcessReport> {
        self.emit(EventKind::Started);

        let mut rounds_completed = 0;
        let mut cancelled = false;

        for round in 0..self.settings.rounds {
            if shutdown.is_cancelled() {
                cancelled = true;
                break;
            }

            let delay = self.round_delay();
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    cancelled = true;
                    break;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            self.step(round)?;
            rounds_completed += 1;
        }

        if cancelled {
            log::debug!(
                "Process {} cancelled after {} of {} rounds",
                self.id,
                rounds_completed,
                self.settings.rounds
            );
        }

        self.emit(EventKind::Finished);

        let stranded = self.inbox.discard_pending();
        if stranded > 0 {
            log::debug!("Process {} finished with {} unread messages", self.id, stranded);
        }

        Ok(self.report(rounds_completed, stranded, cancelled))
    }
}
