//! Simulation - runs every clock discipline in turn
//!
//! For each discipline the driver:
//! - creates fresh mailboxes and one process per mailbox
//! - starts all processes concurrently on the runtime's worker threads
//! - waits for every process before moving to the next discipline
//!
//! Nothing is shared between runs.

use chronicle_clock::{SystemClock, clock_for};
use chronicle_core::{ClockDiscipline, ProcessId};
use chronicle_ports::{Clock, EventSink};
use std::sync::Arc;

use crate::error::{Result, SimulationError};
use crate::mailbox::fabric;
use crate::process::{ProcessActor, ProcessReport, ProcessSettings};
use crate::shutdown::ShutdownSignal;
use crate::sink::ConsoleSink;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Processes per run
    pub process_count: usize,
    /// Round budget and timing of every process
    pub process: ProcessSettings,
    /// Seed for reproducible runs (entropy when `None`)
    pub seed: Option<u64>,
    /// Disciplines to run, in order
    pub disciplines: Vec<ClockDiscipline>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            process_count: 3,
            process: ProcessSettings::default(),
            seed: None,
            disciplines: ClockDiscipline::ALL.to_vec(),
        }
    }
}

impl SimulationConfig {
    /// Check the configuration can produce a valid run
    pub fn validate(&self) -> Result<()> {
        if self.process_count < 2 {
            return Err(SimulationError::InvalidConfig(format!(
                "need at least 2 processes, got {}",
                self.process_count
            )));
        }

        let p = self.process.send_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(SimulationError::InvalidConfig(format!(
                "send probability must be within [0, 1], got {}",
                p
            )));
        }

        Ok(())
    }

    fn process_seed(&self, part: usize, process: ProcessId) -> Option<u64> {
        self.seed.map(|seed| {
            seed.wrapping_add((part * self.process_count + process.index()) as u64)
        })
    }
}

/// Outcome of one discipline's run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub discipline: ClockDiscipline,
    /// One report per process, in process-id order
    pub processes: Vec<ProcessReport>,
}

impl RunReport {
    /// Returns true if any process stopped early
    pub fn was_cancelled(&self) -> bool {
        self.processes.iter().any(|p| p.cancelled)
    }

    pub fn total_sent(&self) -> u32 {
        self.processes.iter().map(|p| p.sent).sum()
    }

    pub fn total_received(&self) -> u32 {
        self.processes.iter().map(|p| p.received).sum()
    }

    /// Messages that were sent but never read
    pub fn total_stranded(&self) -> usize {
        self.processes
            .iter()
            .map(|p| p.stranded + p.undelivered as usize)
            .sum()
    }

    pub fn process(&self, id: ProcessId) -> Option<&ProcessReport> {
        self.processes.iter().find(|p| p.process == id)
    }
}

/// Simulation results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationResults {
    /// Completed runs, in execution order
    pub runs: Vec<RunReport>,
    /// Whether shutdown cut the simulation short
    pub cancelled: bool,
}

impl SimulationResults {
    pub fn run(&self, discipline: ClockDiscipline) -> Option<&RunReport> {
        self.runs.iter().find(|r| r.discipline == discipline)
    }
}

/// Clock simulation driver
pub struct ClockSimulation {
    config: SimulationConfig,
    sink: Arc<dyn EventSink>,
    physical: Arc<dyn Clock>,
}

impl ClockSimulation {
    /// Create a simulation printing to stdout with wall-clock stamps
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            sink: Arc::new(ConsoleSink::new()),
            physical: Arc::new(SystemClock::new()),
        })
    }

    /// Send events somewhere other than stdout
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Stamp events with a specific physical clock
    pub fn with_physical_clock(mut self, physical: Arc<dyn Clock>) -> Self {
        self.physical = physical;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Wire up the processes of one run
    fn build_processes(
        &self,
        part: usize,
        discipline: ClockDiscipline,
    ) -> Result<Vec<ProcessActor>> {
        let count = self.config.process_count;
        let (directory, mailboxes) = fabric(count);

        mailboxes
            .into_iter()
            .map(|inbox| -> Result<ProcessActor> {
                let id = inbox.owner();
                let clock = clock_for(discipline, id, count)?;
                let actor = ProcessActor::new(
                    id,
                    clock,
                    inbox,
                    directory.clone(),
                    self.sink.clone(),
                    self.config.process.clone(),
                )
                .with_physical_clock(self.physical.clone());

                Ok(match self.config.process_seed(part, id) {
                    Some(seed) => actor.with_seed(seed),
                    None => actor,
                })
            })
            .collect()
    }

    /// Run all processes of one discipline and wait for every one of them
    ///
    /// `part` is the 1-based position of this run, used for the header.
    pub async fn run_discipline(
        &self,
        part: usize,
        discipline: ClockDiscipline,
        shutdown: &ShutdownSignal,
    ) -> Result<RunReport> {
        self.sink.begin_run(part, discipline);
        log::info!(
            "Starting {} run with {} processes",
            discipline,
            self.config.process_count
        );

        let handles: Vec<_> = self
            .build_processes(part, discipline)?
            .into_iter()
            .map(|actor| {
                let id = actor.id();
                (id, tokio::spawn(actor.run(shutdown.clone())))
            })
            .collect();

        // Join everything before reporting the first failure
        let mut processes = Vec::with_capacity(handles.len());
        let mut failure = None;
        for (id, handle) in handles {
            match handle.await {
                Ok(Ok(report)) => processes.push(report),
                Ok(Err(e)) => {
                    log::warn!("Process {} failed: {}", id, e);
                    if failure.is_none() {
                        failure = Some(e);
                    }
                }
                Err(join_error) => {
                    log::warn!("Process {} did not complete: {}", id, join_error);
                    if failure.is_none() {
                        failure = Some(SimulationError::ProcessPanicked {
                            process: id,
                            reason: join_error.to_string(),
                        });
                    }
                }
            }
        }

        if let Some(e) = failure {
            return Err(e);
        }

        let report = RunReport {
            discipline,
            processes,
        };

        log::info!(
            "{} run finished: {} sent, {} received, {} unread",
            discipline,
            report.total_sent(),
            report.total_received(),
            report.total_stranded()
        );

        Ok(report)
    }

    /// Run every configured discipline in order
    ///
    /// Stops before the next discipline once shutdown is requested.
    pub async fn run(&self, shutdown: ShutdownSignal) -> Result<SimulationResults> {
        let mut results = SimulationResults::default();

        for (index, discipline) in self.config.disciplines.iter().copied().enumerate() {
            if shutdown.is_cancelled() {
                results.cancelled = true;
                break;
            }

            let report = self.run_discipline(index + 1, discipline, &shutdown).await?;
            let cancelled = report.was_cancelled();
            results.runs.push(report);

            if cancelled {
                results.cancelled = true;
                break;
            }
        }

        if results.cancelled {
            log::warn!(
                "Simulation cancelled after {} of {} runs",
                results.runs.len(),
                self.config.disciplines.len()
            );
        }

        Ok(results)
    }
}
