//! Clock Simulation Integration Test
//!
//! Runs real concurrent simulations and checks the recorded event stream:
//! - Lamport: every receive is stamped after its send
//! - Vector: merges dominate the sender's snapshot and tick the receiver
//! - Every process runs exactly its round budget
//! - Runs happen in order, one discipline at a time

use chronicle_clock::ManualClock;
use chronicle_core::{ClockDiscipline, ClockSnapshot, EventKind, ProcessEvent, ProcessId};
use chronicle_runner::{
    ClockSimulation, MemorySink, ProcessSettings, SimulationConfig, SimulationResults, SinkEntry,
    shutdown,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const PROCESSES: usize = 3;
const ROUNDS: u32 = 4;

fn config(disciplines: Vec<ClockDiscipline>, seed: u64) -> SimulationConfig {
    SimulationConfig {
        process_count: PROCESSES,
        process: ProcessSettings {
            rounds: ROUNDS,
            min_delay: Duration::from_millis(1),
            max_jitter: Duration::from_millis(5),
            send_probability: 0.6,
        },
        seed: Some(seed),
        disciplines,
    }
}

async fn run(config: SimulationConfig) -> (SimulationResults, Arc<MemorySink>) {
    let _ = env_logger::try_init();

    let sink = Arc::new(MemorySink::new());
    let sim = ClockSimulation::new(config)
        .unwrap()
        .with_sink(sink.clone());
    let (_handle, signal) = shutdown::channel();

    let results = sim.run(signal).await.unwrap();
    (results, sink)
}

/// Clock of every send event, keyed by the (unique) message content
fn sends_by_content(events: &[ProcessEvent]) -> HashMap<String, (ProcessId, ClockSnapshot)> {
    events
        .iter()
        .filter_map(|event| match &event.kind {
            EventKind::Sent { content, .. } => {
                Some((content.clone(), (event.process, event.clock.clone())))
            }
            _ => None,
        })
        .collect()
}

fn assert_round_budget(sink: &MemorySink, results: &SimulationResults) {
    for run in &results.runs {
        for report in &run.processes {
            assert_eq!(report.rounds_completed, ROUNDS);
            assert_eq!(report.sent + report.internal, ROUNDS);
        }
    }

    for id in ProcessId::all(PROCESSES) {
        let events = sink.events_of(id);
        let local = events.iter().filter(|e| e.kind.is_local_tick()).count();
        assert_eq!(local, ROUNDS as usize * results.runs.len());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_lamport_receive_follows_send() {
    for seed in [1, 2, 3, 4, 5] {
        let (results, sink) = run(config(vec![ClockDiscipline::Lamport], seed)).await;
        let events = sink.events();
        let sends = sends_by_content(&events);

        assert_round_budget(&sink, &results);

        for event in &events {
            if let EventKind::Received { from, content } = &event.kind {
                let (sender, sent_clock) = &sends[content];
                assert_eq!(sender, from);

                let s = sent_clock.lamport().unwrap();
                let r = event.clock.lamport().unwrap();
                assert!(r > s, "receive of '{}' at {} not after send at {}", content, r, s);
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_lamport_clocks_are_monotonic() {
    let (_results, sink) = run(config(vec![ClockDiscipline::Lamport], 11)).await;

    for id in ProcessId::all(PROCESSES) {
        let mut previous = 0;
        for event in sink.events_of(id) {
            let value = event.clock.lamport().unwrap();
            match event.kind {
                EventKind::Started | EventKind::Finished => assert_eq!(value, previous),
                _ => assert!(value > previous, "process {} went from {} to {}", id, previous, value),
            }
            previous = value;
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_vector_merges_dominate_sender() {
    for seed in [7, 8, 9] {
        let (results, sink) = run(config(vec![ClockDiscipline::Vector], seed)).await;
        let events = sink.events();
        let sends = sends_by_content(&events);

        assert_round_budget(&sink, &results);

        for id in ProcessId::all(PROCESSES) {
            let own = id.index();
            let mut previous = vec![0; PROCESSES];

            for event in sink.events_of(id) {
                let current = event.clock.vector().unwrap().to_vec();

                // Components never decrease
                assert!(current.iter().zip(&previous).all(|(c, p)| c >= p));

                match &event.kind {
                    EventKind::Sent { .. } | EventKind::Internal => {
                        assert_eq!(current[own], previous[own] + 1);
                    }
                    EventKind::Received { content, .. } => {
                        let (_, sent) = &sends[content];
                        let sent = sent.vector().unwrap();
                        assert!(current.iter().zip(sent).all(|(c, s)| c >= s));
                        assert!(current[own] > previous[own]);
                    }
                    EventKind::Started | EventKind::Finished => assert_eq!(current, previous),
                }
                previous = current;
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_vector_final_clocks() {
    let (results, sink) = run(config(vec![ClockDiscipline::Vector], 21)).await;
    let events = sink.events();
    let sends = sends_by_content(&events);
    let run = results.run(ClockDiscipline::Vector).unwrap();

    for report in &run.processes {
        let own = report.process.index();
        let final_clock = report.final_clock.vector().unwrap();

        assert!(final_clock[own] >= report.clock_events() as u64);

        // At least as recent as anything merged from another process
        for event in sink.events_of(report.process) {
            if let EventKind::Received { from, content } = &event.kind {
                let sent = sends[content].1.vector().unwrap();
                assert!(final_clock[from.index()] >= sent[from.index()]);
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_fifo_per_sender() {
    let (_results, sink) = run(config(vec![ClockDiscipline::Lamport], 33)).await;

    for receiver in ProcessId::all(PROCESSES) {
        let mut last_round: HashMap<ProcessId, u32> = HashMap::new();

        for event in sink.events_of(receiver) {
            if let EventKind::Received { from, content } = &event.kind {
                let round: u32 = content
                    .trim_end_matches(')')
                    .rsplit(' ')
                    .next()
                    .and_then(|r| r.parse().ok())
                    .unwrap();

                if let Some(previous) = last_round.insert(*from, round) {
                    assert!(round > previous, "{} read out of order", content);
                }
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_messages_are_read_or_discarded() {
    let (results, _sink) = run(config(vec![ClockDiscipline::Lamport], 44)).await;
    let run = &results.runs[0];

    let accounted = run.total_received() as usize + run.total_stranded();
    assert!(accounted <= run.total_sent() as usize);
    assert!(run.total_received() <= run.total_sent());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_physical_lines_have_no_clock_info() {
    let sink = Arc::new(MemorySink::new());
    let sim = ClockSimulation::new(config(vec![ClockDiscipline::Physical], 5))
        .unwrap()
        .with_sink(sink.clone())
        .with_physical_clock(ManualClock::at_epoch());
    let (_handle, signal) = shutdown::channel();

    sim.run(signal).await.unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), PROCESSES * (2 + ROUNDS as usize) + count_receives(&sink));
    for line in &lines {
        assert!(line.starts_with("[Physical: 0] [Process "), "{}", line);
        assert!(!line.contains(" | "), "{}", line);
    }
}

fn count_receives(sink: &MemorySink) -> usize {
    sink.events()
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Received { .. }))
        .count()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_runs_execute_in_order() {
    let (results, sink) = run(config(ClockDiscipline::ALL.to_vec(), 55)).await;

    assert!(!results.cancelled);
    let order: Vec<_> = results.runs.iter().map(|r| r.discipline).collect();
    assert_eq!(order, ClockDiscipline::ALL.to_vec());

    // Every event sits between its own run's header and the next one
    let mut current = None;
    let mut headers = Vec::new();
    for entry in sink.entries() {
        match entry {
            SinkEntry::RunStarted { part, discipline } => {
                headers.push((part, discipline));
                current = Some(discipline);
            }
            SinkEntry::Event(event) => {
                assert_eq!(Some(event.clock.discipline()), current);
            }
        }
    }
    assert_eq!(
        headers,
        vec![
            (1, ClockDiscipline::Physical),
            (2, ClockDiscipline::Lamport),
            (3, ClockDiscipline::Vector),
        ]
    );

    assert_round_budget(&sink, &results);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 3)]
async fn test_shutdown_stops_long_run() {
    let slow = SimulationConfig {
        process: ProcessSettings {
            min_delay: Duration::from_secs(30),
            ..Default::default()
        },
        ..Default::default()
    };
    let sink = Arc::new(MemorySink::new());
    let sim = ClockSimulation::new(slow).unwrap().with_sink(sink.clone());
    let (handle, signal) = shutdown::channel();

    let task = tokio::spawn(async move { sim.run(signal).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.cancel();

    let results = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("driver should not hang after shutdown")
        .unwrap()
        .unwrap();

    assert!(results.cancelled);
    assert_eq!(results.runs.len(), 1);
    assert!(results.runs[0].processes.iter().all(|p| p.cancelled));

    let finished = sink
        .events()
        .iter()
        .filter(|e| e.kind == EventKind::Finished)
        .count();
    assert_eq!(finished, 3);
}
