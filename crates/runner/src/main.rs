use chronicle_runner::{ClockSimulation, SimulationConfig, shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics only; event lines go to stdout through the console sink
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let (handle, signal) = shutdown::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupt received, stopping processes");
            handle.cancel();
        }
    });

    let simulation = ClockSimulation::new(SimulationConfig::default())?;
    let results = simulation.run(signal).await?;

    log::info!(
        "Completed {} runs{}",
        results.runs.len(),
        if results.cancelled { " (cancelled)" } else { "" }
    );

    Ok(())
}
