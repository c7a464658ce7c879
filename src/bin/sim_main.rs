//! spo2-sim: run the synthetic PPG generator through the windowed estimator
//!
//! Usage: `spo2-sim [config.toml]`. Without an argument `spo2.toml` in the
//! working directory is used when present. `SPO2_*` environment variables
//! override file values, and `RUST_LOG` controls log verbosity.

use spo2_core::config::ConfigLoader;
use spo2_core::simulation::SimulationRunner;
use spo2_core::Spo2Result;
use tracing_subscriber::EnvFilter;

fn main() -> Spo2Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("spo2-sim v{} starting", spo2_core::VERSION);

    let loader = match std::env::args().nth(1) {
        Some(path) => ConfigLoader::new().with_file(path),
        None => ConfigLoader::discover(),
    };
    let config = loader.load()?;
    let format = config.driver.output;

    let mut runner = SimulationRunner::new(&config)?;
    runner.run_with(|report| match report.render(format) {
        Ok(line) => println!("{}", line),
        Err(err) => tracing::error!(%err, "failed to render report"),
    });

    Ok(())
}
