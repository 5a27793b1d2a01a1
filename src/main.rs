//! Generate the 2025 synthetic sensor dataset.
//!
//! Writes `data_2025.csv`, `means.npy`, and `stds.npy` to the current
//! directory, then plots the first week of each series in the terminal.
//! Log verbosity follows `RUST_LOG` (default `info`).

use anofox_synth::generator::{run, GeneratorConfig};
use anofox_synth::visualize::{show_sample, ChartConfig};
use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = GeneratorConfig::default();
    let (data, paths) = run(&config).context("failed to generate dataset")?;

    tracing::info!(
        table = %paths.table.display(),
        means = %paths.means.display(),
        stds = %paths.stds.display(),
        "artifacts written"
    );

    show_sample(&data.dataset, &ChartConfig::default());
    Ok(())
}
