use std::path::Path;

use anyhow::Result;
use beamplot::app::{self, BatchConfig, FailurePolicy};
use beamplot::cli::Cli;
use beamplot::server;
use clap::Parser;

/// Measurement files live here, named `<category>_<polarity>_<run>[_suffix]`.
const DATA_DIR: &str = "data";
/// Rendered pages land here; wiped on every start.
const OUTPUT_DIR: &str = "data/html";
const SERVER_ADDR: &str = "localhost:8089";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = BatchConfig {
        data_dir: DATA_DIR.into(),
        output_dir: OUTPUT_DIR.into(),
        cluster_size: cli.cluster_size,
        policy: FailurePolicy::Abort,
    };

    let entries = app::run_batch(&config)?;
    tracing::info!("rendered {} run pages into {OUTPUT_DIR}", entries.len());

    server::serve(Path::new(OUTPUT_DIR), SERVER_ADDR)?;
    Ok(())
}
