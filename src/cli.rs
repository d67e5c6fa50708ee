use std::num::NonZeroUsize;

use clap::Parser;

/// Reduce paired deflected/undeflected current measurements into per-run
/// comparison pages and serve them locally.
#[derive(Parser, Debug)]
#[command(name = "beamplot")]
#[command(version)]
#[command(about = "Deflected vs undeflected beam current reports", long_about = None)]
pub struct Cli {
    /// Clustering value for the time average
    #[arg(short = 'n', value_name = "SIZE", default_value = "10")]
    pub cluster_size: NonZeroUsize,
}
