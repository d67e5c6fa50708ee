use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop the reduction pipeline.
///
/// The batch orchestrator decides what a given error means (abort the whole
/// batch or skip the offending run); nothing below this level terminates the
/// process.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read data directory {path}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open data file {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bad data line {line} in {path}: {reason}")]
    Parse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// Mean/sigma of an empty series is 0/0; surfaced instead of letting a
    /// NaN flow into the rendered charts.
    #[error("cannot fit a distribution to an empty series")]
    DegenerateStatistics,

    #[error("cannot write output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("cannot encode run summary: {0}")]
    SummaryEncode(#[from] serde_json::Error),

    #[error("cannot bind http server on {addr}: {reason}")]
    ServerBind { addr: String, reason: String },
}
