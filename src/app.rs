use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::data::loader;
use crate::data::locator::{Category, DirectoryListing, Polarity};
use crate::data::series::{PolaritySample, RunSample};
use crate::error::PipelineError;
use crate::processing::averaging;
use crate::processing::gaussian::GaussianParams;
use crate::report::dataset;
use crate::report::page::{self, IndexEntry};
use crate::report::summary::RunSummary;

/// What a failing run means for the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole batch at the first failure. A malformed input is an
    /// operator mistake that deserves inspection, so this is the default.
    Abort,
    /// Log the failing run and keep going with the next one.
    SkipRun,
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub cluster_size: NonZeroUsize,
    pub policy: FailurePolicy,
}

/// Run the whole reduction batch.
///
/// Discovers the runs of every category, reduces each one to a chart page and
/// a JSON summary, and finishes with an index page linking them all. Returns
/// the index entries of the runs that were rendered.
pub fn run_batch(config: &BatchConfig) -> Result<Vec<IndexEntry>, PipelineError> {
    reset_output_dir(&config.output_dir)?;
    let listing = DirectoryListing::read(&config.data_dir)?;

    let mut entries = Vec::new();
    for category in Category::ALL {
        for run_number in listing.discover_runs(category) {
            match process_run(config, &listing, category, run_number) {
                Ok(entry) => entries.push(entry),
                Err(error) => match config.policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::SkipRun => {
                        tracing::warn!(
                            "skipping {} run {run_number}: {error}",
                            category.prefix()
                        );
                    }
                },
            }
        }
    }

    write_text(
        &config.output_dir.join("index.html"),
        &page::render_index(&entries),
    )?;

    Ok(entries)
}

/// Load, reduce, and render one run.
fn process_run(
    config: &BatchConfig,
    listing: &DirectoryListing,
    category: Category,
    run_number: u32,
) -> Result<IndexEntry, PipelineError> {
    tracing::info!("processing {} run {run_number}", category.prefix());

    let undeflected = reduce_polarity(
        listing,
        category,
        Polarity::Undeflected,
        run_number,
        config.cluster_size,
    )?;
    let deflected = reduce_polarity(
        listing,
        category,
        Polarity::Deflected,
        run_number,
        config.cluster_size,
    )?;
    let sample = RunSample {
        category,
        run_number,
        deflected,
        undeflected,
    };

    let report = dataset::assemble(&sample, config.cluster_size);
    let page_name = format!("{}.html", report.file_stem);
    write_text(
        &config.output_dir.join(&page_name),
        &page::render_page(&report)?,
    )?;

    let summary = RunSummary::from_sample(&sample, config.cluster_size.get());
    write_text(
        &config.output_dir.join(format!("{}.json", report.file_stem)),
        &summary.to_json()?,
    )?;

    Ok(IndexEntry {
        category,
        run_number,
        page: page_name,
    })
}

/// One polarity's full reduction: raw load, time average, Gaussian fit.
fn reduce_polarity(
    listing: &DirectoryListing,
    category: Category,
    polarity: Polarity,
    run_number: u32,
    cluster_size: NonZeroUsize,
) -> Result<PolaritySample, PipelineError> {
    let raw = loader::load_series(listing, category, polarity, run_number)?;
    let averaged = averaging::time_average(&raw, cluster_size);
    let fit = GaussianParams::estimate(&raw)?;
    Ok(PolaritySample {
        raw,
        averaged,
        fit,
    })
}

/// Wipe and recreate the output directory. Pages from earlier batches are
/// discarded wholesale; save them elsewhere first if they matter.
fn reset_output_dir(dir: &Path) -> Result<(), PipelineError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|source| PipelineError::Output {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(dir).map_err(|source| PipelineError::Output {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_text(path: &Path, contents: &str) -> Result<(), PipelineError> {
    fs::write(path, contents).map_err(|source| PipelineError::Output {
        path: path.to_path_buf(),
        source,
    })
}
