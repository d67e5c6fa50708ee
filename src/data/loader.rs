use std::fs::File;
use std::path::Path;

use crate::data::locator::{Category, DirectoryListing, Polarity};
use crate::data::series::RawSeries;
use crate::error::PipelineError;

/// Column holding the current reading in the tab-delimited source files.
const VALUE_FIELD: usize = 1;

/// Load the raw series for one polarity of one run.
///
/// Deflected data may be split across several files; every filename containing
/// `<category>_deflected_<run>` contributes its lines, in listing order. For
/// undeflected data exactly one file per run is expected, so scanning stops at
/// the first match. The asymmetry is part of the filename contract.
pub fn load_series(
    listing: &DirectoryListing,
    category: Category,
    polarity: Polarity,
    run_number: u32,
) -> Result<RawSeries, PipelineError> {
    let needle = format!("{}_{}_{}", category.prefix(), polarity.tag(), run_number);
    let mut series = RawSeries::default();

    for name in listing.names() {
        if polarity == Polarity::Undeflected {
            tracing::debug!("checking file: {name}");
        }
        if !name.contains(&needle) {
            continue;
        }

        let path = listing.path_of(name);
        append_file(&mut series, &path)?;

        if polarity == Polarity::Undeflected {
            break;
        }
    }

    Ok(series)
}

/// Parse one source file onto the end of `series`.
///
/// The first line is a header and is always discarded, whatever it contains.
/// Every other line is split on tabs; the value field must parse as f64 or
/// the whole load fails. The sample index restarts at 0 for each file.
fn append_file(series: &mut RawSeries, path: &Path) -> Result<(), PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("file open: {}", path.display());

    // Literal tab-splitting: the instrument dumps are not quoted CSV.
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(file);

    let mut count = 0.0;
    for record in reader.records() {
        let record = record.map_err(|e| PipelineError::Parse {
            path: path.to_path_buf(),
            line: e.position().map_or(0, csv::Position::line),
            reason: e.to_string(),
        })?;
        let line = record.position().map_or(0, csv::Position::line);

        let field = record
            .get(VALUE_FIELD)
            .ok_or_else(|| PipelineError::Parse {
                path: path.to_path_buf(),
                line,
                reason: format!("missing value field {VALUE_FIELD}"),
            })?;
        let value: f64 = field.trim().parse().map_err(|e| PipelineError::Parse {
            path: path.to_path_buf(),
            line,
            reason: format!("{e}: {field:?}"),
        })?;

        series.push(count, value);
        count += 1.0;
    }

    Ok(())
}
