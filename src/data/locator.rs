use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Physical sample type. Each category has its own independent run numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Cup,
    Faceplate,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Cup, Category::Faceplate];

    /// Filename prefix, e.g. `cup_deflected_3_...`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::Cup => "cup",
            Category::Faceplate => "faceplate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Cup => "Cup",
            Category::Faceplate => "Faceplate",
        }
    }

    /// Number of evaluation points for the fitted-normal chart. The faceplate
    /// count is deliberately small; its curves interpolate smoothly anyway.
    /// Tunable per category, not derived from anything.
    pub fn fit_samples(&self) -> usize {
        match self {
            Category::Cup => 1000,
            Category::Faceplate => 10,
        }
    }
}

/// Measurement condition: current recorded with or without deflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Deflected,
    Undeflected,
}

impl Polarity {
    /// Filename tag, e.g. `cup_undeflected_3_...`.
    pub fn tag(&self) -> &'static str {
        match self {
            Polarity::Deflected => "deflected",
            Polarity::Undeflected => "undeflected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Polarity::Deflected => "Deflected",
            Polarity::Undeflected => "Undeflected",
        }
    }
}

/// Snapshot of the data directory taken once per batch.
///
/// Names are sorted so that "file-listing order" is deterministic across
/// platforms; every lookup below works on this snapshot, never on the live
/// filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    dir: PathBuf,
    names: Vec<String>,
}

impl DirectoryListing {
    pub fn read(dir: &Path) -> Result<Self, PipelineError> {
        let entries = fs::read_dir(dir).map_err(|source| PipelineError::DirectoryAccess {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PipelineError::DirectoryAccess {
                path: dir.to_path_buf(),
                source,
            })?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        Ok(Self {
            dir: dir.to_path_buf(),
            names,
        })
    }

    /// Build a listing from literal names, without touching the filesystem.
    pub fn from_names<I, S>(dir: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        Self {
            dir: dir.into(),
            names,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// A run exists for a category iff some filename contains
    /// `<category>_deflected_<run>`. Substring matching is intentional: it is
    /// the filename convention the instruments write, looseness included.
    pub fn has_run(&self, category: Category, run_number: u32) -> bool {
        let needle = format!("{}_deflected_{}", category.prefix(), run_number);
        self.names.iter().any(|name| name.contains(&needle))
    }

    /// Run numbers are assumed densely packed starting at 1; discovery stops
    /// at the first gap, so a missing run 3 hides runs 4 and up.
    pub fn discover_runs(&self, category: Category) -> Vec<u32> {
        let mut runs = Vec::new();
        let mut run_number = 1;
        while self.has_run(category, run_number) {
            runs.push(run_number);
            run_number += 1;
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> DirectoryListing {
        DirectoryListing::from_names("data", names.iter().copied())
    }

    #[test]
    fn run_exists_by_deflected_substring() {
        let listing = listing(&["cup_deflected_1_trial.txt", "cup_undeflected_1.txt"]);
        assert!(listing.has_run(Category::Cup, 1));
        assert!(!listing.has_run(Category::Faceplate, 1));
    }

    #[test]
    fn undeflected_alone_does_not_make_a_run() {
        let listing = listing(&["cup_undeflected_1.txt"]);
        assert!(!listing.has_run(Category::Cup, 1));
    }

    #[test]
    fn discovery_stops_at_first_gap() {
        let listing = listing(&[
            "cup_deflected_1.txt",
            "cup_deflected_2.txt",
            "cup_deflected_4.txt",
        ]);
        assert_eq!(listing.discover_runs(Category::Cup), vec![1, 2]);
    }

    #[test]
    fn categories_are_discovered_independently() {
        let listing = listing(&[
            "cup_deflected_1.txt",
            "faceplate_deflected_1.txt",
            "faceplate_deflected_2.txt",
        ]);
        assert_eq!(listing.discover_runs(Category::Cup), vec![1]);
        assert_eq!(listing.discover_runs(Category::Faceplate), vec![1, 2]);
    }

    #[test]
    fn names_come_back_sorted() {
        let listing = listing(&["b.txt", "a.txt", "c.txt"]);
        let names: Vec<&str> = listing.names().collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }
}
