use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use beamplot::app::{run_batch, BatchConfig, FailurePolicy};
use beamplot::error::PipelineError;

fn write_run_file(dir: &Path, name: &str, values: &[f64]) {
    let mut contents = String::from("time\tcurrent\n");
    for (i, value) in values.iter().enumerate() {
        contents.push_str(&format!("{i}\t{value}\n"));
    }
    fs::write(dir.join(name), contents).unwrap();
}

fn config(data_dir: &Path, policy: FailurePolicy) -> BatchConfig {
    BatchConfig {
        data_dir: data_dir.to_path_buf(),
        output_dir: data_dir.join("html"),
        cluster_size: NonZeroUsize::new(2).unwrap(),
        policy,
    }
}

#[test]
fn batch_renders_a_page_and_summary_per_run() {
    let dir = tempfile::tempdir().unwrap();
    write_run_file(dir.path(), "cup_deflected_1.txt", &[1.0, 2.0, 3.0, 4.0]);
    write_run_file(dir.path(), "cup_undeflected_1.txt", &[5.0, 6.0, 7.0, 8.0]);
    write_run_file(dir.path(), "faceplate_deflected_1.txt", &[2.0, 4.0]);
    write_run_file(dir.path(), "faceplate_undeflected_1.txt", &[1.0, 3.0]);

    let config = config(dir.path(), FailurePolicy::Abort);
    let entries = run_batch(&config).unwrap();
    assert_eq!(entries.len(), 2);

    let cup_page = fs::read_to_string(config.output_dir.join("cup_run_1.html")).unwrap();
    assert!(cup_page.contains("<title>Cup Run 1</title>"));
    assert!(cup_page.contains("Raw Data"));
    assert!(cup_page.contains("Time Averaged Data (n= 2)"));
    assert!(cup_page.contains("Norm Distribution of Deflected and Undeflected"));

    assert!(config.output_dir.join("faceplate_run_1.html").is_file());

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.output_dir.join("cup_run_1.json")).unwrap())
            .unwrap();
    assert_eq!(summary["category"], "cup");
    assert_eq!(summary["deflected"]["samples"], 4);
    assert_eq!(summary["deflected"]["mean"], 2.5);
    assert_eq!(summary["undeflected"]["mean"], 6.5);

    let index = fs::read_to_string(config.output_dir.join("index.html")).unwrap();
    assert!(index.contains("cup_run_1.html"));
    assert!(index.contains("faceplate_run_1.html"));
}

#[test]
fn discovery_stops_at_the_first_missing_run() {
    let dir = tempfile::tempdir().unwrap();
    for run in [1, 2, 4] {
        write_run_file(
            dir.path(),
            &format!("cup_deflected_{run}.txt"),
            &[1.0, 2.0],
        );
        write_run_file(
            dir.path(),
            &format!("cup_undeflected_{run}.txt"),
            &[3.0, 4.0],
        );
    }

    let config = config(dir.path(), FailurePolicy::Abort);
    let entries = run_batch(&config).unwrap();

    let runs: Vec<u32> = entries.iter().map(|e| e.run_number).collect();
    assert_eq!(runs, vec![1, 2]);
    assert!(!config.output_dir.join("cup_run_4.html").exists());
}

#[test]
fn abort_policy_fails_the_batch_on_a_bad_run() {
    let dir = tempfile::tempdir().unwrap();
    write_run_file(dir.path(), "cup_deflected_1.txt", &[1.0, 2.0]);
    fs::write(
        dir.path().join("cup_undeflected_1.txt"),
        "time\tcurrent\n0\tnot-a-number\n",
    )
    .unwrap();

    let config = config(dir.path(), FailurePolicy::Abort);
    let err = run_batch(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Parse { .. }));
}

#[test]
fn skip_policy_carries_on_past_a_bad_run() {
    let dir = tempfile::tempdir().unwrap();
    // Run 1 is malformed, run 2 is fine.
    write_run_file(dir.path(), "cup_deflected_1.txt", &[1.0, 2.0]);
    fs::write(
        dir.path().join("cup_undeflected_1.txt"),
        "time\tcurrent\n0\tnot-a-number\n",
    )
    .unwrap();
    write_run_file(dir.path(), "cup_deflected_2.txt", &[1.0, 2.0]);
    write_run_file(dir.path(), "cup_undeflected_2.txt", &[3.0, 4.0]);

    let config = config(dir.path(), FailurePolicy::SkipRun);
    let entries = run_batch(&config).unwrap();

    let runs: Vec<u32> = entries.iter().map(|e| e.run_number).collect();
    assert_eq!(runs, vec![2]);
    assert!(!config.output_dir.join("cup_run_1.html").exists());
    assert!(config.output_dir.join("cup_run_2.html").is_file());
}

#[test]
fn missing_undeflected_data_is_a_degenerate_fit() {
    let dir = tempfile::tempdir().unwrap();
    write_run_file(dir.path(), "cup_deflected_1.txt", &[1.0, 2.0]);

    let config = config(dir.path(), FailurePolicy::Abort);
    let err = run_batch(&config).unwrap_err();
    assert!(matches!(err, PipelineError::DegenerateStatistics));
}

#[test]
fn missing_data_directory_is_a_directory_error() {
    let dir = tempfile::tempdir().unwrap();
    // Output lands elsewhere so the unreadable data directory stays absent.
    let config = BatchConfig {
        data_dir: dir.path().join("nope"),
        output_dir: dir.path().join("html"),
        cluster_size: NonZeroUsize::new(2).unwrap(),
        policy: FailurePolicy::Abort,
    };
    let err = run_batch(&config).unwrap_err();
    assert!(matches!(err, PipelineError::DirectoryAccess { .. }));
}
