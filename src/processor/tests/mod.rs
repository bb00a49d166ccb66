//! Integration tests for the processor module
//!
//! Tests the complete processing pipeline on small report files.


use crate::config::ProcessorConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Paths used by one test run
pub struct Fixture {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub error_path: PathBuf,
}

/// Write `content` as the input file and lay out output paths in `temp_dir`
pub fn create_fixture(temp_dir: &TempDir, content: &str) -> Fixture {
    let input_path = temp_dir.path().join("reports.txt");
    fs::write(&input_path, content).unwrap();

    Fixture {
        input_path,
        output_path: temp_dir.path().join("metar_parsed.csv"),
        error_path: temp_dir.path().join("errors.txt"),
    }
}

/// Configuration suitable for tests: no progress bar, no summary
pub fn quiet_config(error_path: &Path) -> ProcessorConfig {
    ProcessorConfig::default()
        .with_error_path(error_path)
        .with_quiet()
}

/// Output file split into lines, each line split into fields
pub fn read_output(path: &Path, delimiter: char) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split(delimiter).map(str::to_string).collect())
        .collect()
}
