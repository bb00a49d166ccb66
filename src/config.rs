//! Configuration management and validation.
//!
//! Provides the processing parameters for a run: delimiters, the error log
//! location and operator output settings.

use crate::constants::{DEFAULT_ERROR_PATH, DEFAULT_INPUT_DELIMITER, DEFAULT_OUTPUT_DELIMITER};
use crate::error::{ProcessorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Processing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Delimiter between timestamp and report in the input file
    pub input_delimiter: char,

    /// Delimiter between fields in the output file
    pub output_delimiter: char,

    /// Destination of the error log
    pub error_path: PathBuf,

    /// Show a progress bar while decoding
    pub show_progress: bool,

    /// Suppress the operator summary on stdout
    pub quiet: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            input_delimiter: DEFAULT_INPUT_DELIMITER,
            output_delimiter: DEFAULT_OUTPUT_DELIMITER,
            error_path: PathBuf::from(DEFAULT_ERROR_PATH),
            show_progress: true,
            quiet: false,
        }
    }
}

impl ProcessorConfig {
    /// Create configuration with a custom input delimiter
    pub fn with_input_delimiter(mut self, delimiter: char) -> Self {
        self.input_delimiter = delimiter;
        self
    }

    /// Create configuration with a custom output delimiter
    pub fn with_output_delimiter(mut self, delimiter: char) -> Self {
        self.output_delimiter = delimiter;
        self
    }

    /// Write the error log to a custom path
    pub fn with_error_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_path = path.into();
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Enable quiet mode (no summary, no progress bar)
    pub fn with_quiet(mut self) -> Self {
        self.quiet = true;
        self.show_progress = false;
        self
    }

    /// Output delimiter as the single byte the CSV writer expects
    pub fn output_delimiter_byte(&self) -> Result<u8> {
        delimiter_byte("output", self.output_delimiter)
    }

    /// Check that both delimiters can separate fields on a single line
    pub fn validate(&self) -> Result<()> {
        delimiter_byte("input", self.input_delimiter)?;
        self.output_delimiter_byte()?;
        if self.error_path.as_os_str().is_empty() {
            return Err(ProcessorError::configuration("error file path is empty"));
        }

        debug!("Validated configuration: {:?}", self);
        Ok(())
    }
}

fn delimiter_byte(role: &str, delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == '\n' || delimiter == '\r' {
        return Err(ProcessorError::configuration(format!(
            "{} delimiter {:?} must be a single ASCII character other than a line break",
            role, delimiter
        )));
    }
    Ok(delimiter as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProcessorConfig::default();
        assert_eq!(config.input_delimiter, ';');
        assert_eq!(config.output_delimiter, ';');
        assert_eq!(config.error_path, PathBuf::from("errors.txt"));
        assert!(config.show_progress);
        assert!(!config.quiet);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ProcessorConfig::default()
            .with_input_delimiter(',')
            .with_output_delimiter('\t')
            .with_error_path("/tmp/metar_errors.txt")
            .with_quiet();

        assert_eq!(config.input_delimiter, ',');
        assert_eq!(config.output_delimiter_byte().unwrap(), b'\t');
        assert_eq!(config.error_path, PathBuf::from("/tmp/metar_errors.txt"));
        assert!(config.quiet);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_rejects_non_ascii_delimiter() {
        let config = ProcessorConfig::default().with_output_delimiter('§');
        match config.validate() {
            Err(ProcessorError::Configuration { message }) => {
                assert!(message.contains("output delimiter"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_line_break_delimiter() {
        let config = ProcessorConfig::default().with_input_delimiter('\n');
        assert!(config.validate().is_err());
    }
}
