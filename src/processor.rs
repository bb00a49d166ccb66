//! Main processing engine.
//!
//! Orchestrates a complete run: read every input line, decode each report
//! into a row, then write the CSV output and the error log. Malformed
//! lines never abort the run; only I/O failures are fatal.

use crate::config::ProcessorConfig;
use crate::constants::{ERROR_ENTRY_SEPARATOR, MISSING_DATE_FIELD};
use crate::error::{ProcessorError, Result};
use crate::layout;
use crate::models::{ProcessingStats, Row};
use crate::row::{build_row, failed_row};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// Rows and error entries accumulated from the input, in input order
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub rows: Vec<Row>,
    pub errors: Vec<String>,
}

/// Main processor for METAR report files
pub struct MetarProcessor {
    input_path: PathBuf,
    output_path: PathBuf,
    config: ProcessorConfig,
}

impl MetarProcessor {
    /// Create a new processor
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Result<Self> {
        if !input_path.exists() {
            return Err(ProcessorError::InputNotFound { path: input_path });
        }

        Ok(Self {
            input_path,
            output_path,
            config: ProcessorConfig::default(),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        self.config.validate()?;
        let output_delimiter = self.config.output_delimiter_byte()?;

        if !self.config.quiet {
            println!("{}", "Starting METAR processing".bright_green().bold());
            println!(
                "  {} {}",
                "Input:".bright_cyan(),
                self.input_path.display()
            );
            println!(
                "  {} {}",
                "Output:".bright_cyan(),
                self.output_path.display()
            );
        }

        // Step 1: Read the whole input
        info!("Reading from {}", self.input_path.display());
        let lines = read_lines(&self.input_path)?;
        debug!("Read {} lines", lines.len());

        // Step 2: Decode every line
        let progress_bar = self
            .config
            .show_progress
            .then(|| create_progress_bar(lines.len() as u64));
        let outcome = parse_lines(&lines, self.config.input_delimiter, progress_bar.as_ref());
        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        let rows_failed = outcome.rows.iter().filter(|r| r.is_failed()).count();
        info!(
            "Parsed {} rows ({} failed to decode), {} errors",
            outcome.rows.len(),
            rows_failed,
            outcome.errors.len()
        );

        // Step 3: Write the output file and the error log
        create_parent_dir(&self.output_path)?;
        let output = create_file(&self.output_path)?;
        write_rows(output, &outcome.rows, output_delimiter)?;

        create_parent_dir(&self.config.error_path)?;
        let error_log = create_file(&self.config.error_path)?;
        write_errors(error_log, &outcome.errors)?;

        let stats = ProcessingStats {
            lines_read: lines.len(),
            rows_parsed: outcome.rows.len(),
            rows_failed,
            errors: outcome.errors.len(),
            output_path: self.output_path.clone(),
            error_path: self.config.error_path.clone(),
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        if !self.config.quiet {
            print_summary(&stats);
        }

        Ok(stats)
    }
}

/// Split a line into its date and report fields
///
/// Only the first two fields are used; anything after a second delimiter
/// is ignored.
pub fn split_line(line: &str, delimiter: char) -> Option<(&str, &str)> {
    let mut fields = line.split(delimiter);
    let date = fields.next()?;
    let report = fields.next()?;
    Some((date, report))
}

/// Decode every line into a row, collecting error entries along the way
pub fn parse_lines<S: AsRef<str>>(
    lines: &[S],
    delimiter: char,
    progress_bar: Option<&ProgressBar>,
) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for line in lines {
        let line = line.as_ref();
        if let Some(pb) = progress_bar {
            pb.inc(1);
        }

        let Some((date, report)) = split_line(line, delimiter) else {
            warn!("Skipping line without date field: {}", line);
            outcome.errors.push(error_entry(MISSING_DATE_FIELD, line));
            continue;
        };

        match build_row(date, report) {
            Ok(row) => outcome.rows.push(row),
            Err(error) => {
                debug!("Failed to decode report dated {}: {}", date, error);
                outcome.errors.push(error_entry(&error.to_string(), report));
                outcome.rows.push(failed_row(date, report));
            }
        }
    }

    outcome
}

/// Write the header and one line per row; nothing at all when there are no rows
pub fn write_rows<W: Write>(writer: W, rows: &[Row], delimiter: u8) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    if !rows.is_empty() {
        csv_writer.write_record(layout::header())?;
        for row in rows {
            csv_writer.write_record(layout::render_row(row))?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write one error entry per line, without header
pub fn write_errors<W: Write>(mut writer: W, errors: &[String]) -> Result<()> {
    for error in errors {
        writeln!(writer, "{}", error)?;
    }
    writer.flush()?;
    Ok(())
}

fn error_entry(cause: &str, text: &str) -> String {
    format!("{}{}{}", cause, ERROR_ENTRY_SEPARATOR, text.trim_end())
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(ProcessorError::Io)?;
    let lines = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()?;
    Ok(lines)
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ProcessorError::OutputFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| ProcessorError::OutputFailed {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message("Decoding reports");
    pb
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Parsed count:".bright_cyan(),
        stats.rows_parsed.to_string().bright_white().bold()
    );
    if stats.errors > 0 {
        println!(
            "  {} {}",
            "Error count:".bright_red(),
            stats.errors.to_string().bright_red().bold()
        );
        println!(
            "  {} {}",
            "Error log:".bright_cyan(),
            stats.error_path.display()
        );
    } else {
        println!(
            "  {} {}",
            "Error count:".bright_cyan(),
            stats.errors.to_string().bright_white()
        );
    }
}
