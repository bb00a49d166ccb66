//! Command-line interface components.

use crate::config::ProcessorConfig;
use crate::constants::{
    DEFAULT_ERROR_PATH, DEFAULT_INPUT_DELIMITER, DEFAULT_OUTPUT_DELIMITER, DEFAULT_OUTPUT_PATH,
};
use crate::models::ProcessingStats;
use crate::processor::MetarProcessor;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "metar_processor")]
#[command(about = "Decode timestamped METAR reports into a flat CSV table")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Input file with one `TIMESTAMP;REPORT` line per report
    #[arg(short = 'i', long = "inputfile", value_name = "PATH")]
    pub input_file: PathBuf,

    /// Output CSV file
    #[arg(
        short = 'o',
        long = "outputfile",
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_PATH
    )]
    pub output_file: PathBuf,

    /// File receiving one line per rejected input line
    #[arg(short = 'e', long = "errorfile", value_name = "PATH", default_value = DEFAULT_ERROR_PATH)]
    pub error_file: PathBuf,

    /// Delimiter between timestamp and report in the input file
    #[arg(long, value_name = "CHAR", default_value_t = DEFAULT_INPUT_DELIMITER)]
    pub input_delimiter: char,

    /// Delimiter between fields in the output file
    #[arg(long, value_name = "CHAR", default_value_t = DEFAULT_OUTPUT_DELIMITER)]
    pub output_delimiter: char,

    /// Do not show a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Processing configuration built from the arguments
    pub fn to_config(&self) -> ProcessorConfig {
        let mut config = ProcessorConfig::default()
            .with_input_delimiter(self.input_delimiter)
            .with_output_delimiter(self.output_delimiter)
            .with_error_path(self.error_file.clone());
        if self.no_progress {
            config = config.without_progress();
        }
        if self.quiet {
            config = config.with_quiet();
        }
        config
    }
}

/// Run the processor for the parsed arguments
pub fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let config = args.to_config();
    let processor = MetarProcessor::new(args.input_file.clone(), args.output_file.clone())
        .with_context(|| format!("Cannot read input file {}", args.input_file.display()))?
        .with_config(config);

    let stats = processor
        .process()
        .with_context(|| format!("Failed to process {}", args.input_file.display()))?;

    info!(
        "Wrote {} rows to {} and {} errors to {}",
        stats.rows_parsed,
        stats.output_path.display(),
        stats.errors,
        stats.error_path.display()
    );
    Ok(stats)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("metar_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}
