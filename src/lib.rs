//! METAR Processor Library
//!
//! Decodes timestamped METAR aviation weather reports into a flat CSV
//! table.
//!
//! This library provides tools for:
//! - Decoding METAR reports (wind, visibility, runway visual range,
//!   weather phenomena, sky layers, temperature and pressure)
//! - Flattening a decoded report into named, typed columns
//! - Writing rows through a fixed column layout
//! - Collecting per-line failures into a separate error log

pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod layout;
pub mod models;
pub mod processor;
pub mod row;

// Re-export commonly used types
pub use config::ProcessorConfig;
pub use decoder::{DecodeError, DecodedReport, decode};
pub use error::{ProcessorError, Result};
pub use models::{Cell, ProcessingStats, Row};
pub use processor::MetarProcessor;
