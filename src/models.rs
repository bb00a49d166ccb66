//! Core data structures for METAR processing.
//!
//! Defines the typed cell values a row carries, the tagged row produced for
//! every input record, and the processing statistics reported at the end of
//! a run.

use crate::constants::{STATUS_ERROR, STATUS_OK, columns};
use crate::decoder::WeatherGroup;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single column value
///
/// The variant is chosen when the row is built, so serialization never has
/// to guess how a value should be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// A measured magnitude, rendered as an integer
    Number(f64),
    Flag(bool),
    /// Weather phenomena, rendered as space-joined groups
    Phenomena(Vec<WeatherGroup>),
}

impl Cell {
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => format!("{}", value.trunc() as i64),
            Cell::Flag(set) => (if *set { "1" } else { "" }).to_string(),
            Cell::Phenomena(groups) => join_phenomena(groups),
        }
    }
}

/// Concatenate each group's slots and join the groups with single spaces
pub fn join_phenomena(groups: &[WeatherGroup]) -> String {
    groups
        .iter()
        .map(WeatherGroup::concatenated)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One output row per successfully split input line
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// The report was decoded; `cells` holds every populated column
    Decoded {
        date: String,
        metar: String,
        cells: BTreeMap<String, Cell>,
    },
    /// The decoder rejected the report
    Failed { date: String, metar: String },
}

impl Row {
    pub fn date(&self) -> &str {
        match self {
            Row::Decoded { date, .. } | Row::Failed { date, .. } => date,
        }
    }

    pub fn metar(&self) -> &str {
        match self {
            Row::Decoded { metar, .. } | Row::Failed { metar, .. } => metar,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Row::Decoded { .. } => STATUS_OK,
            Row::Failed { .. } => STATUS_ERROR,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Row::Failed { .. })
    }

    /// Value of a column, `None` when the row does not carry it
    pub fn value(&self, column: &str) -> Option<Cell> {
        match column {
            columns::DATE => Some(Cell::Text(self.date().to_string())),
            columns::METAR => Some(Cell::Text(self.metar().to_string())),
            columns::STATUS => Some(Cell::Text(self.status().to_string())),
            _ => match self {
                Row::Decoded { cells, .. } => cells.get(column).cloned(),
                Row::Failed { .. } => None,
            },
        }
    }
}

/// Processing statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct ProcessingStats {
    pub lines_read: usize,
    /// Rows written to the output file, decoded and failed
    pub rows_parsed: usize,
    pub rows_failed: usize,
    /// Entries written to the error file
    pub errors: usize,
    pub output_path: PathBuf,
    pub error_path: PathBuf,
    pub processing_time_ms: u128,
}
