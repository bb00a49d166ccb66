//! Output column layout.
//!
//! [`LAYOUT`] is the only source of the header text and the column order.
//! Rows may carry further columns (temperature, dew point, sea-level
//! pressure, the first cloud type, uncommon cover codes); those are not
//! listed here and never reach the output file.

use crate::constants::columns;
use crate::models::{Cell, Row, join_phenomena};

/// Formatting rule applied to a column's cell instead of [`Cell::render`]
pub type Transform = fn(&Cell) -> String;

/// One output column
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub transform: Option<Transform>,
}

const fn column(name: &'static str) -> Column {
    Column {
        name,
        transform: None,
    }
}

const fn transformed(name: &'static str, transform: Transform) -> Column {
    Column {
        name,
        transform: Some(transform),
    }
}

pub static LAYOUT: [Column; 27] = [
    column(columns::DATE),
    transformed(columns::METAR, trim_trailing),
    column(columns::STATUS),
    column(columns::WIND_DIR),
    column(columns::WIND_SPEED),
    column(columns::WIND_GUST),
    column(columns::WIND_DIR_FROM),
    column(columns::WIND_DIR_TO),
    transformed(columns::VARIABLE_WIND, flag_marker),
    column(columns::VISIBILITY),
    column(columns::VISIBILITY_DIR),
    column(columns::MAX_VISIBILITY),
    column(columns::MAX_VISIBILITY_DIR),
    column(columns::RUNWAY),
    column(columns::RUNWAY_HIGH),
    column(columns::RUNWAY_LOW),
    transformed(columns::WEATHER, phenomena),
    column(columns::FEW),
    column(columns::SCT),
    column(columns::BKN),
    column(columns::BKN_2),
    column(columns::OVC),
    column(columns::VV),
    column(columns::PRESSURE),
    transformed(columns::RECENT, phenomena),
    column(columns::TCU),
    column(columns::CB),
];

/// Header fields in output order
pub fn header() -> Vec<&'static str> {
    LAYOUT.iter().map(|c| c.name).collect()
}

/// Render one row into output fields, absent columns as empty strings
pub fn render_row(row: &Row) -> Vec<String> {
    LAYOUT
        .iter()
        .map(|column| match row.value(column.name) {
            Some(cell) => match column.transform {
                Some(transform) => transform(&cell),
                None => cell.render(),
            },
            None => String::new(),
        })
        .collect()
}

fn trim_trailing(cell: &Cell) -> String {
    cell.render().trim_end().to_string()
}

/// `1` for any non-empty value, otherwise empty
fn flag_marker(cell: &Cell) -> String {
    let set = match cell {
        Cell::Flag(set) => *set,
        Cell::Text(text) => !text.is_empty(),
        Cell::Number(value) => *value != 0.0,
        Cell::Phenomena(groups) => !groups.is_empty(),
    };
    if set { "1".to_string() } else { String::new() }
}

fn phenomena(cell: &Cell) -> String {
    match cell {
        Cell::Phenomena(groups) => join_phenomena(groups),
        other => other.render(),
    }
}
