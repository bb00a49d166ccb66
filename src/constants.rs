//! Application constants for METAR processor
//!
//! This module contains default paths, delimiters, status values and the
//! decoding constants used throughout the METAR processor application.

// =============================================================================
// Files and Delimiters
// =============================================================================

/// Delimiter separating the timestamp from the report in input files
pub const DEFAULT_INPUT_DELIMITER: char = ';';

/// Delimiter used in the exported CSV file
pub const DEFAULT_OUTPUT_DELIMITER: char = ';';

/// Default path of the exported CSV file
pub const DEFAULT_OUTPUT_PATH: &str = "./metar_parsed.csv";

/// Default path of the error log
pub const DEFAULT_ERROR_PATH: &str = "errors.txt";

// =============================================================================
// Row Status and Error Entries
// =============================================================================

/// STATUS value for a report the decoder accepted
pub const STATUS_OK: &str = "OK";

/// STATUS value for a report the decoder rejected
pub const STATUS_ERROR: &str = "Error";

/// Cause recorded for input lines without the input delimiter
pub const MISSING_DATE_FIELD: &str = "Missing date field";

/// Separator between the cause and the offending text in an error entry
pub const ERROR_ENTRY_SEPARATOR: &str = "; ";

// =============================================================================
// Column Names
// =============================================================================

/// Names of every column the row builder may populate
///
/// Only the names listed in [`crate::layout::LAYOUT`] reach the output file.
pub mod columns {
    pub const DATE: &str = "DATE";
    pub const METAR: &str = "METAR";
    pub const STATUS: &str = "STATUS";

    // Wind
    pub const WIND_DIR: &str = "D";
    pub const WIND_SPEED: &str = "F";
    pub const WIND_GUST: &str = "FG";
    pub const WIND_DIR_FROM: &str = "WIND_DIR_FROM";
    pub const WIND_DIR_TO: &str = "WIND_DIR_TO";
    pub const VARIABLE_WIND: &str = "VRB";

    // Visibility
    pub const VISIBILITY: &str = "V1";
    pub const VISIBILITY_DIR: &str = "VD";
    pub const MAX_VISIBILITY: &str = "MAX_VIS";
    pub const MAX_VISIBILITY_DIR: &str = "MAX_VIS_DIR";

    // Runway visual range
    pub const RUNWAY: &str = "RUNWAY";
    pub const RUNWAY_HIGH: &str = "RUNWAY_HIGH";
    pub const RUNWAY_LOW: &str = "RUNWAY_LOW";

    // Phenomena
    pub const WEATHER: &str = "WEATHER";
    pub const RECENT: &str = "RECENT";

    // Sky
    pub const FEW: &str = "FEW";
    pub const SCT: &str = "SCT";
    pub const BKN: &str = "BKN";
    pub const BKN_2: &str = "BKN_2";
    pub const OVC: &str = "OVC";
    pub const VV: &str = "VV";
    pub const TCU: &str = "TCU";
    pub const CB: &str = "CB";
    pub const CLOUD: &str = "CLOUD";

    // Pressure and temperature
    pub const PRESSURE: &str = "Q";
    pub const SEA_LEVEL_PRESSURE: &str = "QNH";
    pub const TEMPERATURE: &str = "T";
    pub const DEW_POINT: &str = "TD";
}

// =============================================================================
// Decoding Constants
// =============================================================================

/// Sky cover code for a broken layer; the only code that may repeat
pub const BROKEN_COVER: &str = "BKN";

/// Cloud types flagged in their own column
pub const CONVECTIVE_CLOUDS: &[&str] = &["TCU", "CB"];

/// Visibility reported as `9999` or `CAVOK`, in metres
pub const UNLIMITED_VISIBILITY_METRES: f64 = 10_000.0;

/// Raw visibility group meaning "10 km or more"
pub const UNLIMITED_VISIBILITY_GROUP: &str = "9999";

/// Sky layer heights are encoded in hundreds of feet
pub const SKY_HEIGHT_FACTOR_FT: f64 = 100.0;

/// Altimeter settings (`Annnn`) are encoded in hundredths of inHg
pub const ALTIMETER_FACTOR: f64 = 100.0;

/// Marker that starts the remarks section of a report
pub const REMARKS_MARKER: &str = "RMK";
