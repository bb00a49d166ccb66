//! METAR report decoding.
//!
//! Decodes one encoded report into a [`DecodedReport`]. The body of the
//! report is consumed left to right by an ordered table of group handlers
//! (see [`groups`]); anything left unconsumed makes the whole report
//! invalid. Remarks after `RMK` are scanned for the sea-level pressure and
//! otherwise ignored.

mod groups;
pub mod quantities;


use crate::constants::REMARKS_MARKER;
use chrono::NaiveTime;
use quantities::Quantity;
use thiserror::Error;
use tracing::trace;

/// Failure to decode a report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Empty report")]
    Empty,

    #[error("Unparsed groups in body '{groups}' while processing '{report}'")]
    UnparsedGroups { groups: String, report: String },

    #[error("Invalid {group} group '{text}' while processing '{report}': {reason}")]
    InvalidGroup {
        group: &'static str,
        text: String,
        reason: String,
        report: String,
    },
}

/// One present or recent weather phenomenon
///
/// Mirrors the five slots of a weather group: intensity or proximity,
/// descriptor, precipitation, obscuration and other phenomena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherGroup {
    pub intensity: Option<String>,
    pub descriptor: Option<String>,
    pub precipitation: Option<String>,
    pub obscuration: Option<String>,
    pub other: Option<String>,
}

impl WeatherGroup {
    /// The five slots concatenated without separator, absent slots empty
    pub fn concatenated(&self) -> String {
        [
            &self.intensity,
            &self.descriptor,
            &self.precipitation,
            &self.obscuration,
            &self.other,
        ]
        .into_iter()
        .filter_map(|slot| slot.as_deref())
        .collect()
    }
}

/// A cloud layer: cover code, base height and convective cloud type
#[derive(Debug, Clone, PartialEq)]
pub struct SkyLayer {
    pub cover: String,
    pub height: Option<Quantity>,
    pub cloud: Option<String>,
}

/// Runway visual range for one runway
#[derive(Debug, Clone, PartialEq)]
pub struct RunwayVisualRange {
    pub name: String,
    pub low: Quantity,
    pub high: Quantity,
}

/// Structured content of one report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedReport {
    /// The report text as decoded, trailing whitespace removed
    pub code: String,
    pub report_type: Option<String>,
    pub station_id: Option<String>,
    pub day: Option<u32>,
    pub time: Option<NaiveTime>,
    pub modifier: Option<String>,

    pub wind_dir: Option<Quantity>,
    pub wind_speed: Option<Quantity>,
    pub wind_gust: Option<Quantity>,
    pub variable_wind: bool,
    pub wind_dir_from: Option<Quantity>,
    pub wind_dir_to: Option<Quantity>,

    pub vis: Option<Quantity>,
    pub vis_dir: Option<Quantity>,
    pub max_vis: Option<Quantity>,
    pub max_vis_dir: Option<Quantity>,

    pub runway: Vec<RunwayVisualRange>,
    pub weather: Vec<WeatherGroup>,
    pub recent: Vec<WeatherGroup>,
    pub sky: Vec<SkyLayer>,

    pub temp: Option<Quantity>,
    pub dewpt: Option<Quantity>,
    pub press: Option<Quantity>,
    pub press_sea_level: Option<Quantity>,
}

/// Decode one encoded report
pub fn decode(report: &str) -> Result<DecodedReport, DecodeError> {
    let code = report.trim_end();
    if code.trim_start().is_empty() {
        return Err(DecodeError::Empty);
    }

    let tokens: Vec<&str> = code.trim_end_matches('=').split_whitespace().collect();
    let (body_tokens, remark_tokens) = match tokens.iter().position(|t| *t == REMARKS_MARKER) {
        Some(pos) => (&tokens[..pos], &tokens[pos + 1..]),
        None => (&tokens[..], &[][..]),
    };

    let mut decoded = DecodedReport {
        code: code.to_string(),
        ..Default::default()
    };

    // Handlers expect every group to be followed by whitespace
    let body = format!("{} ", body_tokens.join(" "));
    let mut rest = body.as_str();

    for handler in groups::BODY_GROUPS.iter() {
        while let Some(captures) = handler.pattern.captures(rest) {
            let matched = captures.get(0).map_or("", |m| m.as_str());
            if matched.trim().is_empty() {
                break;
            }

            (handler.apply)(&captures, &mut decoded).map_err(|reason| {
                DecodeError::InvalidGroup {
                    group: handler.name,
                    text: matched.trim().to_string(),
                    reason,
                    report: code.to_string(),
                }
            })?;
            trace!("Decoded {} group '{}'", handler.name, matched.trim());

            rest = &rest[matched.len()..];
            if !handler.repeatable || rest.is_empty() {
                break;
            }
        }
    }

    if !rest.trim().is_empty() {
        return Err(DecodeError::UnparsedGroups {
            groups: rest.trim().to_string(),
            report: code.to_string(),
        });
    }

    groups::apply_remarks(&remark_tokens.join(" "), &mut decoded);
    trace!(
        "Decoded wind {}, visibility {}, pressure {}",
        describe(decoded.wind_speed),
        describe(decoded.vis),
        describe(decoded.press)
    );

    Ok(decoded)
}

fn describe(quantity: Option<Quantity>) -> String {
    quantity.map_or_else(|| "-".to_string(), |q| q.to_string())
}
