//! Group handlers for the report body.
//!
//! Each handler pairs an anchored pattern with a function that stores the
//! captured values on the report. Handlers are tried in reporting order;
//! repeatable handlers keep consuming while their pattern matches.

use super::quantities::{Bound, Quantity, Unit, compass_degrees, parse_distance, parse_temperature};
use super::{DecodedReport, RunwayVisualRange, SkyLayer, WeatherGroup};
use crate::constants::{
    ALTIMETER_FACTOR, SKY_HEIGHT_FACTOR_FT, UNLIMITED_VISIBILITY_GROUP,
    UNLIMITED_VISIBILITY_METRES,
};
use chrono::NaiveTime;
use regex::{Captures, Regex};
use std::sync::LazyLock;

type Apply = fn(&Captures<'_>, &mut DecodedReport) -> Result<(), String>;

pub(super) struct GroupHandler {
    pub name: &'static str,
    pub pattern: Regex,
    pub repeatable: bool,
    pub apply: Apply,
}

fn handler(name: &'static str, pattern: &str, repeatable: bool, apply: Apply) -> GroupHandler {
    GroupHandler {
        name,
        pattern: Regex::new(pattern).expect("built-in group pattern is valid"),
        repeatable,
        apply,
    }
}

pub(super) static BODY_GROUPS: LazyLock<Vec<GroupHandler>> = LazyLock::new(|| {
    vec![
        handler("type", r"^(?P<type>METAR|SPECI)\s+", false, apply_type),
        handler("station", r"^(?P<station>[A-Z][A-Z0-9]{3})\s+", false, apply_station),
        handler(
            "time",
            r"^(?P<day>\d{2})(?P<hour>\d{2})(?P<min>\d{2})Z\s+",
            false,
            apply_time,
        ),
        handler(
            "modifier",
            r"^(?P<mod>AUTO|FINO|NIL|TEST|CORR?|RTD|AMD|CC[A-G])\s+",
            true,
            apply_modifier,
        ),
        handler(
            "wind",
            r"^(?P<dir>\d{3}|VRB|///)(?P<speed>P?\d{2,3}|//)(?:G(?P<gust>P?\d{2,3}))?(?P<units>KTS?|MPS|KMH)\s+",
            false,
            apply_wind,
        ),
        handler(
            "wind variation",
            r"^(?P<from>\d{3})V(?P<to>\d{3})\s+",
            false,
            apply_wind_variation,
        ),
        handler(
            "visibility",
            r"^(?:(?P<dist>[MP]?\d{4})(?P<dir>[NSEW][EW]?|NDV)?|(?P<distu>[MP]?(?:\d+\s+\d/\d|\d{1,2}/\d{1,2}|\d+))(?P<units>SM|KM)|(?P<cavok>CAVOK))\s+",
            true,
            apply_visibility,
        ),
        handler(
            "runway",
            r"^R(?P<name>\d{2}[RLC]?)/(?P<low>[MP]?\d{4}|/{4,6})(?:V(?P<high>[MP]?\d{4}))?(?P<unit>FT)?(?:/?(?P<trend>[UDN]))?\s+",
            true,
            apply_runway,
        ),
        handler(
            "weather",
            r"^(?P<int>(?:-|\+|VC)*)(?P<desc>(?:MI|PR|BC|DR|BL|SH|TS|FZ)+)?(?P<prec>(?:DZ|RA|SN|SG|IC|PL|GR|GS|UP|/)*)(?P<obsc>BR|FG|FU|VA|DU|SA|HZ|PY)?(?P<other>PO|SQ|FC|SS|DS|NSW|/+)?\s+",
            true,
            apply_weather,
        ),
        handler(
            "sky",
            r"^(?P<cover>VV|CLR|SKC|NSC|NCD|BKN|SCT|FEW|OVC|///)(?P<height>\d{3}|///)?(?P<cloud>[A-Z]{2,}|///)?\s+",
            true,
            apply_sky,
        ),
        handler(
            "temperature",
            r"^(?P<temp>M?\d{1,2}|//|XX|MM)/(?P<dewpt>M?\d{1,2}|//|XX|MM)?\s+",
            false,
            apply_temperature,
        ),
        handler(
            "pressure",
            r"^(?P<unit>[AQ])(?P<press>\d{4}|////)\s+",
            true,
            apply_pressure,
        ),
        handler(
            "recent weather",
            r"^RE(?P<desc>MI|PR|BC|DR|BL|SH|TS|FZ)?(?P<prec>(?:DZ|RA|SN|SG|IC|PL|GR|GS|UP|/)*)(?P<obsc>BR|FG|FU|VA|DU|SA|HZ|PY)?(?P<other>PO|SQ|FC|SS|DS|/+)?\s+",
            true,
            apply_recent,
        ),
        handler(
            "wind shear",
            r"^WS\s+(?:ALL\s+RWY|R(?:WY)?\d{2}[RLC]?)\s+",
            true,
            ignore,
        ),
        handler(
            "trend",
            r"(?s)^(?:NOSIG|BECMG|TEMPO|FCST)\b.*",
            false,
            ignore,
        ),
    ]
});

static SEA_LEVEL_PRESSURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bSLP(?P<slp>\d{3})\b").expect("built-in remark pattern is valid")
});

/// Scan the remarks for the sea-level pressure (`SLPnnn`, tenths of hPa)
pub(super) fn apply_remarks(remarks: &str, report: &mut DecodedReport) {
    let Some(slp) = SEA_LEVEL_PRESSURE
        .captures(remarks)
        .and_then(|c| c.name("slp"))
        .and_then(|m| m.as_str().parse::<f64>().ok())
    else {
        return;
    };

    let base = if slp < 500.0 { 1000.0 } else { 900.0 };
    report.press_sea_level = Some(Quantity::new(base + slp / 10.0, Unit::Hectopascals));
}

fn text<'a>(captures: &'a Captures<'_>, name: &str) -> Option<&'a str> {
    captures
        .name(name)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

fn number(captures: &Captures<'_>, name: &str) -> Result<Option<u32>, String> {
    text(captures, name)
        .map(|s| s.parse::<u32>().map_err(|e| format!("{}: {}", name, e)))
        .transpose()
}

fn ignore(_: &Captures<'_>, _: &mut DecodedReport) -> Result<(), String> {
    Ok(())
}

fn apply_type(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    report.report_type = text(captures, "type").map(str::to_string);
    Ok(())
}

fn apply_station(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    report.station_id = text(captures, "station").map(str::to_string);
    Ok(())
}

fn apply_time(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    let day = number(captures, "day")?.unwrap_or_default();
    let hour = number(captures, "hour")?.unwrap_or_default();
    let minute = number(captures, "min")?.unwrap_or_default();

    if !(1..=31).contains(&day) {
        return Err(format!("day {} out of range", day));
    }
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("time {:02}:{:02} out of range", hour, minute))?;

    report.day = Some(day);
    report.time = Some(time);
    Ok(())
}

fn apply_modifier(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    if let Some(modifier) = text(captures, "mod") {
        report.modifier = Some(match report.modifier.take() {
            Some(existing) => format!("{} {}", existing, modifier),
            None => modifier.to_string(),
        });
    }
    Ok(())
}

fn apply_wind(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    let units = text(captures, "units")
        .and_then(Unit::from_wind_code)
        .ok_or("missing wind units")?;

    match text(captures, "dir") {
        Some("VRB") => report.variable_wind = true,
        Some("///") | None => {}
        Some(dir) => {
            let degrees: f64 = dir.parse().map_err(|e| format!("direction: {}", e))?;
            report.wind_dir = Some(Quantity::new(degrees, Unit::Degrees));
        }
    }

    if let Some((speed, bound)) = text(captures, "speed").and_then(parse_distance) {
        report.wind_speed = Some(Quantity::bounded(speed, units, bound));
    }
    if let Some((gust, bound)) = text(captures, "gust").and_then(parse_distance) {
        report.wind_gust = Some(Quantity::bounded(gust, units, bound));
    }
    Ok(())
}

fn apply_wind_variation(
    captures: &Captures<'_>,
    report: &mut DecodedReport,
) -> Result<(), String> {
    let from = number(captures, "from")?.ok_or("missing lower direction")?;
    let to = number(captures, "to")?.ok_or("missing upper direction")?;
    report.wind_dir_from = Some(Quantity::new(from as f64, Unit::Degrees));
    report.wind_dir_to = Some(Quantity::new(to as f64, Unit::Degrees));
    Ok(())
}

fn apply_visibility(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    let mut direction = None;

    let distance = if let Some(dist) = text(captures, "dist") {
        direction = text(captures, "dir")
            .filter(|d| *d != "NDV")
            .and_then(compass_degrees)
            .map(|degrees| Quantity::new(degrees, Unit::Degrees));

        if dist == UNLIMITED_VISIBILITY_GROUP {
            Quantity::bounded(
                UNLIMITED_VISIBILITY_METRES,
                Unit::Metres,
                Some(Bound::GreaterThan),
            )
        } else {
            let (value, bound) = parse_distance(dist).ok_or("unreadable distance")?;
            Quantity::bounded(value, Unit::Metres, bound)
        }
    } else if let Some(dist) = text(captures, "distu") {
        let unit = match text(captures, "units") {
            Some("KM") => Unit::Kilometres,
            _ => Unit::StatuteMiles,
        };
        let (value, bound) = parse_distance(dist).ok_or("unreadable distance")?;
        Quantity::bounded(value, unit, bound)
    } else {
        Quantity::new(UNLIMITED_VISIBILITY_METRES, Unit::Metres)
    };

    // A second visibility group reports the maximum in one direction
    if report.vis.is_some() {
        report.max_vis = Some(distance);
        report.max_vis_dir = direction;
    } else {
        report.vis = Some(distance);
        report.vis_dir = direction;
    }
    Ok(())
}

fn apply_runway(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    let name = text(captures, "name").ok_or("missing runway designator")?;
    // Automatic stations report a missing range as slashes
    if text(captures, "low").is_some_and(|low| low.starts_with('/')) {
        return Ok(());
    }
    let unit = match text(captures, "unit") {
        Some("FT") => Unit::Feet,
        _ => Unit::Metres,
    };

    let (low, low_bound) = text(captures, "low")
        .and_then(parse_distance)
        .ok_or("unreadable visual range")?;
    let low = Quantity::bounded(low, unit, low_bound);
    let high = match text(captures, "high").and_then(parse_distance) {
        Some((high, high_bound)) => Quantity::bounded(high, unit, high_bound),
        None => low,
    };

    report.runway.push(RunwayVisualRange {
        name: name.to_string(),
        low,
        high,
    });
    Ok(())
}

fn weather_group(captures: &Captures<'_>) -> WeatherGroup {
    let slot = |name: &str| text(captures, name).map(str::to_string);
    WeatherGroup {
        intensity: slot("int"),
        descriptor: slot("desc"),
        precipitation: slot("prec"),
        obscuration: slot("obsc"),
        other: slot("other"),
    }
}

fn apply_weather(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    report.weather.push(weather_group(captures));
    Ok(())
}

fn apply_recent(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    report.recent.push(weather_group(captures));
    Ok(())
}

fn apply_sky(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    let cover = text(captures, "cover").ok_or("missing cover")?;
    let height = match text(captures, "height") {
        Some("///") | None => None,
        Some(height) => {
            let hundreds: f64 = height.parse().map_err(|e| format!("height: {}", e))?;
            Some(Quantity::new(hundreds * SKY_HEIGHT_FACTOR_FT, Unit::Feet))
        }
    };

    report.sky.push(SkyLayer {
        cover: cover.to_string(),
        height,
        cloud: text(captures, "cloud").map(str::to_string),
    });
    Ok(())
}

fn apply_temperature(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    report.temp = text(captures, "temp")
        .and_then(parse_temperature)
        .map(|t| Quantity::new(t, Unit::Celsius));
    report.dewpt = text(captures, "dewpt")
        .and_then(parse_temperature)
        .map(|t| Quantity::new(t, Unit::Celsius));
    Ok(())
}

fn apply_pressure(captures: &Captures<'_>, report: &mut DecodedReport) -> Result<(), String> {
    // Reports carrying both QNH and altimeter keep the first one
    if report.press.is_some() {
        return Ok(());
    }

    let Some(raw) = text(captures, "press").and_then(|p| p.parse::<f64>().ok()) else {
        return Ok(());
    };
    report.press = Some(match text(captures, "unit") {
        Some("A") => Quantity::new(raw / ALTIMETER_FACTOR, Unit::InchesOfMercury),
        _ => Quantity::new(raw, Unit::Hectopascals),
    });
    Ok(())
}
