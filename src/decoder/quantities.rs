//! Measured quantities carried by a decoded report.
//!
//! Every numeric field of a report keeps its magnitude in the unit it was
//! reported in. No unit conversion happens here.

use std::fmt;

/// Units a report can express a quantity in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Knots,
    MetresPerSecond,
    KilometresPerHour,
    Metres,
    Kilometres,
    Feet,
    StatuteMiles,
    Degrees,
    Celsius,
    Hectopascals,
    InchesOfMercury,
}

impl Unit {
    /// Short symbol used when displaying a quantity
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Knots => "KT",
            Unit::MetresPerSecond => "MPS",
            Unit::KilometresPerHour => "KMH",
            Unit::Metres => "M",
            Unit::Kilometres => "KM",
            Unit::Feet => "FT",
            Unit::StatuteMiles => "SM",
            Unit::Degrees => "deg",
            Unit::Celsius => "C",
            Unit::Hectopascals => "hPa",
            Unit::InchesOfMercury => "inHg",
        }
    }

    /// Parse the unit suffix of a wind group
    pub fn from_wind_code(code: &str) -> Option<Self> {
        match code {
            "KT" | "KTS" => Some(Unit::Knots),
            "MPS" => Some(Unit::MetresPerSecond),
            "KMH" => Some(Unit::KilometresPerHour),
            _ => None,
        }
    }
}

/// Qualifier for values reported as "less than" (`M`) or "more than" (`P`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    LessThan,
    GreaterThan,
}

impl Bound {
    fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'M' => Some(Bound::LessThan),
            'P' => Some(Bound::GreaterThan),
            _ => None,
        }
    }
}

/// A magnitude with its reporting unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Unit,
    bound: Option<Bound>,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self {
            value,
            unit,
            bound: None,
        }
    }

    pub fn bounded(value: f64, unit: Unit, bound: Option<Bound>) -> Self {
        Self { value, unit, bound }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn bound(&self) -> Option<Bound> {
        self.bound
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bound() {
            Some(Bound::LessThan) => write!(f, "<")?,
            Some(Bound::GreaterThan) => write!(f, ">")?,
            None => {}
        }
        write!(f, "{} {}", self.value(), self.unit().symbol())
    }
}

/// Degrees for a 16-point compass direction
pub fn compass_degrees(point: &str) -> Option<f64> {
    let degrees = match point {
        "N" => 0.0,
        "NNE" => 22.5,
        "NE" => 45.0,
        "ENE" => 67.5,
        "E" => 90.0,
        "ESE" => 112.5,
        "SE" => 135.0,
        "SSE" => 157.5,
        "S" => 180.0,
        "SSW" => 202.5,
        "SW" => 225.0,
        "WSW" => 247.5,
        "W" => 270.0,
        "WNW" => 292.5,
        "NW" => 315.0,
        "NNW" => 337.5,
        _ => return None,
    };
    Some(degrees)
}

/// Parse a distance token such as `0800`, `M1/4`, `P6` or `1 1/2`
pub fn parse_distance(text: &str) -> Option<(f64, Option<Bound>)> {
    let text = text.trim();
    let mut chars = text.chars();
    let (bound, digits) = match chars.next().and_then(Bound::from_prefix) {
        Some(bound) => (Some(bound), chars.as_str()),
        None => (None, text),
    };

    let mut total = 0.0;
    for part in digits.split_whitespace() {
        total += match part.split_once('/') {
            Some((numerator, denominator)) => {
                let numerator: f64 = numerator.parse().ok()?;
                let denominator: f64 = denominator.parse().ok()?;
                if denominator == 0.0 {
                    return None;
                }
                numerator / denominator
            }
            None => part.parse::<f64>().ok()?,
        };
    }

    if digits.trim().is_empty() {
        return None;
    }
    Some((total, bound))
}

/// Parse a temperature token; `M` marks values below zero
pub fn parse_temperature(text: &str) -> Option<f64> {
    let (sign, digits) = match text.strip_prefix('M').or_else(|| text.strip_prefix('-')) {
        Some(rest) => (-1.0, rest),
        None => (1.0, text),
    };
    digits.parse::<f64>().ok().map(|value| sign * value)
}
