//! The measured attributes shown on the map.
//!
//! Every SenseBox reading and every reference point carries one numeric field
//! per [`Attribute`]. The field name, the display unit and the color ramp are
//! all resolved from the enum, so there is no string-keyed lookup that can miss.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (threshold, color) pair marking where a color band begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorRampStop {
    pub value: f64,
    pub color: &'static str,
}

const fn stop(value: f64, color: &'static str) -> ColorRampStop {
    ColorRampStop { value, color }
}

const TEMPERATURE_RAMP: &[ColorRampStop] = &[
    stop(22.0, "#ffffcc"),
    stop(24.0, "#fed976"),
    stop(26.0, "#fd8d3c"),
    stop(28.0, "#f03b20"),
    stop(30.0, "#bd0026"),
];

const HUMIDITY_RAMP: &[ColorRampStop] = &[
    stop(35.0, "#deebf7"),
    stop(45.0, "#9ecae1"),
    stop(55.0, "#6baed6"),
    stop(65.0, "#3182bd"),
    stop(75.0, "#08519c"),
];

const PM1_0_RAMP: &[ColorRampStop] = &[
    stop(2.0, "#ffffcc"),
    stop(4.0, "#c2e699"),
    stop(6.0, "#78c679"),
    stop(9.0, "#31a354"),
    stop(12.0, "#006837"),
];

const PM2_5_RAMP: &[ColorRampStop] = &[
    stop(2.0, "#ffffcc"),
    stop(6.0, "#a1dab4"),
    stop(10.0, "#41b6c4"),
    stop(15.0, "#225ea8"),
];

const PM4_0_RAMP: &[ColorRampStop] = &[
    stop(2.0, "#f7fcb9"),
    stop(6.0, "#addd8e"),
    stop(10.0, "#41ab5d"),
    stop(15.0, "#006837"),
];

const PM10_0_RAMP: &[ColorRampStop] = &[
    stop(2.0, "#fee5d9"),
    stop(8.0, "#fcae91"),
    stop(14.0, "#fb6a4a"),
    stop(20.0, "#cb181d"),
];

/// One of the six quantities recorded by the SenseBox Mini.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[allow(non_camel_case_types)]
pub enum Attribute {
    #[default]
    Temperature,
    Humidity,
    PM1_0,
    PM2_5,
    PM4_0,
    PM10_0,
}

impl Attribute {
    /// All attributes in dropdown order.
    pub const ALL: [Attribute; 6] = [
        Attribute::Temperature,
        Attribute::Humidity,
        Attribute::PM1_0,
        Attribute::PM2_5,
        Attribute::PM4_0,
        Attribute::PM10_0,
    ];

    /// Field name in the feature service and the GeoJSON files.
    pub fn field(self) -> &'static str {
        match self {
            Attribute::Temperature => "Temperature",
            Attribute::Humidity => "Humidity",
            Attribute::PM1_0 => "PM1_0",
            Attribute::PM2_5 => "PM2_5",
            Attribute::PM4_0 => "PM4_0",
            Attribute::PM10_0 => "PM10_0",
        }
    }

    /// Human readable label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Temperature => "Temperature",
            Attribute::Humidity => "Humidity",
            Attribute::PM1_0 => "PM1.0",
            Attribute::PM2_5 => "PM2.5",
            Attribute::PM4_0 => "PM4.0",
            Attribute::PM10_0 => "PM10.0",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Attribute::Temperature => "°C",
            Attribute::Humidity => "%",
            Attribute::PM1_0 | Attribute::PM2_5 | Attribute::PM4_0 | Attribute::PM10_0 => "µg/m³",
        }
    }

    /// The color ramp for this attribute, ascending by threshold.
    ///
    /// Both the map renderers and the legend read from here.
    pub fn ramp(self) -> &'static [ColorRampStop] {
        match self {
            Attribute::Temperature => TEMPERATURE_RAMP,
            Attribute::Humidity => HUMIDITY_RAMP,
            Attribute::PM1_0 => PM1_0_RAMP,
            Attribute::PM2_5 => PM2_5_RAMP,
            Attribute::PM4_0 => PM4_0_RAMP,
            Attribute::PM10_0 => PM10_0_RAMP,
        }
    }

    /// Companion field holding the matched reference value.
    pub fn reference_field(self) -> String {
        format!("ref_{}", self.field())
    }

    /// Companion field holding `sensor - reference`.
    pub fn difference_field(self) -> String {
        format!("diff_{}", self.field())
    }

    /// Map a UGZ parameter code (`T`, `Hr`, `PM2.5`, ...) to an attribute.
    pub fn from_reference_parameter(parameter: &str) -> Option<Attribute> {
        match parameter.trim() {
            "T" => Some(Attribute::Temperature),
            "Hr" => Some(Attribute::Humidity),
            "PM1" => Some(Attribute::PM1_0),
            "PM2.5" => Some(Attribute::PM2_5),
            "PM4" => Some(Attribute::PM4_0),
            "PM10" => Some(Attribute::PM10_0),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

impl FromStr for Attribute {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Attribute::ALL
            .into_iter()
            .find(|a| a.field() == trimmed)
            .ok_or_else(|| ParseError::UnknownAttribute(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramps_are_strictly_increasing() {
        for attribute in Attribute::ALL {
            let ramp = attribute.ramp();
            assert!(ramp.len() >= 2, "{} ramp too short", attribute);
            for pair in ramp.windows(2) {
                assert!(pair[0].value < pair[1].value, "{} ramp not ascending", attribute);
            }
        }
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("PM2_5".parse::<Attribute>().unwrap(), Attribute::PM2_5);
        assert_eq!(" Temperature ".parse::<Attribute>().unwrap(), Attribute::Temperature);
        assert!(matches!(
            "PM2.5".parse::<Attribute>(),
            Err(ParseError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn companion_fields() {
        assert_eq!(Attribute::Humidity.reference_field(), "ref_Humidity");
        assert_eq!(Attribute::PM10_0.difference_field(), "diff_PM10_0");
    }

    #[test]
    fn units() {
        assert_eq!(Attribute::Temperature.unit(), "°C");
        assert_eq!(Attribute::Humidity.unit(), "%");
        assert_eq!(Attribute::PM4_0.unit(), "µg/m³");
    }

    #[test]
    fn reference_parameter_codes() {
        assert_eq!(Attribute::from_reference_parameter("T"), Some(Attribute::Temperature));
        assert_eq!(Attribute::from_reference_parameter("PM2.5"), Some(Attribute::PM2_5));
        assert_eq!(Attribute::from_reference_parameter("PM10"), Some(Attribute::PM10_0));
        assert_eq!(Attribute::from_reference_parameter("NO2"), None);
    }

    #[test]
    fn defaults_to_temperature() {
        assert_eq!(Attribute::default(), Attribute::Temperature);
        assert_eq!(Attribute::default(), Attribute::ALL[0]);
    }
}
