//! Feature records and the sensor vs. reference comparison popup.

use crate::attribute::Attribute;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Shown wherever a value is missing or null.
pub const NOT_AVAILABLE: &str = "n/a";

/// The attributes of one map feature, as returned by a hit test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRecord(Map<String, Value>);

impl FeatureRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a JSON object of attributes.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    /// The raw value of `field`; missing and null both yield `None`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| !v.is_null())
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    /// Display form of `field`, see [`format_value`].
    pub fn display(&self, field: &str) -> Reading {
        match self.get(field) {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() => Reading::Available(format_value(v)),
                _ => Reading::NotAvailable,
            },
            Some(Value::String(s)) => Reading::Available(s.clone()),
            Some(Value::Bool(b)) => Reading::Available(b.to_string()),
            Some(other) => Reading::Available(other.to_string()),
            None => Reading::NotAvailable,
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

/// Round to two decimals and trim trailing zeros, keeping at least one.
///
/// `21` -> `21.0`, `2.5` -> `2.5`, `2.4999999` -> `2.5`, `-0.001` -> `0.0`.
pub fn format_value(value: f64) -> String {
    let mut s = format!("{:.2}", value);
    // avoid "-0.0"
    if s == "-0.00" {
        s.remove(0);
    }
    while s.ends_with('0') && !s.ends_with(".0") {
        s.pop();
    }
    s
}

/// One line of the popup: a value or the "not available" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Reading {
    Available(String),
    NotAvailable,
}

impl Reading {
    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Available(_))
    }

    /// Value followed by the unit, e.g. `21.0 °C` or `n/a °C`.
    pub fn with_unit(&self, unit: &str) -> String {
        format!("{} {}", self, unit).trim_end().to_string()
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Available(v) => f.write_str(v),
            Reading::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Sensor value, matched reference value and their difference for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPopup {
    pub attribute: Attribute,
    pub unit: &'static str,
    pub sensor: Reading,
    pub reference: Reading,
    pub difference: Reading,
}

impl ComparisonPopup {
    pub fn from_record(record: &FeatureRecord, attribute: Attribute) -> Self {
        Self {
            attribute,
            unit: attribute.unit(),
            sensor: record.display(attribute.field()),
            reference: record.display(&attribute.reference_field()),
            difference: record.display(&attribute.difference_field()),
        }
    }

    pub fn title(&self) -> String {
        format!("{} comparison", self.attribute.field())
    }

    pub fn sensor_line(&self) -> String {
        self.sensor.with_unit(self.unit)
    }

    pub fn reference_line(&self) -> String {
        self.reference.with_unit(self.unit)
    }

    pub fn difference_line(&self) -> String {
        self.difference.with_unit(self.unit)
    }
}

/// A WGS84 map location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub longitude: f64,
    pub latitude: f64,
}

/// What the popup overlay currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupContent {
    /// Greeting shown until the first click.
    #[default]
    Welcome,
    Comparison(ComparisonPopup),
    Hidden,
}

impl PopupContent {
    pub fn is_visible(&self) -> bool {
        !matches!(self, PopupContent::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_comparison() {
        let record = FeatureRecord::default()
            .with("Temperature", 23.5)
            .with("ref_Temperature", 21.0)
            .with("diff_Temperature", 2.5);
        let popup = ComparisonPopup::from_record(&record, Attribute::Temperature);
        assert_eq!(popup.title(), "Temperature comparison");
        assert_eq!(popup.sensor_line(), "23.5 °C");
        assert_eq!(popup.reference_line(), "21.0 °C");
        assert_eq!(popup.difference_line(), "2.5 °C");
    }

    #[test]
    fn missing_reference_is_not_available() {
        let record = FeatureRecord::default()
            .with("Humidity", 48.2)
            .with("diff_Humidity", Value::Null);
        let popup = ComparisonPopup::from_record(&record, Attribute::Humidity);
        assert_eq!(popup.sensor_line(), "48.2 %");
        assert_eq!(popup.reference, Reading::NotAvailable);
        assert_eq!(popup.reference_line(), "n/a %");
        assert_eq!(popup.difference, Reading::NotAvailable);
    }

    #[test]
    fn null_and_missing_are_the_same() {
        let record = FeatureRecord::default().with("PM2_5", Value::Null);
        assert_eq!(record.display("PM2_5"), record.display("PM10_0"));
        assert_eq!(record.number("PM2_5"), None);
    }

    #[test]
    fn strings_are_shown_verbatim() {
        let record = FeatureRecord::default().with("PM1_0", "3,4");
        assert_eq!(record.display("PM1_0"), Reading::Available("3,4".to_string()));
    }

    #[test]
    fn formats_numbers() {
        assert_eq!(format_value(21.0), "21.0");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(2.4999999), "2.5");
        assert_eq!(format_value(-1.234), "-1.23");
        assert_eq!(format_value(-0.001), "0.0");
        assert_eq!(format_value(10.10), "10.1");
    }

    #[test]
    fn formats_large_readings_without_overflow() {
        let s = format_value(1e307);
        assert!(s.ends_with(".0"));
        assert_eq!(s.parse::<f64>().unwrap(), 1e307);
        assert!(!format_value(f64::MAX).contains("inf"));
    }

    #[test]
    fn parses_hit_test_attributes() {
        let record = FeatureRecord::from_json(
            r#"{"OBJECTID": 7, "PM2_5": 4.25, "ref_PM2_5": 6.1, "diff_PM2_5": -1.85}"#,
        )
        .unwrap();
        let popup = ComparisonPopup::from_record(&record, Attribute::PM2_5);
        assert_eq!(popup.sensor_line(), "4.25 µg/m³");
        assert_eq!(popup.difference_line(), "-1.85 µg/m³");
        assert_eq!(record.number("OBJECTID"), Some(7.0));
    }
}
