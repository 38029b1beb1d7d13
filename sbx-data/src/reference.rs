//! UGZ hourly reference measurements.
//!
//! The City of Zurich publishes meteo (`ugz_ogd_meteo_h1_<year>.csv`) and air
//! quality (`ugz_ogd_air_h1_<year>.csv`) data in the same long format, one
//! value per row:
//!
//! ```text
//! Datum,Standort,Parameter,Intervall,Einheit,Wert,Status
//! 2025-05-02T10:00+0100,Zch_Stampfenbachstrasse,T,h1,°C,17.21,bereinigt
//! ```
//!
//! Rows whose `Wert` is empty or non-numeric are skipped, as are parameters
//! that do not map to an [`Attribute`].

use crate::stations::Station;
use anyhow::Context;
use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use sbx_core::Attribute;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Reference points shown on the map are taken from this hour of the day.
pub const DEFAULT_HOUR: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub station: String,
    pub attribute: Attribute,
    /// Local time as published (the offset is kept).
    pub timestamp: DateTime<FixedOffset>,
    pub value: f64,
}

#[derive(Deserialize)]
struct UgzRow {
    #[serde(rename = "Datum")]
    datum: String,
    #[serde(rename = "Standort")]
    standort: String,
    #[serde(rename = "Parameter")]
    parameter: String,
    #[serde(rename = "Wert", default)]
    wert: Option<String>,
}

fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%z"))
        .ok()
}

/// Parse one UGZ long-format CSV.
pub fn load_measurements(csv_data: &str) -> anyhow::Result<Vec<Measurement>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let mut measurements = Vec::new();
    let mut skipped = 0u32;
    for (line, result) in rdr.deserialize::<UgzRow>().enumerate() {
        let row = result.with_context(|| format!("Malformed reference row {}", line + 2))?;

        let Some(attribute) = Attribute::from_reference_parameter(&row.parameter) else {
            continue;
        };
        let value = row.wert.as_deref().and_then(|w| w.trim().parse::<f64>().ok());
        let timestamp = parse_timestamp(&row.datum);
        match (value, timestamp) {
            (Some(value), Some(timestamp)) if !row.standort.trim().is_empty() => {
                measurements.push(Measurement {
                    station: row.standort.trim().to_string(),
                    attribute,
                    timestamp,
                    value,
                });
            }
            _ => skipped += 1,
        }
    }
    log::info!(
        "Loaded {} reference measurements, skipped {} incomplete rows",
        measurements.len(),
        skipped
    );
    Ok(measurements)
}

/// Mean value per attribute for one station and hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyMean {
    pub station: String,
    pub hour: u32,
    pub values: BTreeMap<Attribute, f64>,
}

/// Average all measurements of `date` by station, attribute and hour.
///
/// Sorted by station, then hour.
pub fn hourly_means(measurements: &[Measurement], date: NaiveDate) -> Vec<HourlyMean> {
    let mut sums: BTreeMap<(String, u32), BTreeMap<Attribute, (f64, u32)>> = BTreeMap::new();
    for m in measurements.iter().filter(|m| m.timestamp.date_naive() == date) {
        let entry = sums
            .entry((m.station.clone(), m.timestamp.hour()))
            .or_default()
            .entry(m.attribute)
            .or_insert((0.0, 0));
        entry.0 += m.value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|((station, hour), per_attribute)| HourlyMean {
            station,
            hour,
            values: per_attribute
                .into_iter()
                .map(|(attribute, (sum, count))| (attribute, sum / count as f64))
                .collect(),
        })
        .collect()
}

/// A located reference reading for one station and hour.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePoint {
    pub station: String,
    pub hour: u32,
    pub longitude: f64,
    pub latitude: f64,
    pub values: BTreeMap<Attribute, f64>,
}

impl ReferencePoint {
    pub fn value(&self, attribute: Attribute) -> Option<f64> {
        self.values.get(&attribute).copied()
    }
}

/// Attach station coordinates to the hourly means, keeping only `hour` when given.
///
/// Means for stations without metadata or coordinates are dropped.
pub fn reference_points(
    means: &[HourlyMean],
    stations: &[Station],
    hour: Option<u32>,
) -> Vec<ReferencePoint> {
    let positions: HashMap<&str, (f64, f64)> = stations
        .iter()
        .filter_map(|s| s.position().map(|p| (s.id.as_str(), p)))
        .collect();

    means
        .iter()
        .filter(|m| hour.map_or(true, |h| m.hour == h))
        .filter_map(|m| match positions.get(m.station.as_str()) {
            Some(&(longitude, latitude)) => Some(ReferencePoint {
                station: m.station.clone(),
                hour: m.hour,
                longitude,
                latitude,
                values: m.values.clone(),
            }),
            None => {
                log::warn!("No coordinates for reference station {}", m.station);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const METEO_CSV: &str = "\
Datum,Standort,Parameter,Intervall,Einheit,Wert,Status
2025-05-02T10:00+0100,Zch_Stampfenbachstrasse,T,h1,°C,17.0,bereinigt
2025-05-02T10:00+0100,Zch_Stampfenbachstrasse,Hr,h1,%Hr,60.5,bereinigt
2025-05-02T10:00+0100,Zch_Stampfenbachstrasse,p,h1,hPa,965.1,bereinigt
2025-05-02T11:00+0100,Zch_Stampfenbachstrasse,T,h1,°C,18.0,bereinigt
2025-05-02T10:00+0100,Zch_Schimmelstrasse,T,h1,°C,,bereinigt
2025-05-01T10:00+0100,Zch_Schimmelstrasse,T,h1,°C,12.0,bereinigt
";

    const AIR_CSV: &str = "\
Datum,Standort,Parameter,Intervall,Einheit,Wert,Status
2025-05-02T10:00+0100,Zch_Stampfenbachstrasse,PM2.5,h1,µg/m3,6.0,provisorisch
2025-05-02T10:00+0100,Zch_Stampfenbachstrasse,PM2.5,h1,µg/m3,8.0,provisorisch
2025-05-02T10:00+0100,Zch_Stampfenbachstrasse,PM10,h1,µg/m3,12.5,provisorisch
2025-05-02T10:00+0100,Zch_Schimmelstrasse,PM10,h1,µg/m3,15.0,provisorisch
";

    fn may_2nd() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()
    }

    fn stations() -> Vec<Station> {
        vec![
            Station {
                id: "Zch_Stampfenbachstrasse".to_string(),
                name: None,
                latitude: Some(47.3868),
                longitude: Some(8.5398),
            },
            Station {
                id: "Zch_Schimmelstrasse".to_string(),
                name: None,
                latitude: Some(47.3714),
                longitude: Some(8.5232),
            },
        ]
    }

    fn all_measurements() -> Vec<Measurement> {
        let mut all = load_measurements(METEO_CSV).unwrap();
        all.extend(load_measurements(AIR_CSV).unwrap());
        all
    }

    #[test]
    fn skips_unknown_parameters_and_empty_values() {
        let meteo = load_measurements(METEO_CSV).unwrap();
        // p is not an attribute, one T value is empty
        assert_eq!(meteo.len(), 4);
        assert!(meteo.iter().all(|m| m.station.starts_with("Zch_")));
        assert_eq!(meteo[0].timestamp.hour(), 10);
    }

    #[test]
    fn accepts_rfc3339_timestamps() {
        let csv = "Datum,Standort,Parameter,Wert\n2025-05-02T10:00:00+01:00,Zch_Rosengartenstrasse,T,16.5\n";
        let parsed = load_measurements(csv).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].timestamp.hour(), 10);
    }

    #[test]
    fn averages_per_station_and_hour() {
        let means = hourly_means(&all_measurements(), may_2nd());
        let stampfenbach_10 = means
            .iter()
            .find(|m| m.station == "Zch_Stampfenbachstrasse" && m.hour == 10)
            .unwrap();
        assert_eq!(stampfenbach_10.values[&Attribute::Temperature], 17.0);
        assert_eq!(stampfenbach_10.values[&Attribute::Humidity], 60.5);
        assert_eq!(stampfenbach_10.values[&Attribute::PM2_5], 7.0);
        assert_eq!(stampfenbach_10.values[&Attribute::PM10_0], 12.5);
        // the May 1st value is outside the date
        let schimmel = means
            .iter()
            .find(|m| m.station == "Zch_Schimmelstrasse")
            .unwrap();
        assert!(!schimmel.values.contains_key(&Attribute::Temperature));
        assert_eq!(means.len(), 3);
    }

    #[test]
    fn filters_reference_points_by_hour() {
        let means = hourly_means(&all_measurements(), may_2nd());
        let at_ten = reference_points(&means, &stations(), Some(DEFAULT_HOUR));
        assert_eq!(at_ten.len(), 2);
        assert!(at_ten.iter().all(|p| p.hour == 10));
        let all_hours = reference_points(&means, &stations(), None);
        assert_eq!(all_hours.len(), 3);
    }

    #[test]
    fn drops_stations_without_coordinates() {
        let means = hourly_means(&all_measurements(), may_2nd());
        let only_one = &stations()[..1];
        let points = reference_points(&means, only_one, Some(10));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].station, "Zch_Stampfenbachstrasse");
        assert_eq!(points[0].value(Attribute::PM1_0), None);
    }
}
