//! Match every SenseBox reading with its nearest reference point.
//!
//! Distance is planar in degrees on WGS84 coordinates, which is good enough
//! inside a single district. For each attribute the reading gains
//! `ref_<attr>` (null when the station does not measure it) and
//! `diff_<attr> = sensor - reference` (null when either side is missing).

use crate::reference::ReferencePoint;
use crate::sensebox::SenseboxReading;
use anyhow::bail;
use sbx_core::Attribute;
use serde_json::{Number, Value};

fn number_or_null(v: Option<f64>) -> Value {
    v.and_then(Number::from_f64).map(Value::Number).unwrap_or(Value::Null)
}

/// The closest reference point; ties go to the earlier point.
pub fn nearest<'a>(
    longitude: f64,
    latitude: f64,
    refs: &'a [ReferencePoint],
) -> Option<&'a ReferencePoint> {
    let mut best: Option<(&ReferencePoint, f64)> = None;
    for point in refs {
        let d = (point.longitude - longitude).hypot(point.latitude - latitude);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((point, d)),
        }
    }
    best.map(|(point, _)| point)
}

/// Attach the nearest reference values and the differences to every reading.
pub fn evaluate(
    mut readings: Vec<SenseboxReading>,
    refs: &[ReferencePoint],
) -> anyhow::Result<Vec<SenseboxReading>> {
    if readings.is_empty() {
        bail!("No SenseBox readings to evaluate");
    }
    if refs.is_empty() {
        bail!("No reference points to compare against");
    }

    for reading in readings.iter_mut() {
        let Some(closest) = nearest(reading.longitude, reading.latitude, refs) else {
            continue;
        };
        for attribute in Attribute::ALL {
            let sensor = reading.value(attribute);
            let reference = closest.value(attribute);
            let diff = match (sensor, reference) {
                (Some(s), Some(r)) => Some(s - r),
                _ => None,
            };
            reading
                .properties
                .insert(attribute.reference_field(), number_or_null(reference));
            reading
                .properties
                .insert(attribute.difference_field(), number_or_null(diff));
        }
        reading
            .properties
            .insert("ref_Standort".to_string(), Value::String(closest.station.clone()));
    }
    log::info!(
        "Evaluated {} readings against {} reference points",
        readings.len(),
        refs.len()
    );
    Ok(readings)
}

/// Mean and mean absolute difference of one attribute over all readings.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSummary {
    pub attribute: Attribute,
    pub count: usize,
    pub mean_difference: f64,
    pub mean_absolute_difference: f64,
}

/// Per-attribute summary of evaluated readings; attributes without any
/// difference are left out.
pub fn summarize(readings: &[SenseboxReading]) -> Vec<AttributeSummary> {
    Attribute::ALL
        .into_iter()
        .filter_map(|attribute| {
            let field = attribute.difference_field();
            let diffs: Vec<f64> = readings
                .iter()
                .filter_map(|r| r.properties.get(&field).and_then(Value::as_f64))
                .collect();
            if diffs.is_empty() {
                return None;
            }
            let n = diffs.len() as f64;
            Some(AttributeSummary {
                attribute,
                count: diffs.len(),
                mean_difference: diffs.iter().sum::<f64>() / n,
                mean_absolute_difference: diffs.iter().map(|d| d.abs()).sum::<f64>() / n,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbx_core::popup::ComparisonPopup;
    use serde_json::Map;
    use std::collections::BTreeMap;

    fn reference(station: &str, longitude: f64, latitude: f64, temperature: f64) -> ReferencePoint {
        let mut values = BTreeMap::new();
        values.insert(Attribute::Temperature, temperature);
        values.insert(Attribute::PM2_5, 6.0);
        ReferencePoint {
            station: station.to_string(),
            hour: 10,
            longitude,
            latitude,
            values,
        }
    }

    fn reading(longitude: f64, latitude: f64, temperature: f64) -> SenseboxReading {
        let mut properties = Map::new();
        properties.insert("Temperature".to_string(), Value::from(temperature));
        properties.insert("Humidity".to_string(), Value::from(40.0));
        SenseboxReading {
            longitude,
            latitude,
            properties,
        }
    }

    fn refs() -> Vec<ReferencePoint> {
        vec![
            reference("Zch_Stampfenbachstrasse", 8.5398, 47.3868, 21.0),
            reference("Zch_Schimmelstrasse", 8.5232, 47.3714, 19.0),
        ]
    }

    #[test]
    fn picks_nearest_station() {
        let refs = refs();
        let near_schimmel = nearest(8.52, 47.37, &refs).unwrap();
        assert_eq!(near_schimmel.station, "Zch_Schimmelstrasse");
        assert!(nearest(8.52, 47.37, &[]).is_none());
    }

    #[test]
    fn ties_go_to_the_first_point() {
        let refs = vec![
            reference("A", 1.0, 0.0, 0.0),
            reference("B", -1.0, 0.0, 0.0),
        ];
        assert_eq!(nearest(0.0, 0.0, &refs).unwrap().station, "A");
    }

    #[test]
    fn computes_reference_and_difference() {
        let evaluated = evaluate(vec![reading(8.54, 47.39, 23.5)], &refs()).unwrap();
        let p = &evaluated[0].properties;
        assert_eq!(p["ref_Temperature"], Value::from(21.0));
        assert_eq!(p["diff_Temperature"], Value::from(2.5));
        assert_eq!(p["ref_Standort"], Value::from("Zch_Stampfenbachstrasse"));
        // station measures PM2.5 but the SenseBox value is missing
        assert_eq!(p["ref_PM2_5"], Value::from(6.0));
        assert_eq!(p["diff_PM2_5"], Value::Null);
        // station does not measure humidity
        assert_eq!(p["ref_Humidity"], Value::Null);
        assert_eq!(p["diff_Humidity"], Value::Null);
    }

    #[test]
    fn evaluated_reading_feeds_the_popup() {
        let evaluated = evaluate(vec![reading(8.54, 47.39, 23.5)], &refs()).unwrap();
        let popup = ComparisonPopup::from_record(&evaluated[0].record(), Attribute::Temperature);
        assert_eq!(popup.sensor_line(), "23.5 °C");
        assert_eq!(popup.reference_line(), "21.0 °C");
        assert_eq!(popup.difference_line(), "2.5 °C");
        let humidity = ComparisonPopup::from_record(&evaluated[0].record(), Attribute::Humidity);
        assert_eq!(humidity.reference_line(), "n/a %");
    }

    #[test]
    fn empty_inputs_are_errors() {
        assert!(evaluate(Vec::new(), &refs()).is_err());
        assert!(evaluate(vec![reading(8.5, 47.4, 20.0)], &[]).is_err());
    }

    #[test]
    fn summary_over_readings() {
        let evaluated = evaluate(
            vec![reading(8.54, 47.39, 23.0), reading(8.52, 47.37, 18.0)],
            &refs(),
        )
        .unwrap();
        let summary = summarize(&evaluated);
        assert_eq!(summary.len(), 1);
        let temperature = &summary[0];
        assert_eq!(temperature.attribute, Attribute::Temperature);
        assert_eq!(temperature.count, 2);
        // +2.0 and -1.0
        assert_eq!(temperature.mean_difference, 0.5);
        assert_eq!(temperature.mean_absolute_difference, 1.5);
    }
}
