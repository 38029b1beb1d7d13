//! GeoJSON `FeatureCollection` output for the map layers.

use crate::reference::ReferencePoint;
use crate::sensebox::SenseboxReading;
use anyhow::Context;
use serde_json::{json, Map, Value};
use std::path::Path;

fn point_feature(longitude: f64, latitude: f64, properties: Map<String, Value>) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [longitude, latitude],
        },
        "properties": properties,
    })
}

fn collection(features: Vec<Value>) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Sensor readings with all their properties, including `ref_*`/`diff_*`.
pub fn readings_collection(readings: &[SenseboxReading]) -> Value {
    collection(
        readings
            .iter()
            .map(|r| point_feature(r.longitude, r.latitude, r.properties.clone()))
            .collect(),
    )
}

/// Reference points with `Standort`, `Hour` and one field per measured attribute.
pub fn reference_collection(points: &[ReferencePoint]) -> Value {
    collection(
        points
            .iter()
            .map(|p| {
                let mut properties = Map::new();
                properties.insert("Standort".to_string(), Value::from(p.station.clone()));
                properties.insert("Hour".to_string(), Value::from(p.hour));
                for (attribute, value) in &p.values {
                    properties.insert(attribute.field().to_string(), Value::from(*value));
                }
                point_feature(p.longitude, p.latitude, properties)
            })
            .collect(),
    )
}

/// Pretty-print `collection` to `path`.
pub fn write(path: impl AsRef<Path>, collection: &Value) -> anyhow::Result<()> {
    let path = path.as_ref();
    let body = serde_json::to_string_pretty(collection)?;
    std::fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbx_core::Attribute;
    use std::collections::BTreeMap;

    #[test]
    fn reference_features_carry_hour_and_fields() {
        let mut values = BTreeMap::new();
        values.insert(Attribute::Temperature, 17.0);
        values.insert(Attribute::PM10_0, 12.5);
        let points = vec![ReferencePoint {
            station: "Zch_Stampfenbachstrasse".to_string(),
            hour: 10,
            longitude: 8.5398,
            latitude: 47.3868,
            values,
        }];
        let fc = reference_collection(&points);
        assert_eq!(fc["type"], "FeatureCollection");
        let feature = &fc["features"][0];
        assert_eq!(feature["geometry"]["coordinates"][0], 8.5398);
        assert_eq!(feature["geometry"]["coordinates"][1], 47.3868);
        assert_eq!(feature["properties"]["Hour"], 10);
        assert_eq!(feature["properties"]["Temperature"], 17.0);
        assert_eq!(feature["properties"]["PM10_0"], 12.5);
        assert!(feature["properties"].get("Humidity").is_none());
    }

    #[test]
    fn reading_features_keep_properties() {
        let mut properties = Map::new();
        properties.insert("Temperature".to_string(), Value::from(23.5));
        properties.insert("ref_Temperature".to_string(), Value::Null);
        let readings = vec![SenseboxReading {
            longitude: 8.5,
            latitude: 47.4,
            properties,
        }];
        let fc = readings_collection(&readings);
        assert_eq!(fc["features"].as_array().map(Vec::len), Some(1));
        assert_eq!(fc["features"][0]["properties"]["Temperature"], 23.5);
        assert!(fc["features"][0]["properties"]["ref_Temperature"].is_null());
    }
}
