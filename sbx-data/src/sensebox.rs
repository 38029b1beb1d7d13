//! SenseBox Mini log (`DATA.TXT`).
//!
//! A `;`-separated file with a header row. `Latitude` and `Longitude` are
//! required; every other column is carried through as a feature property,
//! numeric where it parses as a number.

use anyhow::{anyhow, Context};
use sbx_core::popup::FeatureRecord;
use sbx_core::Attribute;
use serde_json::{Map, Value};

pub const DELIMITER: u8 = b';';

#[derive(Debug, Clone, PartialEq)]
pub struct SenseboxReading {
    pub longitude: f64,
    pub latitude: f64,
    pub properties: Map<String, Value>,
}

impl SenseboxReading {
    pub fn value(&self, attribute: Attribute) -> Option<f64> {
        self.properties.get(attribute.field()).and_then(Value::as_f64)
    }

    /// The properties as they appear to the map after a hit test.
    pub fn record(&self) -> FeatureRecord {
        FeatureRecord::new(self.properties.clone())
    }
}

fn property_value(raw: &str) -> Value {
    let raw = raw.trim();
    if raw.is_empty() {
        return Value::Null;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        _ => Value::String(raw.to_string()),
    }
}

/// Parse the SenseBox log. Rows without usable coordinates are skipped.
pub fn load_readings(csv_data: &str) -> anyhow::Result<Vec<SenseboxReading>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read SenseBox header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("SenseBox log has no {} column", name))
    };
    let lat_idx = column("Latitude")?;
    let lon_idx = column("Longitude")?;

    let mut readings = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.records() {
        let r = result?;
        let latitude = r.get(lat_idx).and_then(|v| v.trim().parse::<f64>().ok());
        let longitude = r.get(lon_idx).and_then(|v| v.trim().parse::<f64>().ok());
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            skipped += 1;
            continue;
        };

        let properties = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty())
            .map(|(i, h)| (h.clone(), property_value(r.get(i).unwrap_or(""))))
            .collect();
        readings.push(SenseboxReading {
            longitude,
            latitude,
            properties,
        });
    }
    log::info!(
        "Loaded {} SenseBox readings, skipped {} without position",
        readings.len(),
        skipped
    );
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_TXT: &str = "\
Timestamp;Latitude;Longitude;Temperature;Humidity;PM1_0;PM2_5;PM4_0;PM10_0
2025-05-02 10:01:05;47.3990;8.5010;23.5;41.2;3.1;4.2;5.0;5.6
2025-05-02 10:01:10;;;23.4;41.0;3.0;4.1;4.9;5.5
2025-05-02 10:01:15;47.3995;8.5021;23.6;;3.2;4.3;5.1;5.8
";

    #[test]
    fn parses_positions_and_properties() {
        let readings = load_readings(DATA_TXT).unwrap();
        assert_eq!(readings.len(), 2);
        let first = &readings[0];
        assert_eq!((first.longitude, first.latitude), (8.501, 47.399));
        assert_eq!(first.value(Attribute::Temperature), Some(23.5));
        assert_eq!(first.value(Attribute::PM10_0), Some(5.6));
        assert_eq!(
            first.properties["Timestamp"],
            Value::String("2025-05-02 10:01:05".to_string())
        );
    }

    #[test]
    fn empty_cells_become_null() {
        let readings = load_readings(DATA_TXT).unwrap();
        assert_eq!(readings[1].properties["Humidity"], Value::Null);
        assert_eq!(readings[1].value(Attribute::Humidity), None);
    }

    #[test]
    fn requires_coordinates_columns() {
        let err = load_readings("Temperature;Humidity\n20;40\n").unwrap_err();
        assert!(err.to_string().contains("Latitude"));
    }
}
