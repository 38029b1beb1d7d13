//! UGZ station metadata (`uzg_ogd_metadaten.json`).
//!
//! Expected shape:
//! ```text
//! { "Standorte": [ { "ID": "Zch_Stampfenbachstrasse", "Name": "...",
//!                    "Koordinaten_WGS84_lat": 47.3868, "Koordinaten_WGS84_lng": 8.5398 } ] }
//! ```
//! Coordinates may be given as numbers or numeric strings.

use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Koordinaten_WGS84_lat", default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(rename = "Koordinaten_WGS84_lng", default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

impl Station {
    /// `(longitude, latitude)` when both coordinates are known.
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.longitude?, self.latitude?))
    }
}

#[derive(Deserialize)]
struct StationMetadata {
    #[serde(rename = "Standorte")]
    stations: Vec<Station>,
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Parse the station metadata document.
pub fn load_stations(json: &str) -> anyhow::Result<Vec<Station>> {
    let metadata: StationMetadata =
        serde_json::from_str(json).context("Failed to parse station metadata")?;
    log::info!("Loaded {} reference stations", metadata.stations.len());
    Ok(metadata.stations)
}
