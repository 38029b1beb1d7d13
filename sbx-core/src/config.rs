//! Map view and data source configuration.
//!
//! `MapConfig::default()` describes the deployed Zurich map. A JSON document
//! can override any subset of the fields; the rest keep their defaults.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};

/// Hosted feature service holding the SenseBox readings with `ref_*`/`diff_*` fields.
pub const SENSEBOX_SERVICE_URL: &str =
    "https://services-eu1.arcgis.com/DmEtBMiyE68OImsA/arcgis/rest/services/sensebox_with_differences/FeatureServer";

/// A static GeoJSON reference file selectable as the extra reference layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDataset {
    pub label: String,
    pub filename: String,
}

/// WGS84 bounding box the view is constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub wkid: u32,
}

impl Extent {
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        (self.xmin..=self.xmax).contains(&longitude) && (self.ymin..=self.ymax).contains(&latitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub basemap: String,
    pub sensebox_url: String,
    /// Layer id hit tests are matched against.
    pub sensebox_layer_id: String,
    /// Relative URL of the main reference GeoJSON.
    pub reference_url: String,
    pub reference_title: String,
    /// Directory the extra reference datasets are served from.
    pub data_dir: String,
    /// Filter applied to every reference layer.
    pub definition_expression: String,
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub extent: Extent,
    pub reference_datasets: Vec<ReferenceDataset>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            basemap: "topo-vector".to_string(),
            sensebox_url: SENSEBOX_SERVICE_URL.to_string(),
            sensebox_layer_id: "sensebox".to_string(),
            reference_url: "./Data/zh_confirmation_data.geojson".to_string(),
            reference_title: "Reference Data".to_string(),
            data_dir: "./Data".to_string(),
            definition_expression: "Hour = 10".to_string(),
            center: [8.532, 47.392],
            zoom: 15.0,
            min_zoom: 13.0,
            max_zoom: 17.0,
            extent: Extent {
                xmin: 8.482,
                xmax: 8.582,
                ymin: 47.382,
                ymax: 47.422,
                wkid: 4326,
            },
            reference_datasets: vec![
                ReferenceDataset {
                    label: "Stampfenbachstrasse".to_string(),
                    filename: "Zch_Stampfenbachstrasse.geojson".to_string(),
                },
                ReferenceDataset {
                    label: "Schimmelstrasse".to_string(),
                    filename: "Zch_Schimmelstrasse.geojson".to_string(),
                },
                ReferenceDataset {
                    label: "Rosengartenstrasse".to_string(),
                    filename: "Zch_Rosengartenstrasse.geojson".to_string(),
                },
            ],
        }
    }
}

impl MapConfig {
    /// Parse an override document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        let config: MapConfig =
            serde_json::from_str(json).map_err(|e| ParseError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        if self.min_zoom > self.max_zoom {
            return Err(ParseError::InvalidConfig(format!(
                "min_zoom {} is above max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.zoom) {
            return Err(ParseError::InvalidConfig(format!(
                "zoom {} outside {}..={}",
                self.zoom, self.min_zoom, self.max_zoom
            )));
        }
        if !self.extent.contains(self.center[0], self.center[1]) {
            return Err(ParseError::InvalidConfig(
                "center lies outside the extent".to_string(),
            ));
        }
        Ok(())
    }

    /// URL of a dataset under `data_dir`.
    pub fn data_url(&self, filename: &str) -> String {
        format!("{}/{}", self.data_dir.trim_end_matches('/'), filename)
    }

    /// View options handed to the map bridge on startup.
    pub fn view_json(&self) -> serde_json::Value {
        serde_json::json!({
            "basemap": self.basemap,
            "center": self.center,
            "zoom": self.zoom,
            "constraints": {
                "minZoom": self.min_zoom,
                "maxZoom": self.max_zoom,
                "geometry": {
                    "type": "extent",
                    "xmin": self.extent.xmin,
                    "xmax": self.extent.xmax,
                    "ymin": self.extent.ymin,
                    "ymax": self.extent.ymax,
                    "spatialReference": { "wkid": self.extent.wkid },
                },
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.definition_expression, "Hour = 10");
        assert_eq!(config.center, [8.532, 47.392]);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = MapConfig::from_json(r#"{"zoom": 14, "data_dir": "/static/"}"#).unwrap();
        assert_eq!(config.zoom, 14.0);
        assert_eq!(config.max_zoom, 17.0);
        assert_eq!(config.data_url("foo.geojson"), "/static/foo.geojson");
    }

    #[test]
    fn rejects_zoom_outside_bounds() {
        let err = MapConfig::from_json(r#"{"zoom": 18}"#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_center_outside_extent() {
        assert!(MapConfig::from_json(r#"{"center": [8.0, 47.0]}"#).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(MapConfig::from_json("{").is_err());
    }

    #[test]
    fn view_json_carries_constraints() {
        let view = MapConfig::default().view_json();
        assert_eq!(view["constraints"]["minZoom"], 13.0);
        assert_eq!(view["constraints"]["geometry"]["spatialReference"]["wkid"], 4326);
    }
}
