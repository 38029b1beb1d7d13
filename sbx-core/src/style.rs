//! Attribute + symbol shape -> rendering rule.
//!
//! Sensor readings are drawn as circles, reference points as squares. Size,
//! neutral fill and outline are fixed; only the color varies with the value
//! of the active attribute.

use crate::attribute::{Attribute, ColorRampStop};
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fill for values that fall below the first ramp stop.
pub const NEUTRAL_FILL: &str = "gray";
pub const OUTLINE_COLOR: &str = "black";
pub const OUTLINE_WIDTH: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolShape {
    #[default]
    Circle,
    Square,
}

impl SymbolShape {
    /// Marker size in points.
    pub fn size(self) -> f64 {
        match self {
            SymbolShape::Circle => 8.0,
            SymbolShape::Square => 12.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolShape::Circle => "circle",
            SymbolShape::Square => "square",
        }
    }
}

impl fmt::Display for SymbolShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SymbolShape {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "circle" => Ok(SymbolShape::Circle),
            "square" => Ok(SymbolShape::Square),
            other => Err(ParseError::UnknownShape(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub width: f64,
    pub color: &'static str,
}

/// The resolved styling of one layer for one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRule {
    pub attribute: Attribute,
    pub shape: SymbolShape,
    pub size: f64,
    pub fill: &'static str,
    pub outline: Outline,
    pub stops: &'static [ColorRampStop],
}

/// Resolve the rendering rule for `attribute` drawn with `shape`.
pub fn resolve_rule(attribute: Attribute, shape: SymbolShape) -> RenderRule {
    RenderRule {
        attribute,
        shape,
        size: shape.size(),
        fill: NEUTRAL_FILL,
        outline: Outline {
            width: OUTLINE_WIDTH,
            color: OUTLINE_COLOR,
        },
        stops: attribute.ramp(),
    }
}

impl RenderRule {
    /// Color of the band containing `value`.
    ///
    /// Bands are `[stop[i], stop[i + 1])` with the last one open-ended. Values
    /// below the first stop (and NaN) get the neutral fill.
    pub fn color_for(&self, value: f64) -> &'static str {
        self.stops
            .iter()
            .rev()
            .find(|s| value >= s.value)
            .map(|s| s.color)
            .unwrap_or(self.fill)
    }

    /// The ArcGIS `simple` renderer with one color visual variable.
    pub fn to_renderer_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "simple",
            "field": self.attribute.field(),
            "symbol": {
                "type": "simple-marker",
                "style": self.shape.as_str(),
                "size": self.size,
                "color": self.fill,
                "outline": {
                    "width": self.outline.width,
                    "color": self.outline.color,
                },
            },
            "visualVariables": [
                {
                    "type": "color",
                    "field": self.attribute.field(),
                    "stops": self.stops,
                }
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_depends_on_shape_only() {
        for attribute in Attribute::ALL {
            assert_eq!(resolve_rule(attribute, SymbolShape::Circle).size, 8.0);
            assert_eq!(resolve_rule(attribute, SymbolShape::Square).size, 12.0);
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        let a = resolve_rule(Attribute::PM2_5, SymbolShape::Square);
        let b = resolve_rule(Attribute::PM2_5, SymbolShape::Square);
        assert_eq!(a, b);
        assert_eq!(a.to_renderer_json(), b.to_renderer_json());
    }

    #[test]
    fn fill_and_outline_are_constant() {
        for attribute in Attribute::ALL {
            let rule = resolve_rule(attribute, SymbolShape::Circle);
            assert_eq!(rule.fill, "gray");
            assert_eq!(rule.outline.color, "black");
            assert_eq!(rule.outline.width, 0.5);
        }
    }

    #[test]
    fn color_for_uses_half_open_bands() {
        let rule = resolve_rule(Attribute::Temperature, SymbolShape::Circle);
        assert_eq!(rule.color_for(21.9), NEUTRAL_FILL);
        assert_eq!(rule.color_for(22.0), "#ffffcc");
        assert_eq!(rule.color_for(23.99), "#ffffcc");
        assert_eq!(rule.color_for(24.0), "#fed976");
        assert_eq!(rule.color_for(45.0), "#bd0026");
        assert_eq!(rule.color_for(f64::NAN), NEUTRAL_FILL);
    }

    #[test]
    fn renderer_json_shape() {
        let json = resolve_rule(Attribute::Humidity, SymbolShape::Square).to_renderer_json();
        assert_eq!(json["type"], "simple");
        assert_eq!(json["field"], "Humidity");
        assert_eq!(json["symbol"]["style"], "square");
        assert_eq!(json["symbol"]["size"], 12.0);
        let variable = &json["visualVariables"][0];
        assert_eq!(variable["type"], "color");
        assert_eq!(variable["field"], "Humidity");
        assert_eq!(variable["stops"].as_array().map(Vec::len), Some(5));
        assert_eq!(variable["stops"][0]["color"], "#deebf7");
        assert_eq!(variable["stops"][0]["value"], 35.0);
    }

    #[test]
    fn parses_shapes() {
        assert_eq!("square".parse::<SymbolShape>().unwrap(), SymbolShape::Square);
        assert!("triangle".parse::<SymbolShape>().is_err());
    }
}
