//! Legend bands for the active attribute.
//!
//! One entry per adjacent pair of ramp stops; the last stop only closes the
//! previous band and gets no entry of its own.

use crate::attribute::{Attribute, ColorRampStop};
use serde::Serialize;

/// A single legend row: a color swatch and its value range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: &'static str,
    pub from: f64,
    /// Inclusive upper bound shown to the user (`next threshold - 1`).
    pub to: f64,
    pub unit: &'static str,
    pub label: String,
}

/// Build the legend rows for `attribute` from `stops`, in the given order.
pub fn legend_entries(attribute: Attribute, stops: &[ColorRampStop]) -> Vec<LegendEntry> {
    let unit = attribute.unit();
    stops
        .windows(2)
        .map(|pair| {
            let from = pair[0].value;
            let to = pair[1].value - 1.0;
            LegendEntry {
                color: pair[0].color,
                from,
                to,
                unit,
                label: format!("{}–{} {}", from, to, unit),
            }
        })
        .collect()
}

/// The full legend for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub attribute: Attribute,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Legend built from the attribute's own ramp, the one the renderers use.
    pub fn for_attribute(attribute: Attribute) -> Self {
        Self {
            attribute,
            entries: legend_entries(attribute, attribute.ramp()),
        }
    }

    pub fn title(&self) -> String {
        format!("{} ({})", self.attribute.label(), self.attribute.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{resolve_rule, SymbolShape};

    #[test]
    fn one_entry_per_adjacent_pair() {
        for attribute in Attribute::ALL {
            let stops = attribute.ramp();
            let entries = legend_entries(attribute, stops);
            assert_eq!(entries.len(), stops.len() - 1);
            for (i, entry) in entries.iter().enumerate() {
                assert_eq!(entry.from, stops[i].value);
                assert_eq!(entry.to, stops[i + 1].value - 1.0);
                assert_eq!(entry.color, stops[i].color);
            }
        }
    }

    #[test]
    fn temperature_labels() {
        let legend = Legend::for_attribute(Attribute::Temperature);
        let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["22–23 °C", "24–25 °C", "26–27 °C", "28–29 °C"]);
    }

    #[test]
    fn pm_labels_use_mass_concentration_unit() {
        let legend = Legend::for_attribute(Attribute::PM2_5);
        assert_eq!(legend.entries[0].label, "2–5 µg/m³");
        assert_eq!(legend.entries[2].label, "10–14 µg/m³");
    }

    #[test]
    fn short_stop_lists_yield_no_entries() {
        assert!(legend_entries(Attribute::Humidity, &[]).is_empty());
        assert!(legend_entries(Attribute::Humidity, &Attribute::Humidity.ramp()[..1]).is_empty());
    }

    #[test]
    fn legend_and_renderer_share_the_ramp() {
        for attribute in Attribute::ALL {
            let rule = resolve_rule(attribute, SymbolShape::Circle);
            assert_eq!(rule.stops, attribute.ramp());
            assert_eq!(
                Legend::for_attribute(attribute).entries,
                legend_entries(attribute, rule.stops)
            );
        }
    }

    #[test]
    fn rebuilding_is_stable() {
        assert_eq!(
            Legend::for_attribute(Attribute::PM10_0),
            Legend::for_attribute(Attribute::PM10_0)
        );
    }
}
