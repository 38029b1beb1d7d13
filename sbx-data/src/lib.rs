//! Data preparation for the SenseBox Zurich map.
//!
//! Turns the raw SenseBox log and the City of Zurich (UGZ) hourly reference
//! measurements into the two GeoJSON layers the map shows:
//!
//! - sensor readings carrying `ref_<attr>` / `diff_<attr>` companion fields,
//!   matched against the nearest reference station,
//! - reference points per station and hour, filtered on the map by `Hour = 10`.
//!
//! # Pipeline
//!
//! 1. [`reference::load_measurements`] parses the long-format UGZ CSVs.
//! 2. [`reference::hourly_means`] averages one day per station, parameter and hour.
//! 3. [`stations::load_stations`] reads the station metadata JSON.
//! 4. [`reference::reference_points`] joins both into located points.
//! 5. [`sensebox::load_readings`] parses the `;`-separated SenseBox log.
//! 6. [`evaluate::evaluate`] attaches the nearest reference values and differences.
//! 7. [`geojson`] serializes the results.

pub mod evaluate;
pub mod geojson;
pub mod reference;
pub mod sensebox;
pub mod stations;
