//! Build the map's GeoJSON layers from local input files.

use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use log::info;
use sbx_data::reference::{self, ReferencePoint};
use sbx_data::{evaluate, geojson, sensebox, stations};

/// Reference data inputs shared by `evaluate` and `reference`.
#[derive(Args, Debug, Clone)]
pub struct ReferenceInputs {
    /// UGZ hourly meteo CSV (ugz_ogd_meteo_h1_<year>.csv)
    #[arg(short = 'm', long)]
    pub meteo: String,

    /// UGZ hourly air quality CSV (ugz_ogd_air_h1_<year>.csv)
    #[arg(short = 'a', long)]
    pub air: String,

    /// UGZ station metadata JSON
    #[arg(short = 't', long)]
    pub stations: String,

    /// Day of the SenseBox ride (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,
}

fn read(path: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

/// Load and join the reference inputs, keeping only `hour` when given.
fn load_reference(
    inputs: &ReferenceInputs,
    hour: Option<u32>,
) -> anyhow::Result<Vec<ReferencePoint>> {
    let mut measurements = reference::load_measurements(&read(&inputs.meteo)?)
        .with_context(|| format!("Failed to parse {}", inputs.meteo))?;
    measurements.extend(
        reference::load_measurements(&read(&inputs.air)?)
            .with_context(|| format!("Failed to parse {}", inputs.air))?,
    );
    let stations = stations::load_stations(&read(&inputs.stations)?)?;

    let means = reference::hourly_means(&measurements, inputs.date);
    let points = reference::reference_points(&means, &stations, hour);
    info!(
        "{} reference points on {} ({})",
        points.len(),
        inputs.date,
        hour.map_or_else(|| "all hours".to_string(), |h| format!("hour {}", h))
    );
    if points.is_empty() {
        anyhow::bail!("No reference data found for {}", inputs.date);
    }
    Ok(points)
}

/// Run the full evaluation and write the sensor layer.
pub fn run_evaluate(
    sensebox_path: &str,
    inputs: &ReferenceInputs,
    hour: u32,
    output: &str,
) -> anyhow::Result<()> {
    let readings = sensebox::load_readings(&read(sensebox_path)?)
        .with_context(|| format!("Failed to parse {}", sensebox_path))?;
    let refs = load_reference(inputs, Some(hour))?;

    let evaluated = evaluate::evaluate(readings, &refs)?;
    for summary in evaluate::summarize(&evaluated) {
        info!(
            "{}: {} readings, mean difference {:.2} {}, mean absolute difference {:.2} {}",
            summary.attribute,
            summary.count,
            summary.mean_difference,
            summary.attribute.unit(),
            summary.mean_absolute_difference,
            summary.attribute.unit(),
        );
    }

    geojson::write(output, &geojson::readings_collection(&evaluated))?;
    info!("Evaluation complete. Output: {}", output);
    Ok(())
}

/// Write the reference layer for every hour of the day.
pub fn run_reference(inputs: &ReferenceInputs, output: &str) -> anyhow::Result<()> {
    let points = load_reference(inputs, None)?;
    geojson::write(output, &geojson::reference_collection(&points))?;
    info!("Reference layer complete. Output: {}", output);
    Ok(())
}
