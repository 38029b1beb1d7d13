//! Command implementations for the SBX CLI.
//!
//! Provides subcommands for downloading the UGZ reference data, building the
//! map's GeoJSON layers and printing the renderer/legend for an attribute.

use clap::Subcommand;
use sbx_core::style::SymbolShape;
use sbx_core::Attribute;

pub mod evaluate;
pub mod fetch;
pub mod style;

#[derive(Subcommand)]
pub enum Command {
    /// Match SenseBox readings with the nearest reference station and write
    /// the readings with ref_*/diff_* fields as GeoJSON
    Evaluate {
        /// SenseBox log (`;`-separated, with Latitude/Longitude columns)
        #[arg(short = 's', long)]
        sensebox: String,

        #[command(flatten)]
        reference: evaluate::ReferenceInputs,

        /// Hour of day the reference values are taken from
        #[arg(long, default_value_t = sbx_data::reference::DEFAULT_HOUR)]
        hour: u32,

        /// Output GeoJSON path
        #[arg(short = 'o', long)]
        output: String,
    },

    /// Write the reference stations for all hours of the day as GeoJSON
    Reference {
        #[command(flatten)]
        reference: evaluate::ReferenceInputs,

        /// Output GeoJSON path
        #[arg(short = 'o', long)]
        output: String,
    },

    /// Download the UGZ hourly meteo and air quality CSVs and station metadata
    Fetch {
        /// Year of the hourly files
        #[arg(short = 'y', long)]
        year: i32,

        /// Directory the files are written to
        #[arg(short = 'd', long, default_value = "Data")]
        output_dir: String,
    },

    /// Print the ArcGIS renderer JSON for an attribute
    Renderer {
        #[arg(short = 'a', long, default_value_t = Attribute::Temperature)]
        attribute: Attribute,

        #[arg(long, default_value_t = SymbolShape::Circle)]
        shape: SymbolShape,
    },

    /// Print the legend bands for an attribute
    Legend {
        #[arg(short = 'a', long, default_value_t = Attribute::Temperature)]
        attribute: Attribute,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Evaluate {
            sensebox,
            reference,
            hour,
            output,
        } => evaluate::run_evaluate(&sensebox, &reference, hour, &output),
        Command::Reference { reference, output } => {
            evaluate::run_reference(&reference, &output)
        }
        Command::Fetch { year, output_dir } => fetch::run_fetch(year, &output_dir).await,
        Command::Renderer { attribute, shape } => style::print_renderer(attribute, shape),
        Command::Legend { attribute } => style::print_legend(attribute),
    }
}
