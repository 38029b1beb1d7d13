//! SBX CLI - Command line tool for preparing SenseBox Zurich map data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "sbx-cli",
    version,
    about = "SenseBox Zurich comparison map toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: sbx_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    sbx_cmd::run(cli.command).await
}
