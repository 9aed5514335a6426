mod api;
mod config;
mod grid;
mod tui;

use anyhow::Result;
use clap::Parser;

/// An editable, infinite-scrolling table viewer for remote JSON datasets.
#[derive(Parser)]
#[command(name = "gridedit", version, about)]
struct Args {
    /// Dataset endpoint returning a JSON array of records
    #[arg(long, default_value = api::DEFAULT_DATASET_URL)]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    tui::app::run(args.url).await
}
