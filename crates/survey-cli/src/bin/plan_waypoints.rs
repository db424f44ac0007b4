use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use survey_cli::{init_logging, load_request};
use survey_core::ParameterDefaults;

/// Generate survey waypoints from a JSON request file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Request file: { "shapes": [...], "parameters": {...} }
    #[arg(long)]
    request: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let request = load_request(&args.request)?;
    let output = request.plan(&ParameterDefaults::from_env())?;
    tracing::info!(
        waypoints = output.summary.waypoint_count,
        distance_m = output.summary.total_distance_m,
        "Plan ready"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}
