use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use survey_cli::{init_logging, load_request};
use survey_core::{MissionExporter, ParameterDefaults};

/// Plan a survey mission and write it as a DJI WPML KMZ file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Request file: { "shapes": [...], "parameters": {...}, "mission": {...} }
    #[arg(long)]
    request: PathBuf,

    /// Output KMZ path
    #[arg(long, default_value = "mission.kmz")]
    output: PathBuf,

    /// Fixed RFC 3339 creation time, for reproducible files
    #[arg(long)]
    timestamp: Option<DateTime<Utc>>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let mission = load_request(&args.request)?.into_mission(&ParameterDefaults::from_env())?;
    let exporter = MissionExporter::new();
    let bytes = match args.timestamp {
        Some(timestamp) => exporter.export_at(&mission, timestamp)?,
        None => exporter.export(&mission)?,
    };

    fs::write(&args.output, &bytes)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!(
        "Wrote {} waypoints to {} ({} bytes)",
        mission.waypoints.len(),
        args.output.display(),
        bytes.len()
    );
    Ok(())
}
