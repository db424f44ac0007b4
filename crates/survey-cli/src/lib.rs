//! Survey CLI - command line tools for survey mission planning.
//!
//! Binaries:
//! - plan_waypoints: shapes + parameters in, waypoints and summary out
//! - export_mission: shapes + parameters in, DJI KMZ mission out

pub mod request;

pub use request::{load_request, MissionRequest, PlanOutput};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the stderr log subscriber, honouring `RUST_LOG`.
pub fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("survey_core=info".parse()?))
        .try_init()?;
    Ok(())
}
