//! JSON request files shared by the CLI binaries.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use survey_core::{
    FlightMission, MissionConfig, MissionSummary, ParameterDefaults, ShapeRequest, Waypoint,
    WaypointOrchestrator, WaypointRequest,
};

/// `{ "shapes": [...], "parameters": {...}, "mission": {...} }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionRequest {
    pub shapes: Vec<ShapeRequest>,
    #[serde(default)]
    pub parameters: WaypointRequest,
    /// Mission-level export settings; defaults apply when absent.
    #[serde(default)]
    pub mission: Option<MissionConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanOutput {
    pub waypoints: Vec<Waypoint>,
    pub summary: MissionSummary,
}

pub fn load_request(path: &Path) -> Result<MissionRequest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read request file {}", path.display()))?;
    let request = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse request file {}", path.display()))?;
    Ok(request)
}

impl MissionRequest {
    /// Resolve parameters and generate every shape's waypoints.
    pub fn plan(&self, defaults: &ParameterDefaults) -> Result<PlanOutput> {
        let (waypoints, _) = WaypointOrchestrator::new().plan(
            self.shapes.clone(),
            &self.parameters,
            defaults,
        )?;
        let summary = MissionSummary::from_waypoints(&waypoints);
        Ok(PlanOutput { waypoints, summary })
    }

    /// Plan, then wrap the waypoints with the mission settings.
    pub fn into_mission(self, defaults: &ParameterDefaults) -> Result<FlightMission> {
        let PlanOutput { waypoints, .. } = self.plan(defaults)?;
        Ok(FlightMission::new(self.mission.unwrap_or_default(), waypoints))
    }
}
