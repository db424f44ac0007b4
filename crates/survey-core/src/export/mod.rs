//! KMZ mission export for DJI WPML-capable controllers.
//!
//! The archive holds exactly two root entries, `template.kml` and
//! `waylines.wpml`, both declaring the KML and WPML namespaces.

mod archive;
mod kml;
pub mod records;
mod wpml;
mod xml;

pub use records::{
    signed_heading, ActionGroup, ActuatorAction, ActuatorFunc, ExecuteHeightMode, HeadingParam,
    PlacemarkRecord, TurnMode, TurnParam, Wayline,
};

use crate::error::ExportError;
use crate::models::FlightMission;
use chrono::{DateTime, Utc};

pub const TEMPLATE_KML: &str = "template.kml";
pub const WAYLINES_WPML: &str = "waylines.wpml";
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
pub const WPML_NAMESPACE: &str = "http://www.dji.com/wpmz/1.0.2";

/// Serializes flight missions into KMZ bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissionExporter;

impl MissionExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export stamped with the current time.
    pub fn export(&self, mission: &FlightMission) -> Result<Vec<u8>, ExportError> {
        self.export_at(mission, Utc::now())
    }

    /// Export with a fixed `createTime`/`updateTime`.
    pub fn export_at(
        &self,
        mission: &FlightMission,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<u8>, ExportError> {
        if mission.waypoints.is_empty() {
            return Err(ExportError::EmptyMission);
        }

        let wayline = Wayline::from_waypoints(&mission.waypoints, &mission.config);
        let template = kml::write_template(&mission.config, timestamp)?;
        let waylines = wpml::write_waylines(&mission.config, &wayline)?;
        let bytes = archive::package(&[
            (TEMPLATE_KML, template.as_slice()),
            (WAYLINES_WPML, waylines.as_slice()),
        ])?;

        tracing::info!(
            waypoints = wayline.placemarks.len(),
            action_groups = wayline
                .placemarks
                .iter()
                .filter(|p| p.action_group.is_some())
                .count(),
            bytes = bytes.len(),
            "Mission exported"
        );
        Ok(bytes)
    }
}

/// Export with the default exporter.
pub fn export(mission: &FlightMission) -> Result<Vec<u8>, ExportError> {
    MissionExporter::new().export(mission)
}
