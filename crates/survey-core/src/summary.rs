//! Mission statistics derived from a waypoint list.

use crate::models::{Waypoint, WaypointAction};
use crate::spatial::haversine_distance;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub waypoint_count: usize,
    pub total_distance_m: f64,
    /// Straight-line flight time, ignoring turns and actions
    pub estimated_duration_s: f64,
    pub photo_count: usize,
}

impl MissionSummary {
    pub fn from_waypoints(waypoints: &[Waypoint]) -> Self {
        let mut total_distance_m = 0.0;
        let mut estimated_duration_s = 0.0;
        for pair in waypoints.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let segment = haversine_distance(from.lat, from.lng, to.lat, to.lng);
            total_distance_m += segment;
            if from.speed_mps > 0.0 {
                estimated_duration_s += segment / from.speed_mps;
            }
        }

        Self {
            waypoint_count: waypoints.len(),
            total_distance_m,
            estimated_duration_s,
            photo_count: waypoints
                .iter()
                .filter(|wp| wp.action == WaypointAction::TakePhoto)
                .count(),
        }
    }
}
