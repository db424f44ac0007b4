//! Shape-specific path generation.

pub mod circle;
pub mod polyline;
pub mod scan;

pub use circle::CircleHandler;
pub use polyline::PolylineHandler;
pub use scan::AreaScanHandler;

use crate::error::Result;
use crate::models::{Coordinate, ShapeData, ShapeKind, Waypoint, WaypointParameters};
use crate::spatial::bearing_deg;

/// Trait for shape path generators.
pub trait ShapeHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn can_handle(&self, kind: ShapeKind) -> bool;

    /// Generate an ordered path for `shape`.
    ///
    /// Indices in the returned waypoints are local (starting at 0); the
    /// orchestrator renumbers them for the whole mission.
    fn generate(&self, shape: &ShapeData, params: &WaypointParameters) -> Result<Vec<Waypoint>>;
}

static AREA_SCAN: AreaScanHandler = AreaScanHandler;
static CIRCLE: CircleHandler = CircleHandler;
static POLYLINE: PolylineHandler = PolylineHandler;

/// Built-in handler for a shape kind.
pub fn handler_for(kind: ShapeKind) -> &'static dyn ShapeHandler {
    match kind {
        ShapeKind::Rectangle | ShapeKind::Polygon => &AREA_SCAN,
        ShapeKind::Circle => &CIRCLE,
        ShapeKind::Polyline => &POLYLINE,
    }
}

/// One instance of every built-in handler.
pub fn default_handlers() -> Vec<Box<dyn ShapeHandler>> {
    vec![
        Box::new(AreaScanHandler),
        Box::new(CircleHandler),
        Box::new(PolylineHandler),
    ]
}

/// Heading at each point: bearing to the next point, the last repeats the one before.
/// A single point faces north.
pub(crate) fn path_headings(points: &[Coordinate]) -> Vec<f64> {
    let mut headings: Vec<f64> = points
        .windows(2)
        .map(|pair| bearing_deg(pair[0].lat, pair[0].lng, pair[1].lat, pair[1].lng))
        .collect();
    if !points.is_empty() {
        headings.push(headings.last().copied().unwrap_or(0.0));
    }
    headings
}

/// Turn positions and headings into waypoints carrying the shared flight parameters.
pub(crate) fn build_waypoints(
    points: &[Coordinate],
    headings: &[f64],
    params: &WaypointParameters,
) -> Vec<Waypoint> {
    let last = points.len().saturating_sub(1);
    points
        .iter()
        .zip(headings)
        .enumerate()
        .map(|(i, (point, heading))| {
            let action = match params.final_action {
                Some(final_action) if i == last => final_action,
                _ => params.action,
            };
            Waypoint {
                index: i as u32,
                lat: point.lat,
                lng: point.lng,
                altitude_m: params.altitude_m,
                speed_mps: params.speed_mps,
                heading_deg: *heading,
                action,
                gimbal_pitch_deg: params.angle,
            }
        })
        .collect()
}
