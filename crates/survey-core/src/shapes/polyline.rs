//! Polylines are flown as drawn: one waypoint per vertex.

use super::{build_waypoints, path_headings, ShapeHandler};
use crate::error::{PlanError, Result};
use crate::models::{ShapeData, ShapeKind, Waypoint, WaypointParameters};

pub struct PolylineHandler;

impl ShapeHandler for PolylineHandler {
    fn name(&self) -> &'static str {
        "polyline"
    }

    fn can_handle(&self, kind: ShapeKind) -> bool {
        kind == ShapeKind::Polyline
    }

    fn generate(&self, shape: &ShapeData, params: &WaypointParameters) -> Result<Vec<Waypoint>> {
        if shape.coordinates.is_empty() {
            return Err(PlanError::invalid_shape(&shape.id, "polyline has no points"));
        }
        let headings = path_headings(&shape.coordinates);
        Ok(build_waypoints(&shape.coordinates, &headings, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, WaypointAction};
    use crate::shapes::test_support::params;

    #[test]
    fn single_point_yields_one_waypoint_facing_north() {
        let shape = ShapeData::new("p1", ShapeKind::Polyline, vec![Coordinate::new(33.68, -117.82)]);
        let waypoints = PolylineHandler.generate(&shape, &params()).unwrap();

        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].heading_deg, 0.0);
        assert_eq!(waypoints[0].lat, 33.68);
    }

    #[test]
    fn points_keep_input_order() {
        let coords = vec![
            Coordinate::new(33.0, -117.0),
            Coordinate::new(33.001, -117.0),
            Coordinate::new(33.001, -116.999),
        ];
        let shape = ShapeData::new("p2", ShapeKind::Polyline, coords.clone());
        let mut p = params();
        p.final_action = Some(WaypointAction::StopRecord);
        let waypoints = PolylineHandler.generate(&shape, &p).unwrap();

        assert_eq!(waypoints.len(), 3);
        for (wp, c) in waypoints.iter().zip(&coords) {
            assert_eq!((wp.lat, wp.lng), (c.lat, c.lng));
        }
        assert!(waypoints[0].heading_deg.abs() < 1e-6 || waypoints[0].heading_deg > 359.99);
        assert!((waypoints[1].heading_deg - 90.0).abs() < 0.01);
        assert_eq!(waypoints[2].heading_deg, waypoints[1].heading_deg);
        assert_eq!(waypoints[2].action, WaypointAction::StopRecord);
        assert_eq!(waypoints[1].action, WaypointAction::TakePhoto);
    }

    #[test]
    fn empty_polyline_is_invalid() {
        let shape = ShapeData::new("p3", ShapeKind::Polyline, Vec::new());
        assert!(matches!(
            PolylineHandler.generate(&shape, &params()),
            Err(PlanError::InvalidShape { .. })
        ));
    }
}
