//! Orbit around a centre point, sampled along the geodesic circle.

use super::{build_waypoints, ShapeHandler};
use crate::error::{PlanError, Result};
use crate::models::{ShapeData, ShapeKind, Waypoint, WaypointParameters};
use crate::spatial::{destination, normalize_heading};
use std::f64::consts::PI;

/// Smallest number of orbit points, keeps small circles visually round.
pub const MIN_CIRCLE_POINTS: usize = 24;
/// Cap for very large orbits with a fast photo cadence.
pub const MAX_CIRCLE_POINTS: usize = 3_600;

/// Centres this close to (0, 0) almost always come from a failed coordinate parse.
const NULL_ISLAND_EPS_DEG: f64 = 1e-6;

pub struct CircleHandler;

impl ShapeHandler for CircleHandler {
    fn name(&self) -> &'static str {
        "circle"
    }

    fn can_handle(&self, kind: ShapeKind) -> bool {
        kind == ShapeKind::Circle
    }

    fn generate(&self, shape: &ShapeData, params: &WaypointParameters) -> Result<Vec<Waypoint>> {
        let [center] = shape.coordinates.as_slice() else {
            return Err(PlanError::invalid_shape(
                &shape.id,
                format!(
                    "circle needs exactly one centre coordinate, got {}",
                    shape.coordinates.len()
                ),
            ));
        };

        let radius_m = shape
            .radius_m()
            .filter(|r| r.is_finite() && *r > 0.0)
            .ok_or_else(|| PlanError::invalid_shape(&shape.id, "radius must be greater than zero"))?;

        if center.lat.abs() < NULL_ISLAND_EPS_DEG && center.lng.abs() < NULL_ISLAND_EPS_DEG {
            return Err(PlanError::Validation(format!(
                "circle {} is centred on (0, 0); supply the real centre coordinate",
                shape.id
            )));
        }

        let count = orbit_point_count(radius_m, params.photo_spacing_m());
        let step_deg = 360.0 / count as f64;

        let mut points = Vec::with_capacity(count);
        let mut headings = Vec::with_capacity(count);
        for i in 0..count {
            let angle = i as f64 * step_deg;
            points.push(destination(center.lat, center.lng, angle, radius_m));
            headings.push(normalize_heading(angle + 90.0));
        }

        Ok(build_waypoints(&points, &headings, params))
    }
}

/// `max(24, circumference / photo spacing)`, capped at [`MAX_CIRCLE_POINTS`].
pub fn orbit_point_count(radius_m: f64, photo_spacing_m: f64) -> usize {
    if photo_spacing_m <= 0.0 {
        return MIN_CIRCLE_POINTS;
    }
    let circumference = 2.0 * PI * radius_m;
    let by_cadence = (circumference / photo_spacing_m).ceil();
    if !by_cadence.is_finite() {
        return MIN_CIRCLE_POINTS;
    }
    (by_cadence as usize).clamp(MIN_CIRCLE_POINTS, MAX_CIRCLE_POINTS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use crate::shapes::test_support::params;
    use crate::spatial::haversine_distance;

    #[test]
    fn every_point_sits_on_the_radius() {
        let center = Coordinate::new(60.1699, 24.9384);
        let shape = ShapeData::circle("c1", center, 150.0);
        let waypoints = CircleHandler.generate(&shape, &params()).unwrap();

        assert!(waypoints.len() >= MIN_CIRCLE_POINTS);
        for wp in &waypoints {
            let d = haversine_distance(center.lat, center.lng, wp.lat, wp.lng);
            assert!((d - 150.0).abs() < 0.5, "point {} at {d} m", wp.index);
        }
    }

    #[test]
    fn headings_are_tangential() {
        let shape = ShapeData::circle("c2", Coordinate::new(40.0, -74.0), 50.0);
        let waypoints = CircleHandler.generate(&shape, &params()).unwrap();

        assert!((waypoints[0].heading_deg - 90.0).abs() < 1e-9);
        let quarter = waypoints.len() / 4;
        assert!((waypoints[quarter].heading_deg - 180.0).abs() < 1e-9);
        let last = waypoints.last().unwrap();
        assert!(last.heading_deg < 90.0);
    }

    #[test]
    fn small_circles_get_minimum_points_and_large_follow_cadence() {
        // 5 m/s every 2 s = one point per 10 m
        assert_eq!(orbit_point_count(10.0, 10.0), MIN_CIRCLE_POINTS);
        assert_eq!(orbit_point_count(100.0, 10.0), 63);
        assert_eq!(orbit_point_count(100.0, 0.0), MIN_CIRCLE_POINTS);
        assert_eq!(orbit_point_count(1e7, 1.0), MAX_CIRCLE_POINTS);
    }

    #[test]
    fn radius_can_come_from_the_center_coordinate() {
        let mut center = Coordinate::new(48.85, 2.35);
        center.radius = Some(40.0);
        let shape = ShapeData::new("c3", ShapeKind::Circle, vec![center]);
        let waypoints = CircleHandler.generate(&shape, &params()).unwrap();
        let d = haversine_distance(48.85, 2.35, waypoints[5].lat, waypoints[5].lng);
        assert!((d - 40.0).abs() < 0.5);
    }

    #[test]
    fn zero_radius_is_invalid() {
        let shape = ShapeData::circle("c4", Coordinate::new(10.0, 10.0), 0.0);
        assert!(matches!(
            CircleHandler.generate(&shape, &params()),
            Err(PlanError::InvalidShape { .. })
        ));

        let shape = ShapeData::new("c5", ShapeKind::Circle, vec![Coordinate::new(10.0, 10.0)]);
        assert!(matches!(
            CircleHandler.generate(&shape, &params()),
            Err(PlanError::InvalidShape { .. })
        ));
    }

    #[test]
    fn null_island_center_is_rejected_not_replaced() {
        let shape = ShapeData::circle("c6", Coordinate::new(0.0, 0.0), 100.0);
        assert!(matches!(
            CircleHandler.generate(&shape, &params()),
            Err(PlanError::Validation(_))
        ));
    }

    #[test]
    fn more_than_one_center_is_invalid() {
        let mut shape = ShapeData::circle("c7", Coordinate::new(1.0, 1.0), 10.0);
        shape.coordinates.push(Coordinate::new(1.0, 1.001));
        assert!(matches!(
            CircleHandler.generate(&shape, &params()),
            Err(PlanError::InvalidShape { .. })
        ));
    }
}
