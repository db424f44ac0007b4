//! Turns shapes and flight parameters into one ordered waypoint list.
//!
//! Generation is all-or-nothing: if any shape fails, no waypoints are returned.

use crate::error::{PlanError, Result};
use crate::models::{ShapeData, ShapeKind, Waypoint, WaypointParameters};
use crate::params::{ParameterDefaults, ShapeRequest, WaypointRequest};
use crate::shapes::{default_handlers, ShapeHandler};

/// Dispatches shapes to the first handler that accepts their kind.
pub struct WaypointOrchestrator {
    handlers: Vec<Box<dyn ShapeHandler>>,
}

impl Default for WaypointOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointOrchestrator {
    /// Orchestrator with the built-in rectangle/polygon, circle and polyline handlers.
    pub fn new() -> Self {
        Self {
            handlers: default_handlers(),
        }
    }

    pub fn with_handlers(handlers: Vec<Box<dyn ShapeHandler>>) -> Self {
        Self { handlers }
    }

    pub fn handler_for(&self, kind: ShapeKind) -> Option<&dyn ShapeHandler> {
        self.handlers
            .iter()
            .find(|handler| handler.can_handle(kind))
            .map(|handler| handler.as_ref())
    }

    /// Generate waypoints for every shape in submission order.
    ///
    /// Indices run contiguously from `params.starting_index`.
    pub fn generate_waypoints(
        &self,
        shapes: &[ShapeData],
        params: &WaypointParameters,
    ) -> Result<Vec<Waypoint>> {
        let mut waypoints = Vec::new();

        for shape in shapes {
            let errors = shape.validate();
            if !errors.is_empty() {
                return Err(PlanError::Validation(format!(
                    "shape {}: {}",
                    shape.id,
                    errors.join("; ")
                )));
            }

            let handler = self
                .handler_for(shape.shape_type)
                .ok_or_else(|| PlanError::UnsupportedShape(shape.shape_type.to_string()))?;

            let generated = handler.generate(shape, params)?;
            tracing::debug!(
                shape_id = %shape.id,
                kind = %shape.shape_type,
                handler = handler.name(),
                count = generated.len(),
                "Generated shape waypoints"
            );
            waypoints.extend(generated);
        }

        for (offset, waypoint) in waypoints.iter_mut().enumerate() {
            waypoint.index = u32::try_from(offset)
                .ok()
                .and_then(|offset| params.starting_index.checked_add(offset))
                .ok_or_else(|| {
                    PlanError::Validation(format!(
                        "waypoint index overflows starting at {}",
                        params.starting_index
                    ))
                })?;
        }

        tracing::info!(
            shapes = shapes.len(),
            waypoints = waypoints.len(),
            starting_index = params.starting_index,
            "Waypoint generation complete"
        );
        Ok(waypoints)
    }

    /// Resolve a raw request and generate its waypoints in one step.
    pub fn plan(
        &self,
        shapes: Vec<ShapeRequest>,
        request: &WaypointRequest,
        defaults: &ParameterDefaults,
    ) -> Result<(Vec<Waypoint>, WaypointParameters)> {
        let shapes = shapes
            .into_iter()
            .map(ShapeData::try_from)
            .collect::<Result<Vec<_>>>()?;
        let params = defaults.resolve(request)?;
        let waypoints = self.generate_waypoints(&shapes, &params)?;
        Ok((waypoints, params))
    }
}

/// Generate waypoints with the built-in handlers.
pub fn generate_waypoints(shapes: &[ShapeData], params: &WaypointParameters) -> Result<Vec<Waypoint>> {
    WaypointOrchestrator::new().generate_waypoints(shapes, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use crate::shapes::test_support::params;
    use crate::shapes::{CircleHandler, PolylineHandler};

    fn polyline(id: &str, n: usize) -> ShapeData {
        let coords = (0..n)
            .map(|i| Coordinate::new(33.0 + i as f64 * 0.0005, -117.0))
            .collect();
        ShapeData::new(id, ShapeKind::Polyline, coords)
    }

    #[test]
    fn indices_are_contiguous_across_shapes() {
        let mut p = params();
        p.starting_index = 7;
        let shapes = vec![
            polyline("a", 3),
            ShapeData::circle("b", Coordinate::new(33.01, -117.0), 30.0),
            polyline("c", 2),
        ];
        let waypoints = generate_waypoints(&shapes, &p).unwrap();

        assert_eq!(waypoints.len(), 3 + 24 + 2);
        for (i, wp) in waypoints.iter().enumerate() {
            assert_eq!(wp.index, 7 + i as u32);
        }
        // submission order is kept
        assert_eq!(waypoints[0].lat, 33.0);
        assert!((waypoints[waypoints.len() - 1].lat - 33.0005).abs() < 1e-12);
    }

    #[test]
    fn one_bad_shape_fails_the_whole_request() {
        let shapes = vec![
            polyline("ok", 3),
            ShapeData::circle("bad", Coordinate::new(1.0, 1.0), -1.0),
        ];
        let result = generate_waypoints(&shapes, &params());
        assert!(matches!(result, Err(PlanError::Validation(_))), "{result:?}");

        let shapes = vec![polyline("ok", 3), ShapeData::circle("zero", Coordinate::new(1.0, 1.0), 0.0)];
        assert!(matches!(
            generate_waypoints(&shapes, &params()),
            Err(PlanError::InvalidShape { .. })
        ));
    }

    #[test]
    fn missing_handler_is_unsupported() {
        let orchestrator = WaypointOrchestrator::with_handlers(vec![
            Box::new(CircleHandler),
            Box::new(PolylineHandler),
        ]);
        let shape = ShapeData::new(
            "poly",
            ShapeKind::Polygon,
            vec![
                Coordinate::new(1.0, 1.0),
                Coordinate::new(1.0, 1.001),
                Coordinate::new(1.001, 1.001),
            ],
        );
        assert_eq!(
            orchestrator.generate_waypoints(&[shape], &params()),
            Err(PlanError::UnsupportedShape("polygon".to_string()))
        );
    }

    #[test]
    fn empty_shape_list_yields_no_waypoints() {
        assert!(generate_waypoints(&[], &params()).unwrap().is_empty());
    }

    #[test]
    fn plan_resolves_request_and_rejects_unknown_types() {
        let orchestrator = WaypointOrchestrator::new();
        let defaults = ParameterDefaults::default();
        let shapes = vec![ShapeRequest {
            id: "line".into(),
            shape_type: "polyline".into(),
            coordinates: vec![Coordinate::new(5.0, 5.0), Coordinate::new(5.001, 5.0)],
            radius: None,
        }];
        let request = WaypointRequest {
            starting_index: Some(1),
            altitude: Some(45.0),
            ..Default::default()
        };
        let (waypoints, params) = orchestrator.plan(shapes, &request, &defaults).unwrap();
        assert_eq!(params.altitude_m, 45.0);
        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[0].index, 1);
        assert_eq!(waypoints[0].altitude_m, 45.0);

        let shapes = vec![ShapeRequest {
            id: "hex".into(),
            shape_type: "hexagon".into(),
            coordinates: vec![Coordinate::new(5.0, 5.0)],
            radius: None,
        }];
        assert_eq!(
            orchestrator.plan(shapes, &request, &defaults).map(|(w, _)| w.len()),
            Err(PlanError::UnsupportedShape("hexagon".into()))
        );
    }
}
