//! Boustrophedon ("lawnmower") coverage for rectangles and polygons.
//!
//! The ring is projected into a local tangent plane, swept by parallel scan
//! lines, and each line is clipped against the ring by edge crossings. Lines
//! alternate direction so the aircraft turns at the edge instead of transiting
//! back across the area.

use super::{build_waypoints, path_headings, ShapeHandler};
use crate::error::{PlanError, Result};
use crate::models::{Coordinate, ShapeData, ShapeKind, Waypoint, WaypointParameters};
use crate::spatial::{shoelace_area, LocalFrame};
use std::cmp::Ordering;

/// Rings smaller than this are treated as zero-area.
const MIN_AREA_M2: f64 = 1e-3;
/// Clipped segments shorter than this are dropped.
const MIN_SEGMENT_M: f64 = 1e-6;
/// Closing-vertex and endpoint comparison tolerance.
const POINT_EPS_M: f64 = 1e-3;
/// Extent slack so projection noise does not add an extra edge-hugging line.
const EXTENT_SLACK_M: f64 = 1e-2;
/// Upper bound on waypoints generated for one area shape.
pub const MAX_SCAN_WAYPOINTS: usize = 50_000;

pub struct AreaScanHandler;

impl ShapeHandler for AreaScanHandler {
    fn name(&self) -> &'static str {
        "area_scan"
    }

    fn can_handle(&self, kind: ShapeKind) -> bool {
        matches!(kind, ShapeKind::Rectangle | ShapeKind::Polygon)
    }

    fn generate(&self, shape: &ShapeData, params: &WaypointParameters) -> Result<Vec<Waypoint>> {
        let min_given = match shape.shape_type {
            ShapeKind::Rectangle => 4,
            _ => 3,
        };
        if shape.coordinates.len() < min_given {
            return Err(PlanError::invalid_shape(
                &shape.id,
                format!(
                    "{} needs at least {} coordinates, got {}",
                    shape.shape_type,
                    min_given,
                    shape.coordinates.len()
                ),
            ));
        }

        let spacing = params.scan_spacing_m().ok_or_else(|| {
            PlanError::Validation(
                "area scan needs a positive line spacing or camera parameters".to_string(),
            )
        })?;

        let frame = LocalFrame::around(&shape.coordinates);
        let ring = open_ring(
            shape
                .coordinates
                .iter()
                .map(|c| to_scan_axes(frame.to_xy(c), params.is_north_south))
                .collect(),
        );
        if ring.len() < 3 || shoelace_area(&ring) < MIN_AREA_M2 {
            tracing::debug!(shape_id = %shape.id, "zero-area shape, no scan lines");
            return Ok(Vec::new());
        }

        let photo_spacing = if params.use_endpoints_only {
            0.0
        } else {
            params.photo_spacing_m()
        };

        let too_many = || {
            PlanError::Validation(format!(
                "scan of shape {} needs more than {} waypoints; increase line spacing or photo interval",
                shape.id, MAX_SCAN_WAYPOINTS
            ))
        };
        let positions = scan_positions(&ring, spacing).ok_or_else(too_many)?;

        let mut points = Vec::new();
        let mut forward = true;
        for v in positions {
            let mut segments = clip_line(&ring, v);
            if segments.is_empty() {
                continue;
            }
            if !forward {
                segments.reverse();
                for segment in &mut segments {
                    *segment = (segment.1, segment.0);
                }
            }
            for (u_start, u_end) in segments {
                let estimate = segment_point_estimate(u_start, u_end, photo_spacing);
                if points.len() as f64 + estimate > MAX_SCAN_WAYPOINTS as f64 {
                    return Err(too_many());
                }
                for u in sample_segment(u_start, u_end, photo_spacing) {
                    let (x, y) = from_scan_axes((u, v), params.is_north_south);
                    points.push(frame.to_coordinate(x, y));
                }
            }
            forward = !forward;
        }

        let headings = path_headings(&points);
        Ok(build_waypoints(&points, &headings, params))
    }
}

/// Map local (east, north) into (along-line, across-line) axes.
fn to_scan_axes((x, y): (f64, f64), north_south: bool) -> (f64, f64) {
    if north_south {
        (y, x)
    } else {
        (x, y)
    }
}

fn from_scan_axes((u, v): (f64, f64), north_south: bool) -> (f64, f64) {
    if north_south {
        (v, u)
    } else {
        (u, v)
    }
}

/// Drop consecutive duplicates and a closing vertex equal to the first.
fn open_ring(points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let close = |a: (f64, f64), b: (f64, f64)| {
        (a.0 - b.0).abs() < POINT_EPS_M && (a.1 - b.1).abs() < POINT_EPS_M
    };
    let mut ring: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for p in points {
        if ring.last().map_or(true, |last| !close(*last, p)) {
            ring.push(p);
        }
    }
    while ring.len() > 1 && close(ring[0], ring[ring.len() - 1]) {
        ring.pop();
    }
    ring
}

/// Across-line positions, spaced evenly and centred on the ring's extent.
/// `None` when the lines alone would exceed [`MAX_SCAN_WAYPOINTS`].
fn scan_positions(ring: &[(f64, f64)], spacing: f64) -> Option<Vec<f64>> {
    let (v_min, v_max) = ring
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.1), hi.max(p.1))
        });
    let extent = v_max - v_min;
    let count = ((extent - EXTENT_SLACK_M) / spacing).ceil().max(1.0);
    // every line contributes at least its two endpoints
    if !(count * 2.0 <= MAX_SCAN_WAYPOINTS as f64) {
        return None;
    }
    let count = count as usize;
    let offset = (extent - (count - 1) as f64 * spacing) / 2.0;
    Some(
        (0..count)
            .map(|k| v_min + offset + k as f64 * spacing)
            .collect(),
    )
}

/// Entry/exit pairs of the line `v = const` with the ring, ordered by `u`.
fn clip_line(ring: &[(f64, f64)], v: f64) -> Vec<(f64, f64)> {
    let n = ring.len();
    let mut crossings = Vec::new();
    let mut j = n - 1;
    for i in 0..n {
        let (ui, vi) = ring[i];
        let (uj, vj) = ring[j];
        if (vi > v) != (vj > v) {
            crossings.push(ui + (v - vi) * (uj - ui) / (vj - vi));
        }
        j = i;
    }
    crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .filter(|(a, b)| (b - a).abs() > MIN_SEGMENT_M)
        .collect()
}

/// Upper estimate of [`sample_segment`]'s output length.
fn segment_point_estimate(start: f64, end: f64, step: f64) -> f64 {
    if step <= 0.0 {
        2.0
    } else {
        ((end - start).abs() / step).ceil() + 2.0
    }
}

/// Points from `start` to `end` every `step` meters, always including both ends.
/// A non-positive step yields only the endpoints.
fn sample_segment(start: f64, end: f64, step: f64) -> Vec<f64> {
    let length = (end - start).abs();
    if step <= 0.0 || length <= step {
        return vec![start, end];
    }
    let direction = (end - start).signum();
    let mut samples: Vec<f64> = (0..)
        .map(|k| k as f64 * step)
        .take_while(|offset| *offset < length - POINT_EPS_M)
        .map(|offset| start + direction * offset)
        .collect();
    samples.push(end);
    samples
}
