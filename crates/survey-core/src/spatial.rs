//! Spatial math for distances, bearings and local planar projections.
//!
//! Everything here works on a sphere with the WGS-84 equatorial radius so that
//! [`destination`] and [`haversine_distance`] agree with each other exactly.

use crate::models::Coordinate;
use std::f64::consts::PI;

/// WGS-84 equatorial radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// # Arguments
/// * `lat1`, `lng1` - First point coordinates in decimal degrees
/// * `lat2`, `lng2` - Second point coordinates in decimal degrees
///
/// # Returns
/// Distance in meters
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lng2 - lng1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Distance between two coordinates in meters.
pub fn distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance(from.lat, from.lng, to.lat, to.lng)
}

/// Initial bearing from point 1 to point 2 in degrees, 0 = north, clockwise, [0, 360).
pub fn bearing_deg(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lng2 - lng1).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    normalize_heading(x.atan2(y).to_degrees())
}

/// Wrap any angle in degrees into [0, 360).
pub fn normalize_heading(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Project a point `distance_m` from `origin` along `bearing_deg`.
///
/// # Arguments
/// * `lat`, `lng` - Starting position in degrees
/// * `bearing_deg` - Bearing in degrees (0 = north, 90 = east)
/// * `distance_m` - Distance in meters
pub fn destination(lat: f64, lng: f64, bearing_deg: f64, distance_m: f64) -> Coordinate {
    if distance_m.abs() <= f64::EPSILON {
        return Coordinate::new(lat, lng);
    }

    let lat1 = lat.to_radians();
    let lng1 = lng.to_radians();
    let bearing_rad = bearing_deg.to_radians();
    let angular_distance = distance_m / EARTH_RADIUS_M;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let mut lng2 = lng1 + y.atan2(x);
    lng2 = (lng2 + PI).rem_euclid(2.0 * PI) - PI;

    Coordinate::new(lat2.to_degrees(), lng2.to_degrees())
}

/// Sum of great-circle distances along a path.
pub fn path_length_m(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(&pair[0], &pair[1]))
        .sum()
}

/// Area of a simple polygon in square meters.
///
/// The ring may be open or closed; a closing vertex adds a zero-length edge.
pub fn polygon_area_m2(vertices: &[Coordinate]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let frame = LocalFrame::around(vertices);
    let points: Vec<(f64, f64)> = vertices.iter().map(|v| frame.to_xy(v)).collect();
    shoelace_area(&points)
}

/// Unsigned area of a planar ring.
pub(crate) fn shoelace_area(points: &[(f64, f64)]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..n {
        let (x1, y1) = points[i];
        let (x2, y2) = points[(i + 1) % n];
        twice_area += x1 * y2 - x2 * y1;
    }
    (twice_area / 2.0).abs()
}

// ==== Local tangent plane ====

/// Equirectangular projection around a reference point.
///
/// x grows east and y grows north, both in meters. Accurate to well under a
/// meter for survey-sized areas (a few kilometres across).
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    origin: Coordinate,
    cos_lat: f64,
}

impl LocalFrame {
    pub fn new(origin: Coordinate) -> Self {
        let cos_lat = origin.lat.to_radians().cos().max(1e-9);
        Self { origin, cos_lat }
    }

    /// Frame centred on the bounding box of `points`.
    pub fn around(points: &[Coordinate]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(Coordinate::new(0.0, 0.0));
        };
        let (mut min_lat, mut max_lat) = (first.lat, first.lat);
        let (mut min_lng, mut max_lng) = (first.lng, first.lng);
        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }
        Self::new(Coordinate::new(
            (min_lat + max_lat) / 2.0,
            (min_lng + max_lng) / 2.0,
        ))
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn to_xy(&self, point: &Coordinate) -> (f64, f64) {
        let mut dlng = point.lng - self.origin.lng;
        if dlng > 180.0 {
            dlng -= 360.0;
        } else if dlng < -180.0 {
            dlng += 360.0;
        }
        let x = dlng.to_radians() * EARTH_RADIUS_M * self.cos_lat;
        let y = (point.lat - self.origin.lat).to_radians() * EARTH_RADIUS_M;
        (x, y)
    }

    pub fn to_coordinate(&self, x: f64, y: f64) -> Coordinate {
        let lat = self.origin.lat + (y / EARTH_RADIUS_M).to_degrees();
        let mut lng = self.origin.lng + (x / (EARTH_RADIUS_M * self.cos_lat)).to_degrees();
        if lng > 180.0 {
            lng -= 360.0;
        } else if lng < -180.0 {
            lng += 360.0;
        }
        Coordinate::new(lat, lng)
    }
}
