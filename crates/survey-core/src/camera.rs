//! Camera ground-footprint math for overlap-driven spacing.

use serde::{Deserialize, Serialize};

/// Pinhole camera description in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraModel {
    pub focal_length_mm: f64,
    pub sensor_width_mm: f64,
    pub sensor_height_mm: f64,
}

impl CameraModel {
    pub fn new(focal_length_mm: f64, sensor_width_mm: f64, sensor_height_mm: f64) -> Self {
        Self {
            focal_length_mm,
            sensor_width_mm,
            sensor_height_mm,
        }
    }

    /// Field of view across the sensor width.
    pub fn horizontal_fov_rad(&self) -> f64 {
        2.0 * (self.sensor_width_mm / (2.0 * self.focal_length_mm)).atan()
    }

    /// Field of view across the sensor height.
    pub fn vertical_fov_rad(&self) -> f64 {
        2.0 * (self.sensor_height_mm / (2.0 * self.focal_length_mm)).atan()
    }

    /// Ground coverage (across-track width, along-track height) in meters for a nadir image.
    pub fn ground_footprint(&self, altitude_m: f64) -> (f64, f64) {
        let width = 2.0 * altitude_m * (self.horizontal_fov_rad() / 2.0).tan();
        let height = 2.0 * altitude_m * (self.vertical_fov_rad() / 2.0).tan();
        (width, height)
    }

    /// Distance between scan lines that keeps `overlap_pct` side overlap.
    pub fn line_spacing(&self, altitude_m: f64, overlap_pct: f64) -> f64 {
        let (width, _) = self.ground_footprint(altitude_m);
        width * (1.0 - overlap_pct / 100.0)
    }

    /// Distance between consecutive photos that keeps `overlap_pct` forward overlap.
    pub fn forward_spacing(&self, altitude_m: f64, overlap_pct: f64) -> f64 {
        let (_, height) = self.ground_footprint(altitude_m);
        height * (1.0 - overlap_pct / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_scales_with_altitude() {
        // 1" sensor (13.2 x 8.8 mm) behind an 8.8 mm lens
        let camera = CameraModel::new(8.8, 13.2, 8.8);
        let (w50, h50) = camera.ground_footprint(50.0);
        let (w100, _) = camera.ground_footprint(100.0);

        assert!((w50 - 75.0).abs() < 1e-9, "width at 50 m was {w50}");
        assert!((h50 - 50.0).abs() < 1e-9, "height at 50 m was {h50}");
        assert!((w100 - 2.0 * w50).abs() < 1e-9);
    }

    #[test]
    fn spacing_shrinks_with_overlap() {
        let camera = CameraModel::new(8.8, 13.2, 8.8);
        assert!((camera.line_spacing(50.0, 0.0) - 75.0).abs() < 1e-9);
        assert!((camera.line_spacing(50.0, 80.0) - 15.0).abs() < 1e-9);
        assert!((camera.forward_spacing(50.0, 70.0) - 15.0).abs() < 1e-9);
    }
}
