//! Request shaping: inbound loosely-typed parameters resolved into validated,
//! metric [`WaypointParameters`].
//!
//! This is the single place where defaults are applied and units converted.

use crate::camera::CameraModel;
use crate::error::{PlanError, Result};
use crate::models::{Coordinate, ShapeData, UnitType, WaypointAction, WaypointParameters};
use serde::{Deserialize, Serialize};
use std::env;

const FEET_TO_METERS: f64 = 0.3048;
const MPH_TO_MPS: f64 = 0.44704;

const MIN_GIMBAL_PITCH_DEG: f64 = -90.0;
const MAX_GIMBAL_PITCH_DEG: f64 = 30.0;
const MIN_DERIVED_SPEED_MPS: f64 = 1.0;

/// Flight parameters as submitted by a client. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaypointRequest {
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    /// Gimbal pitch in degrees
    pub angle: Option<f64>,
    pub line_spacing: Option<f64>,
    pub photo_interval: Option<f64>,
    pub overlap: Option<f64>,
    pub focal_length: Option<f64>,
    pub sensor_width: Option<f64>,
    pub sensor_height: Option<f64>,
    pub starting_index: Option<u32>,
    pub action: Option<WaypointAction>,
    pub final_action: Option<WaypointAction>,
    pub is_north_south: Option<bool>,
    pub use_endpoints_only: Option<bool>,
    pub unit_type: Option<UnitType>,
    pub manual_speed_set: Option<bool>,
}

/// A shape as submitted by a client, with its type still a free-form string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub shape_type: String,
    pub coordinates: Vec<Coordinate>,
    #[serde(default)]
    pub radius: Option<f64>,
}

impl TryFrom<ShapeRequest> for ShapeData {
    type Error = PlanError;

    fn try_from(request: ShapeRequest) -> Result<Self> {
        Ok(ShapeData {
            shape_type: request.shape_type.parse()?,
            id: request.id,
            coordinates: request.coordinates,
            radius: request.radius,
        })
    }
}

/// Default parameter values, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDefaults {
    pub altitude_m: f64,
    pub speed_mps: f64,
    pub overlap_pct: f64,
    pub line_spacing_m: f64,
    pub photo_interval_s: f64,
    pub gimbal_pitch_deg: Option<f64>,
    /// Upper bound for overlap-derived speeds
    pub max_speed_mps: f64,
}

impl Default for ParameterDefaults {
    fn default() -> Self {
        Self {
            altitude_m: 60.0,
            speed_mps: 10.0,
            overlap_pct: 70.0,
            line_spacing_m: 20.0,
            photo_interval_s: 2.0,
            gimbal_pitch_deg: Some(-90.0),
            max_speed_mps: 15.0,
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|v: &f64| v.is_finite())
}

impl ParameterDefaults {
    pub fn from_env() -> Self {
        let fallback = Self::default();
        Self {
            altitude_m: env_f64("SURVEY_DEFAULT_ALTITUDE_M").unwrap_or(fallback.altitude_m),
            speed_mps: env_f64("SURVEY_DEFAULT_SPEED_MPS").unwrap_or(fallback.speed_mps),
            overlap_pct: env_f64("SURVEY_DEFAULT_OVERLAP_PCT").unwrap_or(fallback.overlap_pct),
            line_spacing_m: env_f64("SURVEY_DEFAULT_LINE_SPACING_M")
                .unwrap_or(fallback.line_spacing_m),
            photo_interval_s: env_f64("SURVEY_DEFAULT_PHOTO_INTERVAL_S")
                .unwrap_or(fallback.photo_interval_s),
            gimbal_pitch_deg: match env::var("SURVEY_DEFAULT_GIMBAL_PITCH_DEG") {
                Ok(value) if value.trim().eq_ignore_ascii_case("none") => None,
                Ok(value) => value
                    .trim()
                    .parse()
                    .ok()
                    .or(fallback.gimbal_pitch_deg),
                Err(_) => fallback.gimbal_pitch_deg,
            },
            max_speed_mps: env_f64("SURVEY_MAX_SPEED_MPS").unwrap_or(fallback.max_speed_mps),
        }
    }

    /// Fill defaults, convert to metric and validate.
    pub fn resolve(&self, request: &WaypointRequest) -> Result<WaypointParameters> {
        let unit_type = request.unit_type.unwrap_or_default();
        let (length_scale, speed_scale) = match unit_type {
            UnitType::Metric => (1.0, 1.0),
            UnitType::Imperial => (FEET_TO_METERS, MPH_TO_MPS),
        };

        let mut errors = Vec::new();

        let altitude_m = request
            .altitude
            .map(|v| v * length_scale)
            .unwrap_or(self.altitude_m);
        if !(altitude_m.is_finite() && altitude_m > 0.0) {
            errors.push(format!("altitude must be positive, got {}", altitude_m));
        }

        let requested_speed = request
            .speed
            .map(|v| v * speed_scale)
            .unwrap_or(self.speed_mps);
        if !(requested_speed.is_finite() && requested_speed > 0.0) {
            errors.push(format!("speed must be positive, got {}", requested_speed));
        }

        let overlap_pct = request.overlap.unwrap_or(self.overlap_pct);
        if !(0.0..100.0).contains(&overlap_pct) {
            errors.push(format!("overlap must be in [0, 100), got {}", overlap_pct));
        }

        let photo_interval_s = request.photo_interval.unwrap_or(self.photo_interval_s);
        if !(photo_interval_s.is_finite() && photo_interval_s >= 0.0) {
            errors.push(format!(
                "photo interval must be non-negative, got {}",
                photo_interval_s
            ));
        }

        let line_spacing_m = request.line_spacing.map(|v| v * length_scale);
        if let Some(spacing) = line_spacing_m {
            if !(spacing.is_finite() && spacing > 0.0) {
                errors.push(format!("line spacing must be positive, got {}", spacing));
            }
        }

        let angle = request.angle.or(self.gimbal_pitch_deg);
        if let Some(angle) = angle {
            if !(MIN_GIMBAL_PITCH_DEG..=MAX_GIMBAL_PITCH_DEG).contains(&angle) {
                errors.push(format!(
                    "gimbal angle must be in [{}, {}], got {}",
                    MIN_GIMBAL_PITCH_DEG, MAX_GIMBAL_PITCH_DEG, angle
                ));
            }
        }

        let camera = match (request.focal_length, request.sensor_width) {
            (Some(focal), Some(width)) => {
                let height = request.sensor_height.unwrap_or(width * 2.0 / 3.0);
                for (name, value) in [
                    ("focal length", focal),
                    ("sensor width", width),
                    ("sensor height", height),
                ] {
                    if !(value.is_finite() && value > 0.0) {
                        errors.push(format!("{} must be positive, got {}", name, value));
                    }
                }
                Some(CameraModel::new(focal, width, height))
            }
            _ => None,
        };

        if !errors.is_empty() {
            return Err(PlanError::Validation(errors.join("; ")));
        }

        let manual_speed_set = request.manual_speed_set.unwrap_or(request.speed.is_some());
        let speed_mps = match (&camera, manual_speed_set) {
            (Some(camera), false) if photo_interval_s > 0.0 => {
                let spacing = camera.forward_spacing(altitude_m, overlap_pct);
                (spacing / photo_interval_s)
                    .clamp(MIN_DERIVED_SPEED_MPS, self.max_speed_mps.max(MIN_DERIVED_SPEED_MPS))
            }
            _ => requested_speed,
        };

        // Without a camera the scan handler needs an explicit spacing.
        let line_spacing_m = if camera.is_none() {
            Some(line_spacing_m.unwrap_or(self.line_spacing_m))
        } else {
            line_spacing_m
        };

        Ok(WaypointParameters {
            altitude_m,
            speed_mps,
            angle,
            line_spacing_m,
            photo_interval_s,
            overlap_pct,
            camera,
            starting_index: request.starting_index.unwrap_or(0),
            action: request.action.unwrap_or_default(),
            final_action: request.final_action,
            is_north_south: request.is_north_south.unwrap_or(false),
            use_endpoints_only: request.use_endpoints_only.unwrap_or(false),
            unit_type,
            manual_speed_set,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShapeKind;

    #[test]
    fn empty_request_takes_defaults() {
        let defaults = ParameterDefaults::default();
        let params = defaults.resolve(&WaypointRequest::default()).unwrap();

        assert_eq!(params.altitude_m, 60.0);
        assert_eq!(params.speed_mps, 10.0);
        assert_eq!(params.line_spacing_m, Some(20.0));
        assert_eq!(params.angle, Some(-90.0));
        assert_eq!(params.action, WaypointAction::NoAction);
        assert_eq!(params.starting_index, 0);
        assert!(params.camera.is_none());
        assert!(!params.manual_speed_set);
    }

    #[test]
    fn imperial_units_convert_to_metric() {
        let request = WaypointRequest {
            altitude: Some(200.0),
            speed: Some(20.0),
            line_spacing: Some(50.0),
            unit_type: Some(UnitType::Imperial),
            ..Default::default()
        };
        let params = ParameterDefaults::default().resolve(&request).unwrap();

        assert!((params.altitude_m - 60.96).abs() < 1e-9);
        assert!((params.speed_mps - 8.9408).abs() < 1e-9);
        assert!((params.line_spacing_m.unwrap() - 15.24).abs() < 1e-9);
        assert_eq!(params.unit_type, UnitType::Imperial);
    }

    #[test]
    fn imperial_request_keeps_metric_defaults() {
        let request = WaypointRequest {
            unit_type: Some(UnitType::Imperial),
            ..Default::default()
        };
        let params = ParameterDefaults::default().resolve(&request).unwrap();

        assert_eq!(params.line_spacing_m, Some(20.0));
        assert_eq!(params.altitude_m, 60.0);
        assert_eq!(params.speed_mps, 10.0);
    }

    #[test]
    fn invalid_values_are_collected_into_one_error() {
        let request = WaypointRequest {
            altitude: Some(-5.0),
            overlap: Some(100.0),
            angle: Some(45.0),
            ..Default::default()
        };
        match ParameterDefaults::default().resolve(&request) {
            Err(PlanError::Validation(msg)) => {
                assert!(msg.contains("altitude"), "{msg}");
                assert!(msg.contains("overlap"), "{msg}");
                assert!(msg.contains("gimbal"), "{msg}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn speed_follows_forward_overlap_unless_set_manually() {
        let mut request = WaypointRequest {
            altitude: Some(50.0),
            overlap: Some(70.0),
            photo_interval: Some(3.0),
            focal_length: Some(8.8),
            sensor_width: Some(13.2),
            sensor_height: Some(8.8),
            ..Default::default()
        };
        let params = ParameterDefaults::default().resolve(&request).unwrap();
        // 50 m footprint height, 30% advance per photo, every 3 s
        assert!((params.speed_mps - 5.0).abs() < 1e-9, "{}", params.speed_mps);
        assert!(params.camera.is_some());
        assert_eq!(params.line_spacing_m, None);

        request.speed = Some(12.0);
        request.manual_speed_set = Some(true);
        let params = ParameterDefaults::default().resolve(&request).unwrap();
        assert_eq!(params.speed_mps, 12.0);
    }

    #[test]
    fn derived_speed_is_clamped() {
        let request = WaypointRequest {
            altitude: Some(120.0),
            overlap: Some(0.0),
            photo_interval: Some(1.0),
            focal_length: Some(8.8),
            sensor_width: Some(13.2),
            sensor_height: Some(8.8),
            ..Default::default()
        };
        let params = ParameterDefaults::default().resolve(&request).unwrap();
        assert_eq!(params.speed_mps, 15.0);
    }

    #[test]
    fn shape_request_rejects_unknown_type() {
        let request = ShapeRequest {
            id: "s1".into(),
            shape_type: "triangle".into(),
            coordinates: vec![Coordinate::new(1.0, 1.0)],
            radius: None,
        };
        assert_eq!(
            ShapeData::try_from(request),
            Err(PlanError::UnsupportedShape("triangle".into()))
        );

        let request = ShapeRequest {
            id: "s2".into(),
            shape_type: "Circle".into(),
            coordinates: vec![Coordinate::new(1.0, 1.0)],
            radius: Some(30.0),
        };
        let shape = ShapeData::try_from(request).unwrap();
        assert_eq!(shape.shape_type, ShapeKind::Circle);
    }

    #[test]
    fn request_deserializes_from_camel_case() {
        let json = r#"{"altitude":80,"isNorthSouth":true,"action":"takePhoto","finalAction":"stopRecord","unitType":"metric"}"#;
        let request: WaypointRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.altitude, Some(80.0));
        assert_eq!(request.is_north_south, Some(true));
        assert_eq!(request.action, Some(WaypointAction::TakePhoto));
        assert_eq!(request.final_action, Some(WaypointAction::StopRecord));
    }
}
