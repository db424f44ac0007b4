//! Core data models for survey mission planning.

use crate::camera::CameraModel;
use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
    /// Circle radius in meters, only meaningful on a circle's centre point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            radius: None,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// Kind of area drawn by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Polygon,
    Circle,
    Polyline,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Rectangle,
        ShapeKind::Polygon,
        ShapeKind::Circle,
        ShapeKind::Polyline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Circle => "circle",
            ShapeKind::Polyline => "polyline",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| PlanError::UnsupportedShape(s.to_string()))
    }
}

/// A shape submitted for waypoint generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    pub id: String,
    #[serde(rename = "type")]
    pub shape_type: ShapeKind,
    /// Rectangle corners, polygon vertices, polyline points or a circle centre.
    pub coordinates: Vec<Coordinate>,
    /// Circle radius in meters
    #[serde(default)]
    pub radius: Option<f64>,
}

impl ShapeData {
    pub fn new(id: impl Into<String>, shape_type: ShapeKind, coordinates: Vec<Coordinate>) -> Self {
        Self {
            id: id.into(),
            shape_type,
            coordinates,
            radius: None,
        }
    }

    pub fn circle(id: impl Into<String>, center: Coordinate, radius_m: f64) -> Self {
        Self {
            id: id.into(),
            shape_type: ShapeKind::Circle,
            coordinates: vec![center],
            radius: Some(radius_m),
        }
    }

    /// Circle radius from the shape, falling back to the centre coordinate.
    pub fn radius_m(&self) -> Option<f64> {
        self.radius
            .or_else(|| self.coordinates.first().and_then(|c| c.radius))
    }

    /// Validate coordinate ranges.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, coord) in self.coordinates.iter().enumerate() {
            if !coord.is_finite() {
                errors.push(format!("coordinate {} is not a finite number", i));
                continue;
            }
            if !(-90.0..=90.0).contains(&coord.lat) {
                errors.push(format!(
                    "coordinate {} latitude {} outside [-90, 90]",
                    i, coord.lat
                ));
            }
            if !(-180.0..=180.0).contains(&coord.lng) {
                errors.push(format!(
                    "coordinate {} longitude {} outside [-180, 180]",
                    i, coord.lng
                ));
            }
        }

        if let Some(radius) = self.radius {
            if !radius.is_finite() || radius < 0.0 {
                errors.push(format!("radius {} must be a non-negative number", radius));
            }
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Camera or actuator action performed on arrival at a waypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaypointAction {
    #[default]
    NoAction,
    TakePhoto,
    StartRecord,
    StopRecord,
}

/// Unit system the operator entered distances and speeds in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    #[default]
    Metric,
    /// Feet for distances, miles per hour for speed
    Imperial,
}

/// Resolved, metric flight parameters shared by every shape in a request.
///
/// Built once per request by [`crate::params::ParameterDefaults::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointParameters {
    pub altitude_m: f64,
    pub speed_mps: f64,
    /// Gimbal pitch in degrees (-90 = straight down). `None` leaves the gimbal alone.
    pub angle: Option<f64>,
    /// Explicit distance between scan lines
    pub line_spacing_m: Option<f64>,
    /// Seconds between photos along a scan line
    pub photo_interval_s: f64,
    /// Side/forward image overlap in percent
    pub overlap_pct: f64,
    pub camera: Option<CameraModel>,
    pub starting_index: u32,
    pub action: WaypointAction,
    /// Overrides the action of the last waypoint of each shape
    pub final_action: Option<WaypointAction>,
    pub is_north_south: bool,
    pub use_endpoints_only: bool,
    pub unit_type: UnitType,
    pub manual_speed_set: bool,
}

impl WaypointParameters {
    /// Distance between adjacent scan lines.
    ///
    /// The camera footprint wins over an explicit spacing when a camera is configured.
    pub fn scan_spacing_m(&self) -> Option<f64> {
        let from_camera = self
            .camera
            .as_ref()
            .map(|camera| camera.line_spacing(self.altitude_m, self.overlap_pct));
        from_camera
            .or(self.line_spacing_m)
            .filter(|spacing| spacing.is_finite() && *spacing > 0.0)
    }

    /// Distance flown between photo triggers along a scan line (0 = endpoints only).
    pub fn photo_spacing_m(&self) -> f64 {
        let spacing = self.photo_interval_s * self.speed_mps;
        if spacing.is_finite() && spacing > 0.0 {
            spacing
        } else {
            0.0
        }
    }
}

/// A single generated mission waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub index: u32,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "altitude")]
    pub altitude_m: f64,
    #[serde(rename = "speed")]
    pub speed_mps: f64,
    /// Heading in degrees, 0 = north, clockwise, [0, 360)
    #[serde(rename = "heading")]
    pub heading_deg: f64,
    pub action: WaypointAction,
    #[serde(rename = "gimbalPitch", default, skip_serializing_if = "Option::is_none")]
    pub gimbal_pitch_deg: Option<f64>,
}

impl Waypoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

// ========== MISSION EXPORT MODELS ==========

/// How the aircraft flies from take-off to the first waypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlyToWaylineMode {
    /// Climb to altitude first, then fly over
    #[default]
    Safely,
    PointToPoint,
}

impl FlyToWaylineMode {
    pub fn as_wpml(&self) -> &'static str {
        match self {
            FlyToWaylineMode::Safely => "safely",
            FlyToWaylineMode::PointToPoint => "pointToPoint",
        }
    }
}

/// What the aircraft does after the last waypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FinishAction {
    #[default]
    GoHome,
    NoAction,
    AutoLand,
    GotoFirstWaypoint,
}

impl FinishAction {
    pub fn as_wpml(&self) -> &'static str {
        match self {
            FinishAction::GoHome => "goHome",
            FinishAction::NoAction => "noAction",
            FinishAction::AutoLand => "autoLand",
            FinishAction::GotoFirstWaypoint => "gotoFirstWaypoint",
        }
    }
}

/// Whether the wayline continues when the remote controller link is lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExitOnRcLost {
    GoContinue,
    #[default]
    ExecuteLostAction,
}

impl ExitOnRcLost {
    pub fn as_wpml(&self) -> &'static str {
        match self {
            ExitOnRcLost::GoContinue => "goContinue",
            ExitOnRcLost::ExecuteLostAction => "executeLostAction",
        }
    }
}

/// Action executed after the remote controller link is lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RcLostAction {
    #[default]
    GoBack,
    Landing,
    Hover,
}

impl RcLostAction {
    pub fn as_wpml(&self) -> &'static str {
        match self {
            RcLostAction::GoBack => "goBack",
            RcLostAction::Landing => "landing",
            RcLostAction::Hover => "hover",
        }
    }
}

/// Aircraft model identifiers from the vendor's enum tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneInfo {
    pub enum_value: u32,
    pub sub_enum_value: u32,
}

impl Default for DroneInfo {
    fn default() -> Self {
        Self {
            enum_value: 68,
            sub_enum_value: 0,
        }
    }
}

/// Mission-level settings written to both KMZ documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MissionConfig {
    pub fly_to_wayline_mode: FlyToWaylineMode,
    pub finish_action: FinishAction,
    #[serde(rename = "exitOnRCLost")]
    pub exit_on_rc_lost: ExitOnRcLost,
    #[serde(rename = "executeRCLostAction")]
    pub execute_rc_lost_action: RcLostAction,
    /// Climb height before heading to the first waypoint
    #[serde(rename = "takeOffSecurityHeight")]
    pub take_off_security_height_m: f64,
    #[serde(rename = "globalTransitionalSpeed")]
    pub global_transitional_speed_mps: f64,
    pub drone_info: DroneInfo,
    pub author: Option<String>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            fly_to_wayline_mode: FlyToWaylineMode::default(),
            finish_action: FinishAction::default(),
            exit_on_rc_lost: ExitOnRcLost::default(),
            execute_rc_lost_action: RcLostAction::default(),
            take_off_security_height_m: 20.0,
            global_transitional_speed_mps: 10.0,
            drone_info: DroneInfo::default(),
            author: None,
        }
    }
}

/// Everything the exporter needs to build one KMZ file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightMission {
    #[serde(flatten)]
    pub config: MissionConfig,
    pub waypoints: Vec<Waypoint>,
}

impl FlightMission {
    pub fn new(config: MissionConfig, waypoints: Vec<Waypoint>) -> Self {
        Self { config, waypoints }
    }
}
