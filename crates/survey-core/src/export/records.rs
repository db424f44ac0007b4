//! Typed wayline records, built from waypoints before serialization.

use crate::models::{MissionConfig, Waypoint, WaypointAction};
use crate::spatial::normalize_heading;
use crate::summary::MissionSummary;

/// How `executeHeight` is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecuteHeightMode {
    #[default]
    RelativeToStartPoint,
    Wgs84,
}

impl ExecuteHeightMode {
    pub fn as_wpml(&self) -> &'static str {
        match self {
            ExecuteHeightMode::RelativeToStartPoint => "relativeToStartPoint",
            ExecuteHeightMode::Wgs84 => "WGS84",
        }
    }
}

/// One flyable route inside `waylines.wpml`.
#[derive(Debug, Clone, PartialEq)]
pub struct Wayline {
    pub template_id: u32,
    pub wayline_id: u32,
    pub execute_height_mode: ExecuteHeightMode,
    pub distance_m: f64,
    pub duration_s: f64,
    pub auto_flight_speed_mps: f64,
    pub placemarks: Vec<PlacemarkRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacemarkRecord {
    pub index: u32,
    pub lng: f64,
    pub lat: f64,
    pub execute_height_m: f64,
    pub waypoint_speed_mps: f64,
    pub heading: HeadingParam,
    pub turn: TurnParam,
    pub use_straight_line: bool,
    pub action_group: Option<ActionGroup>,
}

/// Aircraft yaw at a waypoint. Without an angle the aircraft follows the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingParam {
    /// Signed heading in (-180, 180]
    pub angle_deg: Option<f64>,
}

impl HeadingParam {
    pub fn mode(&self) -> &'static str {
        match self.angle_deg {
            Some(_) => "smoothTransition",
            None => "followWayline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnMode {
    /// Stop at the waypoint, then turn
    StopAndTurn,
    /// Fly through the waypoint on a continuous curve
    PassThrough,
}

impl TurnMode {
    pub fn as_wpml(&self) -> &'static str {
        match self {
            TurnMode::StopAndTurn => "toPointAndStopWithDiscontinuityCurvature",
            TurnMode::PassThrough => "toPointAndPassWithContinuityCurvature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnParam {
    pub mode: TurnMode,
    pub damping_dist_m: f64,
}

/// Actions executed in sequence on reaching a waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionGroup {
    pub id: u32,
    pub start_index: u32,
    pub end_index: u32,
    pub actions: Vec<ActuatorAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorAction {
    pub id: u32,
    pub func: ActuatorFunc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActuatorFunc {
    TakePhoto,
    StartRecord,
    StopRecord,
    GimbalRotate { pitch_deg: f64 },
}

impl ActuatorFunc {
    pub fn name(&self) -> &'static str {
        match self {
            ActuatorFunc::TakePhoto => "takePhoto",
            ActuatorFunc::StartRecord => "startRecord",
            ActuatorFunc::StopRecord => "stopRecord",
            ActuatorFunc::GimbalRotate { .. } => "gimbalRotate",
        }
    }

    /// Actuator triggered by a waypoint action, `None` for `noAction`.
    pub fn for_action(action: WaypointAction) -> Option<Self> {
        match action {
            WaypointAction::NoAction => None,
            WaypointAction::TakePhoto => Some(ActuatorFunc::TakePhoto),
            WaypointAction::StartRecord => Some(ActuatorFunc::StartRecord),
            WaypointAction::StopRecord => Some(ActuatorFunc::StopRecord),
        }
    }
}

/// Heading in WPML's signed convention.
pub fn signed_heading(deg: f64) -> f64 {
    let heading = normalize_heading(deg);
    if heading > 180.0 {
        heading - 360.0
    } else {
        heading
    }
}

impl Wayline {
    pub fn from_waypoints(waypoints: &[Waypoint], config: &MissionConfig) -> Self {
        let summary = MissionSummary::from_waypoints(waypoints);
        let last = waypoints.len().saturating_sub(1);

        let mut next_group_id = 0u32;
        let mut current_pitch: Option<f64> = None;
        let mut placemarks = Vec::with_capacity(waypoints.len());

        for (position, wp) in waypoints.iter().enumerate() {
            let mut actions = Vec::new();
            if let Some(pitch) = wp.gimbal_pitch_deg {
                if current_pitch != Some(pitch) {
                    actions.push(ActuatorFunc::GimbalRotate { pitch_deg: pitch });
                    current_pitch = Some(pitch);
                }
            }
            if let Some(func) = ActuatorFunc::for_action(wp.action) {
                actions.push(func);
            }

            let action_group = if actions.is_empty() {
                None
            } else {
                let group = ActionGroup {
                    id: next_group_id,
                    start_index: wp.index,
                    end_index: wp.index,
                    actions: actions
                        .into_iter()
                        .enumerate()
                        .map(|(id, func)| ActuatorAction { id: id as u32, func })
                        .collect(),
                };
                next_group_id += 1;
                Some(group)
            };

            let stops = position == 0 || position == last || action_group.is_some();
            placemarks.push(PlacemarkRecord {
                index: wp.index,
                lng: wp.lng,
                lat: wp.lat,
                execute_height_m: wp.altitude_m,
                waypoint_speed_mps: wp.speed_mps,
                heading: HeadingParam {
                    angle_deg: wp.heading_deg.is_finite().then(|| signed_heading(wp.heading_deg)),
                },
                turn: TurnParam {
                    mode: if stops {
                        TurnMode::StopAndTurn
                    } else {
                        TurnMode::PassThrough
                    },
                    damping_dist_m: 0.0,
                },
                use_straight_line: true,
                action_group,
            });
        }

        Self {
            template_id: 0,
            wayline_id: 0,
            execute_height_mode: ExecuteHeightMode::default(),
            distance_m: summary.total_distance_m,
            duration_s: summary.estimated_duration_s,
            auto_flight_speed_mps: config.global_transitional_speed_mps,
            placemarks,
        }
    }
}
