pub mod camera;
pub mod error;
pub mod export;
pub mod models;
pub mod orchestrator;
pub mod params;
pub mod shapes;
pub mod spatial;
pub mod summary;

pub use camera::CameraModel;
pub use error::{ExportError, PlanError, Result};
pub use export::{export, MissionExporter};
pub use models::{
    Coordinate, DroneInfo, ExitOnRcLost, FinishAction, FlightMission, FlyToWaylineMode,
    MissionConfig, RcLostAction, ShapeData, ShapeKind, UnitType, Waypoint, WaypointAction,
    WaypointParameters,
};
pub use orchestrator::{generate_waypoints, WaypointOrchestrator};
pub use params::{ParameterDefaults, ShapeRequest, WaypointRequest};
pub use shapes::{AreaScanHandler, CircleHandler, PolylineHandler, ShapeHandler};
pub use spatial::{destination, haversine_distance};
pub use summary::MissionSummary;
