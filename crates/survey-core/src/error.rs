//! Error types for waypoint planning and mission export.

use thiserror::Error;

/// Errors raised while resolving parameters or generating waypoints.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Malformed or out-of-range shape or parameter data.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The shape is geometrically impossible to fly (zero radius, too few vertices).
    #[error("invalid shape {shape_id}: {reason}")]
    InvalidShape { shape_id: String, reason: String },

    /// No registered handler accepts the declared shape type.
    #[error("unsupported shape type: {0}")]
    UnsupportedShape(String),
}

impl PlanError {
    pub fn invalid_shape(shape_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            shape_id: shape_id.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while serializing a mission into a KMZ container.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("mission has no waypoints")]
    EmptyMission,

    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build KMZ archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, PlanError>;
