//! Camera handle abstraction over objects owned by a scene runtime.

use crate::constants::DEFAULT_ZOOM;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in scene units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Type tag of a scene object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    OrthographicCamera,
    PerspectiveCamera,
    Mesh,
    Light,
    Group,
    #[serde(other)]
    Other,
}

impl ObjectKind {
    /// Projection mode, or `None` if the object is not a camera
    #[must_use]
    pub const fn projection(&self) -> Option<Projection> {
        match self {
            Self::OrthographicCamera => Some(Projection::Orthographic),
            Self::PerspectiveCamera => Some(Projection::Perspective),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_camera(&self) -> bool {
        self.projection().is_some()
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OrthographicCamera => "OrthographicCamera",
            Self::PerspectiveCamera => "PerspectiveCamera",
            Self::Mesh => "Mesh",
            Self::Light => "Light",
            Self::Group => "Group",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Camera projection mode, deciding how face distance maps to depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Depth expressed as a zoom factor
    Orthographic,
    /// Depth expressed as Z translation
    Perspective,
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orthographic => f.write_str("Orthographic"),
            Self::Perspective => f.write_str("Perspective"),
        }
    }
}

/// Mutable view of an object living inside a scene runtime.
///
/// The runtime owns the object; callers only borrow it for the duration of
/// an update.
pub trait SceneObject {
    /// Object id as known to the scene
    fn id(&self) -> &str;

    /// Type tag
    fn kind(&self) -> ObjectKind;

    /// Current position
    fn position(&self) -> Vec3;

    /// Overwrite the position
    fn set_position(&mut self, position: Vec3);

    /// Current zoom, if the object has one
    fn zoom(&self) -> Option<f64>;

    /// Overwrite the zoom
    fn set_zoom(&mut self, zoom: f64);

    /// Enable or disable the runtime's own interactive camera controls
    fn set_controls_enabled(&mut self, enabled: bool);
}

/// Pose of the tracked camera captured right after a scene load.
///
/// Every face-driven offset is relative to this snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBaseState {
    pub base_position: Vec3,
    pub base_zoom: f64,
}

impl CameraBaseState {
    /// Snapshot the current pose of a camera
    #[must_use]
    pub fn capture(camera: &dyn SceneObject) -> Self {
        Self {
            base_position: camera.position(),
            base_zoom: camera.zoom().unwrap_or(DEFAULT_ZOOM),
        }
    }
}
