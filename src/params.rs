//! Operator-tunable tracking parameters.

use crate::constants::{DEFAULT_SCENE_URL, DEFAULT_SENSITIVITY, DEFAULT_SMOOTHING};
use serde::{Deserialize, Serialize};

/// Parameter set read by the mapper every frame and written by the control panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingParams {
    /// Horizontal camera travel (0 to 10)
    pub x_sensitivity: f64,

    /// Vertical camera travel (0 to 10)
    pub y_sensitivity: f64,

    /// Zoom or depth travel (0 to 10)
    pub z_sensitivity: f64,

    /// Fraction of the remaining distance covered per frame (0 to 0.5)
    pub smoothing_factor: f64,

    /// Scene loaded at startup and on reload
    pub scene_url: String,
}

impl Default for TrackingParams {
    fn default() -> Self {
        Self {
            x_sensitivity: DEFAULT_SENSITIVITY,
            y_sensitivity: DEFAULT_SENSITIVITY,
            z_sensitivity: DEFAULT_SENSITIVITY,
            smoothing_factor: DEFAULT_SMOOTHING,
            scene_url: DEFAULT_SCENE_URL.to_string(),
        }
    }
}
