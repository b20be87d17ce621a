//! Configuration management for the face parallax application

use crate::{
    constants::{
        DEFAULT_CAMERA_ID, DEFAULT_CASCADE_FILE, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, SENSITIVITY_MAX,
        SMOOTHING_MAX,
    },
    detector::DetectorParams,
    params::TrackingParams,
    scene::CameraLookup,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Operator parameters at startup
    pub tracking: TrackingParams,

    /// Face detection configuration
    pub detector: DetectorConfig,

    /// Video capture configuration
    pub capture: CaptureConfig,

    /// Scene configuration
    pub scene: SceneConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Face detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Path to the cascade classifier XML
    pub cascade: PathBuf,

    /// Multi-scale detection parameters
    #[serde(flatten)]
    pub params: DetectorParams,
}

/// Video capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Camera index
    pub camera_index: i32,

    /// Requested frame width
    pub width: i32,

    /// Requested frame height
    pub height: i32,
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Id of the camera object to drive
    pub camera_id: String,

    /// Track the first camera in the scene when the id is missing
    pub camera_fallback: bool,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the video window, overlays and control panel at startup
    pub show_overlays: bool,

    /// Mirror the camera image horizontally before processing
    pub mirror: bool,

    /// Delay passed to `wait_key` between frames, in milliseconds
    pub frame_delay_ms: i32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            cascade: PathBuf::from(DEFAULT_CASCADE_FILE),
            params: DetectorParams::default(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            width: DEFAULT_FRAME_WIDTH,
            height: DEFAULT_FRAME_HEIGHT,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_id: DEFAULT_CAMERA_ID.to_string(),
            camera_fallback: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_overlays: true,
            mirror: false,
            frame_delay_ms: 1,
        }
    }
}

impl SceneConfig {
    /// Camera lookup policy selected by this configuration
    #[must_use]
    pub const fn lookup(&self) -> CameraLookup {
        if self.camera_fallback {
            CameraLookup::AnyCamera
        } else {
            CameraLookup::Strict
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let tracking = &self.tracking;
        for (name, value) in [
            ("X sensitivity", tracking.x_sensitivity),
            ("Y sensitivity", tracking.y_sensitivity),
            ("Z sensitivity", tracking.z_sensitivity),
        ] {
            if !(0.0..=SENSITIVITY_MAX).contains(&value) {
                return Err(Error::ConfigError(format!(
                    "{name} must be between 0.0 and {SENSITIVITY_MAX}"
                )));
            }
        }
        if !(0.0..=SMOOTHING_MAX).contains(&tracking.smoothing_factor) {
            return Err(Error::ConfigError(format!(
                "Smoothing factor must be between 0.0 and {SMOOTHING_MAX}"
            )));
        }
        if tracking.scene_url.trim().is_empty() {
            return Err(Error::ConfigError("Scene URL must not be empty".to_string()));
        }

        self.detector.params.validate()?;

        if self.capture.width <= 0 || self.capture.height <= 0 {
            return Err(Error::ConfigError("Capture size must be positive".to_string()));
        }

        if self.scene.camera_id.trim().is_empty() && !self.scene.camera_fallback {
            return Err(Error::ConfigError(
                "Camera id must be set unless camera fallback is enabled".to_string(),
            ));
        }

        if self.display.frame_delay_ms <= 0 {
            return Err(Error::ConfigError("Frame delay must be at least 1 ms".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Face Parallax Configuration

# Operator parameters (also adjustable from the control panel)
tracking:
  x_sensitivity: 5.0
  y_sensitivity: 5.0
  z_sensitivity: 5.0
  smoothing_factor: 0.1
  scene_url: "assets/scene.yaml"

# Cascade face detector
detector:
  cascade: "assets/haarcascade_frontalface_default.xml"
  scale_factor: 1.1
  min_neighbors: 5
  min_size: 100
  max_size: 0

# Video capture
capture:
  camera_index: 0
  width: 640
  height: 480

# Scene camera binding
scene:
  camera_id: "56c30b36-44df-48b7-89f1-27070018dad0"
  camera_fallback: false

# Display settings
display:
  show_overlays: true
  mirror: false
  frame_delay_ms: 1
"#;
