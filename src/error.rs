//! Error types for the face parallax library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene or configuration document could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Video capture could not be opened or read
    #[error("Capture error: {0}")]
    Capture(String),

    /// Cascade data missing or detector unusable
    #[error("Detector error: {0}")]
    Detector(String),

    /// Scene runtime failed to load a scene
    #[error("Scene load error: {0}")]
    SceneLoad(String),

    /// The configured camera id is not present in the loaded scene
    #[error("Camera not found in scene: {0}")]
    CameraNotFound(String),

    /// The object found under the camera id is not a camera
    #[error("Object {id} is a {kind}, not a camera")]
    NotACamera {
        /// Object id that was looked up
        id: String,
        /// Type tag reported by the scene
        kind: String,
    },

    /// Scene runtime failed to render
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
