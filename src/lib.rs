//! Head-tracked parallax for 3D scenes.
//!
//! A webcam face is located with an `OpenCV` cascade classifier, and its
//! position and apparent size drive the camera of a 3D scene:
//! 1. Convert the frame to grayscale and detect faces
//! 2. Keep the largest face and normalize it against the frame
//! 3. Compute a camera target relative to the camera's base pose
//! 4. Ease the camera toward the target and request a render
//!
//! # Examples
//!
//! ## Driving a scene camera
//!
//! ```no_run
//! use face_parallax::{
//!     constants::DEFAULT_CAMERA_ID,
//!     document_scene::DocumentScene,
//!     mapper::PositionMapper,
//!     observation::{FaceObservation, FaceRect, FrameSize},
//!     params::TrackingParams,
//!     scene::{CameraLookup, SceneAdapter},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut scene = SceneAdapter::new(DocumentScene::new(), DEFAULT_CAMERA_ID, CameraLookup::Strict);
//! scene.load_scene("assets/scene.yaml")?;
//!
//! let params = TrackingParams::default();
//! let mut mapper = PositionMapper::new();
//!
//! let face = FaceRect::new(270, 190, 100, 100);
//! let observation = FaceObservation::from_rect(face, FrameSize::new(640, 480))?;
//! if let Some(update) = mapper.update(&observation, &params, &mut scene) {
//!     println!("Camera at ({:.1}, {:.1})", update.position.x, update.position.y);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Complete pipeline
//!
//! ```no_run
//! use face_parallax::{
//!     constants::DEFAULT_CAMERA_ID,
//!     detector::{CascadeDetector, DetectorParams},
//!     document_scene::DocumentScene,
//!     params::TrackingParams,
//!     pipeline::{FramePipeline, TrackingContext},
//!     scene::{CameraLookup, SceneAdapter},
//! };
//! use opencv::{core::Mat, highgui, prelude::*, videoio};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let detector = CascadeDetector::new("assets/haarcascade_frontalface_default.xml", DetectorParams::default())?;
//! let mut pipeline = FramePipeline::new(detector);
//!
//! let scene = SceneAdapter::new(DocumentScene::new(), DEFAULT_CAMERA_ID, CameraLookup::Strict);
//! let mut ctx = TrackingContext::new(TrackingParams::default(), scene);
//! ctx.reload_scene()?;
//!
//! let mut cap = videoio::VideoCapture::new(0, videoio::CAP_ANY)?;
//! let mut frame = Mat::default();
//! while cap.read(&mut frame)? {
//!     let outcome = pipeline.tick(&mut frame, &mut ctx);
//!     if !outcome.face_detected() {
//!         println!("No face detected");
//!     }
//!     highgui::imshow("Face Parallax", &frame)?;
//!     if highgui::wait_key(1)? == b'q' as i32 {
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Face rectangles and normalized observations
pub mod observation;

/// Exponential smoothing step
pub mod smoothing;

/// Camera handle abstraction
pub mod camera;

/// Scene runtime capability and camera binding
pub mod scene;

/// YAML-document scene runtime
pub mod document_scene;

/// Face position to camera motion mapping
pub mod mapper;

/// Operator-tunable parameters
pub mod params;

/// Cascade face detector adapter
pub mod detector;

/// Per-frame processing
pub mod pipeline;

/// Debug overlay text
pub mod overlay;

/// Control panel and keyboard shortcuts
pub mod controls;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
