//! Constants used throughout the application

/// Pixels of camera travel per unit of X/Y sensitivity
pub const POSITION_SCALE: f64 = 100.0;

/// Scene units of depth travel per unit of Z sensitivity
pub const DEPTH_SCALE: f64 = 400.0;

/// Face width / frame width at a comfortable viewing distance
pub const NEUTRAL_FACE_SIZE: f64 = 0.25;

/// Divisor turning a depth offset into a relative zoom change
pub const ZOOM_OFFSET_DIVISOR: f64 = 1000.0;

/// Orthographic zoom bounds
pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 2.0;

/// Zoom assumed for cameras that do not report one
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Default operator parameters
pub const DEFAULT_SENSITIVITY: f64 = 5.0;
pub const DEFAULT_SMOOTHING: f64 = 0.1;

/// Control panel ranges
pub const SENSITIVITY_MAX: f64 = 10.0;
pub const SMOOTHING_MAX: f64 = 0.5;

/// Cascade classifier defaults
pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;
pub const DEFAULT_MIN_NEIGHBORS: i32 = 5;
pub const DEFAULT_MIN_FACE_SIZE: i32 = 100;
pub const DEFAULT_CASCADE_FILE: &str = "assets/haarcascade_frontalface_default.xml";

/// Ideal capture resolution
pub const DEFAULT_FRAME_WIDTH: i32 = 640;
pub const DEFAULT_FRAME_HEIGHT: i32 = 480;

/// Scene defaults
pub const DEFAULT_SCENE_URL: &str = "assets/scene.yaml";
pub const DEFAULT_CAMERA_ID: &str = "56c30b36-44df-48b7-89f1-27070018dad0";

/// Window titles
pub const VIDEO_WINDOW: &str = "Face Parallax";
pub const CONTROLS_WINDOW: &str = "Camera Controls";

/// Keyboard shortcuts
pub const KEY_TOGGLE_OVERLAYS: i32 = b'1' as i32;
pub const KEY_RELOAD_SCENE: i32 = b'r' as i32;
pub const KEY_ENTER_SCENE_URL: i32 = b'u' as i32;
pub const KEY_QUIT: i32 = b'q' as i32;
pub const KEY_ESCAPE: i32 = 27;

/// Backoff between failed capture reads, doubled per consecutive failure
pub const READ_RETRY_BASE_MS: u64 = 10;
pub const READ_RETRY_MAX_MS: u64 = 500;
