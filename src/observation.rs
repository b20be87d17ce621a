//! Face rectangles and the per-frame observation derived from them.

use crate::{Error, Result};
use opencv::core::Rect;

/// Axis-aligned face rectangle in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Area in pixels, widened so large rectangles cannot overflow
    #[must_use]
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

impl From<Rect> for FaceRect {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

impl From<FaceRect> for Rect {
    fn from(rect: FaceRect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// Pick the largest rectangle by area.
///
/// Ties keep the first rectangle in detector order.
#[must_use]
pub fn select_largest(faces: &[FaceRect]) -> Option<FaceRect> {
    let mut iter = faces.iter().copied();
    let first = iter.next()?;
    Some(iter.fold(first, |best, face| if face.area() > best.area() { face } else { best }))
}

/// Frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: i32,
    pub height: i32,
}

impl FrameSize {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Resolution-independent face position for a single frame.
///
/// `normalized_x` and `normalized_y` grow rightward and downward and span
/// [-1, 1] for rectangles inside the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceObservation {
    pub normalized_x: f64,
    pub normalized_y: f64,
    pub face_size_ratio: f64,
}

impl FaceObservation {
    /// Normalize a face rectangle against the frame it was detected in.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame has no area.
    pub fn from_rect(rect: FaceRect, frame: FrameSize) -> Result<Self> {
        if frame.width <= 0 || frame.height <= 0 {
            return Err(Error::InvalidInput(format!(
                "Frame size must be positive, got {}x{}",
                frame.width, frame.height
            )));
        }

        let frame_width = f64::from(frame.width);
        let frame_height = f64::from(frame.height);
        let center_x = f64::from(rect.x) + f64::from(rect.width) / 2.0;
        let center_y = f64::from(rect.y) + f64::from(rect.height) / 2.0;

        Ok(Self {
            normalized_x: (center_x / frame_width).mul_add(2.0, -1.0),
            normalized_y: (center_y / frame_height).mul_add(2.0, -1.0),
            face_size_ratio: f64::from(rect.width) / frame_width,
        })
    }
}
