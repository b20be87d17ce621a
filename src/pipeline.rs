//! Per-frame pipeline: detect, select, annotate, map.
//!
//! Frames are processed strictly one after another. All intermediate
//! buffers are scoped to a single call and released on every exit path.

use crate::{
    detector::FaceDetector,
    mapper::{CameraUpdate, PositionMapper},
    observation::{select_largest, FaceObservation, FaceRect, FrameSize},
    params::TrackingParams,
    scene::{SceneAdapter, SceneRuntime},
    Result,
};
use log::{error, trace};
use opencv::{
    core::{Mat, Rect, Scalar},
    imgproc,
    prelude::*,
};

/// Everything the loop mutates, passed explicitly instead of living in globals
pub struct TrackingContext<R: SceneRuntime> {
    pub params: TrackingParams,
    pub mapper: PositionMapper,
    pub scene: SceneAdapter<R>,
}

impl<R: SceneRuntime> TrackingContext<R> {
    pub fn new(params: TrackingParams, scene: SceneAdapter<R>) -> Self {
        Self {
            params,
            mapper: PositionMapper::new(),
            scene,
        }
    }

    /// Reload the scene named by the current parameters
    ///
    /// # Errors
    ///
    /// Propagates scene load failures.
    pub fn reload_scene(&mut self) -> Result<()> {
        let url = self.params.scene_url.clone();
        self.scene.load_scene(&url)
    }

    /// Point the parameters at a new scene URL and load it.
    ///
    /// The URL is kept even if the load fails, so a later reload retries it.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank URL or a failed scene load.
    pub fn load_scene_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(crate::Error::InvalidInput("Scene URL must not be empty".to_string()));
        }
        self.params.scene_url = url.to_string();
        self.reload_scene()
    }
}

/// Result of processing one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Number of rectangles the detector returned
    pub detections: usize,
    /// Largest rectangle, if any
    pub face: Option<FaceRect>,
    /// Camera state after the update, if the camera moved
    pub update: Option<CameraUpdate>,
}

impl FrameOutcome {
    #[must_use]
    pub const fn face_detected(&self) -> bool {
        self.face.is_some()
    }

    /// Normalized observation behind the update, if any
    #[must_use]
    pub fn observation(&self) -> Option<&FaceObservation> {
        self.update.as_ref().map(|u| &u.observation)
    }
}

/// Drives a face detector over frames and feeds the mapper
pub struct FramePipeline<D: FaceDetector> {
    detector: D,
    annotate: bool,
}

impl<D: FaceDetector> FramePipeline<D> {
    pub const fn new(detector: D) -> Self {
        Self { detector, annotate: true }
    }

    /// Enable or disable drawing the tracked rectangle onto the frame
    #[must_use]
    pub const fn with_annotation(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// The wrapped detector
    pub const fn detector(&self) -> &D {
        &self.detector
    }

    /// Process one frame, logging and swallowing any failure.
    ///
    /// A bad frame yields an empty outcome and never stops the loop.
    pub fn tick<R: SceneRuntime>(&mut self, frame: &mut Mat, ctx: &mut TrackingContext<R>) -> FrameOutcome {
        match self.process(frame, ctx) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error processing frame: {}", e);
                FrameOutcome::default()
            }
        }
    }

    /// Process one BGR frame in place.
    ///
    /// # Errors
    ///
    /// Returns an error if color conversion, detection or drawing fails.
    pub fn process<R: SceneRuntime>(&mut self, frame: &mut Mat, ctx: &mut TrackingContext<R>) -> Result<FrameOutcome> {
        if frame.empty() {
            trace!("Skipping empty frame");
            return Ok(FrameOutcome::default());
        }

        let frame_size = FrameSize::new(frame.cols(), frame.rows());

        let faces = {
            let gray = to_grayscale(frame)?;
            self.detector.detect(&gray)?
        };

        let Some(face) = select_largest(&faces) else {
            return Ok(FrameOutcome {
                detections: 0,
                face: None,
                update: None,
            });
        };

        if self.annotate {
            imgproc::rectangle(
                frame,
                Rect::from(face),
                Scalar::new(255.0, 255.0, 255.0, 255.0),
                2,
                imgproc::LINE_8,
                0,
            )?;
        }

        let observation = FaceObservation::from_rect(face, frame_size)?;
        let update = ctx.mapper.update(&observation, &ctx.params, &mut ctx.scene);

        Ok(FrameOutcome {
            detections: faces.len(),
            face: Some(face),
            update,
        })
    }
}

/// Convert a frame to single-channel intensity
///
/// # Errors
///
/// Returns an error for channel layouts other than 1, 3 or 4.
pub fn to_grayscale(frame: &Mat) -> Result<Mat> {
    let code = match frame.channels() {
        1 => return Ok(frame.try_clone()?),
        3 => imgproc::COLOR_BGR2GRAY,
        4 => imgproc::COLOR_BGRA2GRAY,
        n => {
            return Err(crate::Error::InvalidInput(format!(
                "Unsupported frame with {n} channels"
            )))
        }
    };

    let mut gray = Mat::default();
    imgproc::cvt_color_def(frame, &mut gray, code)?;
    Ok(gray)
}
