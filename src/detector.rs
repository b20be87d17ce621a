//! Face detector adapter over the `OpenCV` cascade classifier.

use crate::{observation::FaceRect, Error, Result};
use log::info;
use opencv::{
    core::{Mat, Rect, Size, Vector},
    objdetect::CascadeClassifier,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Anything that finds face rectangles in a single-channel frame
pub trait FaceDetector {
    /// Detect faces in a grayscale image, in detector order
    fn detect(&mut self, gray: &Mat) -> Result<Vec<FaceRect>>;
}

/// Multi-scale detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Image pyramid step between scales
    pub scale_factor: f64,

    /// Neighbouring hits needed to keep a candidate
    pub min_neighbors: i32,

    /// Smallest face side in pixels
    pub min_size: i32,

    /// Largest face side in pixels (0 means unbounded)
    pub max_size: i32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        use crate::constants::{DEFAULT_MIN_FACE_SIZE, DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_FACTOR};

        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size: DEFAULT_MIN_FACE_SIZE,
            max_size: 0,
        }
    }
}

impl DetectorParams {
    /// Check the parameters the classifier would otherwise reject at runtime
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale_factor > 1.0) {
            return Err(Error::ConfigError("Detector scale factor must be greater than 1.0".to_string()));
        }
        if self.min_neighbors < 0 {
            return Err(Error::ConfigError("Detector min neighbors must not be negative".to_string()));
        }
        if self.min_size < 0 || self.max_size < 0 {
            return Err(Error::ConfigError("Detector face sizes must not be negative".to_string()));
        }
        if self.max_size != 0 && self.max_size < self.min_size {
            return Err(Error::ConfigError(
                "Detector max size must be 0 or at least the min size".to_string(),
            ));
        }
        Ok(())
    }
}

/// Haar/LBP cascade face detector
pub struct CascadeDetector {
    classifier: CascadeClassifier,
    params: DetectorParams,
}

impl CascadeDetector {
    /// Load cascade data from an XML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or holds no usable cascade.
    pub fn new<P: AsRef<Path>>(cascade_path: P, params: DetectorParams) -> Result<Self> {
        let path = cascade_path.as_ref();
        params.validate()?;

        if !path.exists() {
            return Err(Error::Detector(format!("Cascade file not found: {}", path.display())));
        }

        let path_str = path
            .to_str()
            .ok_or_else(|| Error::Detector(format!("Cascade path is not valid UTF-8: {}", path.display())))?;
        let classifier = CascadeClassifier::new(path_str)?;

        if classifier.empty()? {
            return Err(Error::Detector(format!("Cascade file holds no classifier: {}", path.display())));
        }

        info!("Loaded face cascade from {}", path.display());
        Ok(Self { classifier, params })
    }

    #[must_use]
    pub const fn params(&self) -> &DetectorParams {
        &self.params
    }
}

impl FaceDetector for CascadeDetector {
    fn detect(&mut self, gray: &Mat) -> Result<Vec<FaceRect>> {
        let mut faces = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            gray,
            &mut faces,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            Size::new(self.params.min_size, self.params.min_size),
            Size::new(self.params.max_size, self.params.max_size),
        )?;

        Ok(faces.iter().map(FaceRect::from).collect())
    }
}
