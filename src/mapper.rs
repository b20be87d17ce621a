//! Position mapper: turns a face observation into camera motion.
//!
//! Targets are computed relative to the camera's base pose, then the live
//! camera is eased toward them with [`approach`].

use crate::{
    camera::{CameraBaseState, Projection, SceneObject, Vec3},
    constants::{DEPTH_SCALE, NEUTRAL_FACE_SIZE, POSITION_SCALE, ZOOM_MAX, ZOOM_MIN, ZOOM_OFFSET_DIVISOR},
    observation::FaceObservation,
    params::TrackingParams,
    scene::{SceneAdapter, SceneRuntime},
    smoothing::approach,
};
use log::{debug, warn};

/// Depth target, expressed the way the camera's projection needs it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DepthTarget {
    /// Orthographic zoom, already clamped to the allowed range
    Zoom(f64),
    /// Perspective Z position
    Z(f64),
}

/// Where the camera should end up for one observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub x: f64,
    pub y: f64,
    pub depth: DepthTarget,
}

/// Compute the un-smoothed camera target for an observation.
///
/// The X axis is mirrored so that moving right pans the view as if looking
/// around the subject.
#[must_use]
pub fn compute_target(
    observation: &FaceObservation,
    params: &TrackingParams,
    base: &CameraBaseState,
    projection: Projection,
) -> CameraTarget {
    let sens_x = POSITION_SCALE * params.x_sensitivity;
    let sens_y = POSITION_SCALE * params.y_sensitivity;
    let sens_z = DEPTH_SCALE * params.z_sensitivity;

    let x = (-observation.normalized_x).mul_add(sens_x, base.base_position.x);
    let y = (-observation.normalized_y).mul_add(sens_y, base.base_position.y);

    let depth = match projection {
        Projection::Orthographic => {
            let z_offset = (observation.face_size_ratio - NEUTRAL_FACE_SIZE) * sens_z;
            let zoom = base.base_zoom * (1.0 - z_offset / ZOOM_OFFSET_DIVISOR);
            DepthTarget::Zoom(zoom.clamp(ZOOM_MIN, ZOOM_MAX))
        }
        Projection::Perspective => {
            let zoom_factor = observation.face_size_ratio / NEUTRAL_FACE_SIZE;
            DepthTarget::Z((1.0 - zoom_factor).mul_add(sens_z, base.base_position.z))
        }
    };

    CameraTarget { x, y, depth }
}

/// Ease a camera one step toward a target
pub fn apply_target(camera: &mut dyn SceneObject, target: &CameraTarget, base: &CameraBaseState, smoothing: f64) {
    let current = camera.position();
    let mut next = Vec3::new(
        approach(current.x, target.x, smoothing),
        approach(current.y, target.y, smoothing),
        current.z,
    );

    match target.depth {
        DepthTarget::Zoom(zoom) => {
            let current_zoom = camera.zoom().unwrap_or(base.base_zoom);
            camera.set_zoom(approach(current_zoom, zoom, smoothing));
        }
        DepthTarget::Z(z) => next.z = approach(current.z, z, smoothing),
    }

    camera.set_position(next);
}

/// Outcome of one successful camera update, for the debug overlay
#[derive(Debug, Clone, PartialEq)]
pub struct CameraUpdate {
    pub observation: FaceObservation,
    pub projection: Projection,
    pub camera_id: String,
    pub position: Vec3,
    pub zoom: Option<f64>,
}

/// Applies observations to the tracked camera of a scene
#[derive(Debug, Default)]
pub struct PositionMapper {
    /// Set once a skipped update has been logged
    warned_unloaded: bool,
}

impl PositionMapper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the scene's tracked camera toward the observed face.
    ///
    /// Returns `None` when no scene is loaded or the tracked object is not a
    /// usable camera; that condition is logged once until an update succeeds. Render failures are logged and do
    /// not undo the camera update.
    pub fn update<R: SceneRuntime>(
        &mut self,
        observation: &FaceObservation,
        params: &TrackingParams,
        scene: &mut SceneAdapter<R>,
    ) -> Option<CameraUpdate> {
        let Some(base) = scene.base_state() else {
            if !self.warned_unloaded {
                warn!("No scene loaded, skipping camera update");
                self.warned_unloaded = true;
            }
            return None;
        };

        let update = {
            let Some(camera) = scene.camera_mut() else {
                if !self.warned_unloaded {
                    warn!("Tracked camera is no longer in the scene, skipping camera update");
                    self.warned_unloaded = true;
                }
                return None;
            };
            let Some(projection) = camera.kind().projection() else {
                if !self.warned_unloaded {
                    warn!("Tracked object {} is not a camera, skipping camera update", camera.id());
                    self.warned_unloaded = true;
                }
                return None;
            };
            self.warned_unloaded = false;
            let target = compute_target(observation, params, &base, projection);
            apply_target(camera, &target, &base, params.smoothing_factor);

            CameraUpdate {
                observation: *observation,
                projection,
                camera_id: camera.id().to_string(),
                position: camera.position(),
                zoom: camera.zoom(),
            }
        };

        if let Err(e) = scene.render() {
            warn!("Render request failed: {}", e);
        }

        debug!(
            "Camera {} -> ({:.2}, {:.2}, {:.2})",
            update.camera_id, update.position.x, update.position.y, update.position.z
        );
        Some(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> CameraBaseState {
        CameraBaseState {
            base_position: Vec3::new(0.0, 0.0, 1000.0),
            base_zoom: 1.0,
        }
    }

    fn observation(x: f64, y: f64, size: f64) -> FaceObservation {
        FaceObservation {
            normalized_x: x,
            normalized_y: y,
            face_size_ratio: size,
        }
    }

    #[test]
    fn test_centered_neutral_face_targets_base() {
        let params = TrackingParams::default();
        let target = compute_target(&observation(0.0, 0.0, NEUTRAL_FACE_SIZE), &params, &base(), Projection::Orthographic);
        assert_eq!(target.x, 0.0);
        assert_eq!(target.y, 0.0);
        assert_eq!(target.depth, DepthTarget::Zoom(1.0));
    }

    #[test]
    fn test_x_axis_is_mirrored() {
        let params = TrackingParams::default();
        let target = compute_target(&observation(0.5, -0.5, NEUTRAL_FACE_SIZE), &params, &base(), Projection::Perspective);
        // 100 * 5 = 500 units per normalized unit
        assert!((target.x + 250.0).abs() < 1e-9);
        assert!((target.y - 250.0).abs() < 1e-9);
        assert_eq!(target.depth, DepthTarget::Z(1000.0));
    }

    #[test]
    fn test_orthographic_zoom_clamped() {
        let params = TrackingParams::default();

        let far = compute_target(&observation(0.0, 0.0, 0.0), &params, &base(), Projection::Orthographic);
        // 1 - (-0.25 * 2000) / 1000 = 1.5
        assert_eq!(far.depth, DepthTarget::Zoom(1.5));

        let very_far = compute_target(
            &observation(0.0, 0.0, 0.0),
            &TrackingParams { z_sensitivity: 10.0, ..TrackingParams::default() },
            &base(),
            Projection::Orthographic,
        );
        assert_eq!(very_far.depth, DepthTarget::Zoom(ZOOM_MAX));

        let near = compute_target(&observation(0.0, 0.0, 1.0), &params, &base(), Projection::Orthographic);
        assert_eq!(near.depth, DepthTarget::Zoom(ZOOM_MIN));
    }

    #[test]
    fn test_perspective_depth_translation() {
        let params = TrackingParams::default();
        // Face twice the neutral size: move 2000 units closer
        let target = compute_target(&observation(0.0, 0.0, 0.5), &params, &base(), Projection::Perspective);
        assert_eq!(target.depth, DepthTarget::Z(-1000.0));
    }

    const SCENE: &str = "objects:\n  - id: \"cam\"\n    type: OrthographicCamera\n    zoom: 1.0\n";

    fn scene_file() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.yaml");
        std::fs::write(&path, SCENE).unwrap();
        let url = path.to_str().unwrap().to_string();
        (dir, url)
    }

    #[test]
    fn test_unloaded_warning_logged_once_until_success() {
        use crate::{document_scene::DocumentScene, scene::CameraLookup};

        let (_dir, url) = scene_file();
        let mut scene = SceneAdapter::new(DocumentScene::new(), "cam", CameraLookup::Strict);
        let mut mapper = PositionMapper::new();
        let params = TrackingParams::default();
        let obs = observation(0.2, 0.1, NEUTRAL_FACE_SIZE);

        assert!(mapper.update(&obs, &params, &mut scene).is_none());
        assert!(mapper.warned_unloaded);
        assert!(mapper.update(&obs, &params, &mut scene).is_none());
        assert!(mapper.warned_unloaded);

        scene.load_scene(&url).unwrap();
        assert!(mapper.update(&obs, &params, &mut scene).is_some());
        assert!(!mapper.warned_unloaded);
    }

    #[test]
    fn test_tracked_object_no_longer_camera_is_skipped() {
        use crate::{camera::ObjectKind, document_scene::DocumentScene, scene::CameraLookup};

        let (_dir, url) = scene_file();
        let mut scene = SceneAdapter::new(DocumentScene::new(), "cam", CameraLookup::Strict);
        scene.load_scene(&url).unwrap();
        let mut mapper = PositionMapper::new();
        let params = TrackingParams::default();
        let obs = observation(0.0, 0.0, NEUTRAL_FACE_SIZE);
        assert!(mapper.update(&obs, &params, &mut scene).is_some());

        scene.runtime_mut().document_mut().unwrap().objects[0].kind = ObjectKind::Mesh;
        assert!(mapper.update(&obs, &params, &mut scene).is_none());
        assert!(mapper.warned_unloaded);
        assert_eq!(scene.runtime().revision(), 1);
    }
}
