//! Scene adapter: loads scenes into a runtime and tracks exactly one camera.

use crate::{
    camera::{CameraBaseState, SceneObject},
    Error, Result,
};
use log::{error, info, warn};

/// Capability offered by a 3D scene runtime
pub trait SceneRuntime {
    /// Replace the current scene with the one at `url`
    fn load(&mut self, url: &str) -> Result<()>;

    /// Look up an object by id
    fn find_object_by_id(&mut self, id: &str) -> Option<&mut dyn SceneObject>;

    /// First camera object in scene order
    fn find_first_camera(&mut self) -> Option<&mut dyn SceneObject>;

    /// Force a redraw
    fn render(&mut self) -> Result<()>;
}

/// What to do when the configured camera id is missing from a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraLookup {
    /// Fail the scene load
    #[default]
    Strict,
    /// Track the first camera the scene contains instead
    AnyCamera,
}

/// Owns the runtime, the tracked camera id and its base state
pub struct SceneAdapter<R: SceneRuntime> {
    runtime: R,
    camera_id: String,
    lookup: CameraLookup,
    base_state: Option<CameraBaseState>,
    scene_url: Option<String>,
}

impl<R: SceneRuntime> SceneAdapter<R> {
    /// Create an adapter with no scene loaded yet
    pub fn new(runtime: R, camera_id: impl Into<String>, lookup: CameraLookup) -> Self {
        Self {
            runtime,
            camera_id: camera_id.into(),
            lookup,
            base_state: None,
            scene_url: None,
        }
    }

    /// Load a scene and bind its camera.
    ///
    /// The base state is re-captured on every successful load and cleared
    /// when a load fails, so a stale pose is never used as the reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot load the scene, the camera
    /// cannot be found under the active lookup policy, or the object found
    /// by id is not a camera.
    pub fn load_scene(&mut self, url: &str) -> Result<()> {
        self.base_state = None;
        self.scene_url = None;

        match self.try_load(url) {
            Ok(base) => {
                self.base_state = Some(base);
                self.scene_url = Some(url.to_string());
                Ok(())
            }
            Err(e) => {
                error!("Failed to load scene {}: {}", url, e);
                Err(e)
            }
        }
    }

    fn try_load(&mut self, url: &str) -> Result<CameraBaseState> {
        info!("Loading scene from {}", url);
        self.runtime.load(url)?;

        let configured_id = self.camera_id.clone();
        let lookup = self.lookup;

        let camera = match self.runtime.find_object_by_id(&configured_id) {
            Some(object) => object,
            None if lookup == CameraLookup::AnyCamera => {
                info!("Camera {} not found, searching for any camera", configured_id);
                self.runtime
                    .find_first_camera()
                    .ok_or_else(|| Error::CameraNotFound("scene contains no camera".to_string()))?
            }
            None => return Err(Error::CameraNotFound(configured_id)),
        };

        let kind = camera.kind();
        if !kind.is_camera() {
            return Err(Error::NotACamera {
                id: camera.id().to_string(),
                kind: kind.to_string(),
            });
        }

        camera.set_controls_enabled(false);
        let base = CameraBaseState::capture(camera);
        let found_id = camera.id().to_string();

        if found_id != configured_id {
            warn!("Tracking fallback camera {} instead of {}", found_id, configured_id);
            self.camera_id = found_id;
        }

        info!(
            "Tracking {} {} from ({:.2}, {:.2}, {:.2}), zoom {:.2}",
            kind, self.camera_id, base.base_position.x, base.base_position.y, base.base_position.z, base.base_zoom
        );

        Ok(base)
    }

    /// Base pose of the tracked camera, if a scene is loaded
    #[must_use]
    pub const fn base_state(&self) -> Option<CameraBaseState> {
        self.base_state
    }

    /// Id of the tracked camera
    #[must_use]
    pub fn camera_id(&self) -> &str {
        &self.camera_id
    }

    /// URL of the currently loaded scene
    #[must_use]
    pub fn scene_url(&self) -> Option<&str> {
        self.scene_url.as_deref()
    }

    /// Borrow the tracked camera, if a scene is loaded
    pub fn camera_mut(&mut self) -> Option<&mut dyn SceneObject> {
        if self.base_state.is_none() {
            return None;
        }
        self.runtime.find_object_by_id(&self.camera_id)
    }

    /// Ask the runtime to redraw
    ///
    /// # Errors
    ///
    /// Propagates the runtime's render error.
    pub fn render(&mut self) -> Result<()> {
        self.runtime.render()
    }

    /// Access the underlying runtime
    #[must_use]
    pub const fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Mutable access to the underlying runtime
    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }
}
