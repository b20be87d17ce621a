//! Scene runtime backed by a local YAML scene document.
//!
//! Only local documents are supported: `file://` URLs and plain paths.

use crate::{
    camera::{ObjectKind, SceneObject, Vec3},
    scene::SceneRuntime,
    Error, Result,
};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scene description as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Human readable scene name
    #[serde(default)]
    pub name: String,

    /// Objects in scene order
    #[serde(default)]
    pub objects: Vec<SceneNode>,
}

impl SceneDocument {
    /// Parse a scene document from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scene document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read a scene document from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

/// One object in a scene document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ObjectKind,

    #[serde(default)]
    pub position: Vec3,

    #[serde(default)]
    pub zoom: Option<f64>,

    #[serde(default = "default_controls_enabled")]
    pub controls_enabled: bool,
}

const fn default_controls_enabled() -> bool {
    true
}

impl SceneObject for SceneNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ObjectKind {
        self.kind.clone()
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn zoom(&self) -> Option<f64> {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = Some(zoom);
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }
}

/// Resolve a scene URL to a local path
///
/// # Errors
///
/// Returns an error for remote or unsupported URL schemes.
pub fn resolve_scene_path(url: &str) -> Result<PathBuf> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::SceneLoad("Scene URL is empty".to_string()));
    }
    if let Some(path) = url.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return Err(Error::SceneLoad(format!("Remote scenes are not supported: {url}")));
    }
    if let Some((scheme, _)) = url.split_once("://") {
        return Err(Error::SceneLoad(format!("Unsupported scene URL scheme: {scheme}")));
    }
    Ok(PathBuf::from(url))
}

/// In-process scene runtime holding one loaded document
#[derive(Debug, Default)]
pub struct DocumentScene {
    document: Option<SceneDocument>,
    revision: u64,
}

impl DocumentScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runtime with a document already in place, bypassing `load`
    #[must_use]
    pub fn with_document(document: SceneDocument) -> Self {
        Self {
            document: Some(document),
            revision: 0,
        }
    }

    /// Currently loaded document
    #[must_use]
    pub const fn document(&self) -> Option<&SceneDocument> {
        self.document.as_ref()
    }

    /// Mutable access to the loaded document
    pub fn document_mut(&mut self) -> Option<&mut SceneDocument> {
        self.document.as_mut()
    }

    /// Number of renders since the runtime was created
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    fn objects_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.document.iter_mut().flat_map(|doc| doc.objects.iter_mut())
    }
}

impl SceneRuntime for DocumentScene {
    fn load(&mut self, url: &str) -> Result<()> {
        let path = resolve_scene_path(url)?;
        let document = SceneDocument::from_file(&path)
            .map_err(|e| Error::SceneLoad(format!("{}: {e}", path.display())))?;

        debug!(
            "Loaded scene '{}' with {} objects from {}",
            document.name,
            document.objects.len(),
            path.display()
        );
        self.document = Some(document);
        Ok(())
    }

    fn find_object_by_id(&mut self, id: &str) -> Option<&mut dyn SceneObject> {
        self.objects_mut()
            .find(|node| node.id == id)
            .map(|node| node as &mut dyn SceneObject)
    }

    fn find_first_camera(&mut self) -> Option<&mut dyn SceneObject> {
        self.objects_mut()
            .find(|node| node.kind.is_camera())
            .map(|node| node as &mut dyn SceneObject)
    }

    fn render(&mut self) -> Result<()> {
        if self.document.is_none() {
            return Err(Error::Render("No scene loaded".to_string()));
        }
        self.revision += 1;
        trace!("Render #{}", self.revision);
        Ok(())
    }
}
