//! Scene loading, camera binding and base state capture


use face_parallax::{
    camera::{Projection, Vec3},
    constants::{DEFAULT_CAMERA_ID, DEFAULT_SCENE_URL},
    document_scene::DocumentScene,
    mapper::PositionMapper,
    observation::{FaceObservation, FaceRect, FrameSize},
    params::TrackingParams,
    scene::{CameraLookup, SceneAdapter, SceneRuntime},
    Error,
};
use test_helpers::{camera_pose, scene_yaml, MemoryRuntime, CAMERA_ID};

#[test]
fn test_strict_lookup_fails_on_missing_camera() {
    let runtime = MemoryRuntime::default().with_scene(
        "scene://other",
        &scene_yaml("some-other-camera", "PerspectiveCamera", Vec3::default(), None),
    );
    let mut scene = SceneAdapter::new(runtime, CAMERA_ID, CameraLookup::Strict);

    let result = scene.load_scene("scene://other");
    assert!(matches!(result, Err(Error::CameraNotFound(id)) if id == CAMERA_ID));
    assert!(scene.base_state().is_none());
    assert!(scene.camera_mut().is_none());
}

#[test]
fn test_fallback_lookup_adopts_first_camera() {
    let runtime = MemoryRuntime::default().with_scene(
        "scene://other",
        &scene_yaml("found-camera", "OrthographicCamera", Vec3::new(1.0, 2.0, 3.0), Some(0.8)),
    );
    let mut scene = SceneAdapter::new(runtime, CAMERA_ID, CameraLookup::AnyCamera);

    scene.load_scene("scene://other").unwrap();
    assert_eq!(scene.camera_id(), "found-camera");

    let base = scene.base_state().unwrap();
    assert_eq!(base.base_position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(base.base_zoom, 0.8);
}

#[test]
fn test_fallback_lookup_fails_without_any_camera() {
    let yaml = "objects:\n  - id: \"floor\"\n    type: Mesh\n";
    let runtime = MemoryRuntime::default().with_scene("scene://empty", yaml);
    let mut scene = SceneAdapter::new(runtime, CAMERA_ID, CameraLookup::AnyCamera);

    assert!(matches!(scene.load_scene("scene://empty"), Err(Error::CameraNotFound(_))));
}

#[test]
fn test_non_camera_object_rejected() {
    let runtime = MemoryRuntime::default().with_scene("scene://mesh", &scene_yaml(CAMERA_ID, "Mesh", Vec3::default(), None));
    let mut scene = SceneAdapter::new(runtime, CAMERA_ID, CameraLookup::AnyCamera);

    match scene.load_scene("scene://mesh") {
        Err(Error::NotACamera { id, kind }) => {
            assert_eq!(id, CAMERA_ID);
            assert_eq!(kind, "Mesh");
        }
        other => panic!("Expected NotACamera, got {other:?}"),
    }
}

#[test]
fn test_camera_without_zoom_uses_unit_base_zoom() {
    let mut scene = test_helpers::loaded_scene("PerspectiveCamera", Vec3::new(0.0, 50.0, 900.0), None);
    let base = scene.base_state().unwrap();
    assert_eq!(base.base_zoom, 1.0);
    assert_eq!(camera_pose(&mut scene).0, Vec3::new(0.0, 50.0, 900.0));
}

#[test]
fn test_reload_recaptures_base_state() {
    let runtime = MemoryRuntime::default()
        .with_scene("scene://a", &scene_yaml(CAMERA_ID, "PerspectiveCamera", Vec3::new(0.0, 0.0, 100.0), None))
        .with_scene("scene://b", &scene_yaml(CAMERA_ID, "PerspectiveCamera", Vec3::new(-40.0, 10.0, 700.0), None));
    let mut scene = SceneAdapter::new(runtime, CAMERA_ID, CameraLookup::Strict);
    let mut mapper = PositionMapper::new();
    let params = TrackingParams {
        smoothing_factor: 1.0,
        ..TrackingParams::default()
    };
    let centered = FaceObservation::from_rect(FaceRect::new(270, 190, 100, 100), FrameSize::new(640, 480)).unwrap();

    scene.load_scene("scene://a").unwrap();
    let first = mapper.update(&centered, &params, &mut scene).unwrap();
    assert_eq!(first.position.x, 0.0);

    scene.load_scene("scene://b").unwrap();
    assert_eq!(scene.base_state().unwrap().base_position, Vec3::new(-40.0, 10.0, 700.0));
    assert_eq!(scene.scene_url(), Some("scene://b"));

    // A centered face keeps the camera on the new base, not the old one
    let second = mapper.update(&centered, &params, &mut scene).unwrap();
    assert!((second.position.x + 40.0).abs() < 1e-9);
    assert!((second.position.y - 10.0).abs() < 1e-9);
}

#[test]
fn test_failed_reload_clears_base_state() {
    let runtime = MemoryRuntime::default().with_scene(
        "scene://a",
        &scene_yaml(CAMERA_ID, "OrthographicCamera", Vec3::default(), Some(1.0)),
    );
    let mut scene = SceneAdapter::new(runtime, CAMERA_ID, CameraLookup::Strict);
    scene.load_scene("scene://a").unwrap();
    assert!(scene.base_state().is_some());

    assert!(matches!(scene.load_scene("scene://missing"), Err(Error::SceneLoad(_))));
    assert!(scene.base_state().is_none());
    assert!(scene.scene_url().is_none());

    let observation = FaceObservation::from_rect(FaceRect::new(0, 0, 100, 100), FrameSize::new(640, 480)).unwrap();
    assert!(PositionMapper::new().update(&observation, &TrackingParams::default(), &mut scene).is_none());
}

#[test]
fn test_loading_disables_camera_controls() {
    let mut runtime = DocumentScene::new();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.yaml");
    std::fs::write(&path, scene_yaml(CAMERA_ID, "PerspectiveCamera", Vec3::default(), None)).unwrap();

    runtime.load(path.to_str().unwrap()).unwrap();
    assert!(runtime.document().unwrap().objects[1].controls_enabled);

    let mut scene = SceneAdapter::new(runtime, CAMERA_ID, CameraLookup::Strict);
    scene.load_scene(&format!("file://{}", path.display())).unwrap();

    let camera = scene
        .runtime()
        .document()
        .unwrap()
        .objects
        .iter()
        .find(|o| o.id == CAMERA_ID)
        .unwrap();
    assert!(!camera.controls_enabled);
}

#[test]
fn test_document_scene_load_errors() {
    let mut scene = SceneAdapter::new(DocumentScene::new(), CAMERA_ID, CameraLookup::Strict);

    assert!(matches!(scene.load_scene("https://example.com/scene.yaml"), Err(Error::SceneLoad(_))));
    assert!(matches!(scene.load_scene("/definitely/not/here.yaml"), Err(Error::SceneLoad(_))));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "objects: [ { id: 1, type: ").unwrap();
    assert!(matches!(scene.load_scene(path.to_str().unwrap()), Err(Error::SceneLoad(_))));
}

#[test]
fn test_bundled_scene_binds_default_camera() {
    let mut scene = SceneAdapter::new(DocumentScene::new(), DEFAULT_CAMERA_ID, CameraLookup::Strict);
    scene.load_scene(DEFAULT_SCENE_URL).unwrap();

    assert_eq!(scene.camera_id(), DEFAULT_CAMERA_ID);
    let camera = scene.camera_mut().unwrap();
    assert_eq!(camera.kind().projection(), Some(Projection::Orthographic));
}
