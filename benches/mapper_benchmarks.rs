//! Benchmarks for face normalization and camera mapping

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use face_parallax::{
    camera::{CameraBaseState, ObjectKind, Projection, Vec3},
    document_scene::{DocumentScene, SceneNode},
    mapper::{apply_target, compute_target, PositionMapper},
    observation::{select_largest, FaceObservation, FaceRect, FrameSize},
    params::TrackingParams,
    scene::{CameraLookup, SceneAdapter},
    smoothing::approach,
};

const SCENE: &str = r#"
name: "Bench scene"
objects:
  - id: "floor"
    type: Mesh
  - id: "bench-camera"
    type: OrthographicCamera
    position: { x: 0.0, y: 0.0, z: 1000.0 }
    zoom: 1.0
"#;

fn observation_benchmark(c: &mut Criterion) {
    let faces = vec![
        FaceRect::new(12, 40, 90, 90),
        FaceRect::new(300, 180, 160, 160),
        FaceRect::new(520, 20, 60, 60),
    ];
    let frame = FrameSize::new(640, 480);

    c.bench_function("select_and_normalize", |b| {
        b.iter(|| {
            let face = select_largest(black_box(&faces)).unwrap();
            FaceObservation::from_rect(face, frame).unwrap()
        });
    });
}

fn target_benchmark(c: &mut Criterion) {
    let observation = FaceObservation::from_rect(FaceRect::new(300, 180, 160, 160), FrameSize::new(640, 480)).unwrap();
    let params = TrackingParams::default();
    let base = CameraBaseState {
        base_position: Vec3::new(0.0, 0.0, 1000.0),
        base_zoom: 1.0,
    };

    c.bench_function("compute_target_orthographic", |b| {
        b.iter(|| compute_target(black_box(&observation), &params, &base, Projection::Orthographic));
    });

    let mut camera = SceneNode {
        id: "bench-camera".to_string(),
        name: String::new(),
        kind: ObjectKind::PerspectiveCamera,
        position: base.base_position,
        zoom: None,
        controls_enabled: false,
    };
    let target = compute_target(&observation, &params, &base, Projection::Perspective);

    c.bench_function("apply_target_perspective", |b| {
        b.iter(|| apply_target(&mut camera, black_box(&target), &base, 0.1));
    });
}

fn update_benchmark(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.yaml");
    std::fs::write(&path, SCENE).unwrap();

    let mut scene = SceneAdapter::new(DocumentScene::new(), "bench-camera", CameraLookup::Strict);
    scene.load_scene(path.to_str().unwrap()).unwrap();

    let mut mapper = PositionMapper::new();
    let params = TrackingParams::default();
    let observations: Vec<FaceObservation> = (0..64)
        .map(|i| FaceObservation::from_rect(FaceRect::new(i * 8, 120 + i, 100 + i, 100 + i), FrameSize::new(640, 480)).unwrap())
        .collect();

    c.bench_function("mapper_update_64_frames", |b| {
        b.iter(|| {
            for observation in &observations {
                black_box(mapper.update(observation, &params, &mut scene));
            }
        });
    });
}

fn smoothing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("approach_convergence");

    for factor in [0.05, 0.1, 0.25, 0.5] {
        group.bench_with_input(BenchmarkId::from_parameter(factor), &factor, |b, &factor| {
            b.iter(|| {
                let mut value = 0.0;
                for _ in 0..100 {
                    value = approach(value, black_box(500.0), factor);
                }
                value
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    observation_benchmark,
    target_benchmark,
    update_benchmark,
    smoothing_benchmark
);
criterion_main!(benches);
