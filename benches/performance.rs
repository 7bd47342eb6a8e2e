// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use isowall::extract::EdgeFilter;
use isowall::geometry::{Primitive, WorldTransform};
use isowall::projection::{CameraProjector, Viewport};
use isowall::{Camera, ExtractConfig, Scene, SceneObject, WallExtractor};
use nalgebra::{Point3, Vector3};

fn iso_camera() -> Camera {
    let transform = WorldTransform::looking_at(Point3::new(2.0, -2.0, 2.0), Point3::origin(), Vector3::z())
        .expect("camera pose");
    Camera::orthographic("iso-camera", transform, std::f64::consts::SQRT_2)
}

fn grid_scene(side: usize) -> Scene {
    let mut scene = Scene::new();
    scene.add_camera(iso_camera());
    for i in 0..side {
        for j in 0..side {
            let offset = Vector3::new(i as f64 * 2.0, j as f64 * 2.0, 0.0);
            scene.add_object(SceneObject::with_mesh(
                format!("wall.{i:03}.{j:03}"),
                WorldTransform::from_translation(offset),
                Primitive::cube(1.0).to_mesh(),
            ));
        }
    }
    scene
}

fn bench_projection(c: &mut Criterion) {
    let projector = CameraProjector::new(&iso_camera(), Viewport::square(177.0, 1.0, 1.0)).expect("projector");
    c.bench_function("project_point", |b| {
        b.iter(|| projector.project(black_box(&Point3::new(0.3, -0.2, 0.1))).unwrap());
    });
}

fn bench_edge_filter(c: &mut Criterion) {
    let mesh = Primitive::cube(1.0).to_mesh();
    let filter = EdgeFilter::default();
    c.bench_function("filter_cube_edges", |b| {
        b.iter(|| {
            filter
                .filter(black_box(&mesh), &WorldTransform::identity(), -0.5)
                .unwrap()
        });
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for side in [4, 16, 32] {
        let scene = grid_scene(side);
        for parallel in [false, true] {
            let extractor = WallExtractor::new(ExtractConfig {
                parallel,
                ..Default::default()
            });
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, side * side), &scene, |b, scene| {
                b.iter(|| extractor.extract(black_box(scene)).unwrap());
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_projection, bench_edge_filter, bench_pipeline);
criterion_main!(benches);
