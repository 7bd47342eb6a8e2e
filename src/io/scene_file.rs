// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON scene description importer
//!
//! The host dumps its cameras and wall objects into a single JSON document:
//!
//! ```json
//! {
//!   "render": { "pixelAspectX": 1.0, "pixelAspectY": 1.0 },
//!   "cameras": [{ "name": "iso-camera", "matrixWorld": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]],
//!                 "orthoScale": 1.414 }],
//!   "objects": [{ "name": "wall.001", "matrixWorld": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]],
//!                 "mesh": { "vertices": [[0,0,0],[1,0,0],[1,1,0]],
//!                           "polygons": [{ "vertices": [0,1,2] }] } }]
//! }
//! ```
//!
//! Matrices are row-major. `boundBox`, `edges` and polygon `normal` are
//! optional and derived from the mesh when absent.
//!
//! Malformed JSON fails the import. Bad geometry inside one object does not:
//! the object is kept with its defect, and the extractor reports it as a
//! failure only if the object is selected as a wall.

use crate::error::{ExtractError, ExtractResult};
use crate::geometry::{Mesh, WorldTransform};
use crate::scene::{Camera, ProjectionKind, RenderSettings, Scene, SceneObject, TrackAxis};
use crate::utils::math::point_from_slice;
use anyhow::{Context, Result};
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneFile {
    #[serde(default)]
    render: RenderSettings,
    #[serde(default)]
    cameras: Vec<CameraEntry>,
    #[serde(default)]
    objects: Vec<ObjectEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CameraEntry {
    name: String,
    matrix_world: [[f64; 4]; 4],
    ortho_scale: f64,
    #[serde(default = "default_projection", rename = "type")]
    projection: ProjectionKind,
    #[serde(default = "default_track_axis")]
    track_axis: TrackAxis,
    #[serde(default = "default_clip_start")]
    clip_start: f64,
    #[serde(default = "default_clip_end")]
    clip_end: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectEntry {
    name: String,
    matrix_world: [[f64; 4]; 4],
    #[serde(default)]
    bound_box: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    mesh: Option<MeshEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MeshEntry {
    vertices: Vec<Vec<f64>>,
    #[serde(default)]
    edges: Option<Vec<[usize; 2]>>,
    #[serde(default)]
    polygons: Vec<PolygonEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PolygonEntry {
    vertices: Vec<usize>,
    #[serde(default)]
    normal: Option<Vec<f64>>,
}

fn default_projection() -> ProjectionKind {
    ProjectionKind::Orthographic
}

fn default_track_axis() -> TrackAxis {
    TrackAxis::NegZ
}

fn default_clip_start() -> f64 {
    Camera::DEFAULT_CLIP_START
}

fn default_clip_end() -> f64 {
    Camera::DEFAULT_CLIP_END
}

fn matrix_from_rows(rows: &[[f64; 4]; 4]) -> WorldTransform {
    WorldTransform::new(Matrix4::from_fn(|r, c| rows[r][c]))
}

impl CameraEntry {
    fn into_camera(self) -> Camera {
        Camera {
            name: self.name,
            transform: matrix_from_rows(&self.matrix_world),
            ortho_scale: self.ortho_scale,
            projection: self.projection,
            track_axis: self.track_axis,
            clip_start: self.clip_start,
            clip_end: self.clip_end,
        }
    }
}

impl MeshEntry {
    fn into_mesh(self) -> ExtractResult<Mesh> {
        let mut mesh = Mesh::with_capacity(
            self.vertices.len(),
            self.edges.as_ref().map_or(0, Vec::len),
            self.polygons.len(),
        );
        for vertex in &self.vertices {
            mesh.add_vertex(point_from_slice(vertex)?);
        }

        for polygon in self.polygons {
            match polygon.normal {
                Some(normal) => mesh.add_polygon_with_normal(polygon.vertices, point_from_slice(&normal)?.coords),
                None => mesh.add_polygon(polygon.vertices)?,
            }
        }

        match self.edges {
            Some(edges) => {
                for [a, b] in edges {
                    mesh.add_edge(a, b);
                }
            }
            None => mesh.derive_edges_from_polygons(),
        }

        mesh.validate()?;
        Ok(mesh)
    }
}

impl ObjectEntry {
    fn into_object(self) -> ExtractResult<SceneObject> {
        let transform = matrix_from_rows(&self.matrix_world);
        let mut object = match self.mesh {
            Some(mesh) => SceneObject::with_mesh(self.name, transform, mesh.into_mesh()?),
            None => SceneObject::without_mesh(self.name, transform),
        };

        if let Some(corners) = self.bound_box {
            if corners.len() != 8 {
                return Err(ExtractError::InvalidDimension { len: corners.len() });
            }
            let mut bound_box = [Point3::origin(); 8];
            for (slot, corner) in bound_box.iter_mut().zip(&corners) {
                *slot = point_from_slice(corner)?;
            }
            object.bound_box = bound_box;
        }
        Ok(object)
    }
}

/// Parse a JSON scene description
pub fn parse_scene(source: &str) -> Result<Scene> {
    let file: SceneFile = serde_json::from_str(source).context("Invalid scene JSON")?;

    let mut scene = Scene::new();
    scene.render = file.render;
    for camera in file.cameras {
        scene.add_camera(camera.into_camera());
    }
    for entry in file.objects {
        let name = entry.name.clone();
        let transform = matrix_from_rows(&entry.matrix_world);
        let object = entry.into_object().unwrap_or_else(|err| {
            debug!(object = %name, "keeping object with invalid geometry: {err}");
            SceneObject::rejected(name, transform, err)
        });
        scene.add_object(object);
    }
    Ok(scene)
}

/// Read and parse a JSON scene file
pub fn import_scene_file(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).with_context(|| format!("Failed to read scene file: {}", path.display()))?;

    parse_scene(&source).with_context(|| format!("Failed to parse scene file: {}", path.display()))
}
