// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Primitive polygon meshes (reference tiles, wall blocks)

use super::Mesh;
use nalgebra::{Point3, Vector3};

/// Geometric primitives
pub enum Primitive {
    Cuboid { size: Vector3<f64>, center: bool },
    Plane { size: f64 },
}

impl Primitive {
    /// Centered cube with edge length `size`
    pub fn cube(size: f64) -> Self {
        Self::Cuboid {
            size: Vector3::new(size, size, size),
            center: true,
        }
    }

    pub fn cuboid(size: Vector3<f64>, center: bool) -> Self {
        Self::Cuboid { size, center }
    }

    /// Flat square floor tile on z = 0, centered on the origin
    pub fn plane(size: f64) -> Self {
        Self::Plane { size }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cuboid { size, center } => generate_cuboid_mesh(*size, *center),
            Self::Plane { size } => generate_plane_mesh(*size),
        }
    }
}

fn generate_cuboid_mesh(size: Vector3<f64>, center: bool) -> Mesh {
    let mut mesh = Mesh::with_capacity(8, 12, 6);

    let (min, max) = if center {
        (-size / 2.0, size / 2.0)
    } else {
        (Vector3::zeros(), size)
    };

    // bottom ring 0..4, top ring 4..8, counter-clockwise seen from above
    let positions = [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];
    for p in positions {
        mesh.add_vertex(p);
    }

    for (a, b) in [
        (0, 1), (1, 2), (2, 3), (3, 0),
        (4, 5), (5, 6), (6, 7), (7, 4),
        (0, 4), (1, 5), (2, 6), (3, 7),
    ] {
        mesh.add_edge(a, b);
    }

    // Outward normals
    let faces = [
        (vec![0, 3, 2, 1], Vector3::new(0.0, 0.0, -1.0)),
        (vec![4, 5, 6, 7], Vector3::new(0.0, 0.0, 1.0)),
        (vec![0, 1, 5, 4], Vector3::new(0.0, -1.0, 0.0)),
        (vec![1, 2, 6, 5], Vector3::new(1.0, 0.0, 0.0)),
        (vec![2, 3, 7, 6], Vector3::new(0.0, 1.0, 0.0)),
        (vec![3, 0, 4, 7], Vector3::new(-1.0, 0.0, 0.0)),
    ];
    for (loop_, normal) in faces {
        mesh.add_polygon_with_normal(loop_, normal);
    }

    mesh
}

fn generate_plane_mesh(size: f64) -> Mesh {
    let half = size / 2.0;
    let mut mesh = Mesh::with_capacity(4, 4, 1);

    mesh.add_vertex(Point3::new(-half, -half, 0.0));
    mesh.add_vertex(Point3::new(half, -half, 0.0));
    mesh.add_vertex(Point3::new(half, half, 0.0));
    mesh.add_vertex(Point3::new(-half, half, 0.0));

    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
        mesh.add_edge(a, b);
    }
    mesh.add_polygon_with_normal(vec![0, 1, 2, 3], Vector3::z());

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_topology() {
        let mesh = Primitive::cube(1.0).to_mesh();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.edge_count(), 12);
        assert_eq!(mesh.polygon_count(), 6);
        assert!(mesh.validate().is_ok());

        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Point3::new(-0.5, -0.5, -0.5));
        assert_eq!(bbox.max, Point3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let mesh = Primitive::cube(2.0).to_mesh();
        for polygon in &mesh.polygons {
            let centroid = polygon
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, &i| acc + mesh.vertices[i].coords)
                / polygon.vertices.len() as f64;
            assert!(centroid.dot(&polygon.normal) > 0.0);
        }
    }

    #[test]
    fn test_plane() {
        let mesh = Primitive::plane(1.0).to_mesh();
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.polygon_count(), 1);
        assert!(mesh.vertices.iter().all(|v| v.z == 0.0));
    }
}
