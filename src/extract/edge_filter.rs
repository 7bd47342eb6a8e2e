// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Keep only the mesh edges lying on an object's bottom plane

use crate::error::ExtractResult;
use crate::geometry::{Edge, Mesh, WorldTransform};
use crate::utils::math::{approx_eq, ensure_finite_point};
use nalgebra::Point3;

/// Default tolerance, in world units, for "on the bottom plane".
pub const DEFAULT_EDGE_EPSILON: f64 = 0.01;

/// A retained edge together with its world-space endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BottomEdge {
    pub edge: Edge,
    pub a: Point3<f64>,
    pub b: Point3<f64>,
}

/// Filters edges by the world Z of both endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeFilter {
    pub epsilon: f64,
}

impl Default for EdgeFilter {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EDGE_EPSILON,
        }
    }
}

impl EdgeFilter {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Retain edges whose endpoints both sit within `epsilon` of `bottom_z`.
    ///
    /// Input order is preserved.
    pub fn filter(&self, mesh: &Mesh, transform: &WorldTransform, bottom_z: f64) -> ExtractResult<Vec<BottomEdge>> {
        let mut retained = Vec::new();
        for edge in &mesh.edges {
            let a = transform.transform_point(&mesh.vertex(edge.vertices[0])?);
            let b = transform.transform_point(&mesh.vertex(edge.vertices[1])?);
            ensure_finite_point(&a, "edge endpoint")?;
            ensure_finite_point(&b, "edge endpoint")?;

            if approx_eq(a.z, bottom_z, self.epsilon) && approx_eq(b.z, bottom_z, self.epsilon) {
                retained.push(BottomEdge { edge: *edge, a, b });
            }
        }
        Ok(retained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;

    #[test]
    fn test_cube_keeps_bottom_ring() {
        let mesh = Primitive::cube(1.0).to_mesh();
        let retained = EdgeFilter::default()
            .filter(&mesh, &WorldTransform::identity(), -0.5)
            .unwrap();

        let keys: Vec<_> = retained.iter().map(|e| e.edge.key()).collect();
        assert_eq!(keys, vec![(0, 1), (1, 2), (2, 3), (0, 3)]);
        assert!(retained.iter().all(|e| e.a.z == -0.5 && e.b.z == -0.5));
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.01));
        mesh.add_vertex(Point3::new(2.0, 0.0, 0.02));
        mesh.add_edge(0, 1);
        mesh.add_edge(1, 2);

        let retained = EdgeFilter::default()
            .filter(&mesh, &WorldTransform::identity(), 0.0)
            .unwrap();
        assert_eq!(retained.len(), 1);
        assert_eq!(retained[0].edge, Edge::new(0, 1));
    }

    #[test]
    fn test_uses_world_space() {
        let mesh = Primitive::cube(1.0).to_mesh();
        let lifted = WorldTransform::from_translation(Vector3::new(0.0, 0.0, 10.0));
        let filter = EdgeFilter::default();

        assert!(filter.filter(&mesh, &lifted, -0.5).unwrap().is_empty());
        assert_eq!(filter.filter(&mesh, &lifted, 9.5).unwrap().len(), 4);
    }

    #[test]
    fn test_bad_index_is_an_error() {
        let mut mesh = Primitive::plane(1.0).to_mesh();
        mesh.add_edge(0, 99);
        assert!(EdgeFilter::default()
            .filter(&mesh, &WorldTransform::identity(), 0.0)
            .is_err());
    }
}
