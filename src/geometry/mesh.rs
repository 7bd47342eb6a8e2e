// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation: vertices, edges and polygons with normals

use super::BoundingBox;
use crate::error::{ExtractError, ExtractResult};
use crate::utils::math::newell_normal;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

/// Edge between two vertex indices.
///
/// Edges are unordered: `{0, 1}` and `{1, 0}` compare and hash equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    pub vertices: [usize; 2],
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { vertices: [a, b] }
    }

    /// Endpoints in ascending order
    pub fn key(&self) -> (usize, usize) {
        let [a, b] = self.vertices;
        (a.min(b), a.max(b))
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Polygon with an ordered vertex loop and a precomputed local-space unit normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<usize>,
    pub normal: Vector3<f64>,
}

impl Polygon {
    pub fn new(vertices: Vec<usize>, normal: Vector3<f64>) -> Self {
        Self { vertices, normal }
    }

    /// True if both endpoints of `edge` belong to this polygon's vertex set
    pub fn contains_edge(&self, edge: &Edge) -> bool {
        let [a, b] = edge.vertices;
        self.vertices.contains(&a) && self.vertices.contains(&b)
    }
}

/// Read-only polygon mesh in object-local space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub edges: Vec<Edge>,
    pub polygons: Vec<Polygon>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, edge_count: usize, polygon_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            edges: Vec::with_capacity(edge_count),
            polygons: Vec::with_capacity(polygon_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.edges.push(Edge::new(a, b));
    }

    /// Add a polygon, computing its normal from the vertex loop
    pub fn add_polygon(&mut self, vertices: Vec<usize>) -> ExtractResult<()> {
        let points = vertices
            .iter()
            .map(|&i| self.vertex(i))
            .collect::<ExtractResult<Vec<_>>>()?;
        if vertices.len() < 3 {
            return Err(ExtractError::DegeneratePolygon {
                index: self.polygons.len(),
                count: vertices.len(),
            });
        }
        let normal = newell_normal(&points)
            .try_normalize(crate::utils::math::NORMALIZE_EPSILON)
            .ok_or(ExtractError::ZeroAreaPolygon {
                index: self.polygons.len(),
            })?;
        self.polygons.push(Polygon::new(vertices, normal));
        Ok(())
    }

    pub fn add_polygon_with_normal(&mut self, vertices: Vec<usize>, normal: Vector3<f64>) {
        self.polygons.push(Polygon::new(vertices, normal));
    }

    pub fn vertex(&self, index: usize) -> ExtractResult<Point3<f64>> {
        self.vertices
            .get(index)
            .copied()
            .ok_or(ExtractError::VertexIndexOutOfRange {
                index,
                count: self.vertices.len(),
            })
    }

    /// Fill in the edge list from polygon boundaries, in first-seen order
    pub fn derive_edges_from_polygons(&mut self) {
        let mut seen = BTreeSet::new();
        for polygon in &self.polygons {
            let n = polygon.vertices.len();
            for i in 0..n {
                let edge = Edge::new(polygon.vertices[i], polygon.vertices[(i + 1) % n]);
                if seen.insert(edge.key()) {
                    self.edges.push(edge);
                }
            }
        }
    }

    /// Check index ranges and polygon arity
    pub fn validate(&self) -> ExtractResult<()> {
        let count = self.vertices.len();
        let check = |index: usize| {
            if index < count {
                Ok(())
            } else {
                Err(ExtractError::VertexIndexOutOfRange { index, count })
            }
        };

        for edge in &self.edges {
            check(edge.vertices[0])?;
            check(edge.vertices[1])?;
        }

        for (index, polygon) in self.polygons.iter().enumerate() {
            if polygon.vertices.len() < 3 {
                return Err(ExtractError::DegeneratePolygon {
                    index,
                    count: polygon.vertices.len(),
                });
            }
            for &v in &polygon.vertices {
                check(v)?;
            }
        }

        Ok(())
    }

    /// Local-space axis-aligned bounds of the vertices
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;

    #[test]
    fn test_edges_are_unordered() {
        assert_eq!(Edge::new(0, 1), Edge::new(1, 0));
        assert_ne!(Edge::new(0, 1), Edge::new(0, 2));

        let set: std::collections::HashSet<Edge> = [Edge::new(3, 4), Edge::new(4, 3)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_polygon_contains_edge() {
        let quad = Polygon::new(vec![0, 1, 2, 3], Vector3::z());
        assert!(quad.contains_edge(&Edge::new(1, 2)));
        assert!(quad.contains_edge(&Edge::new(3, 0)));
        assert!(!quad.contains_edge(&Edge::new(3, 4)));
    }

    #[test]
    fn test_add_polygon_computes_normal() {
        let mut mesh = Mesh::new();
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ] {
            mesh.add_vertex(p);
        }
        mesh.add_polygon(vec![0, 1, 2]).unwrap();
        assert!((mesh.polygons[0].normal - Vector3::z()).norm() < 1e-12);

        assert!(matches!(
            mesh.add_polygon(vec![0, 1, 9]),
            Err(ExtractError::VertexIndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_add_polygon_rejects_collinear_loop() {
        let mut mesh = Mesh::new();
        for x in [0.0, 1.0, 2.0] {
            mesh.add_vertex(Point3::new(x, 0.0, 0.0));
        }
        let err = mesh.add_polygon(vec![0, 1, 2]).unwrap_err();
        assert_eq!(err, ExtractError::ZeroAreaPolygon { index: 0 });
        assert!(err.to_string().contains("zero area"), "{err}");

        assert!(matches!(
            mesh.add_polygon(vec![0, 1]),
            Err(ExtractError::DegeneratePolygon { count: 2, .. })
        ));
    }

    #[test]
    fn test_derive_edges_from_polygons() {
        let mut mesh = Primitive::cube(1.0).to_mesh();
        mesh.edges.clear();
        mesh.derive_edges_from_polygons();
        assert_eq!(mesh.edge_count(), 12);
    }

    #[test]
    fn test_validate() {
        let mut mesh = Primitive::cube(1.0).to_mesh();
        assert!(mesh.validate().is_ok());

        mesh.add_edge(0, 42);
        assert!(matches!(
            mesh.validate(),
            Err(ExtractError::VertexIndexOutOfRange { index: 42, count: 8 })
        ));

        let mut mesh = Primitive::cube(1.0).to_mesh();
        mesh.add_polygon_with_normal(vec![0, 1], Vector3::z());
        assert!(matches!(mesh.validate(), Err(ExtractError::DegeneratePolygon { count: 2, .. })));
    }
}
