// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Front-facing classification of edges from their adjoining polygons

use crate::error::ExtractResult;
use crate::geometry::{Edge, Polygon};
use crate::utils::math::{try_normalize, NORMALIZE_EPSILON};
use nalgebra::{Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Canonical isometric "toward camera" direction, `normalize((1, -1, 0))`.
pub fn toward_camera_dir() -> Vector3<f64> {
    Vector3::new(1.0, -1.0, 0.0).normalize()
}

/// Which reference direction decides front-facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacingRule {
    /// Fixed isometric direction, independent of camera placement
    FixedDirection,
    /// From the object's bottom center toward the camera position
    TowardCamera,
}

/// Classifies edges for one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityClassifier {
    rotation: Rotation3<f64>,
    direction: Vector3<f64>,
}

impl VisibilityClassifier {
    /// Classifier against an arbitrary (normalized here) reference direction
    pub fn new(rotation: Rotation3<f64>, direction: Vector3<f64>) -> ExtractResult<Self> {
        Ok(Self {
            rotation,
            direction: try_normalize(&direction, "facing direction")?,
        })
    }

    pub fn fixed(rotation: Rotation3<f64>) -> Self {
        Self {
            rotation,
            direction: toward_camera_dir(),
        }
    }

    pub fn toward_point(rotation: Rotation3<f64>, from: Point3<f64>, to: Point3<f64>) -> ExtractResult<Self> {
        Self::new(rotation, to - from)
    }

    /// True if any polygon containing both endpoints faces the reference direction.
    ///
    /// Normals are rotated only; translation and scale of the object are ignored.
    pub fn classify(&self, edge: &Edge, polygons: &[Polygon]) -> bool {
        polygons
            .iter()
            .filter(|polygon| polygon.contains_edge(edge))
            .any(|polygon| {
                (self.rotation * polygon.normal)
                    .try_normalize(NORMALIZE_EPSILON)
                    .map_or(false, |normal| normal.dot(&self.direction) > 0.0)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use std::f64::consts::FRAC_PI_2;

    fn single_quad(normal: Vector3<f64>) -> Vec<Polygon> {
        vec![Polygon::new(vec![0, 1, 2, 3], normal)]
    }

    #[test]
    fn test_facing_normal_marks_edges_front() {
        let classifier = VisibilityClassifier::fixed(Rotation3::identity());
        let polygons = single_quad(Vector3::new(1.0, -1.0, 0.0) / 2f64.sqrt());
        assert!(classifier.classify(&Edge::new(0, 1), &polygons));
        assert!(classifier.classify(&Edge::new(2, 3), &polygons));
    }

    #[test]
    fn test_negated_normal_marks_edges_back() {
        let classifier = VisibilityClassifier::fixed(Rotation3::identity());
        let polygons = single_quad(-Vector3::new(1.0, -1.0, 0.0) / 2f64.sqrt());
        assert!(!classifier.classify(&Edge::new(0, 1), &polygons));
        assert!(!classifier.classify(&Edge::new(2, 3), &polygons));
    }

    #[test]
    fn test_perpendicular_is_not_front() {
        let classifier = VisibilityClassifier::fixed(Rotation3::identity());
        let polygons = single_quad(Vector3::z());
        assert!(!classifier.classify(&Edge::new(0, 1), &polygons));
    }

    #[test]
    fn test_orphan_edge_is_not_front() {
        let classifier = VisibilityClassifier::fixed(Rotation3::identity());
        assert!(!classifier.classify(&Edge::new(7, 8), &single_quad(Vector3::new(1.0, -1.0, 0.0))));
        assert!(!classifier.classify(&Edge::new(0, 1), &[]));
    }

    #[test]
    fn test_object_rotation_applies_to_normals() {
        // Rotating the cube a quarter turn about Z brings the +Y face to -X, etc.
        let mesh = Primitive::cube(1.0).to_mesh();
        let identity = VisibilityClassifier::fixed(Rotation3::identity());
        let turned = VisibilityClassifier::fixed(Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2));

        // (0,1) is shared with the -Y face
        assert!(identity.classify(&Edge::new(0, 1), &mesh.polygons));
        // -Y rotates to +X, still front
        assert!(turned.classify(&Edge::new(0, 1), &mesh.polygons));
        // (3,0) is shared with -X, which rotates to -Y: front only after turning
        assert!(!identity.classify(&Edge::new(3, 0), &mesh.polygons));
        assert!(turned.classify(&Edge::new(3, 0), &mesh.polygons));
    }

    #[test]
    fn test_toward_point_rule() {
        let classifier =
            VisibilityClassifier::toward_point(Rotation3::identity(), Point3::origin(), Point3::new(0.0, 5.0, 0.0))
                .unwrap();
        let polygons = single_quad(Vector3::y());
        assert!(classifier.classify(&Edge::new(0, 1), &polygons));

        assert!(VisibilityClassifier::toward_point(Rotation3::identity(), Point3::origin(), Point3::origin()).is_err());
    }
}
