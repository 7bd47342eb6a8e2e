// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use super::WorldTransform;
use crate::error::{ExtractError, ExtractResult};
use crate::utils::math::ensure_finite_point;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Extents below this count as zero when checking for degenerate boxes.
pub const EXTENT_EPSILON: f64 = 1e-9;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3<f64>]) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// The 8 corners, bottom ring first (same order as the host's `bound_box`)
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(b.x, b.y, b.z),
            Point3::new(b.x, b.y, a.z),
        ]
    }
}

/// Bounding-box landmarks of an object, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// The 8 local corners after the object's world transform
    pub corners: [Point3<f64>; 8],
    pub center: Point3<f64>,
    /// Center of the box projected down onto its lowest world Z
    pub bottom_center: Point3<f64>,
    /// Minimum world Z over all corners
    pub bottom_z: f64,
}

impl WorldBounds {
    /// Transform local bounding-box corners to world space and derive the bottom plane
    pub fn from_local_corners(corners: &[Point3<f64>; 8], transform: &WorldTransform) -> ExtractResult<Self> {
        let world = corners.map(|c| transform.transform_point(&c));
        for corner in &world {
            ensure_finite_point(corner, "bounding box")?;
        }

        let bbox = BoundingBox::from_points(&world);
        if bbox.size().amax() < EXTENT_EPSILON {
            return Err(ExtractError::DegenerateBounds);
        }

        let center = Point3::from(world.iter().fold(Vector3::zeros(), |acc, c| acc + c.coords) / 8.0);
        let bottom_z = bbox.min.z;

        Ok(Self {
            corners: world,
            center,
            bottom_center: Point3::new(center.x, center.y, bottom_z),
            bottom_z,
        })
    }
}
