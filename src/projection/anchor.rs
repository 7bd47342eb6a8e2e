// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ground-plane anchor of the rendered image's upper-left corner

use crate::error::{ExtractError, ExtractResult};
use crate::geometry::WorldTransform;
use crate::utils::math::ensure_finite_point;
use nalgebra::{Point3, Vector2, Vector3};

/// Forward-Z components below this make the view ray parallel to the ground.
pub const GROUND_EPSILON: f64 = 1e-12;

/// Intersect a ray from the camera's upper-left viewport corner, cast along
/// the camera's forward direction, with the ground plane Z = 0.
pub fn render_upper_left_on_ground(
    camera_transform: &WorldTransform,
    half_extents: Vector2<f64>,
) -> ExtractResult<Point3<f64>> {
    let forward = camera_transform.transform_vector(&-Vector3::z());
    let upper_left = camera_transform.transform_point(&Point3::new(-half_extents.x, half_extents.y, 0.0));

    if forward.z.abs() < GROUND_EPSILON {
        return Err(ExtractError::RayParallelToGround);
    }

    let t = -upper_left.z / forward.z;
    let hit = upper_left + forward * t;
    ensure_finite_point(&hit, "render anchor")?;
    Ok(hit)
}
