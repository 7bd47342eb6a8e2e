// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use crate::error::{ExtractError, ExtractResult};
use nalgebra::{Point3, Vector3};

/// Lengths below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Normalize a vector, refusing zero-length or non-finite input
pub fn try_normalize(v: &Vector3<f64>, what: &'static str) -> ExtractResult<Vector3<f64>> {
    if !v.iter().all(|c| c.is_finite()) {
        return Err(ExtractError::NonFinite(what));
    }
    v.try_normalize(NORMALIZE_EPSILON)
        .ok_or(ExtractError::NonFinite(what))
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let rounded = (value * factor).round() / factor;
    // avoid emitting "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Fail if any component of a point is NaN or infinite
pub fn ensure_finite_point(p: &Point3<f64>, what: &'static str) -> ExtractResult<()> {
    if p.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(ExtractError::NonFinite(what))
    }
}

/// Convert a slice into a point, requiring exactly three components
pub fn point_from_slice(coords: &[f64]) -> ExtractResult<Point3<f64>> {
    match coords {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(ExtractError::InvalidDimension { len: coords.len() }),
    }
}

/// Newell's method: robust normal for a (possibly non-planar) polygon
pub fn newell_normal(points: &[Point3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }
    normal
}
