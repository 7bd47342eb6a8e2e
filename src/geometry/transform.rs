// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Affine world transforms: inversion and decomposition

use crate::error::{ExtractError, ExtractResult};
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Vector3, Vector4};

/// Scale factors below this make a transform non-invertible.
pub const SCALE_EPSILON: f64 = 1e-12;

/// Translation, rotation and scale pulled out of an affine matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    pub translation: Vector3<f64>,
    pub rotation: Rotation3<f64>,
    pub scale: Vector3<f64>,
}

/// A 4×4 affine world transform (rotation·scale + translation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub matrix: Matrix4<f64>,
}

impl WorldTransform {
    pub fn new(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    pub fn identity() -> Self {
        Self::new(Matrix4::identity())
    }

    pub fn from_translation(t: Vector3<f64>) -> Self {
        Self::new(Matrix4::new_translation(&t))
    }

    /// Build from translation, rotation and per-axis scale (T · R · S)
    pub fn from_parts(translation: Vector3<f64>, rotation: Rotation3<f64>, scale: Vector3<f64>) -> Self {
        let linear = rotation.matrix() * Matrix3::from_diagonal(&scale);
        let mut matrix = linear.to_homogeneous();
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&translation);
        Self::new(matrix)
    }

    /// Camera-style transform placed at `eye`, looking at `target`, with `up` roughly vertical.
    ///
    /// The resulting local -Z axis points at the target and local +Y is the screen up.
    pub fn looking_at(eye: Point3<f64>, target: Point3<f64>, up: Vector3<f64>) -> ExtractResult<Self> {
        let view = Matrix4::look_at_rh(&eye, &target, &up);
        let world = view
            .try_inverse()
            .ok_or_else(|| ExtractError::singular("look-at view"))?;
        if world.iter().any(|c| !c.is_finite()) {
            return Err(ExtractError::singular("look-at view"));
        }
        Ok(Self::new(world))
    }

    pub fn translation(&self) -> Vector3<f64> {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    pub fn linear(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    pub fn transform_point(&self, p: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(p)
    }

    /// Apply the linear part only (no translation)
    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.transform_vector(v)
    }

    pub fn transform_homogeneous(&self, v: &Vector4<f64>) -> Vector4<f64> {
        self.matrix * v
    }

    pub fn compose(&self, other: &WorldTransform) -> WorldTransform {
        WorldTransform::new(self.matrix * other.matrix)
    }

    /// Invert the transform, failing on degenerate scale
    pub fn inverse(&self, context: &str) -> ExtractResult<WorldTransform> {
        if self.linear().determinant().abs() < SCALE_EPSILON {
            return Err(ExtractError::singular(context));
        }
        self.matrix
            .try_inverse()
            .map(WorldTransform::new)
            .ok_or_else(|| ExtractError::singular(context))
    }

    /// Split into translation, rotation and scale.
    ///
    /// Negative determinants (mirrored objects) flip the sign of every scale
    /// component and of the rotation basis so that the rotation stays proper.
    pub fn decompose(&self, context: &str) -> ExtractResult<Decomposed> {
        let linear = self.linear();
        let mut scale = Vector3::new(
            linear.column(0).norm(),
            linear.column(1).norm(),
            linear.column(2).norm(),
        );
        if scale.iter().any(|s| !s.is_finite() || *s < SCALE_EPSILON)
            || linear.determinant().abs() < SCALE_EPSILON
        {
            return Err(ExtractError::singular(context));
        }

        let mut basis = Matrix3::from_columns(&[
            linear.column(0) / scale.x,
            linear.column(1) / scale.y,
            linear.column(2) / scale.z,
        ]);
        if basis.determinant() < 0.0 {
            basis = -basis;
            scale = -scale;
        }

        // Polar decomposition: nearest proper rotation to a sheared basis.
        let svd = basis.svd(true, true);
        let (u, v_t) = match (svd.u, svd.v_t) {
            (Some(u), Some(v_t)) => (u, v_t),
            _ => return Err(ExtractError::singular(context)),
        };
        let rotation = Rotation3::from_matrix_unchecked(u * v_t);

        Ok(Decomposed {
            translation: self.translation(),
            rotation,
            scale,
        })
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4<f64>> for WorldTransform {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self::new(matrix)
    }
}
