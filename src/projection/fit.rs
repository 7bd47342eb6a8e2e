// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Framing an object with the orthographic camera

use super::Viewport;
use crate::error::{ExtractError, ExtractResult};
use crate::geometry::{WorldBounds, WorldTransform};
use crate::scene::Camera;
use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Projected extents below this cannot be framed.
pub const FIT_EPSILON: f64 = 1e-9;

/// Camera pose and orthographic scale that frame one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewFit {
    pub ortho_scale: f64,
    pub camera_transform: WorldTransform,
}

/// Strategy for discovering the orthographic scale of an object
pub trait CameraFit: Send + Sync {
    fn fit(&self, camera: &Camera, bounds: &WorldBounds, viewport: &Viewport) -> ExtractResult<ViewFit>;
}

/// Which fit strategy to use, as named in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitMode {
    /// Analytic framing from the bounding box
    Bounds,
    /// Keep the camera's scale and pose as the host left them
    Fixed,
}

/// Analytic fit: project the 8 world corners onto the camera's view plane
/// (rotation only) and size the view to their bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundsFit {
    /// Extra room around the object, as a fraction of the scale
    pub margin: f64,
    /// Slide the camera in its view plane so the object is centered
    pub recenter: bool,
}

impl Default for BoundsFit {
    fn default() -> Self {
        Self {
            margin: 0.0,
            recenter: true,
        }
    }
}

impl CameraFit for BoundsFit {
    fn fit(&self, camera: &Camera, bounds: &WorldBounds, viewport: &Viewport) -> ExtractResult<ViewFit> {
        viewport.validate()?;
        let rotation = camera.transform.decompose("camera transform")?.rotation;
        let inverse_rotation = rotation.inverse();
        let origin = camera.transform.translation();

        let mut min = Vector2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for corner in &bounds.corners {
            let local = inverse_rotation * (corner.coords - origin);
            min = min.inf(&local.xy());
            max = max.sup(&local.xy());
        }

        let extent = max - min;
        if extent.amax() < FIT_EPSILON {
            return Err(ExtractError::DegenerateBounds);
        }

        let aspect = viewport.aspect();
        let scale = if aspect >= 1.0 {
            extent.y.max(extent.x / aspect)
        } else {
            extent.x.max(extent.y * aspect)
        };
        let ortho_scale = scale * (1.0 + self.margin);

        let camera_transform = if self.recenter {
            let center = (min + max) / 2.0;
            let shift = rotation * Vector3::new(center.x, center.y, 0.0);
            WorldTransform::from_translation(shift).compose(&camera.transform)
        } else {
            camera.transform
        };

        Ok(ViewFit {
            ortho_scale,
            camera_transform,
        })
    }
}

/// Use whatever scale and pose the camera already has.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedScale;

impl CameraFit for FixedScale {
    fn fit(&self, camera: &Camera, _bounds: &WorldBounds, _viewport: &Viewport) -> ExtractResult<ViewFit> {
        if !(camera.ortho_scale.is_finite() && camera.ortho_scale > 0.0) {
            return Err(ExtractError::NonFinite("ortho scale"));
        }
        Ok(ViewFit {
            ortho_scale: camera.ortho_scale,
            camera_transform: camera.transform,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, Primitive};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn iso_camera() -> Camera {
        let transform =
            WorldTransform::looking_at(Point3::new(2.0, -2.0, 2.0), Point3::origin(), Vector3::z()).unwrap();
        Camera::orthographic("iso-camera", transform, 1.0)
    }

    fn bounds_of(bbox: BoundingBox, transform: &WorldTransform) -> WorldBounds {
        WorldBounds::from_local_corners(&bbox.corners(), transform).unwrap()
    }

    #[test]
    fn test_floor_tile_scale_is_sqrt_two() {
        let tile = Primitive::plane(1.0).to_mesh().bounding_box();
        let fit = BoundsFit::default()
            .fit(&iso_camera(), &bounds_of(tile, &WorldTransform::identity()), &Viewport::square(1.0, 1.0, 1.0))
            .unwrap();
        assert_relative_eq!(fit.ortho_scale, std::f64::consts::SQRT_2, epsilon = 1e-9);
    }

    #[test]
    fn test_recenter_moves_camera_in_view_plane() {
        let camera = iso_camera();
        let cube = Primitive::cube(1.0).to_mesh().bounding_box();
        let offset = Vector3::new(3.0, 3.0, 0.0);
        let bounds = bounds_of(cube, &WorldTransform::from_translation(offset));

        let fit = BoundsFit::default()
            .fit(&camera, &bounds, &Viewport::square(1.0, 1.0, 1.0))
            .unwrap();

        // Cube center must now sit on the camera's optical axis
        let to_center = bounds.center.coords - fit.camera_transform.translation();
        let forward = fit.camera_transform.transform_vector(&-Vector3::z()).normalize();
        assert_relative_eq!(to_center.cross(&forward).norm(), 0.0, epsilon = 1e-9);

        // Rotation is untouched
        assert_relative_eq!(fit.camera_transform.linear(), camera.transform.linear(), epsilon = 1e-12);

        let still = BoundsFit { recenter: false, ..Default::default() }
            .fit(&camera, &bounds, &Viewport::square(1.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(still.camera_transform, camera.transform);
        assert_relative_eq!(still.ortho_scale, fit.ortho_scale, epsilon = 1e-9);
    }

    #[test]
    fn test_margin() {
        let tile = Primitive::plane(1.0).to_mesh().bounding_box();
        let fit = BoundsFit { margin: 0.1, recenter: true }
            .fit(&iso_camera(), &bounds_of(tile, &WorldTransform::identity()), &Viewport::square(1.0, 1.0, 1.0))
            .unwrap();
        assert_relative_eq!(fit.ortho_scale, std::f64::consts::SQRT_2 * 1.1, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_scale_passes_camera_through() {
        let camera = iso_camera();
        let cube = Primitive::cube(1.0).to_mesh().bounding_box();
        let fit = FixedScale
            .fit(&camera, &bounds_of(cube, &WorldTransform::identity()), &Viewport::square(1.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(fit.ortho_scale, 1.0);
        assert_eq!(fit.camera_transform, camera.transform);
    }
}
