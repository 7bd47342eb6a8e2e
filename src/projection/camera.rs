// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Orthographic world -> NDC -> pixel projection

use crate::error::{ExtractError, ExtractResult};
use crate::geometry::WorldTransform;
use crate::scene::{Camera, ProjectionKind};
use crate::utils::math::{ensure_finite_point, point_from_slice};
use nalgebra::{Matrix4, Point2, Point3, Vector2, Vector4};
use serde::{Deserialize, Serialize};

/// |w| below this is treated as a point at infinity.
pub const W_EPSILON: f64 = 1e-12;

/// Canvas dimensions and pixel aspect used for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_aspect_x: f64,
    pub pixel_aspect_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_aspect_x: f64, pixel_aspect_y: f64) -> Self {
        Self {
            width,
            height,
            pixel_aspect_x,
            pixel_aspect_y,
        }
    }

    /// Square canvas of `size` pixels
    pub fn square(size: f64, pixel_aspect_x: f64, pixel_aspect_y: f64) -> Self {
        Self::new(size, size, pixel_aspect_x, pixel_aspect_y)
    }

    /// Display aspect ratio (width over height) including pixel aspect
    pub fn aspect(&self) -> f64 {
        (self.width * self.pixel_aspect_x) / (self.height * self.pixel_aspect_y)
    }

    pub fn validate(&self) -> ExtractResult<()> {
        let ok = [self.width, self.height, self.pixel_aspect_x, self.pixel_aspect_y]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if ok {
            Ok(())
        } else {
            Err(ExtractError::NonFinite("viewport"))
        }
    }

    /// Half extents (x, y) of the view volume in camera units.
    ///
    /// The narrower axis spans `ortho_scale`, the wider one is stretched by the aspect ratio.
    pub fn half_extents(&self, ortho_scale: f64) -> Vector2<f64> {
        let aspect = self.aspect();
        let half = ortho_scale / 2.0;
        if aspect >= 1.0 {
            Vector2::new(half * aspect, half)
        } else {
            Vector2::new(half, half / aspect)
        }
    }
}

/// A world point after projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Normalized device coordinates, x left→right, y bottom→top
    pub ndc: Point2<f64>,
    /// Top-left-origin pixel coordinates
    pub pixel: Point2<f64>,
}

/// Projects world points through an orthographic camera onto a canvas
#[derive(Debug, Clone)]
pub struct CameraProjector {
    view_projection: Matrix4<f64>,
    viewport: Viewport,
}

impl CameraProjector {
    /// Precompute `projection · inverse(cameraTransform)` for the camera's current pose and scale
    pub fn new(camera: &Camera, viewport: Viewport) -> ExtractResult<Self> {
        if camera.projection != ProjectionKind::Orthographic {
            return Err(ExtractError::NotOrthographic {
                name: camera.name.clone(),
            });
        }
        Self::orthographic(
            &camera.transform,
            camera.ortho_scale,
            camera.clip_start,
            camera.clip_end,
            viewport,
        )
    }

    pub fn orthographic(
        camera_transform: &WorldTransform,
        ortho_scale: f64,
        clip_start: f64,
        clip_end: f64,
        viewport: Viewport,
    ) -> ExtractResult<Self> {
        viewport.validate()?;
        if !(ortho_scale.is_finite() && ortho_scale > 0.0) {
            return Err(ExtractError::NonFinite("ortho scale"));
        }
        if !(clip_end - clip_start).is_finite() || clip_end <= clip_start {
            return Err(ExtractError::NonFinite("clip range"));
        }

        let model_view = camera_transform.inverse("camera transform")?;
        let projection = orthographic_matrix(viewport.half_extents(ortho_scale), clip_start, clip_end);

        Ok(Self {
            view_projection: projection * model_view.matrix,
            viewport,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// World point to NDC and pixel coordinates
    pub fn project(&self, world: &Point3<f64>) -> ExtractResult<ProjectedPoint> {
        ensure_finite_point(world, "world point")?;

        let homog = self.view_projection * Vector4::new(world.x, world.y, world.z, 1.0);
        if homog.w.abs() < W_EPSILON {
            return Err(ExtractError::DegenerateProjection { w: homog.w });
        }

        let ndc = Point2::new(homog.x / homog.w, homog.y / homog.w);
        if !(ndc.x.is_finite() && ndc.y.is_finite()) {
            return Err(ExtractError::NonFinite("projected point"));
        }

        Ok(ProjectedPoint {
            ndc,
            pixel: self.ndc_to_pixel(&ndc),
        })
    }

    /// Like [`project`](Self::project) but for untyped coordinates
    pub fn project_slice(&self, coords: &[f64]) -> ExtractResult<ProjectedPoint> {
        self.project(&point_from_slice(coords)?)
    }

    /// NDC to top-left-origin pixels; x is not swapped, y is flipped
    pub fn ndc_to_pixel(&self, ndc: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            (self.viewport.width - 1.0) * (ndc.x + 1.0) / 2.0,
            (self.viewport.height - 1.0) * (1.0 - ndc.y) / 2.0,
        )
    }
}

fn orthographic_matrix(half: Vector2<f64>, near: f64, far: f64) -> Matrix4<f64> {
    let depth = far - near;
    Matrix4::new(
        1.0 / half.x, 0.0, 0.0, 0.0,
        0.0, 1.0 / half.y, 0.0, 0.0,
        0.0, 0.0, -2.0 / depth, -(far + near) / depth,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// One-shot projection with explicit camera parameters
#[allow(clippy::too_many_arguments)]
pub fn project(
    camera_transform: &WorldTransform,
    ortho_scale: f64,
    resolution_width: f64,
    resolution_height: f64,
    pixel_aspect_x: f64,
    pixel_aspect_y: f64,
    world_point: &[f64],
) -> ExtractResult<ProjectedPoint> {
    let viewport = Viewport::new(resolution_width, resolution_height, pixel_aspect_x, pixel_aspect_y);
    CameraProjector::orthographic(
        camera_transform,
        ortho_scale,
        Camera::DEFAULT_CLIP_START,
        Camera::DEFAULT_CLIP_END,
        viewport,
    )?
    .project_slice(world_point)
}
