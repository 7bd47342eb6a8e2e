// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene value types handed over by the host application

use crate::error::{ExtractError, ExtractResult};
use crate::geometry::{BoundingBox, Mesh, WorldTransform};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a camera projects the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Orthographic,
    Perspective,
}

/// Local axis a camera looks along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackAxis {
    PosX,
    PosY,
    PosZ,
    NegX,
    NegY,
    NegZ,
}

impl fmt::Display for TrackAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PosX => "+X",
            Self::PosY => "+Y",
            Self::PosZ => "+Z",
            Self::NegX => "-X",
            Self::NegY => "-Y",
            Self::NegZ => "-Z",
        };
        f.write_str(name)
    }
}

/// Camera as seen by the extraction core
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub name: String,
    pub transform: WorldTransform,
    /// World units spanned by the narrower viewport axis
    pub ortho_scale: f64,
    pub projection: ProjectionKind,
    pub track_axis: TrackAxis,
    pub clip_start: f64,
    pub clip_end: f64,
}

impl Camera {
    pub const DEFAULT_CLIP_START: f64 = 0.1;
    pub const DEFAULT_CLIP_END: f64 = 100.0;

    /// Orthographic camera tracking -Z with default clipping
    pub fn orthographic(name: impl Into<String>, transform: WorldTransform, ortho_scale: f64) -> Self {
        Self {
            name: name.into(),
            transform,
            ortho_scale,
            projection: ProjectionKind::Orthographic,
            track_axis: TrackAxis::NegZ,
            clip_start: Self::DEFAULT_CLIP_START,
            clip_end: Self::DEFAULT_CLIP_END,
        }
    }

    /// Startup precondition: -Z tracking and orthographic projection
    pub fn ensure_supported(&self) -> ExtractResult<()> {
        if self.track_axis != TrackAxis::NegZ {
            return Err(ExtractError::UnsupportedTrackAxis {
                name: self.name.clone(),
                axis: self.track_axis.to_string(),
            });
        }
        if self.projection != ProjectionKind::Orthographic {
            return Err(ExtractError::NotOrthographic {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Same camera with a different pose and scale
    pub fn with_view(&self, transform: WorldTransform, ortho_scale: f64) -> Self {
        Self {
            transform,
            ortho_scale,
            ..self.clone()
        }
    }
}

/// A named scene object with optional mesh data
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub transform: WorldTransform,
    pub mesh: Option<Mesh>,
    /// 8 corner points in local space
    pub bound_box: [Point3<f64>; 8],
    /// Geometry problem found on import, reported if the object is extracted
    pub defect: Option<ExtractError>,
}

impl SceneObject {
    /// Mesh object whose bounding box is derived from its vertices
    pub fn with_mesh(name: impl Into<String>, transform: WorldTransform, mesh: Mesh) -> Self {
        let bound_box = if mesh.vertices.is_empty() {
            BoundingBox::new(Point3::origin(), Point3::origin()).corners()
        } else {
            mesh.bounding_box().corners()
        };
        Self {
            name: name.into(),
            transform,
            mesh: Some(mesh),
            bound_box,
            defect: None,
        }
    }

    /// Object without geometry (empties, lights)
    pub fn without_mesh(name: impl Into<String>, transform: WorldTransform) -> Self {
        Self {
            name: name.into(),
            transform,
            mesh: None,
            bound_box: BoundingBox::new(Point3::origin(), Point3::origin()).corners(),
            defect: None,
        }
    }

    /// Object whose geometry could not be read
    pub fn rejected(name: impl Into<String>, transform: WorldTransform, defect: ExtractError) -> Self {
        Self {
            defect: Some(defect),
            ..Self::without_mesh(name, transform)
        }
    }

    /// Whether this object has geometry to extract, valid or not
    pub fn has_geometry(&self) -> bool {
        self.mesh.is_some() || self.defect.is_some()
    }
}

/// Output canvas settings. Canvas size itself is estimated per object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderSettings {
    pub pixel_aspect_x: f64,
    pub pixel_aspect_y: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            pixel_aspect_x: 1.0,
            pixel_aspect_y: 1.0,
        }
    }
}

/// Everything the core reads from the host for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub cameras: Vec<Camera>,
    pub objects: Vec<SceneObject>,
    pub render: RenderSettings,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_camera(&mut self, camera: Camera) {
        self.cameras.push(camera);
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Look up the extraction camera and check it is usable
    pub fn find_camera(&self, name: &str) -> ExtractResult<&Camera> {
        let camera = self
            .cameras
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ExtractError::CameraNotFound(name.to_string()))?;
        camera.ensure_supported()?;
        Ok(camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;

    #[test]
    fn test_find_camera() {
        let mut scene = Scene::new();
        scene.add_camera(Camera::orthographic("iso-camera", WorldTransform::identity(), 2.0));

        assert!(scene.find_camera("iso-camera").is_ok());
        assert_eq!(
            scene.find_camera("Camera"),
            Err(ExtractError::CameraNotFound("Camera".into()))
        );
    }

    #[test]
    fn test_unsupported_cameras() {
        let mut camera = Camera::orthographic("iso-camera", WorldTransform::identity(), 2.0);
        camera.track_axis = TrackAxis::PosY;
        assert!(matches!(
            camera.ensure_supported(),
            Err(ExtractError::UnsupportedTrackAxis { ref axis, .. }) if axis == "+Y"
        ));

        camera.track_axis = TrackAxis::NegZ;
        camera.projection = ProjectionKind::Perspective;
        assert!(matches!(camera.ensure_supported(), Err(ExtractError::NotOrthographic { .. })));
    }

    #[test]
    fn test_object_bound_box_from_mesh() {
        let object = SceneObject::with_mesh("wall.001", WorldTransform::identity(), Primitive::cube(2.0).to_mesh());
        let bbox = BoundingBox::from_points(&object.bound_box);
        assert_eq!(bbox.min, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(bbox.max, Point3::new(1.0, 1.0, 1.0));
    }
}
