// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for wall extraction

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the extraction core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// A world transform could not be inverted or decomposed.
    #[error("Singular matrix: {context}")]
    SingularMatrix {
        /// What the matrix belonged to.
        context: String,
    },

    /// Homogeneous w collapsed to zero while projecting a point.
    #[error("Degenerate projection: homogeneous w = {w}")]
    DegenerateProjection {
        /// The offending w component.
        w: f64,
    },

    /// The camera is not configured for orthographic projection.
    #[error("Camera '{name}' is not orthographic")]
    NotOrthographic {
        /// Camera name.
        name: String,
    },

    /// A point did not have exactly three components.
    #[error("Expected a 3-dimensional point, got {len} components")]
    InvalidDimension {
        /// Number of components supplied.
        len: usize,
    },

    /// No camera with the configured name exists in the scene.
    #[error("No camera named '{0}' in scene")]
    CameraNotFound(String),

    /// The camera does not track along its local -Z axis.
    #[error("Camera '{name}' tracks {axis}; only -Z tracking is supported")]
    UnsupportedTrackAxis {
        /// Camera name.
        name: String,
        /// The configured track axis.
        axis: String,
    },

    /// All bounding-box corners coincide.
    #[error("Bounding box has zero extent")]
    DegenerateBounds,

    /// An edge or polygon references a vertex that does not exist.
    #[error("Vertex index {index} out of range ({count} vertices)")]
    VertexIndexOutOfRange {
        /// The referenced index.
        index: usize,
        /// Number of vertices in the mesh.
        count: usize,
    },

    /// A polygon with fewer than three vertices.
    #[error("Polygon {index} has {count} vertices (need at least 3)")]
    DegeneratePolygon {
        /// Polygon index within the mesh.
        index: usize,
        /// Number of vertices it has.
        count: usize,
    },

    /// A polygon whose vertices span no area, so it has no normal.
    #[error("Polygon {index} has zero area; cannot compute its normal")]
    ZeroAreaPolygon {
        /// Polygon index within the mesh.
        index: usize,
    },

    /// The camera's forward ray never meets the ground plane.
    #[error("Camera forward ray is parallel to the ground plane")]
    RayParallelToGround,

    /// A NaN or infinite value showed up in a computed quantity.
    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),
}

/// Machine-readable error kind, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    SingularMatrix,
    DegenerateProjection,
    NotOrthographic,
    InvalidDimension,
    CameraNotFound,
    UnsupportedTrackAxis,
    DegenerateBounds,
    VertexIndexOutOfRange,
    DegeneratePolygon,
    ZeroAreaPolygon,
    RayParallelToGround,
    NonFinite,
}

impl ExtractError {
    pub fn singular(context: impl Into<String>) -> Self {
        Self::SingularMatrix {
            context: context.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SingularMatrix { .. } => ErrorKind::SingularMatrix,
            Self::DegenerateProjection { .. } => ErrorKind::DegenerateProjection,
            Self::NotOrthographic { .. } => ErrorKind::NotOrthographic,
            Self::InvalidDimension { .. } => ErrorKind::InvalidDimension,
            Self::CameraNotFound(_) => ErrorKind::CameraNotFound,
            Self::UnsupportedTrackAxis { .. } => ErrorKind::UnsupportedTrackAxis,
            Self::DegenerateBounds => ErrorKind::DegenerateBounds,
            Self::VertexIndexOutOfRange { .. } => ErrorKind::VertexIndexOutOfRange,
            Self::DegeneratePolygon { .. } => ErrorKind::DegeneratePolygon,
            Self::ZeroAreaPolygon { .. } => ErrorKind::ZeroAreaPolygon,
            Self::RayParallelToGround => ErrorKind::RayParallelToGround,
            Self::NonFinite(_) => ErrorKind::NonFinite,
        }
    }

    /// Whether this error aborts the whole run rather than a single object.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CameraNotFound(_) | Self::UnsupportedTrackAxis { .. } | Self::NotOrthographic { .. }
        )
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// A per-object failure collected during a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectFailure {
    pub object: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl ObjectFailure {
    pub fn new(object: impl Into<String>, error: &ExtractError) -> Self {
        Self {
            object: object.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
