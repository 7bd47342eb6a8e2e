// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wall extraction: bottom-edge filtering, facing, canvas sizing and the pipeline

pub mod edge_filter;
pub mod pipeline;
pub mod resolution;
pub mod visibility;
pub mod wall;

pub use edge_filter::{BottomEdge, EdgeFilter, DEFAULT_EDGE_EPSILON};
pub use pipeline::{ObjectOutcome, WallExtractor};
pub use resolution::{estimate, ResolutionEstimator, DEFAULT_GRID_SIZE, SQRT_PI};
pub use visibility::{toward_camera_dir, FacingRule, VisibilityClassifier};
pub use wall::{ExportedWall, ExtractionReport, SegmentEndpoint, SkipReason, SkippedObject, WallSegment};
