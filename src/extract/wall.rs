// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Records produced by a pipeline run

use crate::error::ObjectFailure;
use crate::projection::ViewFit;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One end of a wall segment in every coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentEndpoint {
    pub world: Point3<f64>,
    pub ndc: Point2<f64>,
    pub pixel: Point2<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub a: SegmentEndpoint,
    pub b: SegmentEndpoint,
    pub front_facing: bool,
}

/// Everything extracted from one wall object
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedWall {
    pub name: String,
    pub segments: Vec<WallSegment>,
    /// Where the rendered image's upper-left corner lands on Z = 0
    pub render_upper_left_world: Point3<f64>,
    pub width: f64,
    pub height: f64,
    /// Camera framing used for this object
    pub view: ViewFit,
}

impl ExportedWall {
    pub fn front_facing_count(&self) -> usize {
        self.segments.iter().filter(|s| s.front_facing).count()
    }
}

/// Why a selected object produced no wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    NoEdges,
    NoBottomEdges,
    NoProjectableEdges,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoEdges => "mesh has no edges",
            Self::NoBottomEdges => "no edges on the bottom plane",
            Self::NoProjectableEdges => "no bottom edge could be projected",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedObject {
    pub object: String,
    pub reason: SkipReason,
}

/// Result of a full extraction run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    /// Sorted by object name
    pub walls: Vec<ExportedWall>,
    pub failures: Vec<ObjectFailure>,
    pub skipped: Vec<SkippedObject>,
    /// Segments left out because an endpoint could not be projected
    pub dropped_segments: usize,
}

impl ExtractionReport {
    pub fn segment_count(&self) -> usize {
        self.walls.iter().map(|w| w.segments.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.dropped_segments == 0
    }

    pub fn wall(&self, name: &str) -> Option<&ExportedWall> {
        self.walls.iter().find(|w| w.name == name)
    }
}
