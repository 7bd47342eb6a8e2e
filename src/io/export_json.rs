// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wall document exporter (`blenderWalls` JSON)
//!
//! Struct fields are declared in key order so the output matches a
//! sorted-keys dump of the same document.

use crate::config::{ExtractConfig, OutputSchema};
use crate::extract::{ExportedWall, SegmentEndpoint, WallSegment};
use crate::utils::round_to;
use anyhow::{Context, Result};
use nalgebra::{Point2, Point3};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Knobs that shape the exported document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub schema: OutputSchema,
    /// Include `imagePixel` for each endpoint (canonical schema only)
    pub emit_pixel_space: bool,
    pub round_digits: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from(&ExtractConfig::default())
    }
}

impl From<&ExtractConfig> for ExportOptions {
    fn from(config: &ExtractConfig) -> Self {
        Self {
            schema: config.schema,
            emit_pixel_space: config.emit_pixel_space,
            round_digits: config.round_digits,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WallDocument<W> {
    blender_walls: Vec<W>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalWall {
    blender_object_name: String,
    foundry_walls: Vec<CanonicalSegment>,
    render_height: f64,
    render_upper_left_world: [f64; 2],
    render_width: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalSegment {
    a: CanonicalEndpoint,
    b: CanonicalEndpoint,
    is_front_facing: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    image_pixel: Option<[f64; 2]>,
    render_camera: [f64; 2],
    world: [f64; 3],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LegacyWall {
    blender_object_name: String,
    foundry_walls: Vec<LegacySegment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LegacySegment {
    a: [f64; 3],
    b: [f64; 3],
    is_front_facing: bool,
}

struct Rounder(u32);

impl Rounder {
    fn p3(&self, p: &Point3<f64>) -> [f64; 3] {
        [round_to(p.x, self.0), round_to(p.y, self.0), round_to(p.z, self.0)]
    }

    fn p2(&self, p: &Point2<f64>) -> [f64; 2] {
        [round_to(p.x, self.0), round_to(p.y, self.0)]
    }

    fn n(&self, v: f64) -> f64 {
        round_to(v, self.0)
    }
}

fn canonical_endpoint(end: &SegmentEndpoint, round: &Rounder, with_pixels: bool) -> CanonicalEndpoint {
    CanonicalEndpoint {
        image_pixel: with_pixels.then(|| round.p2(&end.pixel)),
        render_camera: round.p2(&end.ndc),
        world: round.p3(&end.world),
    }
}

fn canonical_wall(wall: &ExportedWall, options: &ExportOptions) -> CanonicalWall {
    let round = Rounder(options.round_digits);
    let segment = |s: &WallSegment| CanonicalSegment {
        a: canonical_endpoint(&s.a, &round, options.emit_pixel_space),
        b: canonical_endpoint(&s.b, &round, options.emit_pixel_space),
        is_front_facing: s.front_facing,
    };
    let anchor = wall.render_upper_left_world;

    CanonicalWall {
        blender_object_name: wall.name.clone(),
        foundry_walls: wall.segments.iter().map(segment).collect(),
        render_height: round.n(wall.height),
        render_upper_left_world: round.p2(&Point2::new(anchor.x, anchor.y)),
        render_width: round.n(wall.width),
    }
}

fn legacy_wall(wall: &ExportedWall, options: &ExportOptions) -> LegacyWall {
    let round = Rounder(options.round_digits);
    LegacyWall {
        blender_object_name: wall.name.clone(),
        foundry_walls: wall
            .segments
            .iter()
            .map(|s| LegacySegment {
                a: round.p3(&s.a.world),
                b: round.p3(&s.b.world),
                is_front_facing: s.front_facing,
            })
            .collect(),
    }
}

/// Serialize walls as a compact JSON document.
///
/// Walls are written in name order whatever order they arrive in.
pub fn to_json_string(walls: &[ExportedWall], options: &ExportOptions) -> Result<String> {
    let mut ordered: Vec<&ExportedWall> = walls.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name));

    let json = match options.schema {
        OutputSchema::Canonical => serde_json::to_string(&WallDocument {
            blender_walls: ordered.iter().map(|w| canonical_wall(w, options)).collect(),
        }),
        OutputSchema::Legacy => serde_json::to_string(&WallDocument {
            blender_walls: ordered.iter().map(|w| legacy_wall(w, options)).collect(),
        }),
    };
    json.context("Failed to serialize walls")
}

/// Write the wall document to `path`
pub fn export_json(walls: &[ExportedWall], options: &ExportOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = to_json_string(walls, options)?;
    fs::write(path, json).with_context(|| format!("Failed to write wall document: {}", path.display()))?;
    Ok(())
}
