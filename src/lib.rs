// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! isowall
//!
//! Turns wall-like mesh objects into 2D line data for isometric sprites.
//! For every object named as a wall, edges on its bottom plane are kept,
//! classified as front-facing or not, projected through an orthographic
//! camera into NDC and pixel space, and exported as a `blenderWalls` JSON
//! document together with the canvas size each sprite needs.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod io;
pub mod projection;
pub mod render;
pub mod scene;
pub mod utils;

pub use config::{ExtractConfig, OutputSchema, RenderScale};
pub use error::{ErrorKind, ExtractError, ExtractResult, ObjectFailure};
pub use extract::{ExportedWall, ExtractionReport, WallExtractor};
pub use geometry::{Mesh, Primitive, WorldTransform};
pub use io::{export_json, import_scene_file, parse_scene, to_json_string, ExportOptions};
pub use projection::{project, CameraProjector};
pub use scene::{Camera, Scene, SceneObject};

use anyhow::Result;
use std::path::Path;

/// Extract walls from a scene file with the given configuration
pub fn extract_file(path: impl AsRef<Path>, config: &ExtractConfig) -> Result<ExtractionReport> {
    let scene = import_scene_file(path)?;
    Ok(WallExtractor::new(config.clone()).extract(&scene)?)
}

/// Extract walls from scene JSON and return the wall document
pub fn extract_json(source: &str, config: &ExtractConfig) -> Result<String> {
    let scene = parse_scene(source)?;
    let report = WallExtractor::new(config.clone()).extract(&scene)?;
    to_json_string(&report.walls, &ExportOptions::from(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scene_needs_camera() {
        let err = extract_json(r#"{ "objects": [] }"#, &ExtractConfig::default()).unwrap_err();
        assert!(err.to_string().contains("iso-camera"));
    }

    #[test]
    fn test_scene_without_walls() {
        let source = r#"{
            "cameras": [{ "name": "iso-camera", "orthoScale": 1.0,
                          "matrixWorld": [[1,0,0,0],[0,1,0,0],[0,0,1,5],[0,0,0,1]] }]
        }"#;
        let json = extract_json(source, &ExtractConfig::default()).unwrap();
        assert_eq!(json, r#"{"blenderWalls":[]}"#);
    }
}
