// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene import through wall export, via files on disk

use anyhow::Result;
use isowall::cli::Runner;
use isowall::error::ErrorKind;
use isowall::{extract_file, extract_json, io, ExtractConfig, OutputSchema};
use serde_json::Value;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Iso camera at (2,-2,2) looking at the origin, written row-major.
/// Columns are right = (1,1,0)/√2, up = (-1,1,2)/√6, back = (1,-1,1)/√3.
const CUBE_SCENE: &str = r#"{
    "render": { "pixelAspectX": 1.0, "pixelAspectY": 1.0 },
    "cameras": [{
        "name": "iso-camera",
        "orthoScale": 1.4142135623730951,
        "matrixWorld": [
            [0.7071067811865476, -0.4082482904638631, 0.5773502691896258, 2.0],
            [0.7071067811865476, 0.4082482904638631, -0.5773502691896258, -2.0],
            [0.0, 0.8164965809277261, 0.5773502691896258, 2.0],
            [0.0, 0.0, 0.0, 1.0]
        ]
    }],
    "objects": [{
        "name": "wall.001",
        "matrixWorld": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]],
        "mesh": {
            "vertices": [
                [-0.5,-0.5,-0.5],[0.5,-0.5,-0.5],[0.5,0.5,-0.5],[-0.5,0.5,-0.5],
                [-0.5,-0.5,0.5],[0.5,-0.5,0.5],[0.5,0.5,0.5],[-0.5,0.5,0.5]
            ],
            "polygons": [
                { "vertices": [0,3,2,1] },
                { "vertices": [4,5,6,7] },
                { "vertices": [0,1,5,4] },
                { "vertices": [1,2,6,5] },
                { "vertices": [2,3,7,6] },
                { "vertices": [3,0,4,7] }
            ]
        }
    }, {
        "name": "wall.empty",
        "matrixWorld": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]],
        "mesh": { "vertices": [[0,0,0]], "edges": [], "polygons": [] }
    }, {
        "name": "Lamp",
        "matrixWorld": [[1,0,0,0],[0,1,0,0],[0,0,1,3],[0,0,0,1]]
    }]
}"#;

fn scene_file() -> Result<NamedTempFile> {
    let mut file = NamedTempFile::with_suffix(".json")?;
    write!(file, "{CUBE_SCENE}")?;
    Ok(file)
}

#[test]
fn test_extract_from_file() -> Result<()> {
    let file = scene_file()?;
    let config = ExtractConfig {
        fit: isowall::projection::FitMode::Fixed,
        ..Default::default()
    };
    let report = extract_file(file.path(), &config)?;

    assert_eq!(report.walls.len(), 1);
    let wall = &report.walls[0];
    // Edges were derived from the polygons: 12 in total, 4 on the bottom
    assert_eq!(wall.segments.len(), 4);
    assert_eq!(wall.front_facing_count(), 2);
    assert!((wall.width - 177.245).abs() < 1e-3);
    Ok(())
}

#[test]
fn test_canonical_document_shape() -> Result<()> {
    let file = scene_file()?;
    let report = extract_file(file.path(), &ExtractConfig::default())?;
    let json = io::to_json_string(&report.walls, &io::ExportOptions::default())?;
    let doc: Value = serde_json::from_str(&json)?;

    let walls = doc["blenderWalls"].as_array().unwrap();
    assert_eq!(walls.len(), 1);
    let wall = &walls[0];
    assert_eq!(wall["blenderObjectName"], "wall.001");
    assert_eq!(wall["renderUpperLeftWorld"].as_array().unwrap().len(), 2);
    assert_eq!(wall["renderWidth"], wall["renderHeight"]);

    let segment = &wall["foundryWalls"][0];
    for end in ["a", "b"] {
        assert_eq!(segment[end]["world"].as_array().unwrap().len(), 3);
        assert_eq!(segment[end]["renderCamera"].as_array().unwrap().len(), 2);
        assert_eq!(segment[end]["imagePixel"].as_array().unwrap().len(), 2);
    }
    assert!(segment["isFrontFacing"].is_boolean());
    Ok(())
}

#[test]
fn test_runner_writes_outputs() -> Result<()> {
    let file = scene_file()?;
    let dir = TempDir::new()?;
    let output = dir.path().join("walls.json");
    let plan = dir.path().join("plans").join("render.json");

    let config = ExtractConfig {
        schema: OutputSchema::Legacy,
        output_dir: dir.path().join("sprites"),
        ..Default::default()
    };
    let result = Runner::new(config).with_render_plan(&plan).run(file.path(), Some(&output))?;

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&output)?)?;
    let segment = &doc["blenderWalls"][0]["foundryWalls"][0];
    assert!(segment["a"].is_array());
    assert!(segment.get("renderCamera").is_none());
    assert!(doc["blenderWalls"][0].get("renderWidth").is_none());

    let render_plan = result.render_plan.unwrap();
    assert_eq!(render_plan.len(), 1);
    assert!(render_plan.jobs[0].output_path.ends_with("wall.001.png"));

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&plan)?)?;
    assert_eq!(written[0]["objectName"], "wall.001");
    Ok(())
}

#[test]
fn test_malformed_scene_reports_path() -> Result<()> {
    let mut file = NamedTempFile::with_suffix(".json")?;
    write!(file, "{{ \"cameras\": 3 }}")?;

    let err = extract_file(file.path(), &ExtractConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse scene file"));
    Ok(())
}

#[test]
fn test_bad_geometry_only_fails_its_own_object() -> Result<()> {
    let mut scene: Value = serde_json::from_str(CUBE_SCENE)?;
    let objects = scene["objects"].as_array_mut().unwrap();
    objects.push(serde_json::json!({
        "name": "wall.bad",
        "matrixWorld": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]],
        "mesh": { "vertices": [[0,0,0],[1,0,0]], "edges": [[0,5]] }
    }));
    // Not a wall, so its collinear face must not matter
    objects.push(serde_json::json!({
        "name": "floor",
        "matrixWorld": [[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]],
        "mesh": {
            "vertices": [[0,0,0],[1,0,0],[2,0,0]],
            "polygons": [{ "vertices": [0,1,2] }]
        }
    }));

    let mut file = NamedTempFile::with_suffix(".json")?;
    write!(file, "{scene}")?;
    let report = extract_file(file.path(), &ExtractConfig::default())?;

    assert_eq!(report.walls.len(), 1);
    assert_eq!(report.walls[0].name, "wall.001");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].object, "wall.bad");
    assert_eq!(report.failures[0].kind, ErrorKind::VertexIndexOutOfRange);

    let json = extract_json(&scene.to_string(), &ExtractConfig::default())?;
    assert!(json.contains("wall.001"));
    assert!(!json.contains("wall.bad"));
    Ok(())
}
