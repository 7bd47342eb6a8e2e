// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Extraction configuration

use crate::extract::{EdgeFilter, FacingRule, ResolutionEstimator, DEFAULT_EDGE_EPSILON, DEFAULT_GRID_SIZE, SQRT_PI};
use crate::projection::{BoundsFit, CameraFit, FitMode, FixedScale};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up by [`ExtractConfig::load`]
pub const CONFIG_FILE: &str = "isowall.toml";

/// Shape of the exported JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputSchema {
    /// World, camera and pixel coordinates plus canvas data
    Canonical,
    /// World coordinates and the front-facing flag only
    Legacy,
}

/// Ortho scale used for render jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderScale {
    /// Each object keeps its own fitted scale
    PerObject,
    /// Every job uses the largest scale of the run
    Largest,
}

/// Extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Name of the extraction camera
    pub camera_name: String,
    /// Objects whose name starts with this are walls
    pub wall_prefix: String,
    /// Pixels per grid unit
    pub grid_size: u32,
    /// Bottom-plane tolerance in world units
    pub edge_epsilon: f64,
    /// Canvas calibration factor
    pub magic_scale: f64,
    pub schema: OutputSchema,
    /// Include NDC and pixel coordinates in canonical output
    pub emit_pixel_space: bool,
    /// Produce a render plan alongside the walls
    pub emit_render_step: bool,
    pub facing: FacingRule,
    pub fit: FitMode,
    /// Fractional room added around each object by the bounds fit
    pub fit_margin: f64,
    /// Center the camera on each object when fitting
    pub recenter_camera: bool,
    /// Process objects on the rayon pool
    pub parallel: bool,
    pub render_scale: RenderScale,
    /// Where render jobs put their images
    pub output_dir: PathBuf,
    /// Decimal places kept in exported coordinates
    pub round_digits: u32,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            camera_name: "iso-camera".to_string(),
            wall_prefix: "wall".to_string(),
            grid_size: DEFAULT_GRID_SIZE,
            edge_epsilon: DEFAULT_EDGE_EPSILON,
            magic_scale: SQRT_PI,
            schema: OutputSchema::Canonical,
            emit_pixel_space: true,
            emit_render_step: false,
            facing: FacingRule::FixedDirection,
            fit: FitMode::Bounds,
            fit_margin: 0.0,
            recenter_camera: true,
            parallel: true,
            render_scale: RenderScale::PerObject,
            output_dir: PathBuf::from("iso-walls"),
            round_digits: 6,
        }
    }
}

impl ExtractConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ExtractConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `isowall.toml` from the working directory if present, then apply
    /// `ISOWALL_*` environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(camera) = lookup("ISOWALL_CAMERA") {
            self.camera_name = camera;
        }

        if let Some(prefix) = lookup("ISOWALL_WALL_PREFIX") {
            self.wall_prefix = prefix;
        }

        if let Some(grid) = lookup("ISOWALL_GRID_SIZE") {
            self.grid_size = grid
                .parse()
                .with_context(|| format!("Invalid ISOWALL_GRID_SIZE: {grid}"))?;
        }

        if let Some(epsilon) = lookup("ISOWALL_EDGE_EPSILON") {
            self.edge_epsilon = epsilon
                .parse()
                .with_context(|| format!("Invalid ISOWALL_EDGE_EPSILON: {epsilon}"))?;
        }

        if let Some(schema) = lookup("ISOWALL_SCHEMA") {
            self.schema = parse_keyword(&schema).with_context(|| format!("Invalid ISOWALL_SCHEMA: {schema}"))?;
        }

        if let Some(parallel) = lookup("ISOWALL_PARALLEL") {
            self.parallel = parallel
                .trim()
                .parse()
                .with_context(|| format!("Invalid ISOWALL_PARALLEL: {parallel}"))?;
        }

        if let Some(output_dir) = lookup("ISOWALL_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn edge_filter(&self) -> EdgeFilter {
        EdgeFilter::new(self.edge_epsilon)
    }

    pub fn resolution_estimator(&self) -> ResolutionEstimator {
        ResolutionEstimator::new(self.grid_size, self.magic_scale)
    }

    /// Camera fit strategy named by `fit`
    pub fn camera_fit(&self) -> Box<dyn CameraFit> {
        match self.fit {
            FitMode::Bounds => Box::new(BoundsFit {
                margin: self.fit_margin,
                recenter: self.recenter_camera,
            }),
            FitMode::Fixed => Box::new(FixedScale),
        }
    }
}

/// Parse a kebab-case enum keyword such as `legacy`
fn parse_keyword<T: serde::de::DeserializeOwned>(value: &str) -> Result<T> {
    Ok(serde_json::from_value(serde_json::Value::String(value.trim().to_string()))?)
}
