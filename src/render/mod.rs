// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Sprite render plan handed to an external rasterizer

use crate::config::{ExtractConfig, RenderScale};
use crate::extract::{ExportedWall, ResolutionEstimator};
use crate::geometry::WorldTransform;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One sprite to render: the camera pose and canvas for a single wall
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub object_name: String,
    pub width: u32,
    pub height: u32,
    pub ortho_scale: f64,
    pub camera_transform: WorldTransform,
    pub output_path: PathBuf,
}

/// Ordered render jobs for one extraction run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPlan {
    pub jobs: Vec<RenderJob>,
}

impl RenderPlan {
    /// Build one job per wall, writing `<output_dir>/<name>.png`
    pub fn from_walls(walls: &[ExportedWall], config: &ExtractConfig) -> Self {
        let largest = walls.iter().map(|w| w.view.ortho_scale).fold(0.0, f64::max);
        let estimator = config.resolution_estimator();

        let jobs = walls
            .iter()
            .map(|wall| {
                let ortho_scale = match config.render_scale {
                    RenderScale::PerObject => wall.view.ortho_scale,
                    RenderScale::Largest => largest,
                };
                let size = canvas_pixels(&estimator, ortho_scale);
                RenderJob {
                    object_name: wall.name.clone(),
                    width: size,
                    height: size,
                    ortho_scale,
                    camera_transform: wall.view.camera_transform,
                    output_path: config.output_dir.join(format!("{}.png", wall.name)),
                }
            })
            .collect();

        Self { jobs }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Feed every job to a renderer, then let it finish
    pub fn dispatch(&self, renderer: &mut dyn SpriteRenderer) -> Result<()> {
        for job in &self.jobs {
            debug!(object = %job.object_name, width = job.width, "render job");
            renderer
                .render(job)
                .with_context(|| format!("Failed to render sprite for '{}'", job.object_name))?;
        }
        renderer.finish()?;
        info!(jobs = self.jobs.len(), "render plan dispatched");
        Ok(())
    }
}

fn canvas_pixels(estimator: &ResolutionEstimator, ortho_scale: f64) -> u32 {
    let size = estimator.canvas_size(ortho_scale).round();
    if size.is_finite() && size >= 1.0 {
        size.min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}

/// Anything that can turn a render job into an image
pub trait SpriteRenderer {
    fn render(&mut self, job: &RenderJob) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JobEntry<'a> {
    object_name: &'a str,
    width: u32,
    height: u32,
    ortho_scale: f64,
    /// Row-major, same layout as the scene file
    matrix_world: [[f64; 4]; 4],
    output_path: String,
}

impl<'a> From<&'a RenderJob> for JobEntry<'a> {
    fn from(job: &'a RenderJob) -> Self {
        let m = &job.camera_transform.matrix;
        let mut matrix_world = [[0.0; 4]; 4];
        for (r, row) in matrix_world.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = m[(r, c)];
            }
        }
        Self {
            object_name: &job.object_name,
            width: job.width,
            height: job.height,
            ortho_scale: job.ortho_scale,
            matrix_world,
            output_path: job.output_path.display().to_string(),
        }
    }
}

/// Records the plan as a JSON array for a host-side renderer to replay
#[derive(Debug)]
pub struct PlanWriter {
    path: PathBuf,
    jobs: Vec<RenderJob>,
}

impl PlanWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            jobs: Vec::new(),
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        let entries: Vec<JobEntry> = self.jobs.iter().map(JobEntry::from).collect();
        serde_json::to_string_pretty(&entries).context("Failed to serialize render plan")
    }
}

impl SpriteRenderer for PlanWriter {
    fn render(&mut self, job: &RenderJob) -> Result<()> {
        self.jobs.push(job.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let json = self.to_json_string()?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write render plan: {}", self.path.display()))?;
        Ok(())
    }
}
