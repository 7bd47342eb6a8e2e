// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end extraction run: import, extract, export, plan renders

use crate::config::ExtractConfig;
use crate::extract::{ExtractionReport, WallExtractor};
use crate::io::{self, ExportOptions};
use crate::render::{PlanWriter, RenderPlan};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Result of a run
pub struct RunResult {
    pub report: ExtractionReport,
    /// Serialized wall document
    pub json: String,
    pub render_plan: Option<RenderPlan>,
    pub duration: Duration,
}

/// Runner for executing extraction over a scene file
pub struct Runner {
    config: ExtractConfig,
    render_plan_path: Option<PathBuf>,
}

impl Runner {
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            config,
            render_plan_path: None,
        }
    }

    /// Also write the render plan to `path`; implies `emit_render_step`
    pub fn with_render_plan(mut self, path: impl AsRef<Path>) -> Self {
        self.config.emit_render_step = true;
        self.render_plan_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Import `input`, extract walls, and write the document to `output` if given
    pub fn run(&self, input: &Path, output: Option<&Path>) -> Result<RunResult> {
        let start = Instant::now();

        let scene = io::import_scene_file(input)?;
        let report = WallExtractor::new(self.config.clone())
            .extract(&scene)
            .with_context(|| format!("Extraction failed for {}", input.display()))?;

        let options = ExportOptions::from(&self.config);
        if let Some(output) = output {
            io::export_json(&report.walls, &options, output)?;
        }
        let json = io::to_json_string(&report.walls, &options)?;

        let render_plan = if self.config.emit_render_step {
            let plan = RenderPlan::from_walls(&report.walls, &self.config);
            let path = self
                .render_plan_path
                .clone()
                .unwrap_or_else(|| self.config.output_dir.join("render-plan.json"));
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            plan.dispatch(&mut PlanWriter::new(&path))?;
            Some(plan)
        } else {
            None
        };

        Ok(RunResult {
            report,
            json,
            render_plan,
            duration: start.elapsed(),
        })
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}
