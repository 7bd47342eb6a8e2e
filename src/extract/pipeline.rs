// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-object wall extraction and the scene-level run

use super::visibility::{FacingRule, VisibilityClassifier};
use super::wall::{ExportedWall, ExtractionReport, SegmentEndpoint, SkipReason, SkippedObject, WallSegment};
use crate::config::ExtractConfig;
use crate::error::{ExtractError, ExtractResult, ObjectFailure};
use crate::geometry::WorldBounds;
use crate::projection::{render_upper_left_on_ground, CameraFit, CameraProjector, ProjectedPoint, Viewport};
use crate::scene::{Camera, RenderSettings, Scene, SceneObject};
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// What happened to one selected object
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectOutcome {
    Exported { wall: ExportedWall, dropped: usize },
    Skipped { reason: SkipReason, dropped: usize },
}

/// Runs the extraction pipeline over a scene
pub struct WallExtractor {
    config: ExtractConfig,
    fit: Box<dyn CameraFit>,
}

impl WallExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        let fit = config.camera_fit();
        Self { config, fit }
    }

    /// Replace the camera-fit strategy chosen by the configuration
    pub fn with_fit(mut self, fit: impl CameraFit + 'static) -> Self {
        self.fit = Box::new(fit);
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Objects that follow the wall naming convention and carry geometry
    pub fn select<'a>(&self, scene: &'a Scene) -> Vec<&'a SceneObject> {
        scene
            .objects
            .iter()
            .filter(|object| object.name.starts_with(&self.config.wall_prefix) && object.has_geometry())
            .collect()
    }

    /// Extract every wall in the scene.
    ///
    /// Only camera problems are returned as errors; per-object problems are
    /// collected into the report and the remaining objects still run.
    pub fn extract(&self, scene: &Scene) -> ExtractResult<ExtractionReport> {
        let camera = scene.find_camera(&self.config.camera_name)?;
        let selected = self.select(scene);
        info!(
            camera = %camera.name,
            candidates = selected.len(),
            parallel = self.config.parallel,
            "extracting walls"
        );

        let run = |object: &&SceneObject| (object.name.clone(), self.extract_object(camera, object, &scene.render));
        let outcomes: Vec<(String, ExtractResult<ObjectOutcome>)> = if self.config.parallel {
            selected.par_iter().map(run).collect()
        } else {
            selected.iter().map(run).collect()
        };

        let mut report = ExtractionReport::default();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(ObjectOutcome::Exported { wall, dropped }) => {
                    report.dropped_segments += dropped;
                    report.walls.push(wall);
                }
                Ok(ObjectOutcome::Skipped { reason, dropped }) => {
                    debug!(object = %name, %reason, "skipped");
                    report.dropped_segments += dropped;
                    report.skipped.push(SkippedObject { object: name, reason });
                }
                Err(err) => {
                    warn!(object = %name, kind = ?err.kind(), "object failed: {err}");
                    report.failures.push(ObjectFailure::new(name, &err));
                }
            }
        }

        report.walls.sort_by(|a, b| a.name.cmp(&b.name));
        report.failures.sort_by(|a, b| a.object.cmp(&b.object));
        report.skipped.sort_by(|a, b| a.object.cmp(&b.object));

        info!(
            walls = report.walls.len(),
            segments = report.segment_count(),
            skipped = report.skipped.len(),
            failures = report.failures.len(),
            "extraction finished"
        );
        Ok(report)
    }

    /// Bound, fit, resolve, filter, classify, project and anchor one object
    pub fn extract_object(
        &self,
        camera: &Camera,
        object: &SceneObject,
        render: &RenderSettings,
    ) -> ExtractResult<ObjectOutcome> {
        if let Some(defect) = &object.defect {
            return Err(defect.clone());
        }
        let mesh = match &object.mesh {
            Some(mesh) if !mesh.edges.is_empty() => mesh,
            _ => {
                return Ok(ObjectOutcome::Skipped {
                    reason: SkipReason::NoEdges,
                    dropped: 0,
                })
            }
        };
        mesh.validate()?;

        let bounds = WorldBounds::from_local_corners(&object.bound_box, &object.transform)?;
        let rotation = object.transform.decompose(&object.name)?.rotation;

        let unit = Viewport::square(1.0, render.pixel_aspect_x, render.pixel_aspect_y);
        let view = self.fit.fit(camera, &bounds, &unit)?;

        let resolution = self.config.resolution_estimator().canvas_size(view.ortho_scale);
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(ExtractError::NonFinite("resolution"));
        }
        let viewport = Viewport::square(resolution, render.pixel_aspect_x, render.pixel_aspect_y);
        let projector = CameraProjector::new(&camera.with_view(view.camera_transform, view.ortho_scale), viewport)?;

        let bottom_edges = self
            .config
            .edge_filter()
            .filter(mesh, &object.transform, bounds.bottom_z)?;
        debug!(
            object = %object.name,
            edges = mesh.edges.len(),
            retained = bottom_edges.len(),
            ortho_scale = view.ortho_scale,
            resolution,
            "filtered bottom edges"
        );
        if bottom_edges.is_empty() {
            return Ok(ObjectOutcome::Skipped {
                reason: SkipReason::NoBottomEdges,
                dropped: 0,
            });
        }

        let classifier = match self.config.facing {
            FacingRule::FixedDirection => VisibilityClassifier::fixed(rotation),
            FacingRule::TowardCamera => VisibilityClassifier::toward_point(
                rotation,
                bounds.bottom_center,
                Point3::from(view.camera_transform.translation()),
            )?,
        };

        let mut segments = Vec::with_capacity(bottom_edges.len());
        let mut dropped = 0;
        for bottom in &bottom_edges {
            let (a, b) = match (project_endpoint(&projector, bottom.a), project_endpoint(&projector, bottom.b)) {
                (Ok(a), Ok(b)) => (a, b),
                (Err(ExtractError::DegenerateProjection { w }), _) | (_, Err(ExtractError::DegenerateProjection { w })) => {
                    warn!(object = %object.name, edge = ?bottom.edge.key(), w, "dropping unprojectable segment");
                    dropped += 1;
                    continue;
                }
                (Err(err), _) | (_, Err(err)) => return Err(err),
            };
            segments.push(WallSegment {
                a,
                b,
                front_facing: classifier.classify(&bottom.edge, &mesh.polygons),
            });
        }
        if segments.is_empty() {
            return Ok(ObjectOutcome::Skipped {
                reason: SkipReason::NoProjectableEdges,
                dropped,
            });
        }

        let anchor = render_upper_left_on_ground(&view.camera_transform, viewport.half_extents(view.ortho_scale))?;

        Ok(ObjectOutcome::Exported {
            wall: ExportedWall {
                name: object.name.clone(),
                segments,
                render_upper_left_world: anchor,
                width: resolution,
                height: resolution,
                view,
            },
            dropped,
        })
    }
}

fn project_endpoint(projector: &CameraProjector, world: Point3<f64>) -> ExtractResult<SegmentEndpoint> {
    let ProjectedPoint { ndc, pixel } = projector.project(&world)?;
    Ok(SegmentEndpoint { world, ndc, pixel })
}
