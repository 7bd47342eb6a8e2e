// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Orthographic camera projection, view fitting and ground anchoring

mod anchor;
mod camera;
mod fit;

pub use anchor::render_upper_left_on_ground;
pub use camera::{project, CameraProjector, ProjectedPoint, Viewport, W_EPSILON};
pub use fit::{BoundsFit, CameraFit, FitMode, FixedScale, ViewFit};
