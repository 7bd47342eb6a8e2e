// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Canvas size from orthographic scale

use std::f64::consts::{FRAC_2_SQRT_PI, SQRT_2};

/// `sqrt(pi)`. Calibrates a 1x1 reference tile to its pixel footprint; tunable, not physical.
pub const SQRT_PI: f64 = 2.0 / FRAC_2_SQRT_PI;

/// Default pixels per grid unit
pub const DEFAULT_GRID_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionEstimator {
    pub grid_size: u32,
    pub magic_scale: f64,
}

impl Default for ResolutionEstimator {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            magic_scale: SQRT_PI,
        }
    }
}

impl ResolutionEstimator {
    pub fn new(grid_size: u32, magic_scale: f64) -> Self {
        Self { grid_size, magic_scale }
    }

    /// Square canvas edge length in pixels
    pub fn canvas_size(&self, ortho_scale: f64) -> f64 {
        f64::from(self.grid_size) * self.magic_scale * (ortho_scale / SQRT_2)
    }
}

/// `grid_size * sqrt(pi) * ortho_scale / sqrt(2)`
pub fn estimate(ortho_scale: f64, grid_size: u32) -> f64 {
    ResolutionEstimator::new(grid_size, SQRT_PI).canvas_size(ortho_scale)
}
