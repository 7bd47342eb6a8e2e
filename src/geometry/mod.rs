// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - meshes, bounds and world transforms

mod bbox;
mod mesh;
mod primitives;
mod transform;

pub use bbox::{BoundingBox, WorldBounds};
pub use mesh::{Edge, Mesh, Polygon};
pub use primitives::Primitive;
pub use transform::{Decomposed, WorldTransform};
