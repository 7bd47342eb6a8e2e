// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - scene import and wall export

mod export_json;
mod scene_file;

pub use export_json::{export_json, to_json_string, ExportOptions};
pub use scene_file::{import_scene_file, parse_scene};
