// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   new                               scaffold
//!   build, release, fetch-prefabs     pipeline
//!   start, shut-down, install         lifecycle
//!   infos                             project + config dump
//! ```

pub mod build;
pub mod game;
pub mod new;

use std::path::Path;

use crate::error::Result;
use crate::project::ProjectDescriptor;
use anyhow::Context;

/// Loads the project a command operates on.
pub(crate) fn load_project(dir: &Path) -> Result<ProjectDescriptor> {
    ProjectDescriptor::load(dir)
        .with_context(|| format!("cannot load project in {}", dir.display()))
}
