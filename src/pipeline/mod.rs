// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build pipeline for a single project.
//!
//! ```text
//! ProjectBuilder::build(project, flags)
//!   1. remove <name>.zip and build/, recreate build/
//!   2. compile csproj            (DotnetTool, quiet if QUIET)
//!   3. stage include patterns    files keep their path, dirs land at build/<dirname>
//!   4. write build/version.txt   fingerprint
//!   5. fetch prefabs             <root>/Prefabs (assets.rs)
//!   6. pack build/ --> <name>.zip (PackerTool)
//!   7. remove build/ if CLEAN
//! ```
//!
//! `graph.rs` builds the dependency closure, `release.rs` merges everything
//! into one release archive.

pub mod assets;
pub mod graph;
pub mod release;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use bitflags::bitflags;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::UserConfig;
use crate::error::Result;
use crate::project::{ProjectDescriptor, STAGING_DIR, VERSION_FILE};
use crate::tools::dotnet::DotnetTool;
use crate::tools::packer::PackerTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::fs::copy::{
    copy_dir_contents_async, copy_file_async, recreate_dir_async, remove_path_async,
};
use crate::utility::fs::walk::{WalkOptions, expand_glob};

bitflags! {
    /// Options for a single project build.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BuildFlags: u8 {
        /// Delete the staging directory once the archive is written.
        const CLEAN = 1 << 0;
        /// Discard compiler output.
        const QUIET = 1 << 1;
    }
}

/// Runs the build pipeline against loaded projects.
#[derive(Clone)]
pub struct ProjectBuilder {
    config: Arc<UserConfig>,
}

impl ProjectBuilder {
    #[must_use]
    pub const fn new(config: Arc<UserConfig>) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<UserConfig> {
        &self.config
    }

    /// Builds `project` and returns the path of its archive.
    ///
    /// # Errors
    ///
    /// Returns `CompileFailed` when the compiler exits non-zero,
    /// `ConfigurationMissing` when prefabs are requested without a library,
    /// or any filesystem/archive error met on the way. Include patterns
    /// without matches only warn.
    pub async fn build(&self, project: &ProjectDescriptor, flags: BuildFlags) -> Result<PathBuf> {
        let ctx = ToolContext::new(Arc::clone(&self.config), flags.contains(BuildFlags::QUIET));
        let staging = project.staging_dir();
        let archive = project.archive_path();

        debug!(project = %project.name(), root = %project.root_dir().display(), "build start");

        remove_path_async(&archive).await?;
        recreate_dir_async(&staging).await?;

        if let Some(csproj) = project.compile_target() {
            DotnetTool::new(project.name())
                .project(csproj)
                .run(&ctx)
                .await?;
        }

        stage_includes(project, &staging).await?;
        write_version_marker(&staging, project.identity().as_str()).await?;

        if !project.external_asset_refs().is_empty() {
            assets::fetch_prefabs(project, &self.config).await?;
        }

        PackerTool::new()
            .archive(&archive)
            .base_dir(&staging)
            .run(&ctx)
            .await?;

        if flags.contains(BuildFlags::CLEAN) {
            remove_path_async(&staging).await?;
        }

        info!(project = %project.name(), archive = %archive.display(), "build done");
        Ok(archive)
    }
}

/// Copies every include match into `staging`.
///
/// A matched file keeps its path relative to the project root. A matched
/// directory is merged into `staging/<dirname>` regardless of where it sits,
/// so `Scripts/**` ships `Scripts/sub/b.cs` and also `sub/b.cs`.
async fn stage_includes(project: &ProjectDescriptor, staging: &Path) -> Result<()> {
    let options = WalkOptions::for_project(STAGING_DIR);

    for pattern in project.include_patterns() {
        let matches = expand_glob(project.root_dir(), pattern, &options)
            .with_context(|| format!("failed to expand include '{pattern}'"))?;

        if matches.is_empty() {
            warn!(project = %project.name(), pattern = %pattern, "include matched nothing");
            continue;
        }

        for entry in matches {
            if entry.is_dir() {
                let Some(dir_name) = entry.path().file_name() else {
                    continue;
                };
                copy_dir_contents_async(entry.path(), &staging.join(dir_name)).await?;
            } else {
                copy_file_async(entry.path(), &staging.join(entry.relative())).await?;
            }
        }
    }

    Ok(())
}

/// Writes `version.txt` into `dir`, replacing any previous marker.
pub(crate) async fn write_version_marker(dir: &Path, content: &str) -> Result<()> {
    let path = dir.join(VERSION_FILE);
    fs::write(&path, content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
