// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build, release, prefab and info commands.

use std::path::Path;
use std::sync::Arc;

use crate::cli::build::BuildArgs;
use crate::config::UserConfig;
use crate::error::Result;
use crate::pipeline::ProjectBuilder;
use crate::pipeline::assets::fetch_prefabs;
use crate::pipeline::release::release;

use super::load_project;

/// Main handler for build command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or the build fails.
pub async fn run_build_command(args: &BuildArgs, dir: &Path, config: Arc<UserConfig>) -> Result<()> {
    let project = load_project(dir)?;
    ProjectBuilder::new(config)
        .build(&project, args.flags())
        .await?;
    Ok(())
}

/// Builds the project and its dependencies into a release archive.
///
/// # Errors
///
/// Returns an error if any build or the bundling fails.
pub async fn run_release_command(dir: &Path, config: Arc<UserConfig>) -> Result<()> {
    let project = load_project(dir)?;
    let summary = release(&ProjectBuilder::new(config), &project).await?;
    println!("{}", summary.archive.display());
    Ok(())
}

/// Copies the project's prefabs from the asset library.
///
/// # Errors
///
/// Returns an error if no library is configured or copying fails.
pub async fn run_fetch_prefabs_command(dir: &Path, config: &UserConfig) -> Result<()> {
    let project = load_project(dir)?;
    fetch_prefabs(&project, config).await?;
    Ok(())
}

/// Prints the resolved project followed by the configuration.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded.
pub fn run_infos_command(dir: &Path, config: &UserConfig, config_path: &Path) -> Result<()> {
    let project = load_project(dir)?;
    for line in project.describe(config) {
        println!("{line}");
    }

    println!("config ({})", config_path.display());
    for line in config.format_options() {
        println!("  {line}");
    }
    Ok(())
}
