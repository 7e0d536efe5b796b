// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game lifecycle commands.

use std::path::Path;
use std::sync::Arc;

use crate::cli::build::StartArgs;
use crate::config::UserConfig;
use crate::error::Result;
use crate::lifecycle::GameSession;

use super::load_project;

/// Builds, installs and launches the game (and server with `--server`).
///
/// # Errors
///
/// Returns an error if a required path is not configured or any step fails.
pub async fn run_start_command(args: &StartArgs, dir: &Path, config: Arc<UserConfig>) -> Result<()> {
    let project = load_project(dir)?;
    GameSession::new(config).start(&project, args.server).await
}

/// Builds the project and installs it into the local game.
///
/// # Errors
///
/// Returns an error if no game path is known or the build fails.
pub async fn run_install_command(dir: &Path, config: Arc<UserConfig>) -> Result<()> {
    let project = load_project(dir)?;
    let target = GameSession::new(config).install(&project).await?;
    println!("installed to {}", target.display());
    Ok(())
}

/// Force-closes running game and server processes.
///
/// # Errors
///
/// Kill failures are ignored; this only fails on internal errors.
pub async fn run_shut_down_command(config: Arc<UserConfig>) -> Result<()> {
    GameSession::new(config).shut_down().await
}
