// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game client and dedicated server process control.
//!
//! ```text
//! GameTool
//!   LaunchClient  <game_path>/7DaysToDie.exe --noeac     (detached)
//!   LaunchServer  <server_root>/startdedicated.bat         (detached)
//!   ShutDown      taskkill /F /IM <exe>  |  pkill -f <exe>  (errors ignored)
//! ```

use std::path::{Path, PathBuf};

use crate::error::{FsError, Result, SdError};
use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::{ProcessBuilder, ProcessFlags};

#[cfg(windows)]
pub const CLIENT_EXE: &str = "7DaysToDie.exe";
#[cfg(not(windows))]
pub const CLIENT_EXE: &str = "7DaysToDie.x86_64";

#[cfg(windows)]
pub const SERVER_EXE: &str = "7DaysToDieServer.exe";
#[cfg(not(windows))]
pub const SERVER_EXE: &str = "7DaysToDieServer.x86_64";

#[cfg(windows)]
pub const SERVER_SCRIPT: &str = "startdedicated.bat";
#[cfg(not(windows))]
pub const SERVER_SCRIPT: &str = "startserver.sh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameOperation {
    LaunchClient,
    LaunchServer,
    #[default]
    ShutDown,
}

#[derive(Debug, Clone, Default)]
pub struct GameTool {
    install_dir: Option<PathBuf>,
    operation: GameOperation,
}

impl GameTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            install_dir: None,
            operation: GameOperation::ShutDown,
        }
    }

    /// Launch the client found in `game_path`.
    #[must_use]
    pub fn launch_client_op(mut self, game_path: impl AsRef<Path>) -> Self {
        self.install_dir = Some(game_path.as_ref().to_path_buf());
        self.operation = GameOperation::LaunchClient;
        self
    }

    /// Launch the dedicated server found in `server_root`.
    #[must_use]
    pub fn launch_server_op(mut self, server_root: impl AsRef<Path>) -> Self {
        self.install_dir = Some(server_root.as_ref().to_path_buf());
        self.operation = GameOperation::LaunchServer;
        self
    }

    #[must_use]
    pub fn shut_down_op(mut self) -> Self {
        self.install_dir = None;
        self.operation = GameOperation::ShutDown;
        self
    }

    #[must_use]
    pub const fn operation(&self) -> GameOperation {
        self.operation
    }

    fn install_dir_required(&self) -> Result<&Path> {
        self.install_dir
            .as_deref()
            .context("GameTool: installation directory is required")
    }

    /// Process builder for the launch operations.
    pub(crate) fn launch_builder(&self) -> Result<ProcessBuilder> {
        let dir = self.install_dir_required()?;

        let builder = match self.operation {
            GameOperation::LaunchClient => ProcessBuilder::new(dir.join(CLIENT_EXE))
                .arg("--noeac")
                .name("game client"),
            GameOperation::LaunchServer => server_launcher(&dir.join(SERVER_SCRIPT)),
            GameOperation::ShutDown => anyhow::bail!("GameTool: shut down is not a launch"),
        };

        Ok(builder.cwd(dir))
    }

    async fn launch(&self) -> Result<()> {
        let builder = self.launch_builder()?;
        let target = match self.operation {
            GameOperation::LaunchServer => SERVER_SCRIPT,
            _ => CLIENT_EXE,
        };
        let path = self.install_dir_required()?.join(target);
        if !path.is_file() {
            return Err(SdError::from(FsError::NotFound(path.display().to_string())).into());
        }

        let pid = builder.spawn_detached()?;
        info!(path = %path.display(), pid = ?pid, "launched");
        Ok(())
    }

    async fn shut_down(&self) -> Result<()> {
        for builder in shutdown_builders() {
            debug!(cmd = %builder.command_line(), "stopping");
            if let Err(e) = builder.run().await {
                debug!(error = %e, "shut down command failed");
            }
        }
        Ok(())
    }
}

#[cfg(windows)]
fn server_launcher(script: &Path) -> ProcessBuilder {
    ProcessBuilder::new("cmd")
        .arg("/C")
        .arg(script)
        .name("dedicated server")
}

#[cfg(not(windows))]
fn server_launcher(script: &Path) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh")
        .arg(script)
        .name("dedicated server")
}

/// One force-kill command per game executable. Exit codes are ignored.
pub(crate) fn shutdown_builders() -> Vec<ProcessBuilder> {
    [CLIENT_EXE, SERVER_EXE]
        .into_iter()
        .map(|exe| {
            #[cfg(windows)]
            let builder = ProcessBuilder::new("taskkill").args(["/F", "/IM", exe]);
            #[cfg(not(windows))]
            let builder = ProcessBuilder::new("pkill").args(["-f", exe]);

            builder
                .name(format!("stop {exe}"))
                .flag(ProcessFlags::ALLOW_FAILURE)
                .quiet()
        })
        .collect()
}

impl Tool for GameTool {
    fn name(&self) -> &'static str {
        "game"
    }

    fn run<'a>(&'a self, _ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                GameOperation::LaunchClient | GameOperation::LaunchServer => self.launch().await,
                GameOperation::ShutDown => self.shut_down().await,
            }
        })
    }
}

#[cfg(test)]
mod tests;
