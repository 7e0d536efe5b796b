// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local game lifecycle: install, launch, shut down and save cleanup.
//!
//! ```text
//! install        shut_down --> build --> extract <game_path>/Mods/<name>
//! install_server                         extract <server_root>/Mods/<name>
//! start          install --> launch client --> clear_saves
//!   --server     install_server --> launch server
//! clear_saves    <user>/Saves/<world>/<save>/{Region, DynamicMeshes, decoration.7dt}
//! ```


use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::UserConfig;
use crate::error::Result;
use crate::pipeline::{BuildFlags, ProjectBuilder};
use crate::project::{ProjectDescriptor, SaveCleanup};
use crate::tools::extractor::ExtractorTool;
use crate::tools::game::GameTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::fs::copy::remove_path_async;

/// Generated save data removed by a soft cleanup.
pub const REGENERATED_SAVE_PARTS: [&str; 3] = ["Region", "DynamicMeshes", "decoration.7dt"];

/// Drives the game around a project build.
pub struct GameSession {
    builder: ProjectBuilder,
    ctx: ToolContext,
}

impl GameSession {
    #[must_use]
    pub fn new(config: Arc<UserConfig>) -> Self {
        Self {
            builder: ProjectBuilder::new(Arc::clone(&config)),
            ctx: ToolContext::new(config, false),
        }
    }

    fn config(&self) -> &UserConfig {
        self.ctx.config()
    }

    /// Force-kills running client and server instances.
    ///
    /// # Errors
    ///
    /// Kill failures are ignored; this only fails on internal errors.
    pub async fn shut_down(&self) -> Result<()> {
        GameTool::new().shut_down_op().run(&self.ctx).await
    }

    /// Shuts the game down, builds the project and installs it locally.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationMissing` when no game path is known, or any
    /// build or extraction error.
    pub async fn install(&self, project: &ProjectDescriptor) -> Result<PathBuf> {
        let target = project.mod_install_path(self.config())?;

        self.shut_down().await?;
        let archive = self.builder.build(project, BuildFlags::empty()).await?;
        self.extract(&archive, &target).await?;
        Ok(target)
    }

    /// Installs an already built archive into the dedicated server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationMissing` for `PATH_7D2D_SERVER` when no server
    /// root is configured.
    pub async fn install_server(&self, project: &ProjectDescriptor) -> Result<PathBuf> {
        let target = self
            .config()
            .server_root()?
            .join("Mods")
            .join(project.name());

        self.extract(&project.archive_path(), &target).await?;
        Ok(target)
    }

    /// Installs, launches the client, prunes saves and optionally starts the
    /// dedicated server too.
    ///
    /// # Errors
    ///
    /// Returns the first install, launch or configuration error.
    pub async fn start(&self, project: &ProjectDescriptor, with_server: bool) -> Result<()> {
        self.install(project).await?;

        GameTool::new()
            .launch_client_op(project.game_path(self.config())?)
            .run(&self.ctx)
            .await?;

        if !project.save_cleanup_entries().is_empty() {
            clear_saves(self.config().user_root()?, project.save_cleanup_entries()).await?;
        }

        if with_server {
            let server_root = self.config().server_root()?.to_path_buf();
            self.install_server(project).await?;
            GameTool::new()
                .launch_server_op(server_root)
                .run(&self.ctx)
                .await?;
        }

        Ok(())
    }

    async fn extract(&self, archive: &Path, target: &Path) -> Result<()> {
        ExtractorTool::new()
            .archive(archive)
            .output(target)
            .run(&self.ctx)
            .await?;
        info!(target = %target.display(), "mod installed");
        Ok(())
    }
}

/// Removes regenerated data of every listed save under `user_root`.
///
/// Missing paths are skipped. A `hard` entry removes the whole save folder.
///
/// # Errors
///
/// Returns an error if an existing path cannot be removed.
pub async fn clear_saves(user_root: &Path, entries: &[SaveCleanup]) -> Result<()> {
    for entry in entries {
        let save_dir = user_root.join("Saves").join(&entry.world).join(&entry.save);

        for part in REGENERATED_SAVE_PARTS {
            remove_path_async(&save_dir.join(part)).await?;
        }
        if entry.hard {
            remove_path_async(&save_dir).await?;
        }

        debug!(world = %entry.world, save = %entry.save, hard = entry.hard, "save cleared");
    }
    Ok(())
}
