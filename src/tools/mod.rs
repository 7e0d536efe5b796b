// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool abstractions used by the build pipeline and lifecycle commands.
//!
//! ```text
//! pipeline --> ToolContext --> Tool::run
//!   DotnetTool     compiler subprocess (ProcessBuilder)
//!   PackerTool     staging dir --> zip
//!   ExtractorTool  zip --> directory
//!   GameTool       launch client/server, shut down
//! ToolContext: user config + quiet flag
//! ```

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::config::UserConfig;
use crate::error::Result;

pub mod dotnet;
pub mod extractor;
pub mod game;
pub mod packer;

/// Context provided to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    config: Arc<UserConfig>,
    /// Suppress subprocess output (dependency builds).
    quiet: bool,
}

impl ToolContext {
    #[must_use]
    pub const fn new(config: Arc<UserConfig>, quiet: bool) -> Self {
        Self { config, quiet }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<UserConfig> {
        &self.config
    }

    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Same configuration, different output mode.
    #[must_use]
    pub fn with_quiet(&self, quiet: bool) -> Self {
        Self {
            config: Arc::clone(&self.config),
            quiet,
        }
    }
}

/// A single external operation (compile, pack, extract, launch).
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "dotnet", "packer").
    fn name(&self) -> &str;

    /// Executes the tool's operation to completion.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
pub(crate) mod test_utils;
