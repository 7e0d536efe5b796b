// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compile step for projects with a `csproj`.
//!
//! ```text
//! DotnetTool
//! <compiler> build --no-incremental <csproj>    (cwd = csproj folder)
//! compiler not on PATH --> ProcessError::ExecutableNotFound
//! quiet     --> output captured, logged only on failure
//! otherwise --> output inherited
//! exit != 0 --> BuildError::CompileFailed
//! Uses: config.compiler, config.process_timeout_secs
//! ```

use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result, SdError};
use anyhow::Context;
use tracing::{debug, error, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::{ProcessBuilder, ProcessFlags};

/// Compiler invocation for one project.
#[derive(Debug, Clone)]
pub struct DotnetTool {
    project: Option<PathBuf>,
    project_name: String,
}

impl DotnetTool {
    #[must_use]
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project: None,
            project_name: project_name.into(),
        }
    }

    /// Project file to build.
    #[must_use]
    pub fn project(mut self, path: impl AsRef<Path>) -> Self {
        self.project = Some(path.as_ref().to_path_buf());
        self
    }

    fn project_required(&self) -> Result<&Path> {
        self.project
            .as_deref()
            .context("DotnetTool: project file is required")
    }

    pub(crate) fn builder(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let project = self.project_required()?;

        let mut builder = ProcessBuilder::new(&ctx.config().compiler)
            .name(format!("build {}", self.project_name))
            .arg("build")
            .arg("--no-incremental")
            .arg(project)
            .flag(ProcessFlags::ALLOW_FAILURE)
            .timeout(ctx.config().process_timeout());

        if let Some(dir) = project.parent() {
            builder = builder.cwd(dir);
        }

        Ok(if ctx.is_quiet() {
            builder.capture_output()
        } else {
            builder.inherit_stdio()
        })
    }

    async fn compile(&self, ctx: &ToolContext) -> Result<()> {
        let builder = self.builder(ctx)?.resolve().map_err(SdError::from)?;
        debug!(project = %self.project_name, "compiling");

        let output = builder.run().await?;
        if !output.success() {
            for captured in [output.stdout(), output.stderr()] {
                if !captured.is_empty() {
                    error!(project = %self.project_name, "{captured}");
                }
            }
            return Err(SdError::from(BuildError::CompileFailed {
                project: self.project_name.clone(),
                code: output.exit_code(),
            })
            .into());
        }

        info!(project = %self.project_name, "compiled");
        Ok(())
    }
}

impl Tool for DotnetTool {
    fn name(&self) -> &'static str {
        "dotnet"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.compile(ctx))
    }
}
