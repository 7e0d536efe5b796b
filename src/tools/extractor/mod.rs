// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Zip extraction into a fresh directory.
//!
//! ```text
//! archive.zip --> remove output_dir --> ZipArchive::extract --> output_dir
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result, SdError};
use anyhow::Context;
use tracing::{debug, info};
use zip::ZipArchive;

use super::{BoxFuture, Tool, ToolContext};
use crate::utility::fs::copy::remove_path_async;

#[derive(Debug, Clone, Default)]
pub struct ExtractorTool {
    archive: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl ExtractorTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            archive: None,
            output_dir: None,
        }
    }

    #[must_use]
    pub fn archive(mut self, path: impl AsRef<Path>) -> Self {
        self.archive = Some(path.as_ref().to_path_buf());
        self
    }

    /// Target directory. Replaced wholesale on each run.
    #[must_use]
    pub fn output(mut self, path: impl AsRef<Path>) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    fn archive_required(&self) -> Result<&Path> {
        self.archive
            .as_deref()
            .context("ExtractorTool: archive path is required")
    }

    fn output_dir_required(&self) -> Result<&Path> {
        self.output_dir
            .as_deref()
            .context("ExtractorTool: output directory is required")
    }

    async fn do_extract(&self) -> Result<()> {
        let archive = self.archive_required()?.to_path_buf();
        let output_dir = self.output_dir_required()?.to_path_buf();

        debug!(
            archive = %archive.display(),
            output = %output_dir.display(),
            "extracting archive"
        );

        if !archive.is_file() {
            return Err(SdError::from(BuildError::Archive {
                path: archive.display().to_string(),
                message: "archive not found".to_string(),
            })
            .into());
        }

        remove_path_async(&output_dir).await?;
        tokio::task::spawn_blocking({
            let archive = archive.clone();
            let output_dir = output_dir.clone();
            move || extract_zip(&archive, &output_dir)
        })
        .await
        .context("extract task panicked")??;

        info!(
            archive = %archive.display(),
            output = %output_dir.display(),
            "archive extracted"
        );
        Ok(())
    }
}

impl Tool for ExtractorTool {
    fn name(&self) -> &'static str {
        "extractor"
    }

    fn run<'a>(&'a self, _ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_extract())
    }
}

/// Unpacks `archive` into `output_dir`, creating it if needed.
///
/// Entry names that would escape `output_dir` are rejected by the zip reader.
///
/// # Errors
///
/// Returns [`BuildError::Archive`] if the archive is missing, corrupt, or
/// cannot be written out.
pub fn extract_zip(archive: &Path, output_dir: &Path) -> Result<()> {
    let to_error = |message: String| {
        SdError::from(BuildError::Archive {
            path: archive.display().to_string(),
            message,
        })
    };

    let file = File::open(archive).map_err(|e| to_error(e.to_string()))?;
    let mut zip = ZipArchive::new(file).map_err(|e| to_error(e.to_string()))?;
    std::fs::create_dir_all(output_dir).map_err(|e| to_error(e.to_string()))?;
    zip.extract(output_dir).map_err(|e| to_error(e.to_string()))?;
    Ok(())
}
