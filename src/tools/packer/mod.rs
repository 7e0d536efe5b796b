// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Zip packing of a staging directory.
//!
//! ```text
//! base_dir/**  --> walk_sorted --> NamedTempFile (same folder as archive)
//!                                   --> persist() --> archive
//! Entry names are relative to base_dir with '/' separators.
//! Timestamps are fixed so identical trees give identical archives.
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{BuildError, Result, SdError};
use crate::utility::fs::walk::{WalkOptions, walk_sorted};
use anyhow::Context;
use tracing::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::{BoxFuture, Tool, ToolContext};

#[derive(Debug, Clone, Default)]
pub struct PackerTool {
    archive: Option<PathBuf>,
    base_dir: Option<PathBuf>,
}

impl PackerTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            archive: None,
            base_dir: None,
        }
    }

    #[must_use]
    pub fn archive(mut self, path: impl AsRef<Path>) -> Self {
        self.archive = Some(path.as_ref().to_path_buf());
        self
    }

    /// Directory whose contents become the archive root.
    #[must_use]
    pub fn base_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.base_dir = Some(path.as_ref().to_path_buf());
        self
    }

    fn archive_required(&self) -> Result<&Path> {
        self.archive
            .as_deref()
            .context("PackerTool: archive path is required")
    }

    fn base_dir_required(&self) -> Result<&Path> {
        self.base_dir
            .as_deref()
            .context("PackerTool: base directory is required")
    }

    async fn pack_dir(&self) -> Result<()> {
        let archive = self.archive_required()?.to_path_buf();
        let base_dir = self.base_dir_required()?.to_path_buf();

        debug!(
            archive = %archive.display(),
            base_dir = %base_dir.display(),
            "creating archive from directory"
        );

        let count = tokio::task::spawn_blocking({
            let archive = archive.clone();
            move || archive_dir(&base_dir, &archive)
        })
        .await
        .context("archive task panicked")??;

        info!(archive = %archive.display(), entries = count, "archive created");
        Ok(())
    }
}

impl Tool for PackerTool {
    fn name(&self) -> &'static str {
        "packer"
    }

    fn run<'a>(&'a self, _ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.pack_dir())
    }
}

fn archive_error(path: &Path, message: impl ToString) -> SdError {
    SdError::from(BuildError::Archive {
        path: path.display().to_string(),
        message: message.to_string(),
    })
}

/// Zips every entry under `base_dir` into `output`.
///
/// The archive is written to a temporary file next to `output` and renamed
/// into place, so a failed run never leaves a partial archive behind.
/// Returns the number of entries written.
///
/// # Errors
///
/// Returns [`BuildError::Archive`] if the directory cannot be read or the
/// archive cannot be written.
pub fn archive_dir(base_dir: &Path, output: &Path) -> Result<usize> {
    let entries = walk_sorted(
        base_dir,
        &WalkOptions::builder().with_include_hidden(true).build(),
    )
    .map_err(|e| archive_error(base_dir, e))?;

    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| archive_error(output, e))?;
    let temp = tempfile::NamedTempFile::new_in(parent).map_err(|e| archive_error(output, e))?;

    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut writer = ZipWriter::new(temp);
    for entry in &entries {
        let name = entry.relative().to_string_lossy().replace('\\', "/");
        if entry.is_dir() {
            writer
                .add_directory(name, options)
                .map_err(|e| archive_error(output, e))?;
        } else {
            writer
                .start_file(name, options)
                .map_err(|e| archive_error(output, e))?;
            let mut file = File::open(entry.path()).map_err(|e| archive_error(entry.path(), e))?;
            io::copy(&mut file, &mut writer).map_err(|e| archive_error(entry.path(), e))?;
        }
    }

    let mut temp = writer.finish().map_err(|e| archive_error(output, e))?;
    temp.flush().map_err(|e| archive_error(output, e))?;
    temp.persist(output)
        .map_err(|e| archive_error(output, e.error))?;

    Ok(entries.len())
}

#[cfg(test)]
mod tests;
