// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Prefab fetching from the configured asset library.
//!
//! ```text
//! PATH_PREFABS/
//!   trader_bob/        <-- "trader_" matches by name prefix
//!   trader_hugh.tts    <--
//!   house_01/
//! ```
//!
//! Matches are copied into `<root>/Prefabs`, which is wiped first.

use std::path::PathBuf;

use anyhow::Context;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::config::UserConfig;
use crate::error::Result;
use crate::project::ProjectDescriptor;
use crate::utility::fs::copy::{copy_dir_contents_async, copy_file_async, recreate_dir_async};

/// Copies every library entry named by the project's prefab fragments.
///
/// Returns the number of entries copied. A fragment without any match is
/// reported as a warning and skipped. Nothing happens when the project
/// lists no prefabs.
///
/// # Errors
///
/// Returns `ConfigurationMissing` for `PATH_PREFABS` when prefabs are listed
/// but no library is configured, or an I/O error if copying fails.
pub async fn fetch_prefabs(project: &ProjectDescriptor, config: &UserConfig) -> Result<usize> {
    if project.external_asset_refs().is_empty() {
        return Ok(0);
    }

    let library = config.prefabs_root()?;
    let target = project.prefabs_dir();
    recreate_dir_async(&target).await?;

    let entries = library_entries(library.to_path_buf()).await?;

    let mut copied = 0;
    for fragment in project.external_asset_refs() {
        let mut found = false;
        for (name, path) in &entries {
            if !name.starts_with(fragment.as_str()) {
                continue;
            }
            found = true;

            let dst = target.join(name);
            if path.is_dir() {
                copy_dir_contents_async(path, &dst).await?;
            } else {
                copy_file_async(path, &dst).await?;
            }
            debug!(prefab = %name, "fetched");
            copied += 1;
        }

        if !found {
            warn!(project = %project.name(), prefab = %fragment, "no prefab found");
        }
    }

    info!(project = %project.name(), count = copied, "prefabs fetched");
    Ok(copied)
}

/// Top-level entries of the library, sorted by name.
async fn library_entries(library: PathBuf) -> Result<Vec<(String, PathBuf)>> {
    let mut reader = fs::read_dir(&library)
        .await
        .with_context(|| format!("failed to read prefab library {}", library.display()))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", library.display()))?
    {
        entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    entries.sort();
    Ok(entries)
}
