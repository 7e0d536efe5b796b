// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Options for directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Skip directories matching these paths relative to the root (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<PathBuf>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[PathBuf] {
        &self.skip_dirs
    }

    /// Options for expanding include patterns of a project.
    ///
    /// Hidden entries are skipped, like a shell glob would. The staging
    /// directory and `.git` are never candidates.
    #[must_use]
    pub fn for_project(staging_dir_name: &str) -> Self {
        Self::builder()
            .with_skip_dirs(vec![PathBuf::from(staging_dir_name), PathBuf::from(".git")])
            .build()
    }
}

/// One entry produced by a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    path: PathBuf,
    relative: PathBuf,
    is_dir: bool,
}

impl WalkEntry {
    /// Absolute path of the entry.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the walk root.
    #[must_use]
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// Builds a sequential, name-sorted `WalkBuilder`.
///
/// Ignore files are not consulted: a pattern in a manifest must behave the
/// same whether or not the project is under version control.
fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.hidden(!options.include_hidden());
    builder.git_ignore(false);
    builder.git_global(false);
    builder.git_exclude(false);
    builder.ignore(false);
    builder.parents(false);
    builder.sort_by_file_name(Ord::cmp);

    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<PathBuf>> = Arc::new(options.skip_dirs().to_vec());
        let root = root.to_path_buf();
        builder.filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Ok(rel) = entry.path().strip_prefix(&root)
                && skip_dirs.iter().any(|skip| skip == rel)
            {
                return false;
            }
            true
        });
    }

    builder
}

/// Lists every entry below `root` in depth-first, name-sorted order.
///
/// Parents always precede their children. The root itself is not listed.
///
/// # Errors
///
/// Returns an error if the root directory does not exist.
pub fn walk_sorted<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<Vec<WalkEntry>> {
    let root = root.as_ref();

    if !root.is_dir() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let mut entries = Vec::new();
    for result in build_walker(root, options).build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "walk error");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        entries.push(WalkEntry {
            relative: relative.to_path_buf(),
            is_dir: entry.file_type().is_some_and(|ft| ft.is_dir()),
            path: entry.path().to_path_buf(),
        });
    }

    Ok(entries)
}

/// Expands a glob pattern relative to `root`.
///
/// Files and directories both match, and a matched directory does not hide
/// matches below it. `Scripts/**` reports `Scripts/sub` as well as
/// `Scripts/sub/b.cs`.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use sdutils_rs::utility::fs::walk::{expand_glob, WalkOptions};
///
/// let matches = expand_glob("/path/to/mod", "Config/*.xml", &WalkOptions::for_project("build"))?;
/// for entry in matches {
///     println!("{}", entry.relative().display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn expand_glob<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<WalkEntry>> {
    use wax::{Glob, Program};

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    Ok(walk_sorted(root, options)?
        .into_iter()
        .filter(|entry| glob.is_match(entry.relative.as_path()))
        .collect())
}
