// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```

use crate::error::SdResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend};

#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// HEAD commit id, or `None` outside a repository or before the first commit.
#[must_use]
pub fn commit_hash(path: &Path) -> Option<String> {
    GixBackend::commit_hash(path)
}

/// Count of staged and unstaged changes to tracked files.
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or the status walk fails.
pub fn pending_modifications(path: &Path) -> SdResult<usize> {
    GixBackend::pending_modifications(path)
}
