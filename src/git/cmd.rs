// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command operations using shell backend.
//!
//! ```text
//! cmd.rs --> ShellBackend --> git
//! ```

use crate::error::SdResult;
use std::path::Path;

use super::backend::{GitMutation, ShellBackend};

/// Initialize a new repository.
///
/// # Errors
///
/// Returns a `GitError` if git is missing or initialization fails.
pub fn init_repo(path: &Path) -> SdResult<()> {
    ShellBackend::init_repo(path)
}
