// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read)     --> GixBackend (pure Rust gix)
//!                     --> ShellBackend (git CLI, fallback/reference)
//! GitMutation (write) --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, SdResult};
use std::path::Path;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Full hex id of the commit HEAD points to.
    ///
    /// `None` when the path is not in a repository or HEAD is unborn.
    fn commit_hash(path: &Path) -> Option<String>;

    /// Number of tracked files that differ from HEAD, staged or not.
    /// Untracked files are not counted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or the status walk fails.
    fn pending_modifications(path: &Path) -> SdResult<usize>;
}

// --- Mutation Trait (Write operations) ---

/// Git operations that modify repository state.
pub trait GitMutation {
    /// Initialize a new repository.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    fn init_repo(path: &Path) -> SdResult<()>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix. Never spawns a subprocess.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok()
    }

    fn commit_hash(path: &Path) -> Option<String> {
        let repo = gix::discover(path).ok()?;
        repo.head_id().ok().map(|id| id.detach().to_string())
    }

    fn pending_modifications(path: &Path) -> SdResult<usize> {
        use gix::status::UntrackedFiles;

        let repo = gix::discover(path).map_err(|e| GitError::Gix(e.to_string()))?;

        let count = repo
            .status(gix::progress::Discard)
            .map_err(|e| GitError::Gix(e.to_string()))?
            .untracked_files(UntrackedFiles::None)
            .into_iter(None)
            .map_err(|e| GitError::Gix(e.to_string()))?
            .filter(Result::is_ok)
            .count();

        Ok(count)
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> SdResult<String> {
        use std::process::Command;

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: format!("failed to execute git: {e}"),
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitMutation for ShellBackend {
    fn init_repo(path: &Path) -> SdResult<()> {
        Self::git_command(&["init", "--quiet"], path)?;
        Ok(())
    }
}

impl GitQuery for ShellBackend {
    fn is_git_repo(path: &Path) -> bool {
        Self::git_command(&["rev-parse", "--is-inside-work-tree"], path).is_ok()
    }

    fn commit_hash(path: &Path) -> Option<String> {
        Self::git_command(&["rev-parse", "--verify", "--quiet", "HEAD"], path)
            .ok()
            .filter(|hash| !hash.is_empty())
    }

    fn pending_modifications(path: &Path) -> SdResult<usize> {
        let output = Self::git_command(&["status", "--porcelain", "--untracked-files=no"], path)?;
        Ok(output.lines().filter(|line| !line.is_empty()).count())
    }
}
