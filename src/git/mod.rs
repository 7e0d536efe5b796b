// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!     Public API
//!   query.rs  cmd.rs
//!        \      /
//!         v    v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitMutation
//!   (gix, read)  (CLI, write)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .is_repo    .init_repo
//!    .commit
//!    .pending
//! ```
//!
//! The commit id of a project's HEAD is its build fingerprint; projects
//! outside a repository simply have none.

pub mod backend;
pub mod cmd;
pub mod query;
