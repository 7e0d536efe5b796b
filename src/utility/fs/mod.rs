// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with sorted traversal and async copy.
//!
//! ```text
//! walk:  walk_sorted()   ignore::Walk, name-sorted, parents first
//!        expand_glob()   wax pattern matching, files and directories
//!        WalkOptions     hidden, skip_dirs
//! copy:  copy_dir_contents_async()  recursive merge copy
//!        copy_file_async()          copy with parent creation
//!        recreate_dir_async()       wipe then create
//! ```

pub mod copy;
pub mod walk;
