// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  walk_sorted(), expand_glob(), WalkOptions
//!   copy:  copy_dir_contents_async(), copy_file_async(), recreate_dir_async()
//! ```

pub mod fs;
