// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `new` command.

use std::path::Path;

use crate::cli::build::NewArgs;
use crate::error::Result;
use crate::project::scaffold::scaffold;

/// Creates `<parent>/<mod name>` from the built-in templates.
///
/// # Errors
///
/// Returns an error if the folder already exists or a file cannot be written.
pub async fn run_new_command(args: &NewArgs, parent: &Path) -> Result<()> {
    let root = scaffold(parent, &args.mod_name).await?;
    println!("created {}", root.display());
    Ok(())
}
