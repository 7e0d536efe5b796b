// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-command arguments.

use clap::Args;

use crate::pipeline::BuildFlags;

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Clean the build directory, once done.
    #[arg(short = 'c', long)]
    pub clean: bool,

    /// Hide compiler output.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl BuildArgs {
    #[must_use]
    pub fn flags(&self) -> BuildFlags {
        let mut flags = BuildFlags::empty();
        flags.set(BuildFlags::CLEAN, self.clean);
        flags.set(BuildFlags::QUIET, self.quiet);
        flags
    }
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Name of the mod; also the folder created in the current directory.
    #[arg(value_name = "MOD_NAME")]
    pub mod_name: String,
}

/// Arguments for the `start` command.
#[derive(Debug, Clone, Default, Args)]
pub struct StartArgs {
    /// Also install the mod on the dedicated server and start it.
    #[arg(short = 's', long)]
    pub server: bool,
}
