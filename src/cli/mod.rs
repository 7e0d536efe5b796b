// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for sdutils using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! sdutils [global options] <command>
//! new <mod-name>
//! build [--clean] [--quiet]
//! release
//! fetch-prefabs
//! start [--server]
//! shut-down
//! install
//! infos
//! version
//! ```

pub mod build;
pub mod global;

#[cfg(test)]
mod tests;

use crate::cli::build::{BuildArgs, NewArgs, StartArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

const LOGO: &str = r"
  ______ _____      _    _ _______ _____ _       _____
 |____  |  __ \    | |  | |__   __|_   _| |     / ____|
     / /| |  | |___| |  | |  | |    | | | |    | (___
    / / | |  | |___| |  | |  | |    | | | |     \___ \
   / /  | |__| |   | |__| |  | |   _| |_| |____ ____) |
  /_/   |_____/     \____/   |_|  |_____|______|_____/
";

/// 7 Days to Die modding utilities.
#[derive(Debug, Parser)]
#[command(
    name = "sdutils",
    author,
    version,
    before_help = LOGO,
    about = "7 Days to Die modding utilities",
    long_about = "sdutils-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  A set of commands to manage 7 Days to Die modding projects,\n\
                  from scaffolding to building, packaging and launching the game.\n\
                  Every command except `new` works on the project whose\n\
                  `sdutils.json` is in the current directory (or --project-dir).",
    max_term_width = 120
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Creates a new mod project from the built-in templates.
    New(NewArgs),

    /// Compiles the project and creates a zip archive ready for testing.
    Build(BuildArgs),

    /// Compiles the project and its dependencies into one release archive.
    Release,

    /// Copies the prefabs listed in `sdutils.json` into the `Prefabs` folder.
    #[command(name = "fetch-prefabs")]
    FetchPrefabs,

    /// Builds and installs the project, then starts a local game.
    Start(StartArgs),

    /// Force-closes every running game client and dedicated server.
    #[command(name = "shut-down")]
    ShutDown,

    /// Builds the project then installs it in the game's Mods folder.
    Install,

    /// Shows the resolved project and configuration values.
    Infos,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
