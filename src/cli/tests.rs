// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::{Cli, Command};
use crate::pipeline::BuildFlags;
use clap::Parser;
use std::path::Path;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["sdutils", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "sdutils",
        "-l",
        "5",
        "--config",
        "/tmp/sdutils.json",
        "build",
        "-C",
        "mods/core",
    ])
    .unwrap();

    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.config_path(), Path::new("/tmp/sdutils.json"));
    assert_eq!(cli.global.project_dir(), Path::new("mods/core"));
}

#[test]
fn test_project_dir_defaults_to_cwd() {
    let cli = Cli::try_parse_from(["sdutils", "infos"]).unwrap();
    assert_eq!(cli.global.project_dir(), Path::new("."));
}

#[test]
fn test_parse_build_flags() {
    let cli = Cli::try_parse_from(["sdutils", "build", "-c", "--quiet"]).unwrap();
    let Some(Command::Build(args)) = cli.command else {
        panic!("expected build");
    };
    assert_eq!(args.flags(), BuildFlags::CLEAN | BuildFlags::QUIET);
}

#[test]
fn test_parse_new_requires_name() {
    assert!(Cli::try_parse_from(["sdutils", "new"]).is_err());

    let cli = Cli::try_parse_from(["sdutils", "new", "Zombie Horde"]).unwrap();
    let Some(Command::New(args)) = cli.command else {
        panic!("expected new");
    };
    assert_eq!(args.mod_name, "Zombie Horde");
}

#[test]
fn test_parse_kebab_commands() {
    for (arg, expected) in [
        ("fetch-prefabs", "FetchPrefabs"),
        ("shut-down", "ShutDown"),
        ("release", "Release"),
        ("install", "Install"),
    ] {
        let cli = Cli::try_parse_from(["sdutils", arg]).unwrap();
        assert_eq!(format!("{:?}", cli.command.unwrap()), expected);
    }
}

#[test]
fn test_parse_start_server() {
    let cli = Cli::try_parse_from(["sdutils", "start", "--server"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Start(args)) if args.server));
}

#[test]
fn test_log_level_range() {
    assert!(Cli::try_parse_from(["sdutils", "-l", "7", "version"]).is_err());
}

#[test]
fn test_cli_definition_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
