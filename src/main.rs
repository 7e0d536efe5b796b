// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   New | Build | Release | FetchPrefabs | Start | ShutDown | Install | Infos
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use sdutils_rs::cli::global::GlobalOptions;
use sdutils_rs::cli::{self, Command};
use sdutils_rs::cmd::build::{
    run_build_command, run_fetch_prefabs_command, run_infos_command, run_release_command,
};
use sdutils_rs::cmd::game::{run_install_command, run_shut_down_command, run_start_command};
use sdutils_rs::cmd::new::run_new_command;
use sdutils_rs::config::UserConfig;
use sdutils_rs::logging::init_logging;
use sdutils_rs::logging::{LogConfig, LogLevel};

use anyhow::{Context, anyhow};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let global = &cli.global;
    let dir = global.project_dir();

    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::New(args)) => run_new_command(args, dir).await,
        Some(command) => match load_config(global) {
            Ok(config) => match command {
                Command::Build(args) => run_build_command(args, dir, config).await,
                Command::Release => run_release_command(dir, config).await,
                Command::FetchPrefabs => run_fetch_prefabs_command(dir, &config).await,
                Command::Start(args) => run_start_command(args, dir, config).await,
                Command::ShutDown => run_shut_down_command(config).await,
                Command::Install => run_install_command(dir, config).await,
                Command::Infos => run_infos_command(dir, &config, &global.config_path()),
                Command::Version | Command::New(_) => Ok(()),
            },
            Err(e) => Err(e),
        },
        None => Err(anyhow!(
            "no command specified, use --help for usage information"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> sdutils_rs::error::Result<Arc<UserConfig>> {
    let path = global.config_path();
    UserConfig::load_or_create(&path)
        .map(Arc::new)
        .with_context(|| format!("failed to load config at '{}'", path.display()))
}
