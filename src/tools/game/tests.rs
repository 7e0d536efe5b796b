// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CLIENT_EXE, GameOperation, GameTool, shutdown_builders};
use crate::config::UserConfig;
use crate::error::{FsError, SdError};
use crate::tools::{Tool, ToolContext};
use std::sync::Arc;

fn context() -> ToolContext {
    ToolContext::new(Arc::new(UserConfig::default()), true)
}

#[test]
fn test_game_tool_default_is_shut_down() {
    let tool = GameTool::default();
    assert_eq!(tool.name(), "game");
    assert_eq!(tool.operation(), GameOperation::ShutDown);
    assert!(tool.launch_builder().is_err());
}

#[test]
fn test_game_tool_operations() {
    let client = GameTool::new().launch_client_op("/games/7d2d");
    assert_eq!(client.operation(), GameOperation::LaunchClient);

    let server = client.launch_server_op("/games/server");
    assert_eq!(server.operation(), GameOperation::LaunchServer);

    assert_eq!(server.shut_down_op().operation(), GameOperation::ShutDown);
}

#[cfg(not(windows))]
#[test]
fn test_launch_command_lines() {
    let client = GameTool::new().launch_client_op("/games/7d2d");
    insta::assert_snapshot!(
        client.launch_builder().unwrap().command_line(),
        @"/games/7d2d/7DaysToDie.x86_64 --noeac"
    );

    let server = GameTool::new().launch_server_op("/games/server");
    insta::assert_snapshot!(
        server.launch_builder().unwrap().command_line(),
        @"/bin/sh /games/server/startserver.sh"
    );
}

#[cfg(not(windows))]
#[test]
fn test_shutdown_command_lines() {
    let lines: Vec<String> = shutdown_builders()
        .iter()
        .map(|b| b.command_line())
        .collect();
    insta::assert_debug_snapshot!(lines, @r#"
    [
        "pkill -f 7DaysToDie.x86_64",
        "pkill -f 7DaysToDieServer.x86_64",
    ]
    "#);
}

#[tokio::test(flavor = "current_thread")]
async fn test_launch_missing_executable() {
    let temp = tempfile::tempdir().unwrap();
    let err = GameTool::new()
        .launch_client_op(temp.path())
        .run(&context())
        .await
        .unwrap_err();

    let err = err.downcast_ref::<SdError>().unwrap();
    assert!(matches!(err, SdError::Fs(e) if matches!(**e, FsError::NotFound(ref p) if p.ends_with(CLIENT_EXE))));
}

#[tokio::test(flavor = "current_thread")]
async fn test_shut_down_ignores_failures() {
    // Nothing is running; every kill command fails or is missing.
    GameTool::new().run(&context()).await.unwrap();
}
