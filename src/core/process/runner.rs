// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and output streaming.
//!
//! ```text
//! run()                          spawn_detached()
//!   |                              |
//!   v                              v
//! build_command()              build_command()
//! args, cwd, stdio             stdio = null
//!   |                              |
//!   v                              v
//! spawn + reader tasks         spawn, forget
//!   |                              |
//!   v                              v
//! wait (or timeout -> kill)    pid
//!   |
//!   v
//! validate exit_code
//! (skip if ALLOW_FAILURE)
//!   |
//!   v
//! ProcessOutput { exit_code, stdout, stderr }
//! ```

use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
use crate::error::{ProcessError, SdError, SdResult};

impl ProcessBuilder {
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    pub(crate) fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> SdError {
        if source.kind() == std::io::ErrorKind::NotFound {
            ProcessError::ExecutableNotFound {
                name: self.program().display().to_string(),
            }
            .into()
        } else {
            ProcessError::SpawnFailed {
                command: self.command_line(),
                source,
            }
            .into()
        }
    }

    /// Spawns the process and waits for it to finish.
    ///
    /// # Errors
    ///
    /// - [`ProcessError::ExecutableNotFound`] / [`ProcessError::SpawnFailed`]
    ///   when the process cannot start.
    /// - [`ProcessError::Timeout`] when the configured timeout elapses; the
    ///   child is killed first.
    /// - [`ProcessError::NonZeroExit`] unless `ALLOW_FAILURE` is set.
    pub async fn run(self) -> SdResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command(self.stdout_flags(), self.stderr_flags());
        command.kill_on_drop(true);
        let mut child = command.spawn().map_err(|e| self.spawn_error(e))?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let stdout_handle = child
            .stdout
            .take()
            .map(|s| spawn_reader(s, self.stdout_flags(), name.clone(), "stdout"));
        let stderr_handle = child
            .stderr
            .take()
            .map(|s| spawn_reader(s, self.stderr_flags(), name.clone(), "stderr"));

        let waited = match self.timeout_duration() {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    warn!(process = %name, timeout = ?limit, "process timed out");
                    let _ = child.kill().await;
                    return Err(ProcessError::Timeout {
                        command: cmd_line,
                        timeout_secs: limit.as_secs(),
                    }
                    .into());
                }
            },
            None => child.wait().await,
        };
        let status = waited.map_err(|e| self.spawn_error(e))?;

        let output = ProcessOutput::new(
            status.code().unwrap_or(-1),
            collect(stdout_handle).await,
            collect(stderr_handle).await,
        );

        if !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE) && !output.success() {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: cmd_line,
                code: output.exit_code(),
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    /// Launches the process without waiting for it and returns its pid.
    ///
    /// The child outlives this builder; its output is discarded.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessError`] if the process cannot start.
    pub fn spawn_detached(self) -> SdResult<Option<u32>> {
        debug!(cmd = %self.command_line(), "launch");

        let mut command = self.build_command(StreamFlags::BIT_BUCKET, StreamFlags::BIT_BUCKET);
        command.kill_on_drop(false);
        let child = command.spawn().map_err(|e| self.spawn_error(e))?;
        Ok(child.id())
    }

    fn build_command(&self, stdout: StreamFlags, stderr: StreamFlags) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());
        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }
        command.stdin(Stdio::null());
        command.stdout(stdio_from_flags(stdout));
        command.stderr(stdio_from_flags(stderr));
        command
    }
}

fn stdio_from_flags(flags: StreamFlags) -> Stdio {
    if flags.contains(StreamFlags::INHERIT) {
        Stdio::inherit()
    } else if flags.contains(StreamFlags::BIT_BUCKET) {
        Stdio::null()
    } else {
        Stdio::piped()
    }
}

fn spawn_reader<R>(
    reader: R,
    flags: StreamFlags,
    process_name: String,
    stream_name: &'static str,
) -> JoinHandle<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut kept = String::new();
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if flags.contains(StreamFlags::FORWARD_TO_LOG) {
                debug!(process = %process_name, stream = stream_name, "{line}");
            }
            if flags.contains(StreamFlags::KEEP_IN_STRING) {
                if !kept.is_empty() {
                    kept.push('\n');
                }
                kept.push_str(&line);
            }
        }
        kept
    })
}

async fn collect(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default(),
        None => String::new(),
    }
}
