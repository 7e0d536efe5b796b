// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::new("dotnet")
//!   .args() .cwd() .quiet() .timeout()
//!   .run()            --> ProcessOutput { exit_code, stdout, stderr }
//!   .spawn_detached() --> pid (game client / server)
//! ```
//!
//! Every `run()` is awaited before the caller moves on; the runtime is
//! single-threaded.

pub mod builder;
mod runner;

pub use builder::{ProcessBuilder, ProcessFlags, ProcessOutput, StreamFlags};
