// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |       new / build / release / start
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  sdutils.json, SDUTILS_*  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!            lifecycle    pipeline   project
//!           install/run  build/graph manifest/template
//!                 |           |
//!                 +-----+-----+
//!                       v
//!                     tools
//!           dotnet / packer / extractor / game
//!
//!   +-----------------------------------------+
//!   |  core   process          git  gix/CLI   |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod lifecycle;
pub mod logging;
pub mod pipeline;
pub mod project;
pub mod tools;
pub mod utility;
