// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                SdError (~24 bytes)
//!                       |
//!   +-------+-------+---+---+-------+------+-----+
//!   |       |       |       |       |      |     |
//!   v       v       v       v       v      v     v
//! Bail  Project  Build  Template  Cfg   Git  Proc/Fs/Io/Other
//!         Box     Box     Box     Box   Box   Box
//!
//! Sub-errors (unboxed internally):
//!   Project   ManifestNotFound, ManifestInvalid, DependencyManifestNotFound,
//!             DependencyCycle, DuplicateProjectName
//!   Build     CompileFailed, Archive
//!   Template  FormatError
//!   Config    ReadError, ParseError, WriteError, InvalidValue,
//!             ConfigurationMissing
//!   Git       Gix, CommandFailed
//!   Process   ExecutableNotFound, SpawnFailed, NonZeroExit, Timeout
//!   Fs        NotFound, IoError
//! ```
//!
//! Warnings such as an include glob without matches or a missing prefab are
//! not errors; they are logged and the build continues.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SdError`].
pub type SdResult<T> = std::result::Result<T, SdError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum SdError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Project manifest or dependency graph error.
    #[error("project error: {0}")]
    Project(#[from] Box<ProjectError>),

    /// Build pipeline error.
    #[error("build error: {0}")]
    Build(#[from] Box<BuildError>),

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(#[from] Box<TemplateError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`SdError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> SdError {
    SdError::Bailed(message.into().into_boxed_str())
}

impl SdError {
    /// Returns the project error, if this is one.
    #[must_use]
    pub fn as_project(&self) -> Option<&ProjectError> {
        match self {
            Self::Project(e) => Some(&**e),
            _ => None,
        }
    }

    /// Returns the build error, if this is one.
    #[must_use]
    pub fn as_build(&self) -> Option<&BuildError> {
        match self {
            Self::Build(e) => Some(&**e),
            _ => None,
        }
    }

    /// Returns the config error, if this is one.
    #[must_use]
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(e) => Some(&**e),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SdError {
                fn from(err: $error) -> Self {
                    SdError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ProjectError => Project,
    BuildError => Build,
    TemplateError => Template,
    ConfigError => Config,
    GitError => Git,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Project Errors ---

/// Manifest loading and dependency graph errors.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// `sdutils.json` is absent from the project root.
    #[error("manifest not found: {path}")]
    ManifestNotFound { path: String },

    /// Manifest is malformed or lacks a required field.
    #[error("invalid manifest '{path}': {message}")]
    ManifestInvalid { path: String, message: String },

    /// A declared dependency is not a complete project.
    #[error("dependency of '{project}' has no manifest: {path}")]
    DependencyManifestNotFound { project: String, path: String },

    /// Dependencies refer back to a project already being built.
    #[error("dependency cycle detected: {chain}")]
    DependencyCycle { chain: String },

    /// Two different projects in one release share a name.
    #[error("project name '{name}' is used by both {first} and {second}")]
    DuplicateProjectName {
        name: String,
        first: String,
        second: String,
    },
}

// --- Build Errors ---

/// Build pipeline errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The compile step exited with a non-zero status.
    #[error("build failed: {project} (compiler exited with code {code})")]
    CompileFailed { project: String, code: i32 },

    /// Creating or extracting a zip archive failed.
    #[error("archive error on '{path}': {message}")]
    Archive { path: String, message: String },
}

// --- Template Errors ---

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Placeholder carries a case-style suffix that is not recognized.
    #[error("invalid format: '!{format}'")]
    FormatError { format: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the default configuration file.
    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// A key required by the current operation is not set.
    #[error("{key} is not defined")]
    ConfigurationMissing { key: String },
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(String),

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
