// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! User configuration for sdutils.
//!
//! # Sources
//!
//! ```text
//! Priority (low → high)
//! 1. defaults (all paths unset, compiler = "dotnet")
//! 2. sdutils.json (config dir, or --config FILE)
//! 3. SDUTILS_* env vars
//! ```
//!
//! # File Format
//!
//! ```json
//! {
//!   "PATH_7D2D": "C:/Steam/steamapps/common/7 Days To Die",
//!   "PATH_7D2D_USER": "C:/Users/me/AppData/Roaming/7DaysToDie",
//!   "PATH_7D2D_SERVER": null,
//!   "PATH_PREFABS": "D:/prefab-library",
//!   "compiler": "dotnet",
//!   "process_timeout_secs": null
//! }
//! ```
//!
//! A missing file is created with every path unset. Paths are only checked
//! when an operation needs them, so `build` works without a game install.

pub mod loader;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::{ConfigError, Result, SdError, SdResult};

pub use loader::{ConfigLoader, default_config_path};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SDUTILS";

/// Per-user settings shared by every project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Game installation root.
    #[serde(rename(serialize = "PATH_7D2D"), alias = "PATH_7D2D")]
    pub path_7d2d: Option<PathBuf>,
    /// User data root (holds `Saves/`).
    #[serde(rename(serialize = "PATH_7D2D_USER"), alias = "PATH_7D2D_USER")]
    pub path_7d2d_user: Option<PathBuf>,
    /// Dedicated server root.
    #[serde(rename(serialize = "PATH_7D2D_SERVER"), alias = "PATH_7D2D_SERVER")]
    pub path_7d2d_server: Option<PathBuf>,
    /// Prefab library root.
    #[serde(rename(serialize = "PATH_PREFABS"), alias = "PATH_PREFABS")]
    pub path_prefabs: Option<PathBuf>,
    /// Compiler executable used for `csproj` targets.
    pub compiler: String,
    /// Upper bound for external processes; unset waits forever.
    pub process_timeout_secs: Option<u64>,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            path_7d2d: None,
            path_7d2d_user: None,
            path_7d2d_server: None,
            path_prefabs: None,
            compiler: "dotnet".to_string(),
            process_timeout_secs: None,
        }
    }
}

fn required<'a>(value: Option<&'a PathBuf>, key: &str) -> SdResult<&'a Path> {
    value
        .map(PathBuf::as_path)
        .ok_or_else(|| SdError::from(ConfigError::ConfigurationMissing { key: key.to_string() }))
}

impl UserConfig {
    /// Create a new configuration loader.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sdutils_rs::config::UserConfig;
    ///
    /// let config = UserConfig::builder()
    ///     .add_json_file("sdutils.json")
    ///     .with_env_prefix("SDUTILS")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Parse a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid JSON or holds invalid values.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_json_str(content).build()
    }

    /// Load the configuration at `path`, creating it with defaults first if
    /// it does not exist. Environment overrides are applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WriteError`] if the default file cannot be
    /// written, or a parse error if the existing file is malformed.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::default().save(path)?;
            info!(path = %path.display(), "created default configuration");
        }

        Self::builder()
            .add_json_file(path)
            .with_env_prefix(ENV_PREFIX)
            .build()
    }

    /// Persist the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WriteError`] on any I/O failure.
    pub fn save(&self, path: &Path) -> SdResult<()> {
        let write_error = |source| {
            SdError::from(ConfigError::WriteError {
                path: path.display().to_string(),
                source,
            })
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| write_error(std::io::Error::other(e)))?;
        std::fs::write(path, json + "\n").map_err(write_error)
    }

    pub(crate) fn validate(&self) -> SdResult<()> {
        if self.compiler.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "compiler".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        if self.process_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "process_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Game installation root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigurationMissing`] when unset.
    pub fn game_root(&self) -> SdResult<&Path> {
        required(self.path_7d2d.as_ref(), "PATH_7D2D")
    }

    /// User data root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigurationMissing`] when unset.
    pub fn user_root(&self) -> SdResult<&Path> {
        required(self.path_7d2d_user.as_ref(), "PATH_7D2D_USER")
    }

    /// Dedicated server root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigurationMissing`] when unset.
    pub fn server_root(&self) -> SdResult<&Path> {
        required(self.path_7d2d_server.as_ref(), "PATH_7D2D_SERVER")
    }

    /// Prefab library root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigurationMissing`] when unset.
    pub fn prefabs_root(&self) -> SdResult<&Path> {
        required(self.path_prefabs.as_ref(), "PATH_PREFABS")
    }

    #[must_use]
    pub fn process_timeout(&self) -> Option<Duration> {
        self.process_timeout_secs.map(Duration::from_secs)
    }

    /// Format configuration options for display, one `KEY = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string())
        };

        let options = [
            ("PATH_7D2D", fmt(&self.path_7d2d)),
            ("PATH_7D2D_USER", fmt(&self.path_7d2d_user)),
            ("PATH_7D2D_SERVER", fmt(&self.path_7d2d_server)),
            ("PATH_PREFABS", fmt(&self.path_prefabs)),
            ("compiler", self.compiler.clone()),
            (
                "process_timeout_secs",
                self.process_timeout_secs
                    .map_or_else(|| "<unset>".to_string(), |s| s.to_string()),
            ),
        ];

        let max_key_len = options.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
