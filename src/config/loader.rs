// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! User configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_json_file(path)
//!   .with_env_prefix("SDUTILS")
//!        |
//!        v
//!    build() --> UserConfig
//! ```
//!
//! Environment overrides use a single underscore after the prefix:
//! `SDUTILS_PATH_PREFABS=/srv/prefabs` sets `PATH_PREFABS`.

use std::path::{Path, PathBuf};

use super::UserConfig;
use crate::error::{ConfigError, Result, SdError};

/// Builder for loading the user configuration from its sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    origin: String,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            origin: "<defaults>".to_string(),
        }
    }

    /// Adds a JSON configuration file that must exist.
    #[must_use]
    pub fn add_json_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Json).required(true));
        self.origin = p.display().to_string();
        self
    }

    #[must_use]
    pub fn add_json_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Json));
        self.origin = "<string>".to_string();
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] when a source is unreadable, is not
    /// valid JSON, or does not match [`UserConfig`], and
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn build(self) -> Result<UserConfig> {
        let origin = self.origin;
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };

        let parse_error = |e: config::ConfigError| {
            SdError::from(ConfigError::ParseError {
                path: origin.clone(),
                message: e.to_string(),
            })
        };
        let cfg = builder.build().map_err(parse_error)?;
        let config: UserConfig = cfg.try_deserialize().map_err(parse_error)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Default location of the user configuration file.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sdutils.json")
}
