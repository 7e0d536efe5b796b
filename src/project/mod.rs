// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod projects: manifest, identity and scaffolding.
//!
//! ```text
//! <root>/
//!   sdutils.json     manifest (ProjectDescriptor::load)
//!   build/           staging directory
//!   Prefabs/         fetched prefabs
//!   <name>.zip       build archive
//!   <name>-release-<8 hex>.zip
//! ```

pub mod manifest;
pub mod scaffold;
pub mod template;


use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::UserConfig;
use crate::error::SdResult;

/// Manifest file name inside a project root.
pub const MANIFEST_FILE: &str = "sdutils.json";
/// Staging directory name inside a project root.
pub const STAGING_DIR: &str = "build";
/// Version marker written into every staged build.
pub const VERSION_FILE: &str = "version.txt";
/// Folder receiving fetched prefabs.
pub const PREFABS_DIR: &str = "Prefabs";

/// Build identity taken from version control.
///
/// An absent fingerprint is a valid, stable value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint(Option<String>);

impl Fingerprint {
    /// Text used for projects that are not under version control.
    pub const UNVERSIONED: &'static str = "unversioned";

    #[must_use]
    pub const fn new(commit: Option<String>) -> Self {
        Self(commit)
    }

    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        self.0.as_deref()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or(Self::UNVERSIONED)
    }

    /// First 8 characters, as shown in log lines.
    #[must_use]
    pub fn short(&self) -> &str {
        let full = self.as_str();
        full.char_indices().nth(8).map_or(full, |(end, _)| &full[..end])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One save whose generated data is pruned after a local start.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveCleanup {
    pub world: String,
    pub save: String,
    /// Remove the whole save folder instead of the regenerated parts.
    #[serde(default)]
    pub hard: bool,
}

/// A loaded project. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    name: String,
    root_dir: PathBuf,
    compile_target: Option<PathBuf>,
    dependencies: Vec<PathBuf>,
    include_patterns: Vec<String>,
    external_asset_refs: Vec<String>,
    save_cleanup_entries: Vec<SaveCleanup>,
    game_path: Option<PathBuf>,
    identity: Fingerprint,
}

impl ProjectDescriptor {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute project root.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    #[must_use]
    pub fn compile_target(&self) -> Option<&Path> {
        self.compile_target.as_deref()
    }

    /// Absolute roots of the declared dependencies, in manifest order.
    #[must_use]
    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }

    #[must_use]
    pub fn include_patterns(&self) -> &[String] {
        &self.include_patterns
    }

    #[must_use]
    pub fn external_asset_refs(&self) -> &[String] {
        &self.external_asset_refs
    }

    #[must_use]
    pub fn save_cleanup_entries(&self) -> &[SaveCleanup] {
        &self.save_cleanup_entries
    }

    #[must_use]
    pub const fn identity(&self) -> &Fingerprint {
        &self.identity
    }

    #[must_use]
    pub fn staging_dir(&self) -> PathBuf {
        self.root_dir.join(STAGING_DIR)
    }

    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.root_dir.join(format!("{}.zip", self.name))
    }

    #[must_use]
    pub fn prefabs_dir(&self) -> PathBuf {
        self.root_dir.join(PREFABS_DIR)
    }

    /// Release archive for a combined identity, next to the build archive.
    #[must_use]
    pub fn release_archive_path(&self, combined_short: &str) -> PathBuf {
        self.root_dir
            .join(format!("{}-release-{combined_short}.zip", self.name))
    }

    /// Game installation used by this project: the manifest override, else
    /// the configured installation root.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationMissing` when neither is set.
    pub fn game_path(&self, config: &UserConfig) -> SdResult<PathBuf> {
        match &self.game_path {
            Some(path) => Ok(path.clone()),
            None => config.game_root().map(Path::to_path_buf),
        }
    }

    /// Folder the mod is installed into for the local game.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationMissing` when no game path is known.
    pub fn mod_install_path(&self, config: &UserConfig) -> SdResult<PathBuf> {
        Ok(self.game_path(config)?.join("Mods").join(&self.name))
    }

    /// Aligned `key .... : value` lines describing the project.
    #[must_use]
    pub fn describe(&self, config: &UserConfig) -> Vec<String> {
        let unset = || "<unset>".to_string();
        let show = |p: Option<&Path>| p.map_or_else(unset, |p| p.display().to_string());

        let sections: [&[(&str, String)]; 3] = [
            &[
                ("name", self.name.clone()),
                ("fingerprint", self.identity.to_string()),
            ],
            &[
                ("root_dir", self.root_dir.display().to_string()),
                ("staging_dir", self.staging_dir().display().to_string()),
                ("csproj", show(self.compile_target())),
                ("archive", self.archive_path().display().to_string()),
            ],
            &[
                ("game_path", show(self.game_path(config).ok().as_deref())),
                ("mod_path", show(self.mod_install_path(config).ok().as_deref())),
            ],
        ];

        let width = sections
            .iter()
            .flat_map(|s| s.iter())
            .map(|(k, _)| k.len())
            .max()
            .unwrap_or(0)
            + 2;

        let mut lines = Vec::new();
        for section in sections {
            for (key, value) in section {
                lines.push(format!("{:.<width$} : {value}", format!("{key} ")));
            }
            lines.push(String::new());
        }
        lines
    }
}
