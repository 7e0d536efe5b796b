// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `sdutils.json` parsing and resolution into a [`ProjectDescriptor`].
//!
//! ```json
//! {
//!   "name": "core",
//!   "game_path": "D:/7d2d-test-install",
//!   "csproj": "core.csproj",
//!   "dependencies": ["../lib"],
//!   "include": ["Config", "ModInfo.xml", "*.dll"],
//!   "prefabs": ["trader_"],
//!   "clear_saves": [{ "world": "Navezgane", "save": "test", "hard": true }]
//! }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use super::{Fingerprint, MANIFEST_FILE, ProjectDescriptor, SaveCleanup};
use crate::error::{FsError, ProjectError, SdResult};
use crate::git;

/// Raw manifest as written on disk. Unknown keys are kept aside and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub game_path: Option<PathBuf>,
    #[serde(default)]
    pub csproj: Option<PathBuf>,
    #[serde(default)]
    pub dependencies: Vec<PathBuf>,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub prefabs: Vec<String>,
    #[serde(default)]
    pub clear_saves: Vec<SaveCleanup>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_json::Value>,
}

impl Manifest {
    /// Parse manifest text. `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::ManifestInvalid`] for malformed JSON, a missing
    /// or empty `name`, or an include pattern that is absolute, climbs out of
    /// the project root or is not a valid glob.
    pub fn parse(content: &str, origin: &Path) -> SdResult<Self> {
        let invalid = |message: String| ProjectError::ManifestInvalid {
            path: origin.display().to_string(),
            message,
        };

        let manifest: Self = serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?;

        for key in manifest.unknown.keys() {
            warn!(manifest = %origin.display(), key = %key, "unknown manifest key ignored");
        }

        if manifest.name.trim().is_empty() {
            return Err(invalid("`name` must not be empty".to_string()).into());
        }
        if manifest.name.contains(['/', '\\']) || manifest.name == ".." {
            return Err(invalid(format!(
                "`name` must be a plain folder name, got '{}'",
                manifest.name
            ))
            .into());
        }

        for pattern in &manifest.include {
            let escapes = Path::new(pattern)
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
            if escapes {
                return Err(invalid(format!(
                    "include pattern '{pattern}' must stay inside the project root"
                ))
                .into());
            }
            wax::Glob::new(pattern)
                .map_err(|e| invalid(format!("include pattern '{pattern}': {e}")))?;
        }

        Ok(manifest)
    }
}

/// Canonical form of an existing path, the joined path otherwise.
fn anchored(root: &Path, relative: &Path) -> PathBuf {
    let joined = root.join(relative);
    std::fs::canonicalize(&joined).unwrap_or(joined)
}

impl ProjectDescriptor {
    /// Load the project whose manifest lives in `root`.
    ///
    /// Relative paths are resolved against the project root now, not when
    /// they are used. Every dependency must already contain its own manifest.
    ///
    /// # Errors
    ///
    /// - [`ProjectError::ManifestNotFound`] if `root/sdutils.json` is absent.
    /// - [`ProjectError::ManifestInvalid`] if it cannot be parsed.
    /// - [`ProjectError::DependencyManifestNotFound`] for an incomplete dependency.
    pub fn load(root: &Path) -> SdResult<Self> {
        let manifest_path = root.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(ProjectError::ManifestNotFound {
                path: manifest_path.display().to_string(),
            }
            .into());
        }

        let root_dir = std::fs::canonicalize(root).map_err(|source| FsError::IoError {
            path: root.display().to_string(),
            source,
        })?;
        let manifest_path = root_dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&manifest_path).map_err(|source| FsError::IoError {
            path: manifest_path.display().to_string(),
            source,
        })?;
        let manifest = Manifest::parse(&content, &manifest_path)?;

        let mut dependencies = Vec::with_capacity(manifest.dependencies.len());
        for dependency in &manifest.dependencies {
            let dep_root = anchored(&root_dir, dependency);
            if !dep_root.join(MANIFEST_FILE).is_file() {
                return Err(ProjectError::DependencyManifestNotFound {
                    project: manifest.name.clone(),
                    path: dep_root.join(MANIFEST_FILE).display().to_string(),
                }
                .into());
            }
            dependencies.push(dep_root);
        }

        let identity = Fingerprint::new(git::query::commit_hash(&root_dir));
        debug!(name = %manifest.name, root = %root_dir.display(), %identity, "loaded manifest");

        Ok(Self {
            compile_target: manifest.csproj.as_deref().map(|p| root_dir.join(p)),
            game_path: manifest.game_path.as_deref().map(|p| root_dir.join(p)),
            name: manifest.name,
            dependencies,
            include_patterns: manifest.include,
            external_asset_refs: manifest.prefabs,
            save_cleanup_entries: manifest.clear_saves,
            identity,
            root_dir,
        })
    }
}
