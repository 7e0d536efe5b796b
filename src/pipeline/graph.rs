// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency closure of a project and its combined identity.
//!
//! ```text
//! core --> lib --> shared
//!      \-> ui  --> shared
//!
//! resolve_dependencies(core) = [shared, lib, ui]   (post-order, each root once)
//! combined_identity = sha256(sorted(fingerprints).concat())
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::{BuildFlags, ProjectBuilder};
use crate::error::{ProjectError, Result, SdError, SdResult};
use crate::git;
use crate::project::{Fingerprint, ProjectDescriptor};

/// A project whose archive has been produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltProject {
    pub name: String,
    pub archive: PathBuf,
    pub identity: Fingerprint,
}

impl BuiltProject {
    #[must_use]
    pub fn new(project: &ProjectDescriptor, archive: PathBuf) -> Self {
        Self {
            name: project.name().to_string(),
            archive,
            identity: project.identity().clone(),
        }
    }
}

#[derive(Default)]
struct Resolver {
    order: Vec<ProjectDescriptor>,
    done: HashSet<PathBuf>,
    names: HashMap<String, PathBuf>,
}

impl Resolver {
    fn claim_name(&mut self, project: &ProjectDescriptor) -> SdResult<()> {
        match self.names.get(project.name()) {
            Some(first) if first != project.root_dir() => {
                Err(SdError::from(ProjectError::DuplicateProjectName {
                    name: project.name().to_string(),
                    first: first.display().to_string(),
                    second: project.root_dir().display().to_string(),
                }))
            }
            Some(_) => Ok(()),
            None => {
                self.names
                    .insert(project.name().to_string(), project.root_dir().to_path_buf());
                Ok(())
            }
        }
    }

    fn visit(&mut self, project: &ProjectDescriptor, chain: &mut Vec<ProjectDescriptor>) -> SdResult<()> {
        for dep_root in project.dependencies() {
            if let Some(pos) = chain.iter().position(|p| p.root_dir() == dep_root) {
                let mut names: Vec<&str> = chain[pos..].iter().map(ProjectDescriptor::name).collect();
                names.push(chain[pos].name());
                return Err(SdError::from(ProjectError::DependencyCycle {
                    chain: names.join(" -> "),
                }));
            }
            if self.done.contains(dep_root) {
                continue;
            }

            let dep = load_dependency(project, dep_root)?;
            self.claim_name(&dep)?;

            chain.push(dep.clone());
            self.visit(&dep, chain)?;
            chain.pop();

            self.done.insert(dep_root.clone());
            self.order.push(dep);
        }
        Ok(())
    }
}

fn load_dependency(parent: &ProjectDescriptor, root: &Path) -> SdResult<ProjectDescriptor> {
    ProjectDescriptor::load(root).map_err(|e| {
        if matches!(e.as_project(), Some(ProjectError::ManifestNotFound { .. })) {
            SdError::from(ProjectError::DependencyManifestNotFound {
                project: parent.name().to_string(),
                path: root.display().to_string(),
            })
        } else {
            e
        }
    })
}

/// Loads every project `root` depends on, directly or not.
///
/// Dependencies come before the projects that need them; a project reached
/// through several paths is listed once.
///
/// # Errors
///
/// Returns `DependencyManifestNotFound` for a dependency without manifest,
/// `DependencyCycle` when a project depends on itself through the graph and
/// `DuplicateProjectName` when two different roots share a name.
pub fn resolve_dependencies(root: &ProjectDescriptor) -> SdResult<Vec<ProjectDescriptor>> {
    let mut resolver = Resolver::default();
    resolver.claim_name(root)?;

    let mut chain = vec![root.clone()];
    resolver.visit(root, &mut chain)?;

    Ok(resolver.order)
}

/// Builds every dependency of `root` quietly, one after the other.
///
/// # Errors
///
/// Returns the first resolution or build error met.
pub async fn build_dependencies(
    builder: &ProjectBuilder,
    root: &ProjectDescriptor,
) -> Result<Vec<BuiltProject>> {
    let dependencies = resolve_dependencies(root)?;
    debug!(project = %root.name(), count = dependencies.len(), "dependencies resolved");

    let mut built = Vec::with_capacity(dependencies.len());
    for dep in &dependencies {
        let pending = git::query::pending_modifications(dep.root_dir()).unwrap_or(0);
        info!(
            "build {} '{}' {}",
            dep.identity().short(),
            dep.name(),
            pending
        );

        let archive = builder.build(dep, BuildFlags::QUIET).await?;
        built.push(BuiltProject::new(dep, archive));
    }

    Ok(built)
}

/// Order-independent hash over a set of fingerprints.
///
/// The fingerprint strings are sorted, concatenated and hashed with SHA-256;
/// the result is 64 lowercase hex characters.
#[must_use]
pub fn combined_identity<'a, I>(fingerprints: I) -> String
where
    I: IntoIterator<Item = &'a Fingerprint>,
{
    let mut parts: Vec<&str> = fingerprints.into_iter().map(Fingerprint::as_str).collect();
    parts.sort_unstable();

    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}
