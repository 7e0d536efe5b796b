// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release assembly: root build plus every dependency in one archive.
//!
//! ```text
//! build/                       (aggregation dir, recreated)
//!   core/        <-- core.zip
//!     version.txt   version=<combined>
//!                   core=<fingerprint>
//!                   lib=<fingerprint>
//!   lib/         <-- lib.zip
//! --> core-release-<combined[..8]>.zip
//! ```

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use super::graph::{BuiltProject, build_dependencies, combined_identity};
use super::{BuildFlags, ProjectBuilder, write_version_marker};
use crate::error::Result;
use crate::project::ProjectDescriptor;
use crate::tools::extractor::ExtractorTool;
use crate::tools::packer::PackerTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::fs::copy::recreate_dir_async;

/// Outcome of a release.
#[derive(Debug, Clone)]
pub struct ReleaseSummary {
    pub archive: PathBuf,
    pub combined_identity: String,
    pub projects: Vec<BuiltProject>,
}

impl ReleaseSummary {
    #[must_use]
    pub fn short_identity(&self) -> &str {
        &self.combined_identity[..8.min(self.combined_identity.len())]
    }
}

/// Text of the release `version.txt`: combined identity, then the root,
/// then each dependency in build order.
#[must_use]
pub fn release_marker(combined: &str, root: &BuiltProject, dependencies: &[BuiltProject]) -> String {
    let mut marker = format!("version={combined}\n");
    for project in std::iter::once(root).chain(dependencies) {
        let _ = writeln!(marker, "{}={}", project.name, project.identity);
    }
    marker
}

/// Builds the root project and its dependencies and bundles them.
///
/// The release archive is written atomically, so a failure never leaves a
/// partial file under the final name.
///
/// # Errors
///
/// Returns the first build, resolution or archive error.
pub async fn release(builder: &ProjectBuilder, project: &ProjectDescriptor) -> Result<ReleaseSummary> {
    let start = Instant::now();
    let ctx = ToolContext::new(std::sync::Arc::clone(builder.config()), false);

    let root_archive = builder.build(project, BuildFlags::empty()).await?;
    let root = BuiltProject::new(project, root_archive);

    let aggregation = project.staging_dir();
    recreate_dir_async(&aggregation).await?;

    let dependencies = build_dependencies(builder, project).await?;

    for built in dependencies.iter().chain(std::iter::once(&root)) {
        ExtractorTool::new()
            .archive(&built.archive)
            .output(aggregation.join(&built.name))
            .run(&ctx)
            .await?;
    }

    let combined = combined_identity(
        dependencies
            .iter()
            .chain(std::iter::once(&root))
            .map(|p| &p.identity),
    );
    write_version_marker(
        &aggregation.join(&root.name),
        &release_marker(&combined, &root, &dependencies),
    )
    .await?;

    let archive = project.release_archive_path(&combined[..8]);
    PackerTool::new()
        .archive(&archive)
        .base_dir(&aggregation)
        .run(&ctx)
        .await?;

    let summary = ReleaseSummary {
        archive,
        combined_identity: combined,
        projects: std::iter::once(root).chain(dependencies).collect(),
    };
    info!(
        "build {} done in {:.1}s",
        summary.short_identity(),
        start.elapsed().as_secs_f64()
    );
    Ok(summary)
}
