// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! New project generation.
//!
//! ```text
//! scaffold(parent, "My Mod")
//!   My Mod/
//!     Config/ Harmony/ Ignore/ Prefabs/ Resources/ Scripts/
//!     UIAtlases/ItemIconAtlas/
//!     ModInfo.xml  ModConfig.xml  my-mod.csproj  .gitignore
//!     Harmony/ModApi.cs  sdutils.json
//!   git init
//! ```

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::template::{CaseStyle, render_file};
use crate::error::{Result, bail_out};
use crate::git;

/// Placeholder replaced by the mod name in every rendered template.
pub const MOD_NAME_KEY: &str = "@MODNAME";

const DIRECTORIES: &[&str] = &[
    "Config",
    "Harmony",
    "Ignore",
    "Prefabs",
    "Resources",
    "Scripts",
    "UIAtlases/ItemIconAtlas",
];

struct TemplateFile {
    target: &'static str,
    content: &'static str,
    rendered: bool,
}

const TEMPLATES: &[TemplateFile] = &[
    TemplateFile {
        target: "ModInfo.xml",
        content: include_str!("../../templates/ModInfo.xml"),
        rendered: true,
    },
    TemplateFile {
        target: "ModConfig.xml",
        content: include_str!("../../templates/ModConfig.xml"),
        rendered: false,
    },
    TemplateFile {
        target: ".gitignore",
        content: include_str!("../../templates/gitignore.template"),
        rendered: false,
    },
    TemplateFile {
        target: "Harmony/ModApi.cs",
        content: include_str!("../../templates/ModApi.cs"),
        rendered: true,
    },
    TemplateFile {
        target: "sdutils.json",
        content: include_str!("../../templates/sdutils.json"),
        rendered: true,
    },
];

const CSPROJ_TEMPLATE: &str = include_str!("../../templates/mod.csproj");

/// Create a new project folder named `mod_name` inside `parent`.
///
/// A failing `git init` is only a warning; the project is usable without it.
///
/// # Errors
///
/// Returns an error if the folder already exists, the name has no usable
/// characters, or any file cannot be written or rendered.
pub async fn scaffold(parent: &Path, mod_name: &str) -> Result<PathBuf> {
    let kebab = CaseStyle::Kebab.apply(mod_name);
    if kebab.is_empty() {
        return Err(bail_out(format!("'{mod_name}' is not a usable mod name")).into());
    }

    let root = parent.join(mod_name);
    if tokio::fs::try_exists(&root).await.unwrap_or(true) {
        return Err(bail_out(format!("a folder named '{mod_name}' already exists")).into());
    }

    for dir in DIRECTORIES {
        let path = root.join(dir);
        tokio::fs::create_dir_all(&path)
            .await
            .with_context(|| format!("failed to create {}", path.display()))?;
    }

    let placeholders = [(MOD_NAME_KEY, mod_name)];
    let csproj = format!("{kebab}.csproj");
    let files = TEMPLATES
        .iter()
        .map(|t| (t.target, t.content, t.rendered))
        .chain(std::iter::once((csproj.as_str(), CSPROJ_TEMPLATE, true)));

    for (target, content, rendered) in files {
        let path = root.join(target);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        if rendered {
            render_file(&path, &placeholders).await?;
        }
    }

    if let Err(e) = git::cmd::init_repo(&root) {
        warn!(error = %e, "error while initializing git repository");
    }

    info!(name = mod_name, path = %root.display(), "project created");
    Ok(root)
}
