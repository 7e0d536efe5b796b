// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Placeholder substitution for scaffolded files.
//!
//! ```text
//! "@MODNAME!kebab.csproj"   {"@MODNAME": "My Mod"}
//!          |
//!          v
//!  key + optional !style    regex: <escaped key>(?:!(\w+))?
//!          |
//!          v
//!  split_words("My Mod") -> ["My", "Mod"]
//!          |
//!          v
//!  "my-mod.csproj"
//! ```
//!
//! Styles: `pascal` (MyMod), `camel` (myMod), `snake` (my_mod),
//! `kebab` (my-mod). Without a style the value is inserted verbatim.

use anyhow::Context;
use regex::Regex;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, SdError, SdResult, TemplateError};

/// Case style requested by a `!suffix` on a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    Pascal,
    Camel,
    Snake,
    Kebab,
}

impl FromStr for CaseStyle {
    type Err = TemplateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pascal" => Ok(Self::Pascal),
            "camel" => Ok(Self::Camel),
            "snake" => Ok(Self::Snake),
            "kebab" => Ok(Self::Kebab),
            other => Err(TemplateError::FormatError {
                format: other.to_string(),
            }),
        }
    }
}

impl CaseStyle {
    /// Convert `value` to this style.
    #[must_use]
    pub fn apply(self, value: &str) -> String {
        let words = split_words(value);
        match self {
            Self::Pascal => words.iter().map(|w| capitalize(w)).collect(),
            Self::Camel => {
                let pascal: String = words.iter().map(|w| capitalize(w)).collect();
                let mut chars = pascal.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_lowercase().chain(chars).collect()
                })
            }
            Self::Snake => join_lower(&words, "_"),
            Self::Kebab => join_lower(&words, "-"),
        }
    }
}

/// Split on every run of non-alphanumeric characters. Empty words are dropped.
#[must_use]
pub fn split_words(value: &str) -> Vec<&str> {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

fn join_lower(words: &[&str], separator: &str) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Replace every placeholder key in `raw`, honoring `!style` suffixes.
///
/// Keys are applied in order; each key is one pass over the text.
///
/// # Errors
///
/// Returns [`TemplateError::FormatError`] for an unknown style suffix.
pub fn render(raw: &str, placeholders: &[(&str, &str)]) -> SdResult<String> {
    let mut content = raw.to_string();

    for (key, value) in placeholders {
        let pattern = Regex::new(&format!(r"{}(?:!(\w+))?", regex::escape(key)))
            .map_err(|e| SdError::Other(e.to_string().into_boxed_str()))?;

        let mut rendered = String::with_capacity(content.len());
        let mut last = 0;
        for caps in pattern.captures_iter(&content) {
            let Some(whole) = caps.get(0) else { continue };
            rendered.push_str(&content[last..whole.start()]);
            match caps.get(1) {
                Some(style) => {
                    let style: CaseStyle = style.as_str().parse()?;
                    rendered.push_str(&style.apply(value));
                }
                None => rendered.push_str(value),
            }
            last = whole.end();
        }
        rendered.push_str(&content[last..]);
        content = rendered;
    }

    Ok(content)
}

/// Render a file in place.
///
/// The file is read completely before anything is written; a render error
/// leaves it untouched.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or a
/// [`TemplateError::FormatError`] from [`render`].
pub async fn render_file(path: &Path, placeholders: &[(&str, &str)]) -> Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read template {}", path.display()))?;

    let rendered = render(&raw, placeholders)?;

    tokio::fs::write(path, rendered)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
