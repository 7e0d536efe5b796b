// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{PackerTool, archive_dir};
use crate::config::UserConfig;
use crate::error::{BuildError, SdError};
use crate::tools::{Tool, ToolContext};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

fn entry_names(archive: &Path) -> Vec<String> {
    let file = std::fs::File::open(archive).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn populate(dir: &Path) {
    std::fs::create_dir_all(dir.join("Config")).unwrap();
    std::fs::write(dir.join("Config/items.xml"), "<items />").unwrap();
    std::fs::write(dir.join("ModInfo.xml"), "<xml />").unwrap();
    std::fs::write(dir.join("version.txt"), "abc").unwrap();
}

#[test]
fn test_packer_tool_creation() {
    let tool = PackerTool::new();
    assert_eq!(tool.name(), "packer");
    assert!(tool.archive.is_none());
    assert!(tool.base_dir.is_none());
}

#[test]
fn test_packer_tool_missing_archive() {
    let tool = PackerTool::new().base_dir("source");
    assert!(tool.archive_required().is_err());
    assert_eq!(tool.base_dir_required().unwrap().to_str(), Some("source"));
}

#[test]
fn test_packer_tool_missing_base_dir() {
    let tool = PackerTool::new().archive("output.zip");
    assert!(tool.base_dir_required().is_err());
}

#[test]
fn test_archive_dir_relative_entries() {
    let temp = tempfile::tempdir().unwrap();
    let staging = temp.path().join("build");
    populate(&staging);

    let archive = temp.path().join("core.zip");
    let count = archive_dir(&staging, &archive).unwrap();

    assert_eq!(count, 4);
    insta::assert_debug_snapshot!(entry_names(&archive), @r#"
    [
        "Config/",
        "Config/items.xml",
        "ModInfo.xml",
        "version.txt",
    ]
    "#);

    let file = std::fs::File::open(&archive).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let mut content = String::new();
    zip.by_name("Config/items.xml")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "<items />");
}

#[test]
fn test_archive_dir_is_reproducible() {
    let temp = tempfile::tempdir().unwrap();
    let staging = temp.path().join("build");
    populate(&staging);

    let first = temp.path().join("a.zip");
    let second = temp.path().join("b.zip");
    archive_dir(&staging, &first).unwrap();
    archive_dir(&staging, &second).unwrap();

    assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
}

#[test]
fn test_archive_dir_missing_source_leaves_no_archive() {
    let temp = tempfile::tempdir().unwrap();
    let archive = temp.path().join("core.zip");

    let err = archive_dir(&temp.path().join("missing"), &archive).unwrap_err();
    let err = err.downcast_ref::<SdError>().unwrap();
    assert!(matches!(err.as_build(), Some(BuildError::Archive { .. })));
    assert!(!archive.exists());
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn test_packer_tool_run() {
    let temp = tempfile::tempdir().unwrap();
    let staging = temp.path().join("build");
    populate(&staging);
    let archive = temp.path().join("out").join("core.zip");

    let ctx = ToolContext::new(Arc::new(UserConfig::default()), true);
    PackerTool::new()
        .archive(&archive)
        .base_dir(&staging)
        .run(&ctx)
        .await
        .unwrap();

    assert!(archive.is_file());
}
