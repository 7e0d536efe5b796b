// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the build and release pipeline.
//!
//! Builds small mod trees end to end and inspects the produced archives.

use sdutils_rs::config::UserConfig;
use sdutils_rs::pipeline::graph::combined_identity;
use sdutils_rs::pipeline::release::release;
use sdutils_rs::pipeline::{BuildFlags, ProjectBuilder};
use sdutils_rs::project::ProjectDescriptor;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn builder() -> ProjectBuilder {
    ProjectBuilder::new(Arc::new(UserConfig::default()))
}

fn archive_names(archive: &Path) -> Vec<String> {
    let zip = zip::ZipArchive::new(std::fs::File::open(archive).unwrap()).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn read_entry(archive: &Path, name: &str) -> String {
    let mut zip = zip::ZipArchive::new(std::fs::File::open(archive).unwrap()).unwrap();
    let mut content = String::new();
    zip.by_name(name).unwrap().read_to_string(&mut content).unwrap();
    content
}

/// core depends on lib and ui.
fn workspace(base: &Path, deps: &str) -> ProjectDescriptor {
    write(
        &base.join("lib/sdutils.json"),
        r#"{"name": "lib", "include": ["Config"]}"#,
    );
    write(&base.join("lib/Config/items.xml"), "<items />");
    write(
        &base.join("ui/sdutils.json"),
        r#"{"name": "ui", "include": ["XUi/*.xml"]}"#,
    );
    write(&base.join("ui/XUi/windows.xml"), "<windows />");
    write(
        &base.join("core/sdutils.json"),
        &format!(r#"{{"name": "core", "dependencies": {deps}, "include": ["Scripts/**"]}}"#),
    );
    write(&base.join("core/Scripts/main.cs"), "class Main {}");
    ProjectDescriptor::load(&base.join("core")).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn release_contains_every_project() {
    let temp = tempfile::tempdir().unwrap();
    let core = workspace(temp.path(), r#"["../lib", "../ui"]"#);

    let summary = release(&builder(), &core).await.unwrap();

    let file_name = summary
        .archive
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert!(file_name.starts_with("core-release-"));
    assert_eq!(file_name.len(), "core-release-".len() + 8 + ".zip".len());

    let names = archive_names(&summary.archive);
    for expected in [
        "core/Scripts/main.cs",
        "core/version.txt",
        "lib/Config/items.xml",
        "lib/version.txt",
        "ui/XUi/windows.xml",
        "ui/version.txt",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected}: {names:?}");
    }

    let marker = read_entry(&summary.archive, "core/version.txt");
    let lines: Vec<&str> = marker.lines().collect();
    assert_eq!(lines[0], format!("version={}", summary.combined_identity));
    assert_eq!(&lines[1..], ["core=unversioned", "lib=unversioned", "ui=unversioned"]);

    // Dependency markers keep their single-project form.
    assert_eq!(read_entry(&summary.archive, "lib/version.txt"), "unversioned");
}

#[tokio::test(flavor = "current_thread")]
async fn release_identity_ignores_dependency_order() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let forward = release(&builder(), &workspace(first.path(), r#"["../lib", "../ui"]"#))
        .await
        .unwrap();
    let backward = release(&builder(), &workspace(second.path(), r#"["../ui", "../lib"]"#))
        .await
        .unwrap();

    assert_eq!(forward.combined_identity, backward.combined_identity);
    assert_eq!(
        forward.combined_identity,
        combined_identity(forward.projects.iter().map(|p| &p.identity))
    );
}

#[tokio::test(flavor = "current_thread")]
async fn build_twice_gives_identical_archives() {
    let temp = tempfile::tempdir().unwrap();
    let core = workspace(temp.path(), "[]");
    let builder = builder();

    let first = std::fs::read(builder.build(&core, BuildFlags::QUIET).await.unwrap()).unwrap();
    let second = std::fs::read(builder.build(&core, BuildFlags::QUIET).await.unwrap()).unwrap();

    assert_eq!(first, second);
}
