// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::assets::fetch_prefabs;
use super::graph::{BuiltProject, combined_identity, resolve_dependencies};
use super::release::{release, release_marker};
use super::{BuildFlags, ProjectBuilder};
use crate::config::UserConfig;
use crate::error::{BuildError, ConfigError, ProjectError, SdError};
use crate::project::{Fingerprint, ProjectDescriptor};
use crate::tools::test_utils::run_with_logs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn project(root: &Path, manifest: &str) -> PathBuf {
    write(&root.join("sdutils.json"), manifest);
    root.to_path_buf()
}

fn builder(config: UserConfig) -> ProjectBuilder {
    ProjectBuilder::new(Arc::new(config))
}

fn sd_error(err: &anyhow::Error) -> &SdError {
    err.downcast_ref::<SdError>().expect("expected a typed error")
}

fn archive_names(archive: &Path) -> Vec<String> {
    let file = std::fs::File::open(archive).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn read_entry(archive: &Path, name: &str) -> String {
    use std::io::Read;
    let file = std::fs::File::open(archive).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let mut content = String::new();
    zip.by_name(name).unwrap().read_to_string(&mut content).unwrap();
    content
}

/// A mod with a nested config folder, a dll and some unrelated files.
fn sample_mod(root: &Path) -> ProjectDescriptor {
    project(
        root,
        r#"{"name": "core", "include": ["Data/Config", "ModInfo.xml", "*.dll"]}"#,
    );
    write(&root.join("Data/Config/items.xml"), "<items />");
    write(&root.join("Data/Config/blocks/a.xml"), "<block />");
    write(&root.join("ModInfo.xml"), "<ModInfo />");
    write(&root.join("core.dll"), "dll");
    write(&root.join("notes.md"), "not shipped");
    ProjectDescriptor::load(root).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn test_build_stages_and_packs() {
    let temp = tempfile::tempdir().unwrap();
    let project = sample_mod(temp.path());

    let archive = builder(UserConfig::default())
        .build(&project, BuildFlags::QUIET)
        .await
        .unwrap();

    assert_eq!(archive, project.archive_path());
    insta::assert_debug_snapshot!(archive_names(&archive), @r#"
    [
        "Config/",
        "Config/blocks/",
        "Config/blocks/a.xml",
        "Config/items.xml",
        "ModInfo.xml",
        "core.dll",
        "version.txt",
    ]
    "#);
    assert_eq!(read_entry(&archive, "version.txt"), "unversioned");

    // Without CLEAN the staging directory stays for inspection.
    assert!(project.staging_dir().join("Config/items.xml").is_file());
}

#[tokio::test(flavor = "current_thread")]
async fn test_build_clean_removes_staging() {
    let temp = tempfile::tempdir().unwrap();
    let project = sample_mod(temp.path());

    builder(UserConfig::default())
        .build(&project, BuildFlags::CLEAN | BuildFlags::QUIET)
        .await
        .unwrap();

    assert!(project.archive_path().is_file());
    assert!(!project.staging_dir().exists());
}

#[tokio::test(flavor = "current_thread")]
async fn test_build_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let project = sample_mod(temp.path());
    let builder = builder(UserConfig::default());

    // Leftovers from an earlier run are discarded.
    write(&project.staging_dir().join("stale.txt"), "old");

    let first = builder.build(&project, BuildFlags::QUIET).await.unwrap();
    let first = std::fs::read(first).unwrap();
    let second = builder.build(&project, BuildFlags::QUIET).await.unwrap();

    assert_eq!(first, std::fs::read(second).unwrap());
    assert!(!project.staging_dir().join("stale.txt").exists());
}

#[tokio::test(flavor = "current_thread")]
async fn test_build_warns_on_empty_include() {
    let temp = tempfile::tempdir().unwrap();
    project(temp.path(), r#"{"name": "core", "include": ["Missing/*", "ModInfo.xml"]}"#);
    write(&temp.path().join("ModInfo.xml"), "<ModInfo />");
    let project = ProjectDescriptor::load(temp.path()).unwrap();
    let builder = builder(UserConfig::default());

    let (archive, logs) = run_with_logs(|| builder.build(&project, BuildFlags::QUIET))
        .await
        .unwrap();

    assert!(logs.contains("include matched nothing"), "{logs}");
    assert!(logs.contains("Missing/*"), "{logs}");
    assert_eq!(archive_names(&archive), ["ModInfo.xml", "version.txt"]);
}

#[tokio::test(flavor = "current_thread")]
async fn test_build_flattens_every_matched_directory() {
    let temp = tempfile::tempdir().unwrap();
    project(temp.path(), r#"{"name": "core", "include": ["Scripts/**"]}"#);
    write(&temp.path().join("Scripts/a.cs"), "class A {}");
    write(&temp.path().join("Scripts/sub/b.cs"), "class B {}");
    let project = ProjectDescriptor::load(temp.path()).unwrap();

    let archive = builder(UserConfig::default())
        .build(&project, BuildFlags::QUIET)
        .await
        .unwrap();

    insta::assert_debug_snapshot!(archive_names(&archive), @r#"
    [
        "Scripts/",
        "Scripts/a.cs",
        "Scripts/sub/",
        "Scripts/sub/b.cs",
        "sub/",
        "sub/b.cs",
        "version.txt",
    ]
    "#);
    assert_eq!(read_entry(&archive, "sub/b.cs"), "class B {}");
}

#[cfg(unix)]
#[tokio::test(flavor = "current_thread")]
async fn test_build_compile_failure_aborts() {
    let temp = tempfile::tempdir().unwrap();
    project(temp.path(), r#"{"name": "core", "csproj": "core.csproj"}"#);
    write(&temp.path().join("core.csproj"), "<Project />");
    let project = ProjectDescriptor::load(temp.path()).unwrap();

    let config = UserConfig {
        compiler: "false".to_string(),
        ..UserConfig::default()
    };
    let err = builder(config)
        .build(&project, BuildFlags::QUIET)
        .await
        .unwrap_err();

    assert!(matches!(
        sd_error(&err).as_build(),
        Some(BuildError::CompileFailed { project, .. }) if project == "core"
    ));
    assert!(!project.archive_path().exists());
}

#[tokio::test(flavor = "current_thread")]
async fn test_fetch_prefabs() {
    let temp = tempfile::tempdir().unwrap();
    let library = temp.path().join("library");
    write(&library.join("trader_bob/trader_bob.tts"), "bob");
    write(&library.join("trader_hugh.xml"), "hugh");
    write(&library.join("house_01/house.tts"), "house");

    let root = temp.path().join("core");
    project(&root, r#"{"name": "core", "prefabs": ["trader_", "castle_"]}"#);
    write(&root.join("Prefabs/old.tts"), "stale");
    let project = ProjectDescriptor::load(&root).unwrap();

    let config = UserConfig {
        path_prefabs: Some(library),
        ..UserConfig::default()
    };
    let (count, logs) = run_with_logs(|| fetch_prefabs(&project, &config))
        .await
        .unwrap();

    assert_eq!(count, 2);
    assert!(logs.contains("castle_"), "{logs}");
    let prefabs = project.prefabs_dir();
    assert!(prefabs.join("trader_bob/trader_bob.tts").is_file());
    assert!(prefabs.join("trader_hugh.xml").is_file());
    assert!(!prefabs.join("house_01").exists());
    assert!(!prefabs.join("old.tts").exists());
}

#[tokio::test(flavor = "current_thread")]
async fn test_fetch_prefabs_requires_library() {
    let temp = tempfile::tempdir().unwrap();
    project(temp.path(), r#"{"name": "core", "prefabs": ["trader_"]}"#);
    let project = ProjectDescriptor::load(temp.path()).unwrap();

    let err = fetch_prefabs(&project, &UserConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        sd_error(&err).as_config(),
        Some(ConfigError::ConfigurationMissing { key }) if key == "PATH_PREFABS"
    ));
}

#[test]
fn test_combined_identity_ignores_order() {
    let a = Fingerprint::new(Some("aaaa".to_string()));
    let b = Fingerprint::new(Some("bbbb".to_string()));
    let none = Fingerprint::default();

    let forward = combined_identity([&a, &b, &none]);
    let backward = combined_identity([&none, &b, &a]);

    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 64);
    assert!(forward.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_ne!(forward, combined_identity([&a, &b]));
}

#[test]
fn test_combined_identity_known_value() {
    // sha256("abc")
    let parts = [
        Fingerprint::new(Some("c".to_string())),
        Fingerprint::new(Some("a".to_string())),
        Fingerprint::new(Some("b".to_string())),
    ];
    insta::assert_snapshot!(
        combined_identity(&parts),
        @"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn test_release_marker_layout() {
    let built = |name: &str, commit: Option<&str>| BuiltProject {
        name: name.to_string(),
        archive: PathBuf::from(format!("{name}.zip")),
        identity: Fingerprint::new(commit.map(str::to_string)),
    };
    let root = built("core", Some("1111"));
    let deps = [built("lib", Some("2222")), built("ui", None)];

    insta::assert_snapshot!(release_marker("abcd", &root, &deps), @r"
    version=abcd
    core=1111
    lib=2222
    ui=unversioned
    ");
}

#[test]
fn test_resolve_dependencies_post_order() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path();
    project(&base.join("shared"), r#"{"name": "shared"}"#);
    project(&base.join("lib"), r#"{"name": "lib", "dependencies": ["../shared"]}"#);
    project(&base.join("ui"), r#"{"name": "ui", "dependencies": ["../shared"]}"#);
    project(
        &base.join("core"),
        r#"{"name": "core", "dependencies": ["../lib", "../ui", "../lib"]}"#,
    );

    let core = ProjectDescriptor::load(&base.join("core")).unwrap();
    let order: Vec<String> = resolve_dependencies(&core)
        .unwrap()
        .iter()
        .map(|p| p.name().to_string())
        .collect();

    assert_eq!(order, ["shared", "lib", "ui"]);
}

#[test]
fn test_resolve_dependencies_cycle() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path();
    project(&base.join("a"), r#"{"name": "a", "dependencies": ["../b"]}"#);
    project(&base.join("b"), r#"{"name": "b", "dependencies": ["../a"]}"#);

    let a = ProjectDescriptor::load(&base.join("a")).unwrap();
    let err = resolve_dependencies(&a).unwrap_err();

    let Some(ProjectError::DependencyCycle { chain }) = err.as_project() else {
        panic!("unexpected error {err}");
    };
    assert_eq!(chain, "a -> b -> a");
}

#[test]
fn test_resolve_dependencies_duplicate_name() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path();
    project(&base.join("one"), r#"{"name": "lib"}"#);
    project(&base.join("two"), r#"{"name": "lib"}"#);
    project(
        &base.join("core"),
        r#"{"name": "core", "dependencies": ["../one", "../two"]}"#,
    );

    let core = ProjectDescriptor::load(&base.join("core")).unwrap();
    let err = resolve_dependencies(&core).unwrap_err();
    assert!(matches!(
        err.as_project(),
        Some(ProjectError::DuplicateProjectName { name, .. }) if name == "lib"
    ));
}

#[tokio::test(flavor = "current_thread")]
async fn test_release_bundles_dependencies() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path();
    project(&base.join("lib"), r#"{"name": "lib", "include": ["lib.dll"]}"#);
    write(&base.join("lib/lib.dll"), "lib");
    project(
        &base.join("core"),
        r#"{"name": "core", "dependencies": ["../lib"], "include": ["Scripts/**"]}"#,
    );
    write(&base.join("core/Scripts/main.cs"), "class Main {}");

    let core = ProjectDescriptor::load(&base.join("core")).unwrap();
    let summary = release(&builder(UserConfig::default()), &core)
        .await
        .unwrap();

    let short = summary.short_identity();
    assert_eq!(
        summary.archive,
        core.root_dir().join(format!("core-release-{short}.zip"))
    );
    assert_eq!(summary.combined_identity.len(), 64);

    let names = archive_names(&summary.archive);
    assert!(names.contains(&"core/Scripts/main.cs".to_string()), "{names:?}");
    assert!(names.contains(&"lib/lib.dll".to_string()), "{names:?}");
    assert!(names.contains(&"lib/version.txt".to_string()), "{names:?}");

    let marker = read_entry(&summary.archive, "core/version.txt");
    let expected = format!(
        "version={}\ncore=unversioned\nlib=unversioned\n",
        summary.combined_identity
    );
    assert_eq!(marker, expected);
}

#[tokio::test(flavor = "current_thread")]
async fn test_release_logs_progress() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path();
    project(&base.join("lib"), r#"{"name": "lib"}"#);
    project(&base.join("core"), r#"{"name": "core", "dependencies": ["../lib"]}"#);
    let core = ProjectDescriptor::load(&base.join("core")).unwrap();
    let lib = ProjectDescriptor::load(&base.join("lib")).unwrap();
    let builder = builder(UserConfig::default());

    let (summary, logs) = run_with_logs(|| release(&builder, &core)).await.unwrap();

    let dependency_line = format!("build {} 'lib' 0", lib.identity().short());
    assert!(logs.contains(&dependency_line), "{logs}");
    let done_line = format!("build {} done in ", summary.short_identity());
    assert!(logs.contains(&done_line), "{logs}");
    assert!(logs.find(&dependency_line) < logs.find(&done_line));
}

#[tokio::test(flavor = "current_thread")]
async fn test_release_missing_dependency_writes_no_bundle() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path();
    project(&base.join("lib"), r#"{"name": "lib"}"#);
    project(&base.join("core"), r#"{"name": "core", "dependencies": ["../lib"]}"#);
    let core = ProjectDescriptor::load(&base.join("core")).unwrap();

    std::fs::remove_dir_all(base.join("lib")).unwrap();

    let err = release(&builder(UserConfig::default()), &core)
        .await
        .unwrap_err();
    assert!(matches!(
        sd_error(&err).as_project(),
        Some(ProjectError::DependencyManifestNotFound { project, .. }) if project == "core"
    ));

    let releases = std::fs::read_dir(core.root_dir())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains("-release-"))
        .count();
    assert_eq!(releases, 0);
}
