// sdutils-rs: 7 Days to Die Modding Utilities
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{BuildError, ConfigError, ProjectError, SdError, SdResult, TemplateError};

#[test]
fn test_project_error_display() {
    let err = ProjectError::ManifestInvalid {
        path: "mods/core/sdutils.json".to_string(),
        message: "missing field `name`".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid manifest 'mods/core/sdutils.json': missing field `name`"
    );
}

#[test]
fn test_wrapped_error_display() {
    let err = SdError::from(BuildError::CompileFailed {
        project: "core".to_string(),
        code: 1,
    });
    insta::assert_snapshot!(
        err.to_string(),
        @"build error: build failed: core (compiler exited with code 1)"
    );

    let err = SdError::from(TemplateError::FormatError {
        format: "upper".to_string(),
    });
    insta::assert_snapshot!(err.to_string(), @"template error: invalid format: '!upper'");
}

#[test]
fn test_accessors_select_matching_variant() {
    let err = SdError::from(ConfigError::ConfigurationMissing {
        key: "PATH_7D2D_SERVER".to_string(),
    });
    assert!(err.as_config().is_some());
    assert!(err.as_project().is_none());
    assert!(err.as_build().is_none());
}

#[test]
fn test_typed_error_survives_anyhow_context() {
    use anyhow::Context;

    let result: SdResult<()> = Err(ProjectError::ManifestNotFound {
        path: "sdutils.json".to_string(),
    }
    .into());
    let err = result.context("loading project").unwrap_err();

    let sd = err
        .downcast_ref::<SdError>()
        .expect("SdError should be reachable through context");
    assert!(matches!(
        sd.as_project(),
        Some(ProjectError::ManifestNotFound { .. })
    ));
}

#[test]
fn test_sd_error_size() {
    // Box<str> variants (Bailed, Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<SdError>();
    assert!(size <= 24, "SdError is {size} bytes, expected <= 24");
}

#[test]
fn test_sd_result_size() {
    let size = std::mem::size_of::<SdResult<()>>();
    assert!(size <= 24, "SdResult<()> is {size} bytes, expected <= 24");
}
