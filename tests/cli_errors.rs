//! Error reporting and exit codes

mod common;

use std::fs::OpenOptions;

use fs2::FileExt;

use common::{TestProject, HEADERS_ONLY_CONFIG, NATIVE_BRIDGE};

#[test]
fn unknown_config_key_warns_with_suggestion() {
    let project = TestProject::builder()
        .with_config("[scan]\npackage_prefx = \"net.swofty\"\n")
        .with_source("net/swofty/nativebridge/NativeBridge.java", NATIVE_BRIDGE)
        .build();

    let result = project.run(&["scan"]);

    assert!(result.is_success(), "scan failed: {}", result.stderr);
    assert!(result.stderr.contains("warning: unknown config key 'package_prefx'"));
    assert!(result.stderr.contains("bridgewright.toml:2"));
    assert!(result.stderr.contains("(did you mean 'package_prefix'?)"));
}

#[test]
fn malformed_config_is_fatal() {
    let project = TestProject::builder()
        .with_config("[scan\npackage_prefix = 1\n")
        .build();

    let result = project.run(&["scan"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.starts_with("error: invalid configuration in"));
}

#[test]
fn invalid_package_prefix_is_rejected() {
    let project = TestProject::builder()
        .with_config("[scan]\npackage_prefix = \"net..swofty\"\n")
        .with_source("net/swofty/nativebridge/NativeBridge.java", NATIVE_BRIDGE)
        .build();

    let result = project.run(&["headers"]);

    assert_eq!(result.exit_code, 1);
    assert_output_contains!(result, "invalid package segment");
    assert!(!project.path("native/include").exists());
}

#[test]
fn unparseable_native_declaration_names_file_and_line() {
    let project = TestProject::builder()
        .with_config(HEADERS_ONLY_CONFIG)
        .with_source(
            "net/swofty/Broken.java",
            "package net.swofty;\n\npublic class Broken {\n    public native int (String s);\n}\n",
        )
        .build();

    let result = project.run(&["headers"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("error: stage 'scan' failed"));
    assert_output_contains!(result, "Broken.java:4");
}

#[test]
fn empty_prefix_selection_fails_at_scan() {
    let project = TestProject::builder()
        .with_config(HEADERS_ONLY_CONFIG)
        .build();

    let result = project.run(&["build"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains("error: stage 'scan' failed"));
    assert_output_contains!(result, "no Java sources under");
}

#[test]
fn held_lock_reports_busy_pipeline() {
    let project = TestProject::builder()
        .with_config(HEADERS_ONLY_CONFIG)
        .with_source("net/swofty/nativebridge/NativeBridge.java", NATIVE_BRIDGE)
        .build();

    let lock = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(project.path(".bridgewright.lock"))
        .unwrap();
    lock.try_lock_exclusive().unwrap();

    let result = project.run(&["headers"]);

    assert_eq!(result.exit_code, 1);
    assert_output_contains!(result, "another bridgewright run is active");
    assert!(!project.path("native/include").exists());

    FileExt::unlock(&lock).unwrap();
    assert!(project.run(&["headers"]).is_success());
}

#[test]
fn explicit_config_path_is_used() {
    let project = TestProject::builder()
        .with_file(
            "ci/bridgewright.toml",
            "[scan]\nsource_root = \"../java/src/main/java\"\npackage_prefix = \"net.swofty\"\n",
        )
        .with_source("net/swofty/nativebridge/NativeBridge.java", NATIVE_BRIDGE)
        .build();

    let result = project.run(&["scan", "--config", "ci/bridgewright.toml"]);

    assert!(result.is_success(), "scan failed: {}", result.stderr);
    assert!(result.stdout.contains("1 native declaration(s)"));
}

#[test]
fn include_path_outside_bundle_is_rejected() {
    let project = TestProject::builder()
        .with_config(&format!(
            "{}\n[[package.include]]\nsource = \"prebuilt/evil.so\"\npath = \"../../outside/evil.so\"\n",
            HEADERS_ONLY_CONFIG
        ))
        .with_source("net/swofty/nativebridge/NativeBridge.java", NATIVE_BRIDGE)
        .with_file("prebuilt/evil.so", "so")
        .build();

    let result = project.run(&["build"]);

    assert_eq!(result.exit_code, 1);
    assert_output_contains!(result, "must be a relative path inside the resource bundle");
    assert!(!project.path("java/outside").exists());
}
