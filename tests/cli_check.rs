//! Integration tests for `bridgewright headers` and `bridgewright check`

mod common;

use common::{file_names, TestProject, HEADERS_ONLY_CONFIG, NATIVE_BRIDGE, NATIVE_PARSER};

fn project() -> TestProject {
    TestProject::builder()
        .with_config(HEADERS_ONLY_CONFIG)
        .with_source("net/swofty/nativebridge/NativeBridge.java", NATIVE_BRIDGE)
        .with_source("net/swofty/nativebridge/NativeParser.java", NATIVE_PARSER)
        .build()
}

#[test]
fn check_before_generation_reports_missing_headers() {
    let project = project();

    let result = project.run(&["check"]);

    assert_eq!(result.exit_code, 1);
    assert!(result
        .stdout
        .contains("  missing  net_swofty_nativebridge_NativeBridge.h\n"));
    assert!(result.stdout.contains("2 header(s) out of date"));
    assert!(!project.path("native/include").exists());
}

#[test]
fn headers_then_check_is_clean() {
    let project = project();

    let headers = project.run(&["headers"]);
    assert!(headers.is_success(), "headers failed: {}", headers.stderr);
    assert_eq!(
        file_names(&project.path("native/include")),
        vec![
            "net_swofty_nativebridge_NativeBridge.h",
            "net_swofty_nativebridge_NativeParser.h",
        ]
    );
    assert_file_contains!(
        project,
        "native/include/net_swofty_nativebridge_NativeParser.h",
        "JNIEXPORT jobjectArray JNICALL Java_net_swofty_nativebridge_NativeParser_parseSwoftLangToCommands\n"
    );

    let check = project.run(&["check"]);
    assert!(check.is_success(), "check not clean: {}", check.stdout);
    assert!(check
        .stdout
        .contains("headers up to date (2 file(s), 3 declaration(s))"));
}

#[test]
fn headers_does_not_run_native_toolchain() {
    let project = project();

    let result = project.run(&["headers"]);

    assert!(result.is_success());
    assert!(!result.stderr.contains("configure:"));
    assert!(!project.path("native/build").exists());
    assert!(!project.path("java/src/main/resources").exists());
}

#[test]
fn check_flags_edited_header_as_stale_with_diff() {
    let project = project();
    assert!(project.run(&["headers"]).is_success());

    let path = "native/include/net_swofty_nativebridge_NativeBridge.h";
    let edited = project.read(path).replace("jstring", "jobject");
    project.write(path, &edited);

    let result = project.run(&["check", "-v"]);

    assert_eq!(result.exit_code, 1);
    assert!(result
        .stdout
        .contains("  stale    net_swofty_nativebridge_NativeBridge.h (+1 -1)\n"));
    assert!(result.stdout.contains("+  (JNIEnv *, jclass, jstring);"));
}

#[test]
fn removed_declaration_leaves_orphan_until_regenerated() {
    let project = project();
    assert!(project.run(&["headers"]).is_success());

    project.remove("java/src/main/java/net/swofty/nativebridge/NativeParser.java");

    let check = project.run(&["check", "--json"]);
    assert_eq!(check.exit_code, 1);
    let json = check.json();
    assert_eq!(json["clean"], false);
    let orphan = json["headers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|h| h["file_name"] == "net_swofty_nativebridge_NativeParser.h")
        .unwrap();
    assert_eq!(orphan["status"], "orphan");

    assert!(project.run(&["headers"]).is_success());
    assert_eq!(
        file_names(&project.path("native/include")),
        vec!["net_swofty_nativebridge_NativeBridge.h"]
    );
    assert!(project.run(&["check"]).is_success());
}

#[test]
fn regeneration_is_byte_identical() {
    let project = project();
    assert!(project.run(&["headers"]).is_success());
    let first = project.read("native/include/net_swofty_nativebridge_NativeParser.h");

    assert!(project.run(&["headers"]).is_success());
    let second = project.read("native/include/net_swofty_nativebridge_NativeParser.h");

    assert_eq!(first, second);
}
