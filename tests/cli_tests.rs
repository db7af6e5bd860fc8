//! Integration tests for the bindforge CLI
//!
//! These run the actual binary and verify its three entry paths: usage
//! guidance, example generation, and running a config file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test
fn bindforge_cmd() -> Command {
    Command::cargo_bin("bindforge").unwrap()
}

#[test]
fn test_no_args_prints_usage_and_touches_nothing() {
    let temp_dir = TempDir::new().unwrap();

    bindforge_cmd()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration file"))
        .stdout(predicate::str::contains("bindforge example"));

    // Usage guidance must not create or modify any file.
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_help_flag() {
    bindforge_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Configuration-driven generator driver",
        ));
}

#[test]
fn test_example_writes_three_files() {
    let temp_dir = TempDir::new().unwrap();

    bindforge_cmd()
        .current_dir(temp_dir.path())
        .arg("example")
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing example config"))
        .stdout(predicate::str::contains("generator.json"));

    assert!(temp_dir.path().join("generator.json").exists());
    assert!(temp_dir.path().join("common_typemap.json").exists());
    assert!(temp_dir.path().join("build.props").exists());
}

#[test]
fn test_example_config_is_minimal_json() {
    let temp_dir = TempDir::new().unwrap();

    bindforge_cmd()
        .current_dir(temp_dir.path())
        .arg("example")
        .assert()
        .success();

    let text = fs::read_to_string(temp_dir.path().join("generator.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(json["Tasks"].is_array());

    // Default-valued fields are omitted from the persisted form.
    assert!(!text.contains("\"Mode\""));
    assert!(text.contains("\"$include.commonTypeMap\""));
}

#[test]
fn test_run_example_config_reaches_the_engine() {
    let temp_dir = TempDir::new().unwrap();

    bindforge_cmd()
        .current_dir(temp_dir.path())
        .arg("example")
        .assert()
        .success();

    // The config loads, resolves (type map include and all), and fails
    // only at the engine boundary, which is not linked into this build.
    bindforge_cmd()
        .current_dir(temp_dir.path())
        .arg("generator.json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Running generator"))
        .stderr(predicate::str::contains("conversion engine failed"))
        .stderr(predicate::str::contains("clang"));
}

#[test]
fn test_config_path_with_unescaped_spaces() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join("my configs");
    fs::create_dir_all(&config_dir).unwrap();

    bindforge_cmd()
        .current_dir(&config_dir)
        .arg("example")
        .assert()
        .success();

    // "my configs/generator.json" arrives as two arguments.
    bindforge_cmd()
        .current_dir(temp_dir.path())
        .args(["my", "configs/generator.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Running generator"))
        .stderr(predicate::str::contains("conversion engine failed"));
}

#[test]
fn test_malformed_config_fails_with_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("broken.json");
    fs::write(&config_file, "{ not json").unwrap();

    bindforge_cmd()
        .arg(config_file.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config parse error"))
        .stderr(predicate::str::contains("Fix:"));
}

#[test]
fn test_missing_sources_fails_with_schema_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("generator.json");
    fs::write(&config_file, r#"{"Tasks":[{"Name":"gl"}]}"#).unwrap();

    bindforge_cmd()
        .arg(config_file.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config schema error"));
}

#[test]
fn test_incomplete_name_container_fails_before_dispatch() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("generator.json");
    fs::write(
        &config_file,
        r#"{
            "Tasks": [{
                "Name": "gl",
                "Sources": ["gl.h"],
                "NameContainer": {
                    "ClassName": "GLLibraryNameContainer",
                    "Linux": "libGL.so.1",
                    "MacOS": "libGL.dylib"
                }
            }]
        }"#,
    )
    .unwrap();

    bindforge_cmd()
        .arg(config_file.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no native library name"));
}

#[test]
fn test_narrowed_platforms_pass_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("generator.json");
    fs::write(
        &config_file,
        r#"{
            "Tasks": [{
                "Name": "gl",
                "Sources": ["gl.h"],
                "Platforms": ["Linux", "MacOS"],
                "NameContainer": {
                    "ClassName": "GLLibraryNameContainer",
                    "Linux": "libGL.so.1",
                    "MacOS": "libGL.dylib"
                }
            }]
        }"#,
    )
    .unwrap();

    // Resolution succeeds; only the unlinked engine stops the run.
    bindforge_cmd()
        .arg(config_file.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("conversion engine failed"));
}

#[test]
fn test_unresolved_type_map_include_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("generator.json");
    fs::write(
        &config_file,
        r#"{
            "Tasks": [{
                "Name": "gl",
                "Sources": ["gl.h"],
                "TypeMaps": [{ "$include.nowhere": "" }]
            }]
        }"#,
    )
    .unwrap();

    bindforge_cmd()
        .arg(config_file.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("'nowhere'"));
}

#[test]
fn test_cyclic_type_map_include_fails() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("a.json"),
        r#"{ "$include.b": "" }"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("b.json"),
        r#"{ "$include.a": "" }"#,
    )
    .unwrap();

    let config_file = temp_dir.path().join("generator.json");
    fs::write(
        &config_file,
        r#"{
            "Tasks": [{
                "Name": "gl",
                "Sources": ["gl.h"],
                "TypeMaps": [{ "$include.a": "a.json" }]
            }]
        }"#,
    )
    .unwrap();

    bindforge_cmd()
        .arg(config_file.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cyclic type map include"));
}
