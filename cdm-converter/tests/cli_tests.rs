use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const SAMPLE_EVENT: &str = include_str!("../../resources/sample-event.json");

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..")
}

#[test]
fn missing_flags_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let mut cmd = assert_cmd::cargo_bin_cmd!("cdm_daml_json_converter");
    let assert = cmd.current_dir(dir.path()).assert().failure().code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("--input"), "unexpected stderr: {stderr:?}");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_output_flag_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("event.json");
    fs::write(&input, SAMPLE_EVENT).unwrap();
    let mut cmd = assert_cmd::cargo_bin_cmd!("cdm_daml_json_converter");
    let assert = cmd.arg("-i").arg(&input).assert().failure().code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("--output"), "unexpected stderr: {stderr:?}");
}

#[test]
fn converts_with_default_metadata_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("event.json");
    let output = dir.path().join("daml.json");
    fs::write(&input, SAMPLE_EVENT).unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("cdm_daml_json_converter");
    cmd.current_dir(repo_root())
        .env("RUST_LOG", "warn")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("{\n    \"meta\": {\n        \"globalKey\": \""));
    let written: Value = serde_json::from_str(&text).unwrap();
    assert_ne!(written["meta"]["globalKey"], json!("f6f5b1a2"));
    assert_eq!(written["action"], json!("NEW"));
}

#[test]
fn missing_input_exits_non_zero_without_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("daml.json");
    let mut cmd = assert_cmd::cargo_bin_cmd!("cdm_daml_json_converter");
    let assert = cmd
        .current_dir(repo_root())
        .arg("-i")
        .arg(dir.path().join("absent.json"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("failed to read"), "unexpected stderr: {stderr:?}");
    assert!(!output.exists());
}

#[test]
fn invalid_json_exits_non_zero_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("event.json");
    let output = dir.path().join("daml.json");
    fs::write(&input, "{ not json").unwrap();
    let mut cmd = assert_cmd::cargo_bin_cmd!("cdm_daml_json_converter");
    cmd.current_dir(repo_root())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1);
    assert!(!output.exists());
}

#[test]
fn unwritable_output_exits_non_zero_without_partial_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("event.json");
    let output = dir.path().join("missing-dir").join("daml.json");
    fs::write(&input, SAMPLE_EVENT).unwrap();
    let mut cmd = assert_cmd::cargo_bin_cmd!("cdm_daml_json_converter");
    let assert = cmd
        .current_dir(repo_root())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("failed to write"), "unexpected stderr: {stderr:?}");
    assert!(!output.exists());
}

#[test]
fn reverse_tool_restores_cdm_shape() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("event.json");
    let daml = dir.path().join("daml.json");
    let cdm = dir.path().join("cdm.json");
    fs::write(&input, SAMPLE_EVENT).unwrap();
    let metadata = repo_root().join("resources").join("CDM.json");

    assert_cmd::cargo_bin_cmd!("cdm_daml_json_converter")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&daml)
        .arg("--metadata")
        .arg(&metadata)
        .assert()
        .success();
    assert_cmd::cargo_bin_cmd!("daml_cdm_json_converter")
        .arg("-i")
        .arg(&daml)
        .arg("-o")
        .arg(&cdm)
        .arg("--metadata")
        .arg(&metadata)
        .assert()
        .success();

    let restored: Value = serde_json::from_str(&fs::read_to_string(&cdm).unwrap()).unwrap();
    let cash = &restored["primitive"]["transfer"][0]["cashTransfer"][0];
    assert_eq!(cash["amount"]["amount"], json!(1000.5));
    assert_eq!(cash["type"], json!("UPFRONT_FEE"));
    assert!(restored.get("rosettaKey").is_none());
}

#[test]
fn missing_key_flag_selects_the_policy() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("event.json");
    let output = dir.path().join("daml.json");
    let mut event: Value = serde_json::from_str(SAMPLE_EVENT).unwrap();
    event.as_object_mut().unwrap().remove("meta");
    fs::write(&input, event.to_string()).unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("cdm_daml_json_converter");
    let assert = cmd
        .current_dir(repo_root())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("`meta`"), "unexpected stderr: {stderr:?}");
    assert!(!output.exists());

    assert_cmd::cargo_bin_cmd!("cdm_daml_json_converter")
        .current_dir(repo_root())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--missing-key")
        .arg("insert")
        .assert()
        .success();
    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(written["meta"]["globalKey"].is_string());
}
