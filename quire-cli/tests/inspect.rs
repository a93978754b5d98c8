use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn write_post(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("post.txt");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn inspect_defaults_to_treeviz() {
    let dir = tempdir().unwrap();
    let path = write_post(&dir, "# Title\n\n1. one\n2. two");

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("inspect").arg(path.as_os_str());

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("⧉ Document (2 blocks)"))
        .stdout(predicate::str::contains("h1 Title"))
        .stdout(predicate::str::contains("2 items"));
}

#[test]
fn inspect_line_classes() {
    let dir = tempdir().unwrap();
    let path = write_post(&dir, "INTRO\n* point\n\"quoted\"");

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("inspect").arg(path.as_os_str()).arg("line-classes");

    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let classes: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["class"].as_str().unwrap())
        .collect();
    assert_eq!(classes, vec!["heading", "listitem", "blockquote"]);
}

#[test]
fn inspect_max_label_extra_truncates() {
    let dir = tempdir().unwrap();
    let path = write_post(&dir, "A paragraph long enough to be cut");

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("inspect")
        .arg(path.as_os_str())
        .arg("--extra-max-label")
        .arg("6");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("A par…"))
        .stdout(predicate::str::contains("long enough").not());
}

#[test]
fn inspect_stats_uses_configured_excerpt_length() {
    let dir = tempdir().unwrap();
    let path = write_post(&dir, "Morning pages are a habit worth keeping");
    let config_path = dir.path().join("quire.toml");
    fs::write(&config_path, "[meta]\nexcerpt_length = 7\n").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("inspect")
        .arg(path.as_os_str())
        .arg("stats")
        .arg("--config")
        .arg(config_path.as_os_str());

    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["excerpt"], "Morning...");
    assert_eq!(parsed["words"], 7);
    assert_eq!(parsed["blocks"], 1);
}

#[test]
fn inspect_rejects_unknown_transform() {
    let dir = tempdir().unwrap();
    let path = write_post(&dir, "Body");

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("inspect").arg(path.as_os_str()).arg("ast-tag");

    cmd.assert().failure();
}

#[test]
fn list_transforms_names_every_transform() {
    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("--list-transforms");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("line-classes"))
        .stdout(predicate::str::contains("doc-treeviz"))
        .stdout(predicate::str::contains("treeviz"))
        .stdout(predicate::str::contains("html"));
}
