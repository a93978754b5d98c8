use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const LEGACY_POST: &str = "# Launch notes\n\nWe shipped it.\n- faster\n- smaller\n> worth the wait";

#[test]
fn legacy_text_renders_to_html() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.txt");
    fs::write(&input_path, LEGACY_POST).unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("convert")
        .arg(input_path.as_os_str())
        .arg("--to")
        .arg("html");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<div class="block-renderer article-content">"#,
        ))
        .stdout(predicate::str::contains(
            r#"<h1 class="post-heading post-heading-1">Launch notes</h1>"#,
        ))
        .stdout(predicate::str::contains(r#"<ul class="post-list">"#))
        .stdout(predicate::str::contains(
            r#"<blockquote class="post-blockquote">"#,
        ));
}

#[test]
fn convert_is_the_default_command() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.txt");
    fs::write(&input_path, "Hello there").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["type"], "doc");
    assert_eq!(parsed["content"][0]["content"][0]["text"], "Hello there");
}

#[test]
fn text_file_holding_json_is_detected_as_structured() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.txt");
    fs::write(
        &input_path,
        r##"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"# not a heading"}]}]}"##,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("html");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<p class="post-paragraph"># not a heading</p>"#,
        ));
}

#[test]
fn unknown_extension_falls_back_to_content_detection() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.body");
    fs::write(&input_path, "FIRST SECTION\nbody").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("text");

    cmd.assert()
        .success()
        .stdout(predicate::eq("FIRST SECTION\n\nbody"));
}

#[test]
fn output_flag_writes_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.txt");
    let output_path = dir.path().join("post.json");
    fs::write(&input_path, "## Subtitle").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("json")
        .arg("-o")
        .arg(output_path.as_os_str());
    cmd.assert().success().stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&output_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["content"][0]["type"], "heading");
    assert_eq!(parsed["content"][0]["attrs"]["level"], 2);
}

#[test]
fn standalone_extra_wraps_a_full_page() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.txt");
    fs::write(&input_path, "Body").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("html")
        .arg("--extra-standalone")
        .arg("--extra-title")
        .arg("Field notes");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("<title>Field notes</title>"))
        .stdout(predicate::str::contains(".block-renderer"));
}

#[test]
fn unknown_html_option_is_rejected() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.txt");
    fs::write(&input_path, "Body").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg(input_path.as_os_str())
        .arg("--to")
        .arg("html")
        .arg("--extra-theme")
        .arg("dark");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Serialization error"))
        .stderr(predicate::str::contains("theme"));
}

#[test]
fn unknown_target_format_fails() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("post.txt");
    fs::write(&input_path, "Body").unwrap();

    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg(input_path.as_os_str()).arg("--to").arg("pdf");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("pdf"));
}

#[test]
fn missing_input_file_fails() {
    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("convert")
        .arg("does-not-exist.txt")
        .arg("--to")
        .arg("html");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error reading file"));
}

#[test]
fn generate_css_prints_baseline_styles() {
    let mut cmd = cargo_bin_cmd!("quire");
    cmd.arg("generate-css");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".block-renderer"))
        .stdout(predicate::str::contains(".post-inline-code"));
}
