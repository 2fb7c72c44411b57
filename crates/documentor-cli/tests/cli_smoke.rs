use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;

const PAGE: &str = r#"<html xmlns="http://www.w3.org/1999/xhtml">
  <body>
    <img src="diagram.svg" width="40"/>
    <img src="photo.jpg"/>
  </body>
</html>"#;

const DIAGRAM: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="30"><rect width="20" height="30" fill="teal"/></svg>"#;

fn run_json(args: &[&str]) -> Value {
    let exe = assert_cmd::cargo_bin!("documentor-cli");
    let output = Command::new(exe).args(args).output().expect("run cli");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn preview_reports_replaced_elements_and_writes_pngs() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let page = tmp.path().join("page.xhtml");
    fs::write(&page, PAGE).expect("write page");
    fs::write(tmp.path().join("diagram.svg"), DIAGRAM).expect("write svg");
    let out_dir = tmp.path().join("out");

    let value = run_json(&[
        "preview",
        "--interactive",
        "--out",
        out_dir.to_string_lossy().as_ref(),
        page.to_string_lossy().as_ref(),
    ]);

    let images = value.as_array().expect("array");
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["kind"], "svg");
    assert_eq!(images[0]["width"], 40);
    assert_eq!(images[0]["height"], 30);
    assert_eq!(images[1]["kind"], "image");
    assert_eq!(images[1]["source"], "photo.jpg");

    let png = images[0]["png"].as_str().expect("png path");
    let bytes = fs::read(png).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn prefs_prints_defaults_without_store() {
    let value = run_json(&["prefs"]);
    assert_eq!(value["preferences"]["preview_mode"], "VerticalSplit");
    assert_eq!(value["preferences"]["editor_font"], "Monaco-13");
    assert_eq!(value["mercurial_path_valid"], false);
}

#[test]
fn launch_reports_export_request() {
    let value = run_json(&[
        "launch", "-html", "-root", "docs", "-target", "out", "-D", "beta", "-Dwin",
    ]);
    assert_eq!(value["export"]["format"], "HTML");
    assert_eq!(value["root"], "docs");
    assert_eq!(value["conditions"], serde_json::json!(["beta", "win"]));
}

#[test]
fn bad_launch_option_is_a_usage_error() {
    let exe = assert_cmd::cargo_bin!("documentor-cli");
    Command::new(exe)
        .args(["launch", "-pdf"])
        .assert()
        .code(2);
}
