use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn layout_json(args: &[&str]) -> Value {
    let exe = assert_cmd::cargo_bin!("chartwright-cli");
    let out = Command::new(exe)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).expect("stdout is JSON")
}

#[test]
fn cli_lays_out_every_fixture() {
    for (file, tag) in [
        ("boxplot.json", "boxplot"),
        ("histogram.json", "histogram"),
        ("waterfall.json", "waterfall"),
        ("chord.json", "chord"),
        ("word_cloud.json", "wordCloud"),
        ("mekko.json", "mekko"),
    ] {
        let path = fixture(file);
        let v = layout_json(&["layout", path.to_string_lossy().as_ref()]);
        assert_eq!(v["type"], tag, "{file}");
        assert!(v["layout"].is_object() || v["layout"].is_array(), "{file}");
    }
}

#[test]
fn cli_boxplot_reports_outlier() {
    let path = fixture("boxplot.json");
    let v = layout_json(&["layout", "--pretty", path.to_string_lossy().as_ref()]);
    assert_eq!(v["layout"][0]["name"], "latency");
    assert_eq!(v["layout"][0]["outliers"][0], 100.0);
    assert_eq!(v["layout"][0]["max"], 10.0);
}

#[test]
fn cli_applies_config_file() {
    let request = fixture("histogram.json");
    let config = fixture("config.json");
    let v = layout_json(&[
        "layout",
        "--config",
        config.to_string_lossy().as_ref(),
        request.to_string_lossy().as_ref(),
    ]);
    let bins = v["layout"]["bins"].as_array().expect("bins");
    assert_eq!(bins.len(), 3);
    let counts: Vec<u64> = bins.iter().map(|b| b["count"].as_u64().unwrap()).collect();
    assert_eq!(counts, vec![3, 2, 1]);
    assert_eq!(v["layout"]["density"].as_array().map(Vec::len), Some(50));
}

#[test]
fn cli_reads_request_from_stdin() {
    let exe = assert_cmd::cargo_bin!("chartwright-cli");
    let out = assert_cmd::Command::new(exe)
        .arg("layout")
        .write_stdin(fs::read(fixture("waterfall.json")).expect("read fixture"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: Value = serde_json::from_slice(&out).expect("stdout is JSON");
    assert_eq!(v["layout"]["finalTotal"], 70.0);
    assert_eq!(v["layout"]["bars"][2]["kind"], "total");
}

#[test]
fn cli_rejects_all_zero_chord_matrix() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("zero.json");
    fs::write(
        &path,
        r#"{"type":"chord","names":["a","b"],"matrix":[[0,0],[0,0]]}"#,
    )
    .expect("write request");

    let exe = assert_cmd::cargo_bin!("chartwright-cli");
    let out = Command::new(exe)
        .args(["layout", path.to_string_lossy().as_ref()])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&out);
    assert!(stderr.contains("no non-zero flows"), "{stderr}");
}

#[test]
fn cli_reports_unreadable_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bad = tmp.path().join("config.json");
    fs::write(&bad, "{ not json").expect("write config");

    let exe = assert_cmd::cargo_bin!("chartwright-cli");
    Command::new(exe)
        .args([
            "layout",
            "--config",
            bad.to_string_lossy().as_ref(),
            fixture("mekko.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn cli_lists_chart_types() {
    let exe = assert_cmd::cargo_bin!("chartwright-cli");
    let out = Command::new(exe)
        .arg("types")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).expect("utf8");
    let types: Vec<&str> = text.lines().collect();
    assert_eq!(
        types,
        vec!["boxplot", "histogram", "waterfall", "chord", "wordCloud", "mekko"]
    );
}

#[test]
fn cli_usage_error_exits_with_two() {
    let exe = assert_cmd::cargo_bin!("chartwright-cli");
    Command::new(exe).arg("--bogus").assert().failure().code(2);
}
