use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("colchart").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("colchart"));
}

#[test]
fn render_writes_chart_layout_and_stats() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data.csv");
    fs::write(&data, "year,Germany,France\n2019,3.2,2.7\n2020,1.0,2.6\n2021,,3.0\n").unwrap();
    let out = dir.path().join("chart.svg");
    let layout = dir.path().join("layout.json");

    let mut cmd = Command::cargo_bin("colchart").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .arg("--out")
        .arg(&out)
        .arg("--layout")
        .arg(&layout)
        .args(["--legend", "--legend-position", "w", "--rotation", "-30", "--gap", "20"])
        .args(["--title", "Growth", "--stats"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Germany  count=2"))
        .stdout(predicate::str::contains("France  count=3"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"class="chart""#));
    assert!(svg.contains(r#"transform="rotate(30)""#));
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&layout).unwrap()).unwrap();
    assert_eq!(v["bars"].as_array().unwrap().len(), 5);
    assert!(v["chart_translate_x"].as_f64().unwrap() > 0.0);
}

#[test]
fn props_file_is_overridden_by_flags() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data.json");
    fs::write(&data, r#"{"series":[[1,2]],"seriesLabels":["A"],"tickLabels":[["a","b"]]}"#).unwrap();
    let props = dir.path().join("props.json");
    fs::write(&props, r#"{"chartTitle":"From file","multiSeriesGap":10}"#).unwrap();
    let out = dir.path().join("chart.svg");

    let mut cmd = Command::cargo_bin("colchart").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .arg("--out")
        .arg(&out)
        .arg("--props")
        .arg(&props)
        .args(["--title", "From flag"]);
    cmd.assert().success();

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains(">From flag</text>"));
    assert!(!svg.contains("From file"));
}

#[test]
fn invalid_gap_fails() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data.json");
    fs::write(&data, r#"{"series":[[1]],"seriesLabels":["A"],"tickLabels":[["a"]]}"#).unwrap();

    let mut cmd = Command::cargo_bin("colchart").unwrap();
    cmd.arg("render")
        .arg("--data")
        .arg(&data)
        .arg("--out")
        .arg(dir.path().join("chart.svg"))
        .args(["--gap", "100"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("multiSeriesGap"));
}
