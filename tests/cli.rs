use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("fieldlens").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("fieldlens"));
}

#[test]
fn dates_rejects_a_non_polygon_geometry() {
    let mut cmd = Command::cargo_bin("fieldlens").unwrap();
    cmd.args([
        "dates",
        "--polygon",
        r#"{"type":"Point","coordinates":[73.9,18.5]}"#,
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unsupported geometry"));
}

// Live test (opt-in, needs the analytics service): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn fetch_online_dates() {
    let mut cmd = Command::cargo_bin("fieldlens").unwrap();
    cmd.args([
        "dates",
        "--polygon",
        r#"{"type":"Polygon","coordinates":[[[73.77544,18.67297],[73.77479,18.67219],[73.77535,18.67195],[73.77544,18.67297]]]}"#,
    ]);
    cmd.assert().success();
}
