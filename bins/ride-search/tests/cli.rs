//! End-to-end tests for the ride-search binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn ride_search() -> Command {
    let mut cmd = Command::cargo_bin("ride-search").unwrap();
    cmd.env_remove("RIDESHARE_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn search(from: &str, to: &str) -> Command {
    let mut cmd = ride_search();
    cmd.arg("search")
        .arg("--rides")
        .arg(fixture("rides.json"))
        .arg("--places")
        .arg(fixture("places.json"))
        .args(["--from", from, "--to", to]);
    cmd
}

#[test]
fn test_encode_reference_polyline() {
    ride_search()
        .args(["encode", "38.5,-120.2", "40.7,-120.95", "43.252,-126.453"])
        .assert()
        .success()
        .stdout("_p~iF~ps|U_ulLnnqC_mqNvxq`@\n");
}

#[test]
fn test_decode_reference_polyline() {
    ride_search()
        .args(["decode", "_p~iF~ps|U_ulLnnqC_mqNvxq`@"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("38.50000,-120.20000\n"));
}

#[test]
fn test_decode_malformed_polyline() {
    ride_search()
        .args(["decode", "_p~iF"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("E5001"));
}

#[test]
fn test_search_json() {
    let output = search("Ramanagara", "Mandya").arg("--json").output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["connected"], 1);
    assert_eq!(json["results"][0]["ride"]["ride_id"], "blr-mys-express");
    assert_eq!(json["results"][0]["match_type"], "connected");
    assert_eq!(json["results"][0]["route_match"]["origin_anchor"]["route_index"], 3);
    assert_eq!(json["results"][0]["route_match"]["destination_anchor"]["route_index"], 6);
    assert_eq!(json["results"].as_array().unwrap().len(), 3);
    assert_eq!(json["issues"][0]["context"], "ride broken-upload");
}

#[test]
fn test_search_with_filters_and_date() {
    let output = search("Ramanagara", "Mandya")
        .args(["--date", "2026-10-20", "--seats", "2", "--vehicle", "sedan", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["quote"]["seats"], 2);
}

#[test]
fn test_search_text_output() {
    search("Ramanagara", "Mandya")
        .assert()
        .success()
        .stdout(predicate::str::contains("blr-mys-express"))
        .stdout(predicate::str::contains("1 connected, 2 other"));
}

#[test]
fn test_search_unknown_place() {
    search("Atlantis", "Mandya")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Atlantis"));
}

#[test]
fn test_search_missing_fixture() {
    ride_search()
        .args(["search", "--rides", "/nonexistent/rides.json", "--places"])
        .arg(fixture("places.json"))
        .args(["--from", "Mysuru", "--to", "Mandya"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2001"));
}
