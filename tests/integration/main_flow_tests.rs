use serde_json::Value;
use serial_test::serial;
use std::process::{Command, Output};

use crate::common::{fixture_path, init_test_env};

fn run_processor(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ladder-rating"))
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("LADDER_SNAPSHOT")
        .env_remove("LADDER_K_FACTOR")
        .output()
        .expect("Failed to execute ladder-rating")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "Process failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("Expected JSON on stdout")
}

#[test]
#[serial]
fn test_player_command_without_snapshot_fails() {
    init_test_env();
    let output = run_processor(&["estimate", "--player", "alice"]);

    assert!(!output.status.success(), "Process should fail without a snapshot");
}

#[test]
#[serial]
fn test_predict_outputs_counter_delta() {
    init_test_env();
    let output = run_processor(&["predict", "--delta", "20", "--outcome", "win", "--rating", "1800", "-k", "32"]);
    let json = stdout_json(&output);

    assert_eq!(json["predictedDelta"], -12);
    assert!(json["impliedOpponentRating"].is_number());
}

#[test]
#[serial]
fn test_predict_indeterminate_is_not_a_failure() {
    init_test_env();
    let output = run_processor(&["predict", "--delta", "45", "--outcome", "win", "--rating", "1800", "-k", "32"]);
    let json = stdout_json(&output);

    assert!(json["predictedDelta"].is_null());
    assert!(json["impliedOpponentRating"].is_null());
}

#[test]
#[serial]
fn test_estimate_from_snapshot() {
    init_test_env();
    let snapshot = fixture_path("ladder_snapshot.json");
    let output = run_processor(&[
        "estimate",
        "--player",
        "alice",
        "--snapshot",
        snapshot.to_str().unwrap()
    ]);
    let json = stdout_json(&output);

    assert_eq!(json["adjustments"].as_array().unwrap().len(), 9);
    assert_eq!(json["adjustments"][1]["ratingAfter"], 1766.0);
    assert!(json["state"]["deviation"].as_f64().unwrap() >= 0.8);
}

#[test]
#[serial]
fn test_malformed_history_fails() {
    init_test_env();
    let snapshot = fixture_path("ladder_snapshot.json");
    let output = run_processor(&[
        "estimate",
        "--player",
        "mallory",
        "--snapshot",
        snapshot.to_str().unwrap()
    ]);

    assert!(!output.status.success(), "A win with a negative delta must be rejected");
}

#[test]
#[serial]
fn test_fixed_simulation_is_byte_identical() {
    init_test_env();
    let snapshot = fixture_path("ladder_snapshot.json");
    let args = [
        "simulate",
        "--player",
        "alice",
        "--games",
        "40",
        "--outcomes",
        "WWLWL",
        "--snapshot",
        snapshot.to_str().unwrap()
    ];

    let first = run_processor(&args);
    let second = run_processor(&args);
    let json = stdout_json(&first);

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(json["steps"].as_array().unwrap().len(), 40);
    assert_eq!(json["wins"], 24);
}

#[test]
#[serial]
fn test_report_for_nightmare_player() {
    init_test_env();
    let snapshot = fixture_path("ladder_snapshot.json");
    let output = run_processor(&[
        "report",
        "--player",
        "bob",
        "--trials",
        "50",
        "--snapshot",
        snapshot.to_str().unwrap()
    ]);
    let json = stdout_json(&output);

    assert_eq!(json["rank"], "Nightmare");
    assert_eq!(json["confidence"]["label"], "Low");
    assert!(json["symmetry"].is_null());
    assert_eq!(json["projection"]["trials"], 50);
}

#[test]
#[serial]
fn test_lifetime_delta() {
    init_test_env();
    let output = run_processor(&[
        "lifetime",
        "--from",
        "Gold 2",
        "--from-points",
        "40",
        "--to",
        "Platinum 1",
        "--to-points",
        "10"
    ]);
    let json = stdout_json(&output);

    assert_eq!(json["delta"], 270);
    assert_eq!(json["rungsPromoted"], 3);
}

#[test]
#[serial]
fn test_unknown_tier_fails() {
    init_test_env();
    let output = run_processor(&[
        "lifetime",
        "--from",
        "Wood 2",
        "--from-points",
        "40",
        "--to",
        "Gold 1",
        "--to-points",
        "10"
    ]);

    assert!(!output.status.success(), "Unknown tier names must be rejected");
}

#[test]
#[serial]
fn test_symmetry_rejects_swapped_signs() {
    init_test_env();
    let output = run_processor(&[
        "symmetry",
        "--win-delta=-3",
        "--loss-delta",
        "4",
        "--rating",
        "1800"
    ]);

    assert!(!output.status.success(), "A losing win delta must be rejected");
}

#[test]
#[serial]
fn test_unusable_configuration_fails() {
    init_test_env();
    let output = Command::new(env!("CARGO_BIN_EXE_ladder-rating"))
        .args(["predict", "--delta", "20", "--outcome", "win", "--rating", "1800"])
        .env("RUST_LOG", "error")
        .env("LADDER_K_FACTOR", "0")
        .output()
        .expect("Failed to execute ladder-rating");

    assert!(!output.status.success(), "A zero k-factor must be rejected at startup");
}
