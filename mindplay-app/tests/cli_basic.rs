//! Runs the `mindplay` binary end to end.

use std::process::Command;

use serde_json::Value;

fn mindplay(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mindplay"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run mindplay")
}

#[test]
fn test_profiles_lists_every_tier() {
    let output = mindplay(&["profiles"]);
    assert!(output.status.success());
    let profiles: Value = serde_json::from_slice(&output.stdout).unwrap();
    let tiers: Vec<&str> = profiles
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["tier"].as_str().unwrap())
        .collect();
    assert_eq!(tiers, ["easy", "medium", "hard"]);
    assert_eq!(profiles[2]["memory"]["pairs"], 12);
}

#[test]
fn test_profiles_single_tier() {
    let output = mindplay(&["profiles", "--tier", "medium"]);
    assert!(output.status.success());
    let profiles: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profiles.as_array().unwrap().len(), 1);
    assert_eq!(profiles[0]["reaction"]["rounds"], 8);
}

#[test]
fn test_run_prints_report() {
    let output = mindplay(&["run", "--seed", "11", "--plan", "reaction:easy,breathing"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["seed"], 11);
    assert_eq!(report["progress_percent"], 100);
    let entries = report["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["activity"], "reaction");
    assert_eq!(entries[0]["result"]["attempts"], 5);
    assert_eq!(entries[1]["result"]["cycles"], 5);
}

#[test]
fn test_bad_plan_fails() {
    let output = mindplay(&["run", "--plan", "juggling"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("juggling"), "stderr: {stderr}");
}
