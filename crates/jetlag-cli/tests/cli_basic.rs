//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated HOME and verify outputs.

use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &std::path::Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_jetlag"))
        .args(args)
        .env("HOME", home)
        .env_remove("JETLAG_ENV")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_plan_json() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(
        home.path(),
        &[
            "plan",
            "--from",
            "America/New_York",
            "--to",
            "Europe/London",
            "--depart",
            "2024-12-15 14:30",
            "--duration",
            "7.5",
            "--json",
        ],
    );
    assert_eq!(code, 0, "plan failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["pre_flight_sleep"].as_array().unwrap().len(), 3);
    assert_eq!(json["post_flight_sleep"].as_array().unwrap().len(), 1);
    assert_eq!(json["pre_flight_sleep"][0]["days_before"], 3);
    assert_eq!(json["origin_tz_abbrev"], "EST/EDT");
    assert!(json["tips"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| *t == "Stay hydrated during flight."));
}

#[test]
fn test_plan_text() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", "--from", "Asia/Tokyo", "--to", "Europe/Paris", "--depart", "2024-12-15 11:00"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("JETLAG SLEEP RECOMMENDATIONS"));
    assert!(stdout.contains("Direction: Westward"));
}

#[test]
fn test_plan_unknown_zone() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["plan", "--from", "Mars/Olympus", "--to", "Europe/London"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown timezone: 'Mars/Olympus'"));
}

#[test]
fn test_plan_malformed_departure() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["plan", "--depart", "15/12/2024"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid departure_time"));
}

#[test]
fn test_zones_json() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["zones", "--json"]);
    assert_eq!(code, 0);
    let zones: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(zones.as_array().unwrap().len(), 10);
    assert_eq!(zones[4]["name"], "Europe/London");
}

#[test]
fn test_config_set_then_plan_uses_default() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "set", "defaults.dest_zone", "Asia/Tokyo"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "defaults.dest_zone = Asia/Tokyo (Tokyo (JST))");

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "defaults.dest_zone"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Asia/Tokyo");

    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", "--from", "Europe/London", "--depart", "2024-12-15 14:30", "--json"],
    );
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["dest_tz_abbrev"], "JST");
    assert_eq!(json["is_eastward"], true);
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "server.nope", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("server.nope"));
}

#[test]
fn test_config_rejects_unknown_zone() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["config", "set", "defaults.origin_zone", "Mars/Olympus"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("Mars/Olympus"));

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "defaults.origin_zone"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "America/New_York");
}

#[test]
fn test_config_path_points_into_home() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().starts_with(home.path().to_str().unwrap()));
    assert!(stdout.trim().ends_with("config.toml"));
}
