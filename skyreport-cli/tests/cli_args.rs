//! Integration tests for the `skyreport` binary.
//!
//! Every run gets its own empty config dir and no API key from the
//! environment, so nothing here reaches the network.

use std::{path::PathBuf, process::Command};

use tempfile::TempDir;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../skyreport-core/tests/fixtures/forecast.json")
}

/// Helper to run the CLI with given args and capture output
fn run_cli(config_dir: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_skyreport"))
        .args(args)
        .env("SKYREPORT_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("OPENWEATHER_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute skyreport")
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for sub in ["configure", "show", "parse"] {
        assert!(stdout.contains(sub), "help should mention {sub}: {stdout}");
    }
}

#[test]
fn parse_prints_snow_report_by_default() {
    let dir = TempDir::new().unwrap();
    let file = fixture();
    let output = run_cli(&dir, &["parse", file.to_str().unwrap(), "--time-basis", "location"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Chamonix-Mont-Blanc, FR (snow report)");
    assert_eq!(lines.len(), 5);
    assert!(lines[1].contains("snow: yes"));
    assert!(lines[2].contains("rain: yes"));
}

#[test]
fn parse_stargazing_as_json() {
    let dir = TempDir::new().unwrap();
    let file = fixture();
    let output = run_cli(
        &dir,
        &[
            "parse",
            file.to_str().unwrap(),
            "--report",
            "stars",
            "--time-basis",
            "location",
            "--json",
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let good: Vec<bool> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["is_good_for_stargazing"].as_bool().unwrap())
        .collect();
    assert_eq!(good, vec![false, false, false, true]);
}

#[test]
fn default_report_comes_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "default_report = \"stargazing\"\n").unwrap();

    let file = fixture();
    let output = run_cli(&dir, &["parse", file.to_str().unwrap(), "--time-basis", "location"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("(stargazing report)"));
}

#[test]
fn invalid_report_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = fixture();
    let output = run_cli(&dir, &["parse", file.to_str().unwrap(), "--report", "surf"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown report"));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");
    let output = run_cli(&dir, &["parse", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read forecast file"));
}

#[test]
fn show_without_api_key_explains_how_to_configure() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["show", "Oslo,NO"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No OpenWeather API key configured"), "{stderr}");
    assert!(stderr.contains("skyreport configure"));
}

#[test]
fn show_without_location_or_default_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["show"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no default location configured"));
}

#[test]
fn count_out_of_range_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["show", "Oslo", "--count", "41"]);
    assert!(!output.status.success());
}
