// Command-line parsing and overrides

use std::fs;

use tempfile::TempDir;
use termface::commands::build_cli;
use termface::commands::run::load_config;
use termface::core::config::ActivitySource;

#[test]
fn test_no_subcommand_accepts_face_flags() {
    let matches = build_cli()
        .try_get_matches_from(["termface", "--json", "--once"])
        .unwrap();
    assert!(matches.subcommand().is_none());
    assert!(matches.get_flag("json"));
    assert!(matches.get_flag("once"));
}

#[test]
fn test_plain_conflicts_with_json() {
    let result = build_cli().try_get_matches_from(["termface", "run", "--plain", "--json"]);
    assert!(result.is_err());
}

#[test]
fn test_latitude_needs_longitude() {
    let result = build_cli().try_get_matches_from(["termface", "--lat", "48.85"]);
    assert!(result.is_err());
}

#[test]
fn test_force_needs_init() {
    let result = build_cli().try_get_matches_from(["termface", "config", "--force"]);
    assert!(result.is_err());
}

#[test]
fn test_overrides_apply_over_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "fast_interval_ms": 250, "battery_bar_width": 12 }"#).unwrap();
    let path_arg = path.to_string_lossy().into_owned();

    let matches = build_cli()
        .try_get_matches_from([
            "termface",
            "run",
            "--config",
            path_arg.as_str(),
            "--bar-width",
            "5",
            "--lat",
            "-33.87",
            "--lon",
            "151.21",
            "--no-activity",
        ])
        .unwrap();
    let (_, run_matches) = matches.subcommand().unwrap();
    let config = load_config(run_matches).unwrap();

    assert_eq!(config.fast_interval_ms, 250);
    assert_eq!(config.battery_bar_width, 5);
    assert_eq!(config.activity, ActivitySource::Disabled);
    let location = config.location.unwrap();
    assert_eq!(location.latitude, -33.87);
    assert_eq!(location.longitude, 151.21);
}

#[test]
fn test_zero_override_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path_arg = dir.path().join("config.json").to_string_lossy().into_owned();

    let matches = build_cli()
        .try_get_matches_from(["termface", "-c", path_arg.as_str(), "--fast-ms", "0"])
        .unwrap();
    assert!(load_config(&matches).is_err());
}
