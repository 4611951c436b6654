// Config file round trips

use std::fs;

use tempfile::TempDir;
use termface::core::config::ActivitySource;
use termface::core::feeds::Coordinate;
use termface::Config;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_empty_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "  \n").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        fast_interval_ms: 500,
        battery_bar_width: 10,
        location: Some(Coordinate {
            latitude: -33.87,
            longitude: 151.21,
        }),
        activity: ActivitySource::Disabled,
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.fast_interval().as_millis(), 500);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "slow_interval_secs": 300, "activity": "disabled" }"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.slow_interval_secs, 300);
    assert_eq!(config.activity, ActivitySource::Disabled);
    assert_eq!(config.fast_interval_ms, 1000);
    assert_eq!(config.shell_prefix, "me@watch:");
}

#[test]
fn test_invalid_values_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    fs::write(&path, r#"{ "fast_interval_ms": 0 }"#).unwrap();
    assert!(Config::load_from(&path).is_err());

    fs::write(&path, r#"{ "location": { "latitude": 95.0, "longitude": 0.0 } }"#).unwrap();
    assert!(Config::load_from(&path).is_err());

    fs::write(&path, "{ not json").unwrap();
    assert!(Config::load_from(&path).is_err());
}
