//! Integration tests for configuration loading

use fleet_zone_map::domain::types::LatLon;
use fleet_zone_map::infra::Config;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[report]
title = "VOI Fleet Bergen"
output = "out/bergen.html"

[map]
center = [60.39, 5.32]
zoom = 12
icon_dir = "icons/"

[zones]
kml_path = "zones/bergen.kml"

[feed]
url = "http://localhost:8080/free_bike_status"
client_name = "test-client"
timeout_ms = 2500
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.title(), "VOI Fleet Bergen");
    assert_eq!(config.output_path(), "out/bergen.html");
    assert_eq!(config.map_center(), LatLon::new(60.39, 5.32));
    assert_eq!(config.map_zoom(), 12);
    assert_eq!(config.icon_dir(), Some("icons/"));
    assert_eq!(config.kml_path(), "zones/bergen.kml");
    assert_eq!(config.feed_url(), "http://localhost:8080/free_bike_status");
    assert_eq!(config.feed_client_name(), "test-client");
    assert_eq!(config.feed_timeout(), Duration::from_millis(2500));
    assert_eq!(config.config_file(), temp_file.path().display().to_string());
}

#[test]
fn test_load_from_path_fallback() {
    let config = Config::load_from_path("/nonexistent/config.toml");
    assert_eq!(config.title(), "VOI Fleet Stavanger");
    assert_eq!(config.kml_path(), "zone_ops_stav-v2.kml");
    assert_eq!(config.config_file(), "default");
}

#[test]
fn test_invalid_toml_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[map]\nzoom = \"close\"\n").unwrap();
    temp_file.flush().unwrap();

    let err = Config::from_file(temp_file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config file"));

    // load_from_path swallows the error and uses defaults
    let config = Config::load_from_path(temp_file.path());
    assert_eq!(config.map_zoom(), 13);
}

#[test]
fn test_shipped_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/stavanger.toml");
    let shipped = Config::from_file(path).unwrap();
    let defaults = Config::default();

    assert_eq!(shipped.title(), defaults.title());
    assert_eq!(shipped.output_path(), defaults.output_path());
    assert_eq!(shipped.map_center(), defaults.map_center());
    assert_eq!(shipped.map_zoom(), defaults.map_zoom());
    assert_eq!(shipped.icon_dir(), defaults.icon_dir());
    assert_eq!(shipped.kml_path(), defaults.kml_path());
    assert_eq!(shipped.feed_url(), defaults.feed_url());
    assert_eq!(shipped.feed_timeout(), defaults.feed_timeout());
}
