//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/stavanger.toml
//!
//! Every key is optional. Missing keys fall back to the compiled-in
//! Stavanger defaults, and a missing or unreadable file falls back to
//! `Config::default()` entirely.

use crate::domain::types::LatLon;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/stavanger.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Text shown in the title banner
    #[serde(default = "default_title")]
    pub title: String,
    /// Output HTML document path
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { title: default_title(), output: default_output() }
    }
}

fn default_title() -> String {
    "VOI Fleet Stavanger".to_string()
}

fn default_output() -> String {
    "index.html".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    /// Initial map centre as [lat, lon]
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// Directory (relative to the report) holding the scooter_icon_*.png
    /// marker images. Circle markers are drawn when unset.
    #[serde(default)]
    pub icon_dir: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { center: default_center(), zoom: default_zoom(), icon_dir: None }
    }
}

fn default_center() -> [f64; 2] {
    [58.97104, 5.74131]
}

fn default_zoom() -> u8 {
    13
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZonesConfig {
    #[serde(default = "default_kml_path")]
    pub kml_path: String,
}

impl Default for ZonesConfig {
    fn default() -> Self {
        Self { kml_path: default_kml_path() }
    }
}

fn default_kml_path() -> String {
    "zone_ops_stav-v2.kml".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// GBFS free_bike_status endpoint
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Value sent in the ET-Client-Name identification header
    #[serde(default = "default_client_name")]
    pub client_name: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            client_name: default_client_name(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_feed_url() -> String {
    "https://api.entur.io/mobility/v2/gbfs/v2/voistavanger/free_bike_status".to_string()
}

fn default_client_name() -> String {
    "voi-zone-map-script".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub zones: ZonesConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    title: String,
    output_path: String,
    map_center: LatLon,
    map_zoom: u8,
    icon_dir: Option<String>,
    kml_path: String,
    feed_url: String,
    feed_client_name: String,
    feed_timeout_ms: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default".to_string())
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: String) -> Self {
        let [lat, lon] = toml_config.map.center;
        Self {
            title: toml_config.report.title,
            output_path: toml_config.report.output,
            map_center: LatLon::new(lat, lon),
            map_zoom: toml_config.map.zoom,
            icon_dir: toml_config.map.icon_dir.filter(|dir| !dir.trim().is_empty()),
            kml_path: toml_config.zones.kml_path,
            feed_url: toml_config.feed.url,
            feed_client_name: toml_config.feed.client_name,
            feed_timeout_ms: toml_config.feed.timeout_ms,
            config_file,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self::from_toml(toml_config, path.display().to_string()))
    }

    /// Load configuration - tries TOML file first, falls back to defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn map_center(&self) -> LatLon {
        self.map_center
    }

    pub fn map_zoom(&self) -> u8 {
        self.map_zoom
    }

    pub fn icon_dir(&self) -> Option<&str> {
        self.icon_dir.as_deref()
    }

    pub fn kml_path(&self) -> &str {
        &self.kml_path
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub fn feed_client_name(&self) -> &str {
        &self.feed_client_name
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_millis(self.feed_timeout_ms)
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.title(), "VOI Fleet Stavanger");
        assert_eq!(config.output_path(), "index.html");
        assert_eq!(config.map_center(), LatLon::new(58.97104, 5.74131));
        assert_eq!(config.map_zoom(), 13);
        assert_eq!(config.icon_dir(), None);
        assert_eq!(config.kml_path(), "zone_ops_stav-v2.kml");
        assert_eq!(config.feed_client_name(), "voi-zone-map-script");
        assert_eq!(config.feed_timeout(), Duration::from_secs(10));
        assert_eq!(config.config_file(), "default");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let toml_config: TomlConfig = toml::from_str(
            r#"
[report]
title = "Fleet Bergen"

[feed]
timeout_ms = 2500
"#,
        )
        .unwrap();
        let config = Config::from_toml(toml_config, "inline".to_string());

        assert_eq!(config.title(), "Fleet Bergen");
        assert_eq!(config.output_path(), "index.html");
        assert_eq!(config.feed_timeout(), Duration::from_millis(2500));
        assert!(config.feed_url().ends_with("/free_bike_status"));
    }

    #[test]
    fn test_blank_icon_dir_means_circle_markers() {
        let toml_config: TomlConfig = toml::from_str("[map]\nicon_dir = \"  \"\n").unwrap();
        let config = Config::from_toml(toml_config, "inline".to_string());
        assert_eq!(config.icon_dir(), None);
    }

    #[test]
    fn test_empty_toml_equals_defaults() {
        let toml_config: TomlConfig = toml::from_str("").unwrap();
        let config = Config::from_toml(toml_config, "inline".to_string());
        let defaults = Config::default();
        assert_eq!(config.kml_path(), defaults.kml_path());
        assert_eq!(config.feed_url(), defaults.feed_url());
    }
}
