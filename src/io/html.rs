//! Report sink rendering a self-contained Leaflet map page
//!
//! The page is a static template. Summary panels are rendered here as HTML;
//! zone polygons and unit markers are embedded as a JSON block that the
//! page's script turns into Leaflet layers. Every string that comes from
//! input data is HTML-escaped before it reaches the page.

use crate::domain::report::{ReportModel, UnitMarker, ZoneSummary};
use crate::domain::types::LatLon;
use crate::infra::config::Config;
use crate::infra::error::ReportError;
use crate::io::ports::ReportSink;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{title}}</title>

  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous"
    referrerpolicy="no-referrer" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"
    referrerpolicy="no-referrer"></script>

  <style>
    html, body { height: 100%; margin: 0; }
    #map { position: absolute; inset: 0; }
    .panel {
      position: fixed;
      top: 20px;
      z-index: 1000;
      background: #ffffff;
      border-radius: 12px;
      box-shadow: 0 8px 24px rgba(0, 0, 0, 0.1);
      border: 1px solid #eee;
      font-family: 'Segoe UI', sans-serif;
      font-size: 14px;
      padding: 16px 20px;
    }
    .panel h3 { margin-top: 0; font-size: 16px; color: #333; }
    .panel p { margin: 4px 0; }
    .panel table { width: 100%; margin-top: 10px; border-collapse: collapse; }
    .panel td, .panel th { padding: 6px 0; }
    .panel th { text-align: left; color: #555; border-bottom: 2px solid #ddd; }
    .panel .num { text-align: right; font-family: monospace; }
    .panel-zones { left: 20px; width: 280px; max-height: 800px; overflow-y: auto; }
    .panel-zones tbody tr:nth-child(odd) { background: #f9f9f9; }
    .panel-battery { right: 20px; width: 260px; }
    .panel-battery .availability { color: green; }
    .panel-title {
      left: 50%;
      transform: translateX(-50%);
      padding: 12px 24px;
      font-size: 20px;
      font-weight: 600;
      color: #333;
      text-align: center;
    }
    .panel-title small { display: block; font-size: 12px; font-weight: 400; color: #888; }
    .panel-title .notice { color: #e74c3c; }
  </style>
</head>

<body>
  <div id="map"></div>
{{panels}}
  <script type="application/json" id="map-data">{{map_data}}</script>
  <script>
    (function () {
      const data = JSON.parse(document.getElementById('map-data').textContent);

      const map = L.map('map', { zoomControl: false }).setView([data.center.lat, data.center.lon], data.zoom);
      L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
        maxZoom: 19,
        attribution: '&copy; OpenStreetMap contributors'
      }).addTo(map);

      for (const zone of data.zones) {
        L.polygon(zone.boundary.map(p => [p.lat, p.lon]), {
          color: 'blue',
          weight: 2,
          fill: true,
          fillColor: 'blue',
          fillOpacity: 0.3
        }).bindPopup(zone.popup).addTo(map);
      }

      for (const unit of data.units) {
        const marker = unit.icon
          ? L.marker([unit.lat, unit.lon], {
              icon: L.icon({ iconUrl: unit.icon, iconSize: [30, 30], iconAnchor: [15, 15] })
            })
          : L.circleMarker([unit.lat, unit.lon], {
              radius: 7,
              color: '#ffffff',
              weight: 1.5,
              fillColor: unit.color,
              fillOpacity: 0.95
            });
        marker.bindPopup(unit.popup).addTo(map);
      }
    })();
  </script>
</body>

</html>
"#;

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Substitute `{{key}}` slots in one pass, so inserted values are never
/// scanned for further slots
fn fill_template(template: &str, slots: &[(&str, &str)]) -> String {
    let extra: usize = slots.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start..].find("}}") else {
            break;
        };
        let key = &rest[start + 2..start + len];
        match slots.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
            }
            None => out.push_str(&rest[..start + len + 2]),
        }
        rest = &rest[start + len + 2..];
    }

    out.push_str(rest);
    out
}

#[derive(Serialize)]
struct MapData<'a> {
    center: LatLon,
    zoom: u8,
    zones: Vec<ZoneLayer<'a>>,
    units: Vec<UnitLayer>,
}

#[derive(Serialize)]
struct ZoneLayer<'a> {
    popup: String,
    boundary: &'a [LatLon],
}

#[derive(Serialize)]
struct UnitLayer {
    lat: f64,
    lon: f64,
    color: &'static str,
    icon: Option<String>,
    popup: String,
}

/// Renders and writes the map report
#[derive(Debug, Clone)]
pub struct HtmlReport {
    path: PathBuf,
    title: String,
    center: LatLon,
    zoom: u8,
    icon_dir: Option<String>,
}

impl HtmlReport {
    pub fn new(path: impl AsRef<Path>, title: &str, center: LatLon, zoom: u8) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            title: title.to_string(),
            center,
            zoom,
            icon_dir: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let report = Self::new(
            config.output_path(),
            config.title(),
            config.map_center(),
            config.map_zoom(),
        );
        match config.icon_dir() {
            Some(dir) => report.with_icon_dir(dir),
            None => report,
        }
    }

    /// Use category icon images from `dir` instead of circle markers
    pub fn with_icon_dir(mut self, dir: &str) -> Self {
        self.icon_dir = Some(dir.trim_end_matches('/').to_string());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the full page
    pub fn render(
        &self,
        report: &ReportModel,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ReportError> {
        let mut panels = String::with_capacity(4096);
        self.write_title_panel(&mut panels, report, generated_at);
        write_zone_panel(&mut panels, report);
        write_battery_panel(&mut panels, report);

        let map_data = MapData {
            center: self.center,
            zoom: self.zoom,
            zones: report.zones.iter().map(zone_layer).collect(),
            units: report.units.iter().map(|u| self.unit_layer(u)).collect(),
        };
        // "</" would end the script element early
        let json = serde_json::to_string(&map_data)?.replace("</", "<\\/");

        let title = escape_html(&self.title);
        Ok(fill_template(
            PAGE_TEMPLATE,
            &[("title", title.as_str()), ("panels", panels.as_str()), ("map_data", json.as_str())],
        ))
    }

    fn write_title_panel(&self, out: &mut String, report: &ReportModel, at: DateTime<Utc>) {
        let _ = writeln!(out, "  <div class=\"panel panel-title\">");
        let _ = writeln!(out, "    {}", escape_html(&self.title));
        let _ = writeln!(out, "    <small>Updated {}</small>", at.format("%Y-%m-%d %H:%M UTC"));
        if !report.feed_available {
            let _ = writeln!(
                out,
                "    <small class=\"notice\">Fleet feed unavailable, counts are empty</small>"
            );
        }
        let _ = writeln!(out, "  </div>");
    }

    fn unit_layer(&self, unit: &UnitMarker) -> UnitLayer {
        UnitLayer {
            lat: unit.position.lat,
            lon: unit.position.lon,
            color: unit.category.color(),
            icon: self
                .icon_dir
                .as_ref()
                .map(|dir| format!("{dir}/{}", unit.category.icon_file())),
            popup: format!(
                "🔋 Battery: {:.1}%<br>Status: {}",
                unit.battery_percent(),
                unit.status()
            ),
        }
    }
}

fn zone_layer(zone: &ZoneSummary) -> ZoneLayer<'_> {
    ZoneLayer {
        popup: format!("<b>{}</b><br>{} scooters", escape_html(&zone.name), zone.count),
        boundary: &zone.boundary,
    }
}

/// Left panel: totals and zones by descending count
fn write_zone_panel(out: &mut String, report: &ReportModel) {
    let _ = writeln!(out, "  <div class=\"panel panel-zones\">");
    let _ = writeln!(out, "    <h3>🛴 Scooter Zones</h3>");
    let _ = writeln!(out, "    <p><strong>Total scooters:</strong> {}</p>", report.total);
    let _ = writeln!(out, "    <p><strong>Out-of-zone:</strong> {}</p>", report.out_of_zone);
    let _ = writeln!(out, "    <table>");
    let _ = writeln!(out, "      <thead><tr><th>Zone</th><th class=\"num\">Count</th></tr></thead>");
    let _ = writeln!(out, "      <tbody>");
    for zone in &report.zones {
        let _ = writeln!(
            out,
            "        <tr><td>{}</td><td class=\"num\">{}</td></tr>",
            escape_html(&zone.name),
            zone.count
        );
    }
    let _ = writeln!(out, "      </tbody>");
    let _ = writeln!(out, "    </table>");
    let _ = writeln!(out, "  </div>");
}

/// Right panel: availability and the six category counts
fn write_battery_panel(out: &mut String, report: &ReportModel) {
    let _ = writeln!(out, "  <div class=\"panel panel-battery\">");
    let _ = writeln!(out, "    <h3>⚡ Battery Stats</h3>");
    let _ = writeln!(
        out,
        "    <p class=\"availability\"><strong>Availability:</strong> {:.1}%</p>",
        report.availability_percent
    );
    let _ = writeln!(out, "    <table>");
    let _ = writeln!(out, "      <tbody>");
    for (category, count) in report.categories.iter() {
        let _ = writeln!(
            out,
            "        <tr><td><span style=\"color:{}\">{}</span></td><td class=\"num\">{}</td></tr>",
            category.color(),
            escape_html(category.label()),
            count
        );
    }
    let _ = writeln!(out, "      </tbody>");
    let _ = writeln!(out, "    </table>");
    let _ = writeln!(out, "  </div>");
}

impl ReportSink for HtmlReport {
    fn write_report(&self, report: &ReportModel) -> Result<(), ReportError> {
        let page = self.render(report, Utc::now())?;
        let io_err = |source| ReportError::Io { path: self.path.clone(), source };

        // Create parent directories if they don't exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        fs::write(&self.path, &page).map_err(io_err)?;
        debug!(markers = %report.units.len(), zones = %report.zones.len(), "report_rendered");
        info!(path = %self.path.display(), bytes = %page.len(), "report_written");
        Ok(())
    }
}
