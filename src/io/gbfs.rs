//! GBFS free_bike_status client
//!
//! Fetches one snapshot of the fleet feed. Only the fields the report needs
//! are decoded:
//! - `data.bikes[].lat` / `lon` (required; records without them are skipped)
//! - `current_fuel_percent` (fraction in [0, 1], missing or non-numeric → 0)
//! - `is_disabled` (bool, or a number as older feeds send it; missing → false)
//!
//! A non-success status, network failure or undecodable body is returned as
//! a `FeedError`; the pipeline decides what to do with it.

use crate::domain::types::{FleetUnit, LatLon};
use crate::infra::error::FeedError;
use crate::io::ports::FleetSource;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Deserializer};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Header Entur uses to identify API clients
pub const CLIENT_NAME_HEADER: &str = "ET-Client-Name";

#[derive(Debug, Deserialize)]
struct FreeBikeStatus {
    #[serde(default)]
    data: Option<FeedData>,
}

#[derive(Debug, Deserialize, Default)]
struct FeedData {
    #[serde(default)]
    bikes: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct FeedBike {
    #[serde(default, deserialize_with = "deserialize_bike_id")]
    bike_id: Option<String>,
    lat: f64,
    lon: f64,
    #[serde(default, deserialize_with = "deserialize_battery")]
    current_fuel_percent: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_disabled: bool,
}

impl From<FeedBike> for FleetUnit {
    fn from(bike: FeedBike) -> Self {
        FleetUnit {
            bike_id: bike.bike_id,
            position: LatLon::new(bike.lat, bike.lon),
            battery: bike.current_fuel_percent.unwrap_or(0.0),
            disabled: bike.is_disabled,
        }
    }
}

/// Accepts `true`/`false`, `0`/`1` and null
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a boolean or 0/1")
        }

        fn visit_bool<E>(self, value: bool) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value != 0)
        }

        fn visit_i64<E>(self, value: i64) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value != 0)
        }

        fn visit_f64<E>(self, value: f64) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value != 0.0)
        }

        fn visit_unit<E>(self) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(false)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

/// A reading that is not a number is unusable and counts as missing
fn deserialize_battery<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::Null => None,
        other => {
            warn!(value = %other, "feed_battery_unreadable");
            None
        }
    })
}

/// Ids are strings in GBFS, but some feeds send numbers
fn deserialize_bike_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Decode a free_bike_status body into fleet units
///
/// A body that is not a JSON object is an error. Individual records that
/// fail to decode are skipped with a warning and not counted.
pub fn decode_free_bike_status(body: &str) -> Result<Vec<FleetUnit>, FeedError> {
    let status: FreeBikeStatus =
        serde_json::from_str(body).map_err(|e| FeedError::invalid_body(e, body))?;

    let records = status.data.unwrap_or_default().bikes.unwrap_or_default();
    let mut units = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<FeedBike>(record) {
            Ok(bike) => units.push(FleetUnit::from(bike)),
            Err(e) => warn!(index = %index, error = %e, "feed_record_skipped"),
        }
    }

    Ok(units)
}

/// HTTP client for a single GBFS free_bike_status endpoint
pub struct GbfsClient {
    client: Client,
    url: String,
    client_name: String,
}

impl GbfsClient {
    pub fn new(url: &str, client_name: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, url: url.to_string(), client_name: client_name.to_string() })
    }
}

#[async_trait]
impl FleetSource for GbfsClient {
    async fn fetch_units(&self) -> Result<Vec<FleetUnit>, FeedError> {
        let start = Instant::now();

        let response = self
            .client
            .get(&self.url)
            .header(CLIENT_NAME_HEADER, &self.client_name)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Unavailable { status: status.as_u16() });
        }

        let body = response.text().await?;
        let units = decode_free_bike_status(&body)?;

        info!(
            url = %self.url,
            units = %units.len(),
            bytes = %body.len(),
            latency_ms = %start.elapsed().as_millis(),
            "feed_fetched"
        );
        Ok(units)
    }
}
