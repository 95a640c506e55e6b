//! Telemetry points and the resources that own them.
//!
//! Devices, clusters and groups expose a `resources` sub-API with three
//! time series: `data`, `events` and `commands`. Each series can also be
//! narrowed to a single key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::primitives::Link;

/// Anything with a `resources` telemetry sub-API.
///
/// Implemented for [`Device`](super::Device), [`Cluster`](super::Cluster)
/// and [`Group`](super::Group), and for plain hrefs so telemetry can be
/// reached without fetching the owner first.
///
/// ```
/// use cloudthing_rs::models::TelemetryOwner;
///
/// let owner = "devices/d1";
/// assert_eq!(owner.data_link(), "devices/d1/resources/data");
/// assert_eq!(owner.commands_key_link("reboot"), "devices/d1/resources/commands/reboot");
/// ```
pub trait TelemetryOwner {
    /// Href of the owning resource.
    fn owner_href(&self) -> &str;

    /// `{href}/resources`
    fn resources_link(&self) -> String {
        format!("{}/resources", self.owner_href())
    }

    /// `{href}/resources/data`
    fn data_link(&self) -> String {
        format!("{}/data", self.resources_link())
    }

    /// `{href}/resources/events`
    fn events_link(&self) -> String {
        format!("{}/events", self.resources_link())
    }

    /// `{href}/resources/commands`
    fn commands_link(&self) -> String {
        format!("{}/commands", self.resources_link())
    }

    /// Data series narrowed to `key`.
    fn data_key_link(&self, key: &str) -> String {
        format!("{}/{}", self.data_link(), key)
    }

    /// Event series narrowed to `key`.
    fn events_key_link(&self, key: &str) -> String {
        format!("{}/{}", self.events_link(), key)
    }

    /// Command series narrowed to `key`.
    fn commands_key_link(&self, key: &str) -> String {
        format!("{}/{}", self.commands_link(), key)
    }
}

impl TelemetryOwner for str {
    fn owner_href(&self) -> &str {
        self
    }
}

impl TelemetryOwner for String {
    fn owner_href(&self) -> &str {
        self
    }
}

impl TelemetryOwner for Link {
    fn owner_href(&self) -> &str {
        &self.href
    }
}

/// A single timestamped value of a data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Sample time
    pub time: DateTime<Utc>,
    /// Sampled value
    #[serde(default)]
    pub value: serde_json::Value,
    /// Series key; omitted when writing to a key-scoped link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Location attached to the sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<serde_json::Value>,
}

impl DataPoint {
    /// A keyed sample.
    pub fn new(key: impl Into<String>, time: DateTime<Utc>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            time,
            value: value.into(),
            key: Some(key.into()),
            geo: None,
        }
    }
}

/// A single timestamped event carrying a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPoint {
    /// Event time
    pub time: DateTime<Utc>,
    /// Event payload
    #[serde(default)]
    pub payload: serde_json::Value,
    /// Series key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Location attached to the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<serde_json::Value>,
}

impl EventPoint {
    /// A keyed event.
    pub fn new(key: impl Into<String>, time: DateTime<Utc>, payload: impl Into<serde_json::Value>) -> Self {
        Self {
            time,
            payload: payload.into(),
            key: Some(key.into()),
            geo: None,
        }
    }
}

/// Commands share the event shape.
pub type CommandPoint = EventPoint;
