use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the panel's event history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<i64>,
    pub option_id: Option<i64>,
    /// Name of the device that raised the event.
    pub device: Option<String>,
    pub message: Option<String>,
    pub picture: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub status: Option<i64>,
    pub badge: Option<i64>,
    /// Fields the vendor added that are not modelled above.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}
