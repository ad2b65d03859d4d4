// Vendor request and response types
//
// Every response carries `message` and `status`, but the success
// convention differs per endpoint, so they are exposed raw through
// `ApiResponse` and checked by the caller. Fields use `#[serde(default)]`
// liberally because the vendor omits keys freely.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Shared envelope accessors ────────────────────────────────────────

/// Accessors for the `message` / `status` pair shared by every response.
pub trait ApiResponse {
    fn message(&self) -> Option<&str>;
    fn status(&self) -> Option<i64>;

    /// `message == "OK"` and `status == 0`: the convention used by every
    /// endpoint except device registration.
    fn is_ok(&self) -> bool {
        self.message() == Some("OK") && self.status() == Some(0)
    }
}

macro_rules! api_response {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ApiResponse for $ty {
                fn message(&self) -> Option<&str> {
                    self.message.as_deref()
                }

                fn status(&self) -> Option<i64> {
                    self.status
                }
            }
        )+
    };
}

api_response!(
    ConfigurationResponse,
    SaltResponse,
    SiteResponse,
    RegisterResponse,
    PanelStatusResponse,
    PanelCheckResponse,
    StreamResponse,
);

/// Accept either a JSON string or number and keep it as text.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Requests ─────────────────────────────────────────────────────────

/// Body shared by the salt and site endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct SiteRequest<'a> {
    pub id_site: &'a str,
    pub password: &'a str,
    pub id_device: &'a str,
    pub partage: &'static str,
    pub pin: &'a str,
}

impl<'a> SiteRequest<'a> {
    pub fn new(id_site: &'a str, password: &'a str, id_device: &'a str, pin: &'a str) -> Self {
        Self {
            id_site,
            password,
            id_device,
            partage: "1",
            pin,
        }
    }
}

/// Device profile sent to `/webservices/register`.
///
/// The vendor only accepts the profile of its own Android app, so every
/// field except the device id and name is fixed.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub alert: &'static str,
    pub appname: &'static str,
    pub nom: &'static str,
    pub badge: &'static str,
    pub options: [u8; 1],
    pub sound: &'static str,
    pub id_device: &'a str,
    pub actif: u8,
    pub plateforme: &'static str,
    pub app_version: &'static str,
    pub device_model: &'static str,
    pub device_name: &'a str,
    pub device_version: &'static str,
}

impl<'a> RegisterRequest<'a> {
    pub fn new(id_device: &'a str, device_name: &'a str) -> Self {
        Self {
            alert: "enabled",
            appname: "Mon+Nexecur",
            nom: "",
            badge: "enabled",
            options: [1],
            sound: "enabled",
            id_device,
            actif: 1,
            plateforme: "gcm",
            app_version: "1.15 (30)",
            device_model: "SM-G315F",
            device_name,
            device_version: "7.0",
        }
    }
}

// ── Responses ────────────────────────────────────────────────────────

/// Response of `/webservices/configuration`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigurationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `/webservices/salt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaltResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    /// Base64-encoded salt.
    #[serde(default, deserialize_with = "null_as_default")]
    pub salt: String,
}

/// Response of `/webservices/site`: token, panel state and event history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id_site: Option<String>,
    #[serde(default, rename = "type")]
    pub site_type: Option<String>,
    #[serde(default)]
    pub ecosystem: Option<String>,
    #[serde(default)]
    pub panel_streaming: Option<i64>,
    #[serde(default)]
    pub panel_serial: Option<String>,
    /// 0 = disarmed, 1 = partial (SP1), 2 = total (SP2).
    #[serde(default)]
    pub panel_status: Option<i64>,
    #[serde(default)]
    pub panel_sp1: Option<i64>,
    #[serde(default)]
    pub panel_sp2: Option<i64>,
    #[serde(default)]
    pub panel_sp1_nom: Option<String>,
    #[serde(default)]
    pub panel_sp2_nom: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub devices: Vec<SiteDevice>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub evenements: Option<Vec<Evenement>>,
    #[serde(default)]
    pub camera_token: Option<String>,
    #[serde(default)]
    pub camera_available: Option<i64>,
    #[serde(default)]
    pub panel_available: Option<i64>,
    #[serde(default)]
    pub streaming_available: Option<i64>,
    /// Catch-all for locks, cameras, shares and undocumented fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Device (sensor, camera, zone) attached to a site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteDevice {
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub device_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Badge or user known to the panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Badge {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id_badge: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the site's event history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Evenement {
    #[serde(default)]
    pub id_evenement: Option<i64>,
    #[serde(default)]
    pub option_id: Option<i64>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    /// Epoch seconds.
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub badge: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `/webservices/register`. Success is `message == ""`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id_device: Option<String>,
}

/// Response of `/webservices/panel-status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelStatusResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    /// 1 while the panel has not applied the order yet.
    #[serde(default)]
    pub pending: Option<i64>,
}

/// Response of `/webservices/check-panel-status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelCheckResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub still_pending: Option<i64>,
}

/// Response of `/webservices/stream`. The payload shape depends on the
/// camera model, so everything but the envelope stays untyped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
