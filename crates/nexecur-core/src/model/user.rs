use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The persisted credential record.
///
/// `password` and `pin` hold plaintext until the first registration,
/// after which they are replaced by the derived hashes. Loading accepts
/// both `snake_case` and `camelCase` keys; saving always writes the
/// historical layout (`token, id_site, password, id_device, pin, deviceName`).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfiguration {
    #[serde(default, deserialize_with = "lenient_string")]
    pub token: String,
    #[serde(default, alias = "idSite", deserialize_with = "lenient_string")]
    pub id_site: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,
    #[serde(default, alias = "idDevice", deserialize_with = "lenient_string")]
    pub id_device: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pin: String,
    #[serde(
        default,
        rename = "deviceName",
        alias = "device_name",
        deserialize_with = "lenient_string"
    )]
    pub device_name: String,
}

impl UserConfiguration {
    /// Site id and password are both present.
    pub fn is_valid(&self) -> bool {
        !self.id_site.is_empty() && !self.password.is_empty()
    }

    /// A token and a device id have been issued.
    pub fn is_device_registered(&self) -> bool {
        !self.token.is_empty() && !self.id_device.is_empty()
    }
}

impl fmt::Debug for UserConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "" } else { "[REDACTED]" }
        }

        f.debug_struct("UserConfiguration")
            .field("token", &redact(&self.token))
            .field("id_site", &self.id_site)
            .field("password", &redact(&self.password))
            .field("id_device", &self.id_device)
            .field("pin", &redact(&self.pin))
            .field("device_name", &self.device_name)
            .finish()
    }
}

/// Hand-edited files carry `null`s and numeric site ids; treat them as text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn loads_snake_case() {
        let cfg: UserConfiguration = serde_json::from_value(json!({
            "token": "t",
            "id_site": "1234",
            "password": "p",
            "id_device": "d",
            "pin": "0000",
            "deviceName": "Hall",
        }))
        .unwrap();
        assert_eq!(cfg.id_site, "1234");
        assert_eq!(cfg.id_device, "d");
        assert_eq!(cfg.device_name, "Hall");
        assert!(cfg.is_valid());
        assert!(cfg.is_device_registered());
    }

    #[test]
    fn loads_camel_case_and_nulls() {
        let cfg: UserConfiguration = serde_json::from_value(json!({
            "token": null,
            "idSite": 4321,
            "password": "p",
            "idDevice": "",
        }))
        .unwrap();
        assert_eq!(cfg.id_site, "4321");
        assert_eq!(cfg.token, "");
        assert_eq!(cfg.device_name, "");
        assert!(cfg.is_valid());
        assert!(!cfg.is_device_registered());
    }

    #[test]
    fn saves_historical_layout() {
        let cfg = UserConfiguration {
            id_site: "1".into(),
            device_name: "Hall".into(),
            ..UserConfiguration::default()
        };
        let value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(
            value,
            json!({
                "token": "",
                "id_site": "1",
                "password": "",
                "id_device": "",
                "pin": "",
                "deviceName": "Hall",
            })
        );
    }

    #[test]
    fn validity_requires_site_and_password() {
        let cfg = UserConfiguration {
            password: "p".into(),
            ..UserConfiguration::default()
        };
        assert!(!cfg.is_valid());
    }

    #[test]
    fn debug_hides_secrets() {
        let cfg = UserConfiguration {
            password: "hunter2".into(),
            token: "tok".into(),
            ..UserConfiguration::default()
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("tok\""));
    }
}
