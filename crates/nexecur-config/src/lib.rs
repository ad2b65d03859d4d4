//! Shared configuration for Nexecur tools.
//!
//! TOML settings layered with `NEXECUR_` environment variables, the JSON
//! credential record, and translation to `nexecur_core::ClientConfig`.

mod store;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nexecur_core::{ClientConfig, DEFAULT_DEVICE_NAME, TlsVerification};

pub use store::JsonFileStore;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize settings: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("settings loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Contents of `settings.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Vendor host; only changed for staging or a recording proxy.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Seconds to wait for the panel to apply an order.
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Name sent when registering a device whose record has none.
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Credential record location; defaults to `credentials.json` beside
    /// the settings file.
    pub credentials_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            operation_timeout: default_operation_timeout(),
            insecure: false,
            ca_cert: None,
            device_name: default_device_name(),
            credentials_file: None,
        }
    }
}

fn default_base_url() -> String {
    nexecur_core::ClientConfig::default().base_url.to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_operation_timeout() -> u64 {
    60
}
fn default_device_name() -> String {
    DEFAULT_DEVICE_NAME.into()
}

// ── Paths ───────────────────────────────────────────────────────────

/// Platform config directory (`~/.config/nexecur` on Linux).
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("fr", "nexecur", "nexecur").map_or_else(dirs_fallback, |dirs| {
        dirs.config_dir().to_path_buf()
    })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("nexecur");
    p
}

/// Resolve the settings file path.
pub fn config_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Default credential record path.
pub fn default_credentials_path() -> PathBuf {
    config_dir().join("credentials.json")
}

// ── Loading ─────────────────────────────────────────────────────────

impl Settings {
    /// Load from the canonical settings file plus environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    /// Load from `path` plus environment. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("NEXECUR_"))
            .extract()?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Serialize to TOML at the canonical path.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Where the credential record lives.
    pub fn credentials_path(&self) -> PathBuf {
        self.credentials_file
            .clone()
            .unwrap_or_else(default_credentials_path)
    }

    /// Translate to the runtime configuration core consumes.
    pub fn to_client_config(&self) -> Result<ClientConfig, ConfigError> {
        let base_url: url::Url = self.base_url.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", self.base_url),
        })?;
        if self.operation_timeout == 0 {
            return Err(ConfigError::Validation {
                field: "operation_timeout".into(),
                reason: "must be at least one second".into(),
            });
        }

        let tls = if self.insecure {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        };

        Ok(ClientConfig {
            base_url,
            tls,
            timeout: Duration::from_secs(self.timeout),
            operation_timeout: Duration::from_secs(self.operation_timeout),
            default_device_name: self.device_name.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        Jail::expect_with(|jail| {
            let settings = Settings::load_from(&jail.directory().join("absent.toml")).unwrap();
            assert_eq!(settings, Settings::default());
            assert_eq!(settings.operation_timeout, 60);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "settings.toml",
                r#"
                    timeout = 10
                    operation_timeout = 90
                    device_name = "Hallway"
                "#,
            )?;
            jail.set_env("NEXECUR_OPERATION_TIMEOUT", "120");

            let settings = Settings::load_from(&jail.directory().join("settings.toml")).unwrap();
            assert_eq!(settings.timeout, 10);
            assert_eq!(settings.operation_timeout, 120);
            assert_eq!(settings.device_name, "Hallway");
            Ok(())
        });
    }

    #[test]
    fn client_config_translation() {
        let settings = Settings {
            ca_cert: Some(PathBuf::from("/etc/ca.pem")),
            operation_timeout: 15,
            ..Settings::default()
        };
        let config = settings.to_client_config().unwrap();
        assert_eq!(config.tls, TlsVerification::CustomCa(PathBuf::from("/etc/ca.pem")));
        assert_eq!(config.operation_timeout, Duration::from_secs(15));
        assert_eq!(config.default_device_name, DEFAULT_DEVICE_NAME);
    }

    #[test]
    fn insecure_wins_over_ca_cert() {
        let settings = Settings {
            insecure: true,
            ca_cert: Some(PathBuf::from("/etc/ca.pem")),
            ..Settings::default()
        };
        assert_eq!(
            settings.to_client_config().unwrap().tls,
            TlsVerification::DangerAcceptInvalid
        );
    }

    #[test]
    fn rejects_bad_base_url() {
        let settings = Settings {
            base_url: "not a url".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.to_client_config(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn save_round_trips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/settings.toml");
        let settings = Settings {
            device_name: "Garage".into(),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.device_name, "Garage");
    }

    #[test]
    fn credentials_path_override() {
        let settings = Settings {
            credentials_file: Some(PathBuf::from("/tmp/creds.json")),
            ..Settings::default()
        };
        assert_eq!(settings.credentials_path(), PathBuf::from("/tmp/creds.json"));
    }
}
