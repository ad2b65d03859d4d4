// ── Runtime connection configuration ──
//
// Describes *how* to talk to the vendor: host, timeouts, TLS and the
// polling budget. Never touches disk; the CLI (or any embedder) builds a
// `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use nexecur_api::endpoints;
use nexecur_api::transport::{TlsMode, TransportConfig};

/// Name sent at registration when the record has none.
pub const DEFAULT_DEVICE_NAME: &str = "Nexecur API Device";

/// Upper bound on waiting for the panel to apply an order.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (intercepting proxies only).
    DangerAcceptInvalid,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Vendor host.
    pub base_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Wall-clock budget for the completion-polling loop.
    pub operation_timeout: Duration,
    /// Used at registration when the record's `deviceName` is empty.
    pub default_device_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(endpoints::BASE_URL).expect("BASE_URL is a valid URL"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            default_device_name: DEFAULT_DEVICE_NAME.into(),
        }
    }
}

impl ClientConfig {
    /// Transport settings for building an `HttpTransport`.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
