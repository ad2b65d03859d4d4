// Transport seam and the reqwest-backed implementation.
//
// `TransportClient` is the single capability the rest of the workspace
// needs from the network: POST a JSON body with headers, get JSON back.
// `HttpTransport` is the production implementation; tests substitute
// scripted transports without touching any shared state.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::endpoints;
use crate::error::Error;

/// Headers attached to every vendor request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    /// Value of `X-Auth-Token`; empty until the site call issues a token.
    pub auth_token: String,
}

impl RequestHeaders {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            auth_token: token.into(),
        }
    }

    fn to_header_map(&self) -> Result<HeaderMap, Error> {
        let mut map = HeaderMap::new();
        map.insert(CONTENT_TYPE, HeaderValue::from_static(endpoints::CONTENT_TYPE));
        map.insert(
            HeaderName::from_static(endpoints::AUTH_TOKEN_HEADER),
            HeaderValue::from_str(&self.auth_token)?,
        );
        Ok(map)
    }
}

/// Performs one POST request and returns the parsed JSON body.
///
/// Implementations must not interpret the vendor's `message`/`status`
/// fields; they only report whether a JSON document came back.
#[async_trait]
pub trait TransportClient: Send + Sync {
    async fn post(&self, url: &Url, headers: &RequestHeaders, body: &Value)
    -> Result<Value, Error>;
}

#[async_trait]
impl<T: TransportClient + ?Sized> TransportClient for std::sync::Arc<T> {
    async fn post(
        &self,
        url: &Url,
        headers: &RequestHeaders,
        body: &Value,
    ) -> Result<Value, Error> {
        (**self).post(url, headers, body).await
    }
}

// ── reqwest implementation ───────────────────────────────────────────

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (debugging proxies only).
    DangerAcceptInvalid,
}

/// Transport configuration for building the HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("nexecur/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, Error> {
        Ok(Self {
            http: config.build_client()?,
        })
    }

    /// Wrap a pre-built `reqwest::Client`.
    pub fn from_reqwest(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TransportClient for HttpTransport {
    async fn post(
        &self,
        url: &Url,
        headers: &RequestHeaders,
        body: &Value,
    ) -> Result<Value, Error> {
        debug!("POST {}", url);

        // Body is written raw so the vendor's form content type survives.
        let payload = serde_json::to_vec(body)?;
        let resp = self
            .http
            .post(url.clone())
            .headers(headers.to_header_map()?)
            .body(payload)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(Error::HttpStatus {
                status: status.as_u16(),
                body: text,
            }),
            Err(e) => Err(Error::Deserialization {
                message: e.to_string(),
                body: text,
            }),
        }
    }
}
