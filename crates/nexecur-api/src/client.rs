// Typed endpoint client
//
// Wraps a `TransportClient` with URL construction, request encoding and
// response decoding. No method judges `message`/`status`: every response
// comes back as-is so callers can apply the endpoint-specific convention.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::endpoints;
use crate::error::Error;
use crate::models::{
    ConfigurationResponse, PanelCheckResponse, PanelStatusResponse, RegisterRequest,
    RegisterResponse, SaltResponse, SiteRequest, SiteResponse, StreamResponse,
};
use crate::transport::{RequestHeaders, TransportClient};

/// Client for the vendor web services.
///
/// Generic over the transport so tests can inject a scripted one; in
/// production this is [`HttpTransport`](crate::HttpTransport).
pub struct NexecurClient<T> {
    transport: T,
    base_url: Url,
}

impl<T: TransportClient> NexecurClient<T> {
    /// Create a client against an explicit base URL (mock servers, staging).
    pub fn new(transport: T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// Create a client against the production host.
    pub fn production(transport: T) -> Result<Self, Error> {
        Ok(Self::new(transport, Url::parse(endpoints::BASE_URL)?))
    }

    /// The base URL every path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `POST /webservices/configuration` with `{os: "android"}`.
    pub async fn configuration(&self) -> Result<ConfigurationResponse, Error> {
        self.send(
            endpoints::CONFIGURATION,
            &RequestHeaders::anonymous(),
            &json!({ "os": "android" }),
        )
        .await
    }

    /// `POST /webservices/salt`. Always sent without a token.
    pub async fn salt(&self, request: &SiteRequest<'_>) -> Result<SaltResponse, Error> {
        debug!(id_site = request.id_site, "requesting salt");
        self.send(endpoints::SALT, &RequestHeaders::anonymous(), request)
            .await
    }

    /// `POST /webservices/site`: authenticates and returns the panel state.
    pub async fn site(&self, token: &str, request: &SiteRequest<'_>) -> Result<SiteResponse, Error> {
        debug!(id_site = request.id_site, "authenticating with site");
        self.send(endpoints::SITE, &RequestHeaders::with_token(token), request)
            .await
    }

    /// `POST /webservices/register`.
    pub async fn register(
        &self,
        token: &str,
        request: &RegisterRequest<'_>,
    ) -> Result<RegisterResponse, Error> {
        debug!(device_name = request.device_name, "registering device");
        self.send(endpoints::REGISTER, &RequestHeaders::with_token(token), request)
            .await
    }

    /// `POST /webservices/panel-status`.
    ///
    /// With `Some(command)` the body is `{status: command}` and the panel is
    /// ordered to change state; with `None` the body is `{}`.
    pub async fn panel_status(
        &self,
        token: &str,
        command: Option<u8>,
    ) -> Result<PanelStatusResponse, Error> {
        let body = match command {
            Some(status) => json!({ "status": status }),
            None => json!({}),
        };
        self.send(endpoints::PANEL_STATUS, &RequestHeaders::with_token(token), &body)
            .await
    }

    /// `POST /webservices/check-panel-status` with an empty body.
    pub async fn check_panel_status(&self, token: &str) -> Result<PanelCheckResponse, Error> {
        self.send(
            endpoints::CHECK_PANEL_STATUS,
            &RequestHeaders::with_token(token),
            &json!({}),
        )
        .await
    }

    /// `POST /webservices/stream` for a device serial.
    pub async fn stream(&self, token: &str, serial: &str) -> Result<StreamResponse, Error> {
        debug!(serial, "requesting stream");
        self.send(
            endpoints::STREAM,
            &RequestHeaders::with_token(token),
            &json!({ "serial": serial }),
        )
        .await
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    async fn send<R: DeserializeOwned>(
        &self,
        path: &str,
        headers: &RequestHeaders,
        body: &impl Serialize,
    ) -> Result<R, Error> {
        let url = self.url(path)?;
        let body = serde_json::to_value(body)?;
        let raw: Value = self.transport.post(&url, headers, &body).await?;

        serde_json::from_value(raw.clone()).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: raw.to_string(),
        })
    }
}
